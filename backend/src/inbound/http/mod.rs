//! HTTP adapter: request/response DTOs, handlers, and error envelopes.
//!
//! Handlers depend only on [`crate::domain`] through the shared
//! [`state::HttpState`], so they stay testable without a database.

pub mod accounts;
pub mod error;
pub mod health;
pub mod state;

pub use error::{ApiError, ApiResult, json_error_handler};
pub use state::HttpState;
