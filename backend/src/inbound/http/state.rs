//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain use-cases and remain testable without I/O.

use crate::domain::AccountService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account registration, authentication, and availability use-cases.
    pub accounts: AccountService,
}

impl HttpState {
    /// Bundle the account service for handler injection.
    pub const fn new(accounts: AccountService) -> Self {
        Self { accounts }
    }
}
