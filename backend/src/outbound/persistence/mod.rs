//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! The adapter is thin: it translates between Diesel row structs and domain
//! types and maps database failures into the domain's persistence errors.
//! Row structs (`models.rs`) and the schema definition (`schema.rs`) are
//! internal details, never exposed to the domain. Connections come from a
//! `bb8` pool with native async support through `diesel-async`.

mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
