//! Outbound adapters: PostgreSQL persistence and password hashing.

pub mod persistence;
pub mod security;
