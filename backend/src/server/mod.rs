//! Server wiring: route registration and adapter-to-domain assembly.

mod config;

use std::sync::Arc;

use actix_web::web;

use crate::domain::AccountService;
use crate::inbound::http::accounts::{check_availability, login, register};
use crate::inbound::http::{HttpState, json_error_handler};
use crate::outbound::persistence::{DbPool, DieselUserRepository};
use crate::outbound::security::Argon2PasswordHasher;

pub use config::{ConfigError, ServerConfig};

/// Mount the account API under `/api`.
///
/// Health probes are registered separately so they stay outside the API
/// scope. Unparseable JSON bodies answer with the standard error envelope
/// instead of the extractor's plain-text rejection.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(register)
            .service(login)
            .service(check_availability),
    );
}

/// Assemble the handler state over database-backed adapters.
pub fn build_http_state(pool: DbPool) -> HttpState {
    let accounts = AccountService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher),
    );
    HttpState::new(accounts)
}
