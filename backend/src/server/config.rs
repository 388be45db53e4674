//! HTTP server configuration loaded from the environment.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Default bind address when `BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Configuration failures surfaced at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `DATABASE_URL` was not set.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// `BIND_ADDR` was set but not parseable as a socket address.
    #[error("BIND_ADDR is not a valid socket address: {value}")]
    InvalidBindAddr { value: String },
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    database_url: String,
}

impl ServerConfig {
    /// Build a configuration from explicit values.
    pub const fn new(bind_addr: SocketAddr, database_url: String) -> Self {
        Self {
            bind_addr,
            database_url,
        }
    }

    /// Load configuration from `DATABASE_URL` and `BIND_ADDR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let bind_raw = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { value: bind_raw })?;
        Ok(Self::new(bind_addr, database_url))
    }

    /// Socket address the server binds to.
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// PostgreSQL connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_values_round_trip() {
        let addr: SocketAddr = "127.0.0.1:5000".parse().expect("valid address");
        let config = ServerConfig::new(addr, "postgres://localhost/portal".to_owned());
        assert_eq!(config.bind_addr(), addr);
        assert_eq!(config.database_url(), "postgres://localhost/portal");
    }

    #[rstest]
    fn default_bind_addr_parses() {
        let parsed: Result<SocketAddr, _> = DEFAULT_BIND_ADDR.parse();
        assert!(parsed.is_ok());
    }
}
