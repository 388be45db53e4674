//! Backend entry-point: wires the account API, health probes, and the
//! PostgreSQL pool.

use actix_web::{App, HttpServer, web};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portal_backend::inbound::http::health::{HealthState, live, ready};
use portal_backend::outbound::persistence::{DbPool, PoolConfig};
use portal_backend::server::{ServerConfig, build_http_state, configure_api};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    run_migrations(config.database_url())?;

    let pool = DbPool::new(PoolConfig::new(config.database_url()))
        .await
        .map_err(std::io::Error::other)?;

    let state = web::Data::new(build_http_state(pool));
    let health_state = web::Data::new(HealthState::new());
    // Clones for the server factory so the originals stay available here.
    let server_state = state.clone();
    let server_health = health_state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .app_data(server_health.clone())
            .configure(configure_api)
            .service(ready)
            .service(live)
    })
    .bind(config.bind_addr())?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr(), "account backend listening");
    server.run().await
}

/// Apply pending migrations before serving traffic. The users table's
/// UNIQUE constraints live here, so the service must not start without
/// them.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = PgConnection::establish(database_url).map_err(std::io::Error::other)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(std::io::Error::other)?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied pending migrations");
    }
    Ok(())
}
