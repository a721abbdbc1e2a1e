use std::net::SocketAddr;

use axum::Router;
use common::env::check_jwt_secret;
use configs::{AppConfig, DEV_JWT_SECRET};
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::{Repositories, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "draining connections");
    }
}

/// Public entry: connect, migrate, and run the HTTP server with an already
/// validated config. Logging is expected to be initialised by the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    check_jwt_secret(&cfg.auth.jwt_secret, DEV_JWT_SECRET).map_err(|e| StartupError::Runtime(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        Migrator::up(&db, None).await?;
        info!(event = "migrations_applied", "database schema up to date");
    }

    let state = ServerState::new(&cfg, Repositories::seaorm(db));
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
