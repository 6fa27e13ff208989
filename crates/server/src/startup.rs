use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, AuthConfig, ServerConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Create the configured admin account unless it already exists.
async fn bootstrap_admin(state: &auth::ServerState, cfg: &AuthConfig) -> anyhow::Result<()> {
    let Some((username, password)) = cfg.bootstrap_account() else {
        info!("no bootstrap admin configured");
        return Ok(());
    };
    let created = state.auth_service().ensure_admin(username, password).await?;
    info!(username, created, "bootstrap admin ready");
    Ok(())
}

/// Public entry: connect, migrate, build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let state = auth::ServerState { db, auth: auth::ServerAuthConfig::from(&cfg.auth) };
    bootstrap_admin(&state, &cfg.auth).await?;

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
