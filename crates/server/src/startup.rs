use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::{init_logging, LogFormat};
use configs::{AppConfig, SystemSettings};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Install the tracing subscriber in the configured format. Later calls are no-ops.
pub fn init_logging_from(cfg: &AppConfig) {
    let format = cfg.logging.format.parse::<LogFormat>().unwrap_or_else(|e| {
        eprintln!("{e}, falling back to compact logs");
        LogFormat::Compact
    });
    init_logging(format);
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Connect, migrate when configured, seed the administrator and build the shared state.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Runtime(format!("database connect: {e}")))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Runtime(format!("migrations: {e}")))?;
        info!(event = "migrated", "database schema up to date");
    }

    let state = ServerState::new(db, cfg);

    if let Some(seed) = &cfg.identity.seed_admin {
        match state.auth.ensure_admin(seed).await {
            Ok(Some(user)) => info!(user_id = %user.id, "seeded administrator"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, code = e.code(), "administrator seed skipped"),
        }
    }
    Ok(state)
}

/// The router with CORS, tracing and (per config) API docs.
pub fn build_app(state: ServerState, cfg: &AppConfig) -> Router {
    routes::build_router(state, build_cors(), cfg.docs_enabled())
}

/// Public entry: load configuration and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_and_validate()?;
    run_with(cfg).await
}

/// Run the HTTP server with an already loaded configuration.
pub async fn run_with(cfg: AppConfig) -> anyhow::Result<()> {
    init_logging_from(&cfg);
    SystemSettings::install(cfg.system.clone());

    let state = build_state(&cfg).await?;
    let app = build_app(state, &cfg);

    let addr = bind_addr(&cfg)?;
    info!(%addr, environment = %cfg.environment, docs = cfg.docs_enabled(), "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
