mod config;
mod db;
mod document;
mod engine;
mod errors;
mod models;
mod records;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::records::{MemoryRecordStore, PgRecordStore, RecordStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Careerbook API v{}", env!("CARGO_PKG_VERSION"));
    info!("Clock offset for the current month: {}", config.clock_utc_offset);

    let store: Arc<dyn RecordStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.database_max_connections).await?;
            Arc::new(PgRecordStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set; records are kept in memory and lost on restart");
            Arc::new(MemoryRecordStore::default())
        }
    };

    let state = AppState::new(store, config.clock_utc_offset);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
