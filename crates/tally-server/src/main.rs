//! Tally Server
//!
//! A small metrics-collecting backend: serves static assets, records page
//! views, clicks and signups, and exposes the aggregate counts over JSON.
//!
//! Counters go to PostgreSQL when `DATABASE_URL` is set and reachable;
//! otherwise everything lives in process memory.

mod config;
mod handlers;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::Config;
use storage::{Database, MemoryStore, Storage};

/// Static assets are served from here, relative to the working directory.
pub(crate) const PUBLIC_DIR: &str = "public";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting tally-server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let storage = Arc::new(select_storage(&config).await);
    let app = router(AppState { storage });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Picks the backend once. A database that fails to connect or bootstrap
/// downgrades to the in-memory store for the rest of the process lifetime;
/// there is no retry.
async fn select_storage(config: &Config) -> Storage {
    let Some(url) = &config.database_url else {
        info!("DATABASE_URL not set, using in-memory store");
        return Storage::Memory(MemoryStore::new());
    };

    let relaxed = config::relaxed_tls(url);
    if relaxed {
        info!("Managed database host detected, relaxing certificate verification");
    }

    match Database::connect(url, relaxed).await {
        Ok(db) => {
            info!("Database ready");
            Storage::Postgres(db)
        }
        Err(e) => {
            error!("Database init error: {:#}; falling back to in-memory store", e);
            Storage::Memory(MemoryStore::new())
        }
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::events::home))
        .route("/api/ping", get(handlers::health::ping))
        .route("/api/click", post(handlers::events::click))
        .route("/api/signup", post(handlers::events::signup))
        .route("/api/metrics", get(handlers::metrics::metrics))
        .fallback_service(ServeDir::new(PUBLIC_DIR))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
