//! Documentation of the travel app mock backend.
//!
//!
//!
//! # General Infrastructure
//! - Two independent axum servers, both in memory, nothing persists across restarts
//! - Catalog server on `PORT` (3002) serves banners, services, promotions, content, cities, search, auth and profiles
//! - Login server on `LOGIN_PORT` (3001) is the older account service the mobile login screen talks to
//! - The catalog is seeded once at startup and only read afterwards
//! - Accounts are the only mutable data and live behind a `tokio::sync::RwLock`
//!
//!
//!
//! # Listing
//!
//! Every list endpoint goes through the same pipeline in the `bank` crate:
//!
//! - Text filter over the collection's searchable fields (`q` or `search`)
//! - Field filters, any other query parameter, case-insensitive match after trimming
//! - Stable sort on `sortBy` with `order` (`desc` unless told otherwise)
//! - 1-based pagination with `page` and `limit`/`pageSize`
//!
//! Unknown filter fields and unknown sort keys are ignored rather than rejected.
//! Non-positive or non-numeric `page`/`limit` values answer 400.
//!
//!
//!
//! # Setup
//!
//! Start the catalog server.
//! ```sh
//! cargo run --bin travel
//! ```
//!
//! Start the login server.
//! ```sh
//! cargo run --bin login
//! ```
//!
//! Reproducible content feed.
//! ```sh
//! CONTENT_SEED=42 CONTENT_COUNT=20 cargo run --bin travel
//! ```
//!
//! Verbose logs.
//! ```sh
//! RUST_LOG=server=debug,tower_http=debug cargo run --bin travel
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod auth;
pub mod config;
pub mod error;
pub mod login;
pub mod routes;
pub mod state;
pub mod user;
pub mod utils;

use config::Config;
use login::LoginState;
use state::AppState;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call, e.g. from tests, keeps the first subscriber
    let _ = fmt().with_env_filter(filter).try_init();
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60))
}

/// Catalog server with its middleware, ready to serve or to drive in tests.
pub fn app(state: Arc<AppState>) -> Router {
    routes::router(state)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

pub fn login_app(state: Arc<LoginState>) -> Router {
    login::router(state)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server() -> Result<()> {
    init_tracing();

    info!("Initializing state...");
    let config = Config::load()?;
    let port = config.port;
    let state = AppState::new(config).context("Failed to seed the demo account")?;

    info!("Starting server...");
    serve(app(state), port).await
}

pub async fn start_login_server() -> Result<()> {
    init_tracing();

    let port = Config::load()?.login_port;

    info!("Starting login server...");
    serve(login_app(LoginState::new()), port).await
}

async fn serve(app: Router, port: u16) -> Result<()> {
    let address = format!("0.0.0.0:{port}");
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
