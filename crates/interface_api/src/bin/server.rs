//! Peer Claims - API Server Binary
//!
//! This binary starts the HTTP API server for the claims adjudication system.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_ADMINISTRATOR=ST1PQ... API_TREASURY_OPENING_BALANCE=1000000 cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_ADMINISTRATOR` - Administrator principal (default: admin)
//! * `API_MAX_VOTES_PER_CLAIM` - Vote cap per verification session (default: 10)
//! * `API_MAX_DESCRIPTION_LEN` - Claim description limit in characters (default: 500)
//! * `API_VERIFIER_ALLOW_LIST` - Comma-separated verifier principals (default: unset, open)
//! * `API_AUTO_APPLY_RESOLUTION` - Apply verification outcomes immediately (default: false)
//! * `API_TREASURY_OPENING_BALANCE` - Initial pool capital in minor units (default: 0)
//! * `API_BILLING_TICK_SECS` - Seconds per billing-calendar tick (default: 86400)

use interface_api::{config::ApiConfig, create_router, spawn_billing_calendar, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The opening treasury balance cannot be recorded
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        administrator = %config.administrator,
        max_votes = config.max_votes_per_claim,
        auto_apply = config.auto_apply_resolution,
        "Starting Peer Claims API Server"
    );

    let state = AppState::bootstrap(config.clone())?;
    let calendar = spawn_billing_calendar(state.pool.clone(), config.billing_tick());
    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    calendar.abort();
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
