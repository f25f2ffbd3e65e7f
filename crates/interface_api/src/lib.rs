//! HTTP API Layer
//!
//! This crate provides the REST API for the claims adjudication system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims, verification, and premiums
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses carrying domain error codes
//!
//! The adjudication desk sits behind a single async mutex; each request runs
//! one core operation to completion while holding it.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::bootstrap(config)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};
use tracing::{debug, info};

use core_kernel::{AccessPolicy, LogicalClock};
use domain_billing::{BillingError, PremiumPool};
use domain_claims::AdjudicationDesk;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{billing, claims, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub desk: Arc<Mutex<AdjudicationDesk>>,
    pub pool: Arc<PremiumPool>,
    pub access: AccessPolicy,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the desk to a fresh premium pool on one shared clock
    ///
    /// The pool is funded with the configured opening balance.
    pub fn bootstrap(config: ApiConfig) -> Result<Self, BillingError> {
        let clock = LogicalClock::new();
        let access = config.access_policy();
        let pool = Arc::new(PremiumPool::new(clock.clone()));

        let opening = config.treasury_opening_balance();
        if opening.is_positive() {
            pool.fund(opening)?;
            info!(balance = %opening, "Treasury funded");
        }

        let desk = AdjudicationDesk::new(
            access.clone(),
            config.desk_settings(),
            clock,
            pool.clone(),
            pool.clone(),
        );

        Ok(Self {
            desk: Arc::new(Mutex::new(desk)),
            pool,
            access,
            config,
        })
    }
}

/// Advances the pool's billing calendar by one tick per `period`
///
/// Premium periods are measured in these ticks, so the task must run for as
/// long as the pool serves lookups.
pub fn spawn_billing_calendar(pool: Arc<PremiumPool>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        loop {
            ticker.tick().await;
            let today = pool.calendar().tick();
            debug!(calendar = %today, "Billing calendar advanced");
        }
    })
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Desk, pool, and configuration shared by every handler
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/:id", get(claims::get_claim))
        .route("/:id/status", put(claims::update_status))
        .route(
            "/:id/verification",
            post(claims::initialize_verification).get(claims::get_verification),
        )
        .route("/:id/votes", post(claims::cast_vote))
        .route("/:id/process", post(claims::process_verified))
        .route("/:id/pay", post(claims::pay_claim));

    // Premium routes
    let subscription_routes = Router::new()
        .route(
            "/:policy_id",
            post(billing::subscribe)
                .get(billing::get_subscription)
                .delete(billing::cancel_subscription),
        )
        .route("/:policy_id/payments", post(billing::pay_premium));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/subscriptions", subscription_routes)
        .route("/policies/:policy_id", put(billing::register_policy))
        .route("/treasury", get(billing::treasury))
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
