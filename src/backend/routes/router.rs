//! Router Configuration
//!
//! This module provides the main router creation function that combines
//! all route configurations into a single Axum router.
//!
//! # Route Order
//!
//! 1. Health check
//! 2. RPC routes (policy procedures)
//! 3. Scheduled job routes
//! 4. Fallback handler (404)
//!
//! A permissive CORS layer wraps the whole router so the scheduler's and
//! the app shell's preflight requests succeed without per-route handling.

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::routes::job_routes::configure_job_routes;
use crate::backend::routes::rpc_routes::configure_rpc_routes;
use crate::backend::server::state::AppState;

/// Health check endpoint
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let router = Router::new().route("/health", axum::routing::get(health));

    // Add RPC routes
    let router = configure_rpc_routes(router);

    // Add scheduled job routes
    let router = configure_job_routes(router);

    // Fallback handler for 404
    let router =
        router.fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") });

    router.layer(cors).with_state(app_state)
}
