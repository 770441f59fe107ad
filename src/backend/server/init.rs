//! Server Initialization
//!
//! This module handles the initialization and setup of the Axum HTTP
//! server: state creation, database loading, and route configuration.
//!
//! # Initialization Process
//!
//! 1. Load optional services (database)
//! 2. Create app state
//! 3. Create and configure the router
//!
//! The server carries no in-memory domain state, so there is nothing to
//! restore on startup; the database is the only source of truth.

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: server starts degraded, data endpoints report it
/// - Migration failures: logged but don't prevent startup
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing Kindred policy server");

    let db_pool = load_database().await;

    let app_state = AppState::new(db_pool);

    let app = create_router(app_state);

    tracing::info!("Router configured");

    app
}

/// Create the application against an already-connected pool.
///
/// Used by tests that bring their own database (or none at all).
pub fn create_app_with_state(state: AppState) -> Router<()> {
    create_router(state)
}
