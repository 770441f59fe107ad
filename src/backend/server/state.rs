//! Application State Management
//!
//! This module defines the application state structure shared across all
//! request handlers.
//!
//! # Architecture
//!
//! `AppState` is deliberately small: the policy service keeps no in-memory
//! domain state. Every handler and job reads and writes PostgreSQL directly,
//! which is what makes the scheduled jobs stateless and safe to overlap.
//!
//! # Thread Safety
//!
//! `PgPool` is internally reference-counted and thread-safe; cloning
//! `AppState` is cheap and every handler gets its own handle.

use axum::extract::FromRef;
use sqlx::PgPool;

/// Central application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, `None` when the database is unreachable
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(db_pool: Option<PgPool>) -> Self {
        Self { db_pool }
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}
