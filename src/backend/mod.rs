//! Backend Module
//!
//! This module contains all server-side code for the Kindred policy service.
//! It provides an Axum HTTP server exposing the policy RPC surface and the
//! scheduled anti-ghosting jobs, backed by PostgreSQL.
//!
//! # Overview
//!
//! The backend module includes:
//! - Axum HTTP server setup and configuration
//! - The conversation policy store (active counts, admission, pause gating)
//! - The ghosting detector and trust-signal calculator
//! - The nudge dispatcher and its HTTP-triggered job endpoints
//! - Route configuration
//! - Database persistence (PostgreSQL)
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`policy`** - The conversation policy store: counting, admission,
//!   pause, and the conversation write paths
//! - **`ghosting`** - Lapse detection and trust-signal recalculation
//! - **`nudge`** - Nudge candidate queries and both dispatcher jobs
//! - **`jobs`** - HTTP endpoints for the external scheduler
//! - **`error`** - Backend-specific error types
//!
//! # State Management
//!
//! `AppState` carries an optional PostgreSQL pool. A missing database
//! degrades the server rather than killing it: data-backed endpoints answer
//! 503 (RPC) or a failed job summary while health checks keep passing.
//!
//! # Concurrency
//!
//! The batch jobs are stateless and idempotent. Stage guards on conversation
//! rows and cooldown stamps make overlapping scheduler invocations safe
//! without distributed locking; re-running a job can only skip work that a
//! concurrent run already did.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Conversation policy store
pub mod policy;

/// Ghosting detection and trust signals
pub mod ghosting;

/// Nudge dispatching
pub mod nudge;

/// HTTP-triggered scheduled jobs
pub mod jobs;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::init::create_app;
