//! Kindred - Conversation Policy Service
//!
//! Kindred is the behavioral-policy core of a mobile dating application.
//! Instead of letting matches pile up, the product caps each user at a small
//! number of simultaneous conversations, detects one-sided silence
//! ("ghosting"), decays the discovery visibility of repeat offenders, and
//! nudges people back into replying or closing gracefully.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types and policy rules shared between client and server
//!   - The single source of truth for policy constants (conversation cap,
//!     inactivity thresholds, cooldown windows)
//!   - Conversation lifecycle stages and transition rules
//!   - Response patterns, trust signals, notifications, pause state
//!   - Error types
//!
//! - **`backend`** - Server-side code (Axum + PostgreSQL)
//!   - The authoritative policy store (active-conversation counting,
//!     admission checks, pause gating)
//!   - The ghosting detector and trust-signal calculator
//!   - The nudge dispatcher jobs, exposed as HTTP-triggered endpoints for
//!     an external scheduler
//!
//! - **`client`** - App-facing policy gate (reqwest)
//!   - Read-only checks that fail open so a backend hiccup never blocks
//!     browsing or messaging
//!   - The pause gate, which fails closed until a check succeeds
//!   - Pure view state for the limit banner, swipe overlay, and pause dialog
//!
//! # Architecture
//!
//! All authoritative counting and mutation lives server-side; the client is
//! an untrusted, read-only view. Batch jobs are stateless and idempotent so
//! overlapping scheduler invocations are safe.

/// Shared types and policy rules
pub mod shared;

/// Backend server-side code
pub mod backend;

/// App-facing policy gate client
pub mod client;
