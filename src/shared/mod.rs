//! Shared Module
//!
//! This module contains types and rules that are shared between the app
//! client and the backend. All wire types are serde-serializable; the policy
//! constants live here exactly once so the client can render limits without
//! a round trip while the server stays authoritative.

/// Policy constants and pure decision rules
pub mod policy;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Matching domain types (conversations, patterns, trust, notifications)
pub mod matching;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use policy::MAX_ACTIVE_CONVERSATIONS;
