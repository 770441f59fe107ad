//! Client Module
//!
//! The app-facing side of the policy system: a thin RPC caller plus the
//! gate types the UI layer drives.
//!
//! # Failure Philosophy
//!
//! The browse gates fail OPEN: a timeout or backend error yields permissive
//! defaults and a log line, never a blocked user. Nothing here mutates
//! state, so an optimistic answer is always safe; the server re-validates
//! every actual action.
//!
//! The pause gate fails CLOSED: pausing is a mutation with a precondition,
//! so an unverifiable check leaves the pause action disabled until a check
//! succeeds.

/// Client configuration
pub mod config;

/// Thin RPC caller
pub mod rpc;

/// Fail-open browse gates
pub mod gate;

/// Fail-closed pause gate
pub mod pause;

/// Pure view state for the policy UI surfaces
pub mod banner;

pub use config::Config;
pub use gate::{ConversationStatus, PolicyGate, SwipeLimits};
pub use pause::{PauseAvailability, PauseGate, PauseOutcome};
pub use rpc::{ClientError, PolicyRpcClient};
