//! Backend Error Types
//!
//! Error types used by HTTP handlers and the batch jobs.

pub mod types;

pub use types::BackendError;
