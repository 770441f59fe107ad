//! Routes Module
//!
//! HTTP route configuration and router assembly.

pub mod job_routes;
pub mod router;
pub mod rpc_routes;

pub use router::create_router;
