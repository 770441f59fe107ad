//! HTTP-Triggered Scheduled Jobs
//!
//! The nudge dispatcher and the ghosting-stats pipeline run as stateless
//! batch jobs behind plain HTTP endpoints, fired by an external scheduler
//! on a cadence. Each invocation processes a bounded batch and exits; there
//! is no long-running worker and no shared in-memory state, so a run is
//! safe even while the previous one is still finishing.

pub mod handlers;
