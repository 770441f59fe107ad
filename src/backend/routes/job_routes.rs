//! Scheduled Job Route Configuration
//!
//! The job endpoints are fired by an external scheduler over plain HTTP.
//! Preflight requests are answered by the CORS layer installed on the
//! router.

use axum::Router;

use crate::backend::jobs::handlers::{
    run_send_conversation_nudges, run_send_ghosting_reminder, run_update_ghosting_stats,
};
use crate::backend::server::state::AppState;

/// Configure scheduled job routes
///
/// - `POST /jobs/send-conversation-nudges` - soft nudge dispatch
/// - `POST /jobs/send-ghosting-reminder` - escalated reminder dispatch
/// - `POST /jobs/update-ghosting-stats` - detection + trust recalculation
pub fn configure_job_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/jobs/send-conversation-nudges",
            axum::routing::post(run_send_conversation_nudges),
        )
        .route(
            "/jobs/send-ghosting-reminder",
            axum::routing::post(run_send_ghosting_reminder),
        )
        .route(
            "/jobs/update-ghosting-stats",
            axum::routing::post(run_update_ghosting_stats),
        )
}
