//! RPC Route Configuration
//!
//! The policy procedures are exposed as `POST /rpc/<name>` with named JSON
//! parameters, so the app client calls them like stored procedures. Reads
//! and mutations share the surface; every mutation re-validates its policy
//! rule server-side.

use axum::Router;

use crate::backend::ghosting::handlers::{calculate_trust_signals, detect_and_record_ghosting};
use crate::backend::nudge::handlers::get_conversations_needing_nudge;
use crate::backend::policy::handlers::{
    archive_conversation, can_pause_dating, can_start_new_conversation, close_conversation,
    get_active_conversation_count, pause_dating, resume_dating, send_message,
    start_conversation,
};
use crate::backend::server::state::AppState;

/// Configure RPC routes
///
/// ## Policy reads
/// - `POST /rpc/get_active_conversation_count`
/// - `POST /rpc/can_start_new_conversation`
/// - `POST /rpc/can_pause_dating`
/// - `POST /rpc/get_conversations_needing_nudge`
///
/// ## Conversation actions
/// - `POST /rpc/start_conversation`
/// - `POST /rpc/send_message`
/// - `POST /rpc/close_conversation`
/// - `POST /rpc/archive_conversation`
///
/// ## Pause mode
/// - `POST /rpc/pause_dating`
/// - `POST /rpc/resume_dating`
///
/// ## Batch procedures
/// - `POST /rpc/detect_and_record_ghosting`
/// - `POST /rpc/calculate_trust_signals`
pub fn configure_rpc_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Policy reads
        .route(
            "/rpc/get_active_conversation_count",
            axum::routing::post(get_active_conversation_count),
        )
        .route(
            "/rpc/can_start_new_conversation",
            axum::routing::post(can_start_new_conversation),
        )
        .route(
            "/rpc/can_pause_dating",
            axum::routing::post(can_pause_dating),
        )
        .route(
            "/rpc/get_conversations_needing_nudge",
            axum::routing::post(get_conversations_needing_nudge),
        )
        // Conversation actions
        .route(
            "/rpc/start_conversation",
            axum::routing::post(start_conversation),
        )
        .route("/rpc/send_message", axum::routing::post(send_message))
        .route(
            "/rpc/close_conversation",
            axum::routing::post(close_conversation),
        )
        .route(
            "/rpc/archive_conversation",
            axum::routing::post(archive_conversation),
        )
        // Pause mode
        .route("/rpc/pause_dating", axum::routing::post(pause_dating))
        .route("/rpc/resume_dating", axum::routing::post(resume_dating))
        // Batch procedures
        .route(
            "/rpc/detect_and_record_ghosting",
            axum::routing::post(detect_and_record_ghosting),
        )
        .route(
            "/rpc/calculate_trust_signals",
            axum::routing::post(calculate_trust_signals),
        )
}
