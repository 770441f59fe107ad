//! Client policy gate integration tests
//!
//! Drives the fail-open browse gates and the fail-closed pause gate against
//! a stubbed RPC surface, covering the user-visible limit scenarios.

mod common;

use pretty_assertions::assert_eq;
use uuid::Uuid;
use wiremock::MockServer;

use kindred::client::banner::{LimitBannerState, PauseDialogState, SwipeOverlayState};
use kindred::client::{Config, PauseAvailability, PauseGate, PauseOutcome, PolicyGate};
use kindred::shared::policy;

use common::{stub_rpc, stub_rpc_error};

fn gate_for(server: &MockServer) -> PolicyGate {
    PolicyGate::new(Config::with_server_url(server.uri())).unwrap()
}

fn pause_gate_for(server: &MockServer) -> PauseGate {
    PauseGate::new(Config::with_server_url(server.uri())).unwrap()
}

#[tokio::test]
async fn user_at_cap_sees_the_limit_overlay() {
    let server = MockServer::start().await;
    stub_rpc(&server, "get_active_conversation_count", serde_json::json!(3)).await;
    stub_rpc(&server, "can_start_new_conversation", serde_json::json!(false)).await;

    let gate = gate_for(&server);
    let user = Uuid::new_v4();

    let status = gate.conversation_status(user).await;
    assert_eq!(status.active_count, 3);
    assert_eq!(status.max_conversations, 3);
    assert_eq!(status.remaining_slots, 0);
    assert!(!status.can_start_new);

    let limits = gate.swipe_limits(user).await;
    assert!(!limits.can_swipe);

    let overlay = SwipeOverlayState::from_limits(&limits, status.max_conversations);
    assert!(overlay.visible);
    assert_eq!(overlay.active_count, 3);
    assert_eq!(overlay.max_conversations, 3);
    assert_eq!(overlay.remaining_slots, 0);

    assert_eq!(LimitBannerState::from_status(&status), LimitBannerState::AtLimit);
}

#[tokio::test]
async fn user_below_cap_can_start_new_conversations() {
    let server = MockServer::start().await;
    stub_rpc(&server, "get_active_conversation_count", serde_json::json!(1)).await;
    stub_rpc(&server, "can_start_new_conversation", serde_json::json!(true)).await;

    let gate = gate_for(&server);
    let status = gate.conversation_status(Uuid::new_v4()).await;

    assert!(status.can_start_new);
    assert_eq!(status.remaining_slots, 2);
    assert_eq!(
        LimitBannerState::from_status(&status),
        LimitBannerState::Remaining { used: 1, remaining: 2 }
    );
}

#[tokio::test]
async fn browse_gate_fails_open_on_server_error() {
    let server = MockServer::start().await;
    stub_rpc_error(&server, "get_active_conversation_count", 500).await;
    stub_rpc_error(&server, "can_start_new_conversation", 500).await;

    let gate = gate_for(&server);
    let status = gate.conversation_status(Uuid::new_v4()).await;

    assert!(status.can_start_new);
    assert_eq!(status.remaining_slots, policy::MAX_ACTIVE_CONVERSATIONS);

    let limits = gate.swipe_limits(Uuid::new_v4()).await;
    assert!(limits.can_swipe);
}

#[tokio::test]
async fn browse_gate_fails_open_when_unreachable() {
    // nothing listens here; the connection is refused immediately
    let gate = PolicyGate::new(Config::with_server_url("http://127.0.0.1:9")).unwrap();

    let status = gate.conversation_status(Uuid::new_v4()).await;
    assert!(status.can_start_new);
    assert_eq!(status.active_count, 0);
}

#[tokio::test]
async fn admission_verdict_derived_locally_when_only_that_check_fails() {
    let server = MockServer::start().await;
    stub_rpc(&server, "get_active_conversation_count", serde_json::json!(3)).await;
    stub_rpc_error(&server, "can_start_new_conversation", 500).await;

    let gate = gate_for(&server);
    let status = gate.conversation_status(Uuid::new_v4()).await;

    // the count round-trip succeeded, so the local mirror of the rule applies
    assert_eq!(status.active_count, 3);
    assert!(!status.can_start_new);
}

#[tokio::test]
async fn pause_gate_blocks_with_active_conversations() {
    let server = MockServer::start().await;
    stub_rpc(
        &server,
        "can_pause_dating",
        serde_json::json!({ "can_pause": false, "active_conversation_count": 2 }),
    )
    .await;

    let gate = pause_gate_for(&server);
    let availability = gate.check(Uuid::new_v4()).await;

    assert_eq!(availability, PauseAvailability::Blocked { active_count: 2 });
    assert_eq!(
        PauseDialogState::from_availability(&availability),
        PauseDialogState::RedirectToConversations { active_count: 2 }
    );
}

#[tokio::test]
async fn pause_gate_fails_closed_on_server_error() {
    let server = MockServer::start().await;
    stub_rpc_error(&server, "can_pause_dating", 500).await;

    let gate = pause_gate_for(&server);
    let availability = gate.check(Uuid::new_v4()).await;

    assert_eq!(availability, PauseAvailability::Unavailable);
    assert_eq!(
        PauseDialogState::from_availability(&availability),
        PauseDialogState::Disabled
    );
}

#[tokio::test]
async fn pause_flow_succeeds_with_no_active_conversations() {
    let server = MockServer::start().await;
    stub_rpc(
        &server,
        "can_pause_dating",
        serde_json::json!({ "can_pause": true, "active_conversation_count": 0 }),
    )
    .await;
    stub_rpc(
        &server,
        "pause_dating",
        serde_json::json!({ "success": true, "error": null }),
    )
    .await;

    let gate = pause_gate_for(&server);
    let user = Uuid::new_v4();

    assert_eq!(gate.check(user).await, PauseAvailability::Available);

    let outcome = gate
        .pause(user, Some("focusing on work".to_string()))
        .await
        .unwrap();
    assert_eq!(outcome, PauseOutcome::Paused);
}

#[tokio::test]
async fn pause_rejection_carries_the_server_message() {
    let server = MockServer::start().await;
    stub_rpc(
        &server,
        "pause_dating",
        serde_json::json!({
            "success": false,
            "error": "Wrap up your active conversations before pausing"
        }),
    )
    .await;

    let gate = pause_gate_for(&server);
    let outcome = gate.pause(Uuid::new_v4(), None).await.unwrap();

    assert_eq!(
        outcome,
        PauseOutcome::Rejected {
            message: "Wrap up your active conversations before pausing".to_string()
        }
    );
}
