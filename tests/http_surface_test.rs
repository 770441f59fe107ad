//! HTTP surface integration tests
//!
//! Exercises the router without a database: health stays green, the RPC
//! surface reports the outage as 503, and the job endpoints answer with the
//! total-failure shape. CORS headers are checked so the scheduler's
//! cross-origin invocations keep working.

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use uuid::Uuid;

use kindred::backend::server::init::create_app_with_state;
use kindred::backend::server::state::AppState;

fn server_without_database() -> TestServer {
    let app = create_app_with_state(AppState::new(None));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn health_check_passes_without_database() {
    let server = server_without_database();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn rpc_reports_unavailable_without_database() {
    let server = server_without_database();

    let response = server
        .post("/rpc/can_start_new_conversation")
        .json(&serde_json::json!({ "p_user_id": Uuid::new_v4() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn pause_check_reports_unavailable_without_database() {
    let server = server_without_database();

    let response = server
        .post("/rpc/can_pause_dating")
        .json(&serde_json::json!({ "p_user_id": Uuid::new_v4() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn nudge_job_total_failure_shape() {
    let server = server_without_database();

    let response = server.post("/jobs/send-conversation-nudges").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn reminder_job_total_failure_shape() {
    let server = server_without_database();

    let response = server.post("/jobs/send-ghosting-reminder").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn stats_job_total_failure_shape() {
    let server = server_without_database();

    let response = server.post("/jobs/update-ghosting-stats").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn job_preflight_is_answered() {
    let server = server_without_database();

    let response = server
        .method(Method::OPTIONS, "/jobs/send-conversation-nudges")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://app.example.com"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await;

    assert!(response.status_code().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}

#[tokio::test]
async fn cross_origin_job_response_carries_cors_headers() {
    let server = server_without_database();

    let response = server
        .post("/jobs/update-ghosting-stats")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://app.example.com"),
        )
        .await;

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_some());
}

#[tokio::test]
async fn unknown_route_is_a_404() {
    let server = server_without_database();

    let response = server.get("/rpc/does_not_exist").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
