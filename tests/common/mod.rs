//! Shared helpers for integration tests

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stub one RPC procedure with a fixed JSON response
pub async fn stub_rpc(server: &MockServer, procedure: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/rpc/{}", procedure)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Stub one RPC procedure with an error status
pub async fn stub_rpc_error(server: &MockServer, procedure: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/rpc/{}", procedure)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
