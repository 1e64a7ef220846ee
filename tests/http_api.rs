//! End-to-end tests for the request listener over a real loopback socket.

use std::sync::Arc;

use hostbridge::api::{self, AppState};
use hostbridge::bridge::Bridge;
use hostbridge::host::Workbench;
use hostbridge::tools::workbench_registry;
use serde_json::{json, Value};

const TOKEN: &str = "test-secret";

/// Spin up a listener on an ephemeral port. The returned `Bridge` keeps the
/// host executor alive for the duration of the test.
async fn spawn_server() -> (String, Bridge<Workbench>) {
    let registry = Arc::new(workbench_registry());
    let bridge = Bridge::start(Workbench::new("Test Doc"));
    let state = Arc::new(AppState::new(
        bridge.handle(),
        registry,
        TOKEN.to_string(),
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, api::router(state))
            .await
            .expect("serve");
    });

    (format!("http://{}", addr), bridge)
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn requests_without_the_token_get_401_on_every_route() {
    let (base, _bridge) = spawn_server().await;

    for path in ["/ping", "/state", "/does-not-exist"] {
        let response = client()
            .get(format!("{}{}", base, path))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), 401, "missing token on {}", path);

        let body: Value = response.json().await.expect("json body");
        assert_eq!(body, json!({"ok": false, "error": "unauthorized"}));
    }

    // Wrong token on an unknown route: auth still wins over routing.
    let response = client()
        .post(format!("{}/does-not-exist", base))
        .header("X-Token", "wrong")
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn ping_answers_without_the_bridge() {
    let (base, _bridge) = spawn_server().await;

    let response = client()
        .get(format!("{}/ping", base))
        .header("X-Token", TOKEN)
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body, json!({"ok": true, "result": {"message": "pong"}}));
}

#[tokio::test]
async fn unknown_routes_with_a_valid_token_get_json_404() {
    let (base, _bridge) = spawn_server().await;

    let response = client()
        .get(format!("{}/nope", base))
        .header("X-Token", TOKEN)
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body, json!({"ok": false, "error": "not found"}));
}

#[tokio::test]
async fn malformed_tool_bodies_are_400_and_submit_nothing() {
    let (base, _bridge) = spawn_server().await;

    let response = client()
        .post(format!("{}/tool", base))
        .header("X-Token", TOKEN)
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body, json!({"ok": false, "error": "invalid json"}));

    // Nothing reached the host: the journal stays empty.
    let state: Value = client()
        .get(format!("{}/state", base))
        .header("X-Token", TOKEN)
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");
    assert_eq!(state["result"]["journal"], json!([]));
}

#[tokio::test]
async fn unknown_tools_report_the_available_list_without_reaching_the_host() {
    let (base, _bridge) = spawn_server().await;

    let response = client()
        .post(format!("{}/tool", base))
        .header("X-Token", TOKEN)
        .json(&json!({"tool": "nonexistent", "args": {}}))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200, "unknown tool is data, not transport");

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["ok"], false);
    assert!(body["error"]
        .as_str()
        .expect("error string")
        .contains("unknown tool"));
    assert_eq!(
        body["available"],
        json!([
            "delete_param",
            "get_state",
            "list_params",
            "ping",
            "reset_workbench",
            "set_param",
        ])
    );
}

#[tokio::test]
async fn tool_calls_mutate_host_state_and_show_up_in_the_snapshot() {
    let (base, _bridge) = spawn_server().await;

    let response = client()
        .post(format!("{}/tool", base))
        .header("X-Token", TOKEN)
        .json(&json!({"tool": "set_param", "args": {"name": "width", "value": 40.0}}))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["ok"], true);
    assert_eq!(body["result"]["created"], true);

    let state: Value = client()
        .get(format!("{}/state", base))
        .header("X-Token", TOKEN)
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(state["ok"], true);
    assert_eq!(state["result"]["documentName"], "Test Doc");
    assert_eq!(state["result"]["parameters"][0]["name"], "width");
    assert_eq!(state["result"]["journal"][0]["op"], "set_param");
}

#[tokio::test]
async fn handler_failures_are_200_with_ok_false_and_a_trace() {
    let (base, _bridge) = spawn_server().await;

    let response = client()
        .post(format!("{}/tool", base))
        .header("X-Token", TOKEN)
        .json(&json!({"tool": "delete_param", "args": {"name": "ghost"}}))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200, "operation failure is not a transport failure");

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "No parameter named 'ghost'.");
    assert!(body["trace"].is_string());
}

#[tokio::test]
async fn ping_tool_goes_through_the_bridge() {
    let (base, _bridge) = spawn_server().await;

    let body: Value = client()
        .post(format!("{}/tool", base))
        .header("X-Token", TOKEN)
        .json(&json!({"tool": "ping"}))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body, json!({"ok": true, "result": {"message": "pong"}}));
}
