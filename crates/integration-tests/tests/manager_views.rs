//! Integration tests for manager-only views and role administration.
//!
//! Requires a running API server and database; run with:
//! cargo test -p carelog-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use carelog_integration_tests::{TestWorker, base_url, client_for};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_careworker_denied_manager_views() {
    let worker = TestWorker::careworker();
    let client = client_for(&worker);
    let base = base_url();

    for path in [
        "/api/manager/active-workers",
        "/api/manager/shifts",
        "/api/manager/dashboard",
    ] {
        let resp = client
            .get(format!("{base}{path}"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{path}");
        let body: Value = resp.json().await.expect("error body");
        assert_eq!(body["error"]["kind"], "ACCESS_DENIED", "{path}");
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_manager_dashboard_is_populated() {
    // Ensure at least one completed shift exists.
    let worker = TestWorker::careworker();
    let worker_client = client_for(&worker);
    let base = base_url();

    let resp = worker_client
        .post(format!("{base}/api/shifts/clock-in"))
        .json(&json!({}))
        .send()
        .await
        .expect("clock-in");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = worker_client
        .post(format!("{base}/api/shifts/clock-out"))
        .json(&json!({}))
        .send()
        .await
        .expect("clock-out");
    assert_eq!(resp.status(), StatusCode::OK);

    let manager = TestWorker::manager();
    let client = client_for(&manager);

    let resp = client
        .get(format!("{base}/api/manager/dashboard"))
        .send()
        .await
        .expect("dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("dashboard body");
    assert!(body["aggregate"]["total_workers"].as_i64().unwrap_or(0) >= 2);
    assert!(body["aggregate"]["shifts_started_today"].as_i64().unwrap_or(0) >= 1);
    assert!(body["per_worker"].as_array().is_some_and(|rows| !rows.is_empty()));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_active_workers_lists_open_shifts() {
    let worker = TestWorker::careworker();
    let worker_client = client_for(&worker);
    let base = base_url();

    let resp = worker_client
        .post(format!("{base}/api/shifts/clock-in"))
        .json(&json!({}))
        .send()
        .await
        .expect("clock-in");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let manager = TestWorker::manager();
    let client = client_for(&manager);
    let resp = client
        .get(format!("{base}/api/manager/active-workers"))
        .send()
        .await
        .expect("active workers");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("body");
    let found = body
        .as_array()
        .expect("array")
        .iter()
        .any(|w| w["external_id"] == worker.external_id.as_str());
    assert!(found, "clocked-in worker should be listed");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_manager_can_change_roles() {
    let worker = TestWorker::careworker();
    let base = base_url();

    // First contact creates the worker record; the shift response carries
    // the worker's database ID.
    let resp = client_for(&worker)
        .post(format!("{base}/api/shifts/clock-in"))
        .json(&json!({}))
        .send()
        .await
        .expect("clock-in");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let shift: Value = resp.json().await.expect("shift body");
    let worker_id = shift["worker_id"].as_i64().expect("worker_id");

    let manager = TestWorker::manager();
    let client = client_for(&manager);

    let resp = client
        .put(format!("{base}/api/manager/workers/{worker_id}/role"))
        .json(&json!({ "role": "MANAGER" }))
        .send()
        .await
        .expect("role change");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("body");
    assert_eq!(body["role"], "MANAGER");
}
