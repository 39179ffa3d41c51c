//! Integration tests for geofence admission.
//!
//! These tests replace the facility geofence, so they assume a dedicated
//! test database. Requires a running API server; run with:
//! cargo test -p carelog-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use carelog_integration_tests::{TestWorker, base_url, client_for};

const FACILITY: (f64, f64, f64) = (13.067014, 77.466541, 2000.0);

async fn install_facility() {
    let manager = TestWorker::manager();
    let client = client_for(&manager);
    let (lat, lng, radius) = FACILITY;

    let resp = client
        .put(format!("{}/api/manager/facility", base_url()))
        .json(&json!({
            "name": "Lakeview Clinic",
            "latitude": lat,
            "longitude": lng,
            "radius_m": radius,
        }))
        .send()
        .await
        .expect("facility upsert");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_clock_in_at_center_admitted() {
    install_facility().await;

    let worker = TestWorker::careworker();
    let client = client_for(&worker);
    let (lat, lng, _) = FACILITY;

    let resp = client
        .post(format!("{}/api/shifts/clock-in", base_url()))
        .json(&json!({ "latitude": lat, "longitude": lng }))
        .send()
        .await
        .expect("clock-in");
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_clock_in_outside_radius_rejected_with_distance() {
    install_facility().await;

    let worker = TestWorker::careworker();
    let client = client_for(&worker);

    // ~4.75 km from the facility center.
    let resp = client
        .post(format!("{}/api/shifts/clock-in", base_url()))
        .json(&json!({ "latitude": 13.1, "longitude": 77.5 }))
        .send()
        .await
        .expect("clock-in");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["error"]["kind"], "OUT_OF_RANGE");
    assert_eq!(body["error"]["facility"], "Lakeview Clinic");
    let distance = body["error"]["distance_m"].as_f64().expect("distance_m");
    assert!(distance > 2000.0, "got {distance}");
    let radius = body["error"]["radius_m"].as_f64().expect("radius_m");
    assert!((radius - 2000.0).abs() < 1e-6);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_clock_in_without_location_skips_geofence() {
    install_facility().await;

    let worker = TestWorker::careworker();
    let client = client_for(&worker);

    let resp = client
        .post(format!("{}/api/shifts/clock-in", base_url()))
        .json(&json!({ "note": "phone without GPS" }))
        .send()
        .await
        .expect("clock-in");
    assert_eq!(resp.status(), StatusCode::CREATED);
}
