//! Integration tests for `GET /api/fetch`.

use axum::http::{Method, StatusCode};
use chrono::DateTime;
use deedboard_api::ListingPolicy;
use serde_json::{Value, json};

use crate::common::{TestHarness, payload};

#[tokio::test]
async fn test_fetch_single_upload() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 2)).await;

    let resp = harness.fetch("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["date"], "2024-01-01");
    assert_eq!(resp.body["totalDeeds"], 2);
    let machine = &resp.body["machines"][0];
    assert_eq!(machine["machineId"], "M1");
    assert_eq!(machine["operator"], "Alice");
    assert_eq!(machine["deedCount"], 2);
    let upload_time = machine["uploadTime"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(upload_time).is_ok());
}

#[tokio::test]
async fn test_fetch_two_machines_sums_deeds() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 2)).await;
    harness.upload(payload("M2", "Bob", "2024-01-01", 3)).await;

    let resp = harness.fetch("2024-01-01").await;

    assert_eq!(resp.body["totalDeeds"], 5);
    assert_eq!(resp.body["machines"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_fetch_total_matches_sum_of_counts() {
    let harness = TestHarness::new();
    for (i, n) in [0, 7, 1, 12, 3].into_iter().enumerate() {
        harness
            .upload(payload(&format!("M{i}"), "op", "2024-05-05", n))
            .await;
    }

    let body = harness.fetch("2024-05-05").await.body;
    let summed: u64 = body["machines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["deedCount"].as_u64().unwrap())
        .sum();
    assert_eq!(body["totalDeeds"].as_u64().unwrap(), summed);
    assert_eq!(summed, 23);
}

#[tokio::test]
async fn test_fetch_is_scoped_to_date() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 2)).await;
    harness.upload(payload("M1", "Alice", "2024-01-02", 9)).await;

    let body = harness.fetch("2024-01-01").await.body;

    assert_eq!(body["totalDeeds"], 2);
}

#[tokio::test]
async fn test_fetch_empty_date() {
    let harness = TestHarness::new();

    let resp = harness.fetch("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["totalDeeds"], 0);
    assert_eq!(resp.body["machines"], json!([]));
    assert_eq!(resp.body["degraded"], false);
}

#[tokio::test]
async fn test_fetch_missing_date_is_400() {
    let harness = TestHarness::new();

    let resp = harness.send(Method::GET, "/api/fetch", None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Date is required");

    let resp = harness.send(Method::GET, "/api/fetch?date=", None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fetch_missing_date_is_400_even_when_store_is_down() {
    let harness = TestHarness::with_policy(ListingPolicy::Strict);
    harness.store.fail_listing(true).await;

    let resp = harness.send(Method::GET, "/api/fetch", None).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fetch_glob_date_is_rejected() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 2)).await;

    let resp = harness.fetch("2024-01-*").await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "date");
}

#[tokio::test]
async fn test_fetch_listing_failure_degrades() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 2)).await;
    harness.store.fail_listing(true).await;

    let resp = harness.fetch("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["degraded"], true);
    assert_eq!(resp.body["totalDeeds"], 0);
    assert_eq!(resp.body["machines"], json!([]));
}

#[tokio::test]
async fn test_fetch_listing_failure_strict_is_generic_500() {
    let harness = TestHarness::with_policy(ListingPolicy::Strict);
    harness.store.fail_listing(true).await;

    let resp = harness.fetch("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, json!({"message": "Internal Server Error"}));
}

#[tokio::test]
async fn test_fetch_counts_skipped_records() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 2)).await;
    harness
        .store
        .insert_raw("deeds:2024-01-01:M2", Value::String("garbage".into()))
        .await;

    let body = harness.fetch("2024-01-01").await.body;

    assert_eq!(body["totalDeeds"], 2);
    assert_eq!(body["machines"].as_array().unwrap().len(), 1);
    assert_eq!(body["skippedRecords"], 1);
}

#[tokio::test]
async fn test_fetch_wrong_method_is_405() {
    let harness = TestHarness::new();

    let resp = harness
        .send(Method::POST, "/api/fetch?date=2024-01-01", None)
        .await;

    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_fetch_unparsable_query_is_json_400() {
    let harness = TestHarness::new();

    let resp = harness
        .send(
            Method::GET,
            "/api/fetch?date=2024-01-01&date=2024-01-02",
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers.get(axum::http::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert!(resp.body["message"].as_str().unwrap().contains("date"));
}
