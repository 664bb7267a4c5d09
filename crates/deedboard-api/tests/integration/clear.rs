//! Integration tests for `DELETE /api/clear`.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{TestHarness, payload};

#[tokio::test]
async fn test_clear_removes_every_machine_for_date() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 2)).await;
    harness.upload(payload("M2", "Bob", "2024-01-01", 3)).await;

    let resp = harness.clear("2024-01-01").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({"success": true, "deleted": 2}));

    let stats = harness.fetch("2024-01-01").await.body;
    assert_eq!(stats["totalDeeds"], 0);
    assert_eq!(stats["machines"], json!([]));
}

#[tokio::test]
async fn test_clear_leaves_other_dates() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 2)).await;
    harness.upload(payload("M1", "Alice", "2024-01-02", 4)).await;

    harness.clear("2024-01-01").await;

    assert_eq!(harness.fetch("2024-01-02").await.body["totalDeeds"], 4);
}

#[tokio::test]
async fn test_clear_empty_date_is_noop_success() {
    let harness = TestHarness::new();

    let resp = harness.clear("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["success"], true);
    assert_eq!(resp.body["deleted"], 0);
}

#[tokio::test]
async fn test_clear_missing_date_is_400() {
    let harness = TestHarness::new();

    let resp = harness
        .send(Method::DELETE, "/api/clear", Some(json!({})))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "date");

    let resp = harness.send(Method::DELETE, "/api/clear", None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_partial_failure_lists_failed_keys() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 1)).await;
    harness.upload(payload("M2", "Bob", "2024-01-01", 1)).await;
    harness.store.fail_deletes_for("deeds:2024-01-01:M1").await;

    let resp = harness.clear("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body["success"], false);
    assert_eq!(resp.body["deleted"], 1);
    assert_eq!(resp.body["failedKeys"], json!(["deeds:2024-01-01:M1"]));

    let stats = harness.fetch("2024-01-01").await.body;
    assert_eq!(stats["machines"][0]["machineId"], "M1");
}

#[tokio::test]
async fn test_clear_listing_failure_is_500() {
    let harness = TestHarness::new();
    harness.store.fail_listing(true).await;

    let resp = harness.clear("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, json!({"message": "Internal Server Error"}));
}

#[tokio::test]
async fn test_clear_wrong_method_is_405() {
    let harness = TestHarness::new();

    let resp = harness
        .send(Method::POST, "/api/clear", Some(json!({"date": "2024-01-01"})))
        .await;

    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.body["message"], "Method not allowed");
}
