//! Integration tests for `GET /api/export`.

use axum::http::{Method, StatusCode, header};
use deedboard_api::ListingPolicy;
use serde_json::json;

use crate::common::{TestHarness, payload};

#[tokio::test]
async fn test_export_returns_records_verbatim() {
    let harness = TestHarness::new();
    let sent = payload("M1", "Alice", "2024-01-01", 2);
    harness.upload(sent.clone()).await;

    let resp = harness.export("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["date"], "2024-01-01");
    assert_eq!(resp.body["totalUploads"], 1);
    assert!(resp.body["exportedAt"].is_string());
    let record = &resp.body["data"][0];
    assert_eq!(record["machine_id"], "M1");
    assert_eq!(record["operator"], "Alice");
    assert_eq!(record["deeds"], sent["deeds"]);
    assert!(record["upload_time"].is_string());
}

#[tokio::test]
async fn test_export_is_an_attachment() {
    let harness = TestHarness::new();

    let resp = harness.export("2024-01-01").await;

    assert_eq!(
        resp.headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"deeds-2024-01-01.json\""
    );
    assert_eq!(
        resp.headers.get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_export_empty_date() {
    let harness = TestHarness::new();

    let resp = harness.export("2024-01-01").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["totalUploads"], 0);
    assert_eq!(resp.body["data"], json!([]));
}

#[tokio::test]
async fn test_export_missing_date_is_400() {
    let harness = TestHarness::new();

    let resp = harness.send(Method::GET, "/api/export", None).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Date is required");
}

#[tokio::test]
async fn test_export_listing_failure_follows_policy() {
    let degrade = TestHarness::new();
    degrade.store.fail_listing(true).await;
    let resp = degrade.export("2024-01-01").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["degraded"], true);
    assert_eq!(resp.body["totalUploads"], 0);

    let strict = TestHarness::with_policy(ListingPolicy::Strict);
    strict.store.fail_listing(true).await;
    let resp = strict.export("2024-01-01").await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body["message"], "Internal Server Error");
}

#[tokio::test]
async fn test_export_skips_unreadable_records() {
    let harness = TestHarness::new();
    harness.upload(payload("M1", "Alice", "2024-01-01", 1)).await;
    harness.upload(payload("M2", "Bob", "2024-01-01", 1)).await;
    harness.store.fail_reads_for("deeds:2024-01-01:M1").await;

    let body = harness.export("2024-01-01").await.body;

    assert_eq!(body["totalUploads"], 1);
    assert_eq!(body["data"][0]["machine_id"], "M2");
    assert_eq!(body["skippedRecords"], 1);
}

#[tokio::test]
async fn test_export_returns_unknown_fields_and_partial_records() {
    let harness = TestHarness::new();
    let extended = json!({
        "machine_id": "M1",
        "operator": "A",
        "upload_time": "t",
        "deeds": {"d1": 1},
        "firmware": "1.2"
    });
    let no_upload_time = json!({"machine_id": "M2", "operator": "B", "deeds": {}});
    harness
        .store
        .insert_raw(
            "deeds:2024-01-01:M1",
            serde_json::Value::String(extended.to_string()),
        )
        .await;
    harness
        .store
        .insert_raw("deeds:2024-01-01:M2", no_upload_time.clone())
        .await;

    let body = harness.export("2024-01-01").await.body;

    assert_eq!(body["totalUploads"], 2);
    assert_eq!(body["skippedRecords"], 0);
    assert_eq!(body["data"], json!([extended, no_upload_time]));
}

#[tokio::test]
async fn test_export_unparsable_query_is_json_400() {
    let harness = TestHarness::new();

    let resp = harness
        .send(
            Method::GET,
            "/api/export?date=2024-01-01&date=2024-01-02",
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["message"].is_string());
}
