//! `DELETE /api/clear`

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::Result;
use crate::server::AppState;

/// Remove every upload for the date named in the body.
///
/// If some deletes fail the response is a 500 listing the keys that may
/// still be present.
pub async fn clear(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Response> {
    let Json(body) = body?;
    let report = state.service.clear_from_body(body).await?;

    if report.is_complete() {
        return Ok(Json(json!({ "success": true, "deleted": report.deleted })).into_response());
    }
    Ok((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "deleted": report.deleted,
            "failedKeys": report.failed_keys,
        })),
    )
        .into_response())
}
