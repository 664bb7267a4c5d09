//! `POST /api/upload`

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::server::AppState;

/// Successful upload acknowledgement.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always `true`
    pub success: bool,
    /// Storage key of the record
    pub id: String,
}

/// Store one machine's deeds for a date.
pub async fn upload(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<UploadResponse>> {
    let Json(body) = body?;
    let receipt = state.service.upload(body).await?;
    Ok(Json(UploadResponse {
        success: true,
        id: receipt.id,
    }))
}
