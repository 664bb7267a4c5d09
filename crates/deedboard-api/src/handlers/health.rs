//! `GET /api/health`

use axum::Json;
use serde::{Deserialize, Serialize};

/// Liveness response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the process answers
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
}

/// Liveness check. Does not touch the store.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
