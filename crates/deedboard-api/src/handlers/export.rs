//! `GET /api/export?date=`

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;

use super::DateQuery;
use crate::Result;
use crate::server::AppState;

/// Every record for a date, served as a JSON attachment.
pub async fn export(
    State(state): State<AppState>,
    query: std::result::Result<Query<DateQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let date = query.required_date()?;
    let bundle = state.service.export(&date).await?;
    let disposition = format!("attachment; filename=\"{}\"", bundle.file_name());
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(bundle)))
}
