//! `GET /api/fetch?date=`

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use deedboard_core::DashboardStats;

use super::DateQuery;
use crate::Result;
use crate::server::AppState;

/// Dashboard summary for a date.
pub async fn fetch(
    State(state): State<AppState>,
    query: std::result::Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<DashboardStats>> {
    let Query(query) = query?;
    let date = query.required_date()?;
    Ok(Json(state.service.dashboard(&date).await?))
}
