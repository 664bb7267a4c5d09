//! Route table.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::server::AppState;

/// Build the application router.
///
/// A known path hit with the wrong method answers 405 with a JSON body.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(
            "/api/upload",
            post(handlers::upload).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/fetch",
            get(handlers::fetch).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/export",
            get(handlers::export).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/clear",
            delete(handlers::clear).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
