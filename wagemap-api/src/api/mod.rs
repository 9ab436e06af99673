//! HTTP API handlers for wagemap-api

pub mod health;
pub mod soc_index;
pub mod wages;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

pub use health::health_routes;
pub use soc_index::get_soc_index;
pub use wages::get_wages;

/// Data endpoints, mounted both at the root and under `/api`
pub fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/soc-index", get(get_soc_index))
        .route("/wages", get(get_wages))
}

/// Fallback for unknown routes when no static frontend is configured
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// JSON response carrying the configured Cache-Control header
pub(crate) fn cached_json<T: Serialize>(state: &AppState, body: T) -> Response {
    let mut response = Json(body).into_response();
    if let Some(value) = &state.cache_control {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, value.clone());
    }
    response
}
