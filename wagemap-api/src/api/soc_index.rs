//! SOC catalog listing
//!
//! GET /soc-index: every SOC code with a title, deduplicated, in catalog order.

use axum::{extract::State, response::Response};

use super::cached_json;
use crate::error::ApiResult;
use crate::AppState;

pub async fn get_soc_index(State(state): State<AppState>) -> ApiResult<Response> {
    let titles = state
        .references
        .run_blocking(|cache| cache.soc_titles())
        .await?;

    Ok(cached_json(&state, titles.list()))
}
