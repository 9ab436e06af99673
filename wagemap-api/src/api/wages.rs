//! County wage map
//!
//! GET /wages?soc=15-1255&collection=ed
//!
//! `soc` is required and must appear once. `collection=ed` selects the
//! education-sector export; any other value, or none, selects all industries.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};
use tracing::debug;
use wagemap_common::api::types::Collection;

use super::cached_json;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

const SOC_REQUIRED: &str = "SOC code is required";

/// Query parameters for the wage map
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WagesQuery {
    pub soc: Option<String>,
    pub collection: Option<String>,
}

impl WagesQuery {
    /// Keep a parameter only when it appears exactly once
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            soc: single_value(pairs, "soc"),
            collection: single_value(pairs, "collection"),
        }
    }
}

fn single_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    let mut values = pairs.iter().filter(|(k, _)| k == name).map(|(_, v)| v);
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value.clone()),
        _ => None,
    }
}

pub async fn get_wages(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(pairs) = query.map_err(|_| ApiError::BadRequest(SOC_REQUIRED.to_string()))?;
    let query = WagesQuery::from_pairs(&pairs);

    let soc = query
        .soc
        .filter(|soc| !soc.is_empty())
        .ok_or_else(|| ApiError::BadRequest(SOC_REQUIRED.to_string()))?;
    let collection = Collection::from_query(query.collection.as_deref());
    debug!(soc = %soc, collection = %collection, "Wage query");

    let response = state.engine.resolve(&soc, collection).await?;
    Ok(cached_json(&state, &response))
}
