//! wagemap-api library - county prevailing-wage service
//!
//! Resolves an SOC code and wage collection into per-county wage tiers keyed
//! by FIPS code, for choropleth rendering.

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;
use wagemap_common::config::{DataSources, TomlConfig};

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use services::{ReferenceCache, WageEngine};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Load-once reference tables
    pub references: Arc<ReferenceCache>,
    pub engine: Arc<WageEngine>,
    /// Sent with successful data responses; `None` if the configured value is not a valid header
    pub cache_control: Option<HeaderValue>,
    /// Pre-built frontend served for unmatched routes
    pub static_dir: Option<PathBuf>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(sources: DataSources, config: &TomlConfig) -> Self {
        let references = Arc::new(ReferenceCache::new(sources));
        let engine = Arc::new(WageEngine::new(
            Arc::clone(&references),
            config.meta.clone(),
        ));

        let cache_control = match HeaderValue::from_str(&config.http.cache_control) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(
                    value = %config.http.cache_control,
                    "Invalid Cache-Control value in config, header disabled"
                );
                None
            }
        };

        Self {
            references,
            engine,
            cache_control,
            static_dir: config.http.static_dir.clone(),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Data routes are served at the root and under `/api`. Unmatched routes go
/// to the static frontend when configured, otherwise to a JSON 404.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(api::data_routes())
        .nest("/api", api::data_routes())
        .merge(api::health_routes());

    let router = match &state.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(api::not_found),
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
