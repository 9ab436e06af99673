//! Shared HTTP API types
//!
//! Pure data types with serde derives only; the service crate wraps them with
//! axum handlers.

pub mod types;

pub use types::{
    Collection, CountyWage, ErrorResponse, SocEntry, UnmappedCounty, WageMeta, WageResponse,
    WageScale,
};
