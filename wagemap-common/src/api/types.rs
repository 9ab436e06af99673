//! Shared API request/response types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hours in a full-time work year (40 hours × 52 weeks)
pub const ANNUAL_BASIS_HOURS: i64 = 2080;

// ========================================
// Query Types
// ========================================

/// Wage-source collection selector
///
/// Only the exact query value `ed` selects the education-sector collection;
/// anything else (including no value) selects all industries.
///
/// # Examples
///
/// ```
/// use wagemap_common::api::types::Collection;
///
/// assert_eq!(Collection::from_query(Some("ed")), Collection::Education);
/// assert_eq!(Collection::from_query(Some("all")), Collection::All);
/// assert_eq!(Collection::from_query(None), Collection::All);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Collection {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "ed")]
    Education,
}

impl Collection {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("ed") => Collection::Education,
            _ => Collection::All,
        }
    }

    /// Wire name used in response metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::All => "all",
            Collection::Education => "ed",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// SOC Catalog Types
// ========================================

/// One entry of the SOC catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocEntry {
    pub soc: String,
    pub title: String,
}

// ========================================
// Wage Response Types
// ========================================

/// Wage tiers for one county, all in whole annual dollars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountyWage {
    pub level1: i64,
    pub level2: i64,
    pub level3: i64,
    pub level4: i64,
    pub average: i64,
    /// State name (abbreviation when the geography table has no name)
    pub state: String,
    /// County or town name as written in the geography table
    pub county: String,
}

/// A geography county that could not be matched to a FIPS code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedCounty {
    pub state: String,
    pub county: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageMeta {
    pub wage_year: String,
    pub collection: Collection,
    pub soc: String,
    pub soc_title: String,
    pub annual_basis_hours: i64,
    pub source: String,
}

/// Range of all strictly positive wage figures in a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WageScale {
    pub min: i64,
    pub max: i64,
}

/// Response body of `GET /wages`
///
/// `data` is keyed by 5-digit FIPS code. A `BTreeMap` keeps serialization
/// order stable across identical queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageResponse {
    pub meta: WageMeta,
    pub data: BTreeMap<String, CountyWage>,
    pub scale: WageScale,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmapped: Vec<UnmappedCounty>,
}

// ========================================
// Error Response Types
// ========================================

/// Body of every non-2xx JSON response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
