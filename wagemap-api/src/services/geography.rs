//! Statistical area to county membership
//!
//! Each geography row places one county (or New England town) in one BLS
//! statistical area. Rows are grouped by area code with source order kept;
//! duplicates are not removed.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;
use wagemap_common::{tabular, Record, Result};

use super::fields::{Field, GEOGRAPHY};

/// One county's membership in one statistical area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeographyRecord {
    pub area_code: String,
    pub state_abbr: String,
    /// Full state name, or the abbreviation when the source has no name column
    pub state_name: String,
    pub county_town_name: String,
}

impl GeographyRecord {
    pub fn from_record(record: &Record) -> Self {
        let state_abbr = GEOGRAPHY.get(record, Field::StateAbbr).to_string();
        let state_name = match GEOGRAPHY.get(record, Field::StateName) {
            "" => state_abbr.clone(),
            name => name.to_string(),
        };
        Self {
            area_code: GEOGRAPHY.get(record, Field::AreaCode).to_string(),
            state_abbr,
            state_name,
            county_town_name: GEOGRAPHY.get(record, Field::CountyTownName).to_string(),
        }
    }
}

/// Geography rows grouped by area code
#[derive(Debug, Default)]
pub struct GeographyIndex {
    by_area: HashMap<String, Vec<GeographyRecord>>,
    total: usize,
}

impl GeographyIndex {
    /// Load and index the geography table
    pub fn load(path: &Path) -> Result<Self> {
        let records = tabular::read_table(path)?;
        let index = Self::from_records(&records);
        debug!(
            source = GEOGRAPHY.source,
            schema_version = GEOGRAPHY.version,
            counties = index.total,
            areas = index.by_area.len(),
            "Indexed geography"
        );
        Ok(index)
    }

    /// Rows without an area code can never join to a wage row and are skipped
    pub fn from_records(records: &[Record]) -> Self {
        let mut index = Self::default();
        for record in records {
            let geo = GeographyRecord::from_record(record);
            if geo.area_code.is_empty() {
                continue;
            }
            index.by_area.entry(geo.area_code.clone()).or_default().push(geo);
            index.total += 1;
        }
        index
    }

    /// Every county in `area_code`, in source order
    pub fn counties_in(&self, area_code: &str) -> &[GeographyRecord] {
        self.by_area
            .get(area_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of indexed county memberships
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
