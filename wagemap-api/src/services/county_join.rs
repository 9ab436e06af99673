//! County join resolution
//!
//! Fans one area-level wage row out to every county in that area, then
//! matches each county to a FIPS code. Geography and Census files disagree on
//! the "County" suffix, so each county is tried as:
//!
//! 1. `ST|name` exactly (lower-cased)
//! 2. `ST|name county`
//! 3. `ST|name` with a trailing ` county` removed, if present
//!
//! The first hit wins. Counties matching none of the three are reported as
//! unmapped; no fuzzy matching is attempted.

use tracing::trace;
use wagemap_common::api::types::{CountyWage, UnmappedCounty};

use super::fips_index::FipsIndex;
use super::geography::{GeographyIndex, GeographyRecord};
use super::wage_rows::{WageFigures, WageRow};

const COUNTY_SUFFIX: &str = " county";

/// Result of joining one wage row to counties
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// `(fips, wage)` pairs in geography order
    pub mapped: Vec<(String, CountyWage)>,
    pub unmapped: Vec<UnmappedCounty>,
}

/// Candidate index keys for a county, in lookup order
pub fn candidate_keys(state_abbr: &str, county_name: &str) -> Vec<String> {
    let county = county_name.to_lowercase();
    let mut keys = vec![
        FipsIndex::key(state_abbr, &county),
        FipsIndex::key(state_abbr, &format!("{}{}", county, COUNTY_SUFFIX)),
    ];
    if let Some(stripped) = county.strip_suffix(COUNTY_SUFFIX) {
        keys.push(FipsIndex::key(state_abbr, stripped));
    }
    keys
}

/// FIPS code for one geography county, trying each candidate key in order
pub fn lookup_fips<'a>(fips: &'a FipsIndex, county: &GeographyRecord) -> Option<&'a str> {
    candidate_keys(&county.state_abbr, &county.county_town_name)
        .iter()
        .find_map(|key| fips.lookup(key))
}

/// Join one wage row to every county in its area
pub fn resolve(
    row: &WageRow,
    figures: &WageFigures,
    geography: &GeographyIndex,
    fips: &FipsIndex,
) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();

    for county in geography.counties_in(&row.area_code) {
        match lookup_fips(fips, county) {
            Some(code) => {
                outcome.mapped.push((
                    code.to_string(),
                    figures.to_county_wage(&county.state_name, &county.county_town_name),
                ));
            }
            None => {
                trace!(
                    area = %row.area_code,
                    state = %county.state_abbr,
                    county = %county.county_town_name,
                    "No FIPS match"
                );
                outcome.unmapped.push(UnmappedCounty {
                    state: county.state_abbr.clone(),
                    county: county.county_town_name.clone(),
                });
            }
        }
    }

    outcome
}
