//! Wage resolution engine
//!
//! Resolves one `(SOC code, collection)` query into a per-county wage map:
//!
//! 1. Reuse (or load) the SOC catalog and geography table
//! 2. Stream the collection's wage export, keeping rows whose SOC code equals
//!    the query exactly
//! 3. Reuse (or load) the county reference
//! 4. Annualize each row, track the scale, fan the row out to its counties
//!    and write each county under its FIPS code (last write wins)
//!
//! Only missing or unreadable files fail a query. An unknown SOC code degrades
//! the title to [`UNKNOWN_TITLE`]; an SOC code with no wage rows yields an
//! empty map and a `{0, 0}` scale.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};
use wagemap_common::api::types::{
    Collection, UnmappedCounty, WageMeta, WageResponse, WageScale, ANNUAL_BASIS_HOURS,
};
use wagemap_common::config::MetaConfig;
use wagemap_common::{tabular, Result};

use super::county_join;
use super::fields::{Field, WAGES};
use super::fips_index::FipsIndex;
use super::geography::GeographyIndex;
use super::reference_cache::ReferenceCache;
use super::wage_rows::WageRow;

/// Title reported for SOC codes missing from the catalog
pub const UNKNOWN_TITLE: &str = "Unknown";

pub struct WageEngine {
    references: Arc<ReferenceCache>,
    meta: MetaConfig,
}

impl WageEngine {
    pub fn new(references: Arc<ReferenceCache>, meta: MetaConfig) -> Self {
        Self { references, meta }
    }

    /// Resolve wages for one SOC code and collection
    pub async fn resolve(&self, soc: &str, collection: Collection) -> Result<WageResponse> {
        let (titles, geography) = self
            .references
            .run_blocking(|cache| Ok((cache.soc_titles()?, cache.geography()?)))
            .await?;

        let rows = self.wage_rows(soc, collection).await?;

        let fips = self.references.run_blocking(|cache| cache.fips()).await?;

        let soc_title = match titles.title_for(soc) {
            Some(title) => title.to_string(),
            None => {
                debug!(soc = %soc, "SOC code not in catalog");
                UNKNOWN_TITLE.to_string()
            }
        };

        let meta = WageMeta {
            wage_year: self.meta.wage_year.clone(),
            collection,
            soc: soc.to_string(),
            soc_title,
            annual_basis_hours: ANNUAL_BASIS_HOURS,
            source: self.meta.source.clone(),
        };

        let response = assemble_response(meta, &rows, &geography, &fips);
        info!(
            soc = %soc,
            collection = %collection,
            rows = rows.len(),
            counties = response.data.len(),
            unmapped = response.unmapped.len(),
            "Resolved wages"
        );
        Ok(response)
    }

    /// Stream the collection's export for rows matching `soc` exactly
    async fn wage_rows(&self, soc: &str, collection: Collection) -> Result<Vec<WageRow>> {
        let path = self.references.sources().wages(collection);
        let target = soc.to_string();
        let records =
            tabular::read_filtered(path, move |record| WAGES.get(record, Field::SocCode) == target)
                .await?;
        debug!(
            source = WAGES.source,
            schema_version = WAGES.version,
            matched = records.len(),
            "Filtered wage export"
        );
        Ok(records.iter().map(WageRow::from_record).collect())
    }
}

/// Build the response from already-filtered wage rows
pub fn assemble_response(
    meta: WageMeta,
    rows: &[WageRow],
    geography: &GeographyIndex,
    fips: &FipsIndex,
) -> WageResponse {
    let mut data = BTreeMap::new();
    let mut unmapped: Vec<UnmappedCounty> = Vec::new();
    let mut scale = ScaleTracker::default();

    for row in rows {
        let figures = row.resolve();
        figures.values().for_each(|v| scale.observe(v));

        let outcome = county_join::resolve(row, &figures, geography, fips);
        for (code, wage) in outcome.mapped {
            data.insert(code, wage);
        }
        unmapped.extend(outcome.unmapped);
    }

    WageResponse {
        meta,
        data,
        scale: scale.finish(),
        unmapped,
    }
}

/// Running min/max over strictly positive wage figures
///
/// Zero means "missing" and would pin the color scale to 0, so it is ignored.
#[derive(Debug, Default, Clone, Copy)]
struct ScaleTracker {
    range: Option<(i64, i64)>,
}

impl ScaleTracker {
    fn observe(&mut self, value: i64) {
        if value <= 0 {
            return;
        }
        self.range = Some(match self.range {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    fn finish(self) -> WageScale {
        match self.range {
            Some((min, max)) => WageScale { min, max },
            None => WageScale::default(),
        }
    }
}
