//! Wage rows and their resolved annual figures

use wagemap_common::api::types::CountyWage;
use wagemap_common::Record;

use super::fields::{Field, WAGES};
use super::wage_units::{resolve_annual, UnitHint};

/// One statistical area's wage levels for one SOC code, as published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WageRow {
    pub area_code: String,
    pub raw_levels: [String; 4],
    pub raw_average: String,
    pub unit_hint: UnitHint,
}

impl WageRow {
    pub fn from_record(record: &Record) -> Self {
        let unit_hint = UnitHint::detect(
            WAGES.get(record, Field::Label),
            WAGES.is_populated(record, Field::AnnualMarker),
        );
        Self {
            area_code: WAGES.get(record, Field::AreaCode).to_string(),
            raw_levels: Field::LEVELS.map(|level| WAGES.get(record, level).to_string()),
            raw_average: WAGES.get(record, Field::Average).to_string(),
            unit_hint,
        }
    }

    /// Convert every figure to whole annual dollars
    pub fn resolve(&self) -> WageFigures {
        WageFigures {
            levels: self
                .raw_levels
                .each_ref()
                .map(|raw| resolve_annual(raw, self.unit_hint)),
            average: resolve_annual(&self.raw_average, self.unit_hint),
        }
    }
}

/// Annualized wage tiers and average for one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WageFigures {
    pub levels: [i64; 4],
    pub average: i64,
}

impl WageFigures {
    /// All five figures: the four levels followed by the average
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.levels.iter().copied().chain(std::iter::once(self.average))
    }

    pub fn to_county_wage(&self, state: &str, county: &str) -> CountyWage {
        CountyWage {
            level1: self.levels[0],
            level2: self.levels[1],
            level3: self.levels[2],
            level4: self.levels[3],
            average: self.average,
            state: state.to_string(),
            county: county.to_string(),
        }
    }
}
