//! Field normalization across source schemas
//!
//! The SOC catalog, geography table and wage exports come from different
//! publishers and drift between collections and years: the same column may be
//! `Area`, `AREA_CODE`, `Level1` or `LEVEL_1_HOURLY`. Each source gets an
//! explicit [`FieldMap`] listing, per canonical [`Field`], the column names to
//! try in priority order.
//!
//! A field whose every candidate is absent or empty reads as `""`. This keeps
//! the join tolerant of schema drift; an unrecognized wage column surfaces as
//! a zero wage, not an error.

use wagemap_common::Record;

/// Canonical field names used by the resolution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SocCode,
    SocTitle,
    AreaCode,
    StateAbbr,
    StateName,
    CountyTownName,
    /// Free-text unit label on wage rows ("Annual", "Hourly", ...)
    Label,
    /// Present only in exports that publish annual figures
    AnnualMarker,
    Level1,
    Level2,
    Level3,
    Level4,
    Average,
}

impl Field {
    /// The four wage tiers in order
    pub const LEVELS: [Field; 4] = [Field::Level1, Field::Level2, Field::Level3, Field::Level4];
}

/// Ordered candidate column names for each canonical field of one source
#[derive(Debug)]
pub struct FieldMap {
    /// Source name for log output
    pub source: &'static str,
    /// Bumped whenever a candidate list changes
    pub version: u32,
    mappings: &'static [(Field, &'static [&'static str])],
}

impl FieldMap {
    /// Candidate column names for `field`, highest priority first
    pub fn candidates(&self, field: Field) -> &'static [&'static str] {
        self.mappings
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, names)| *names)
            .unwrap_or(&[])
    }

    /// First non-empty candidate value for `field`, or `""`
    pub fn get<'a>(&self, record: &'a Record, field: Field) -> &'a str {
        self.candidates(field)
            .iter()
            .filter_map(|name| record.get(*name))
            .map(String::as_str)
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    /// Whether any candidate column for `field` holds a value
    pub fn is_populated(&self, record: &Record, field: Field) -> bool {
        !self.get(record, field).is_empty()
    }
}

/// SOC catalog (`oes_soc_occs.csv`)
pub static SOC_CATALOG: FieldMap = FieldMap {
    source: "soc_catalog",
    version: 1,
    mappings: &[
        (Field::SocCode, &["soccode", "SocCode", "SOC_CODE"]),
        (Field::SocTitle, &["Title", "SocTitle", "SOC_TITLE"]),
    ],
};

/// Statistical area to county membership (`Geography.csv`)
pub static GEOGRAPHY: FieldMap = FieldMap {
    source: "geography",
    version: 1,
    mappings: &[
        (Field::AreaCode, &["Area", "AREA_CODE"]),
        (Field::StateAbbr, &["StateAb", "State", "STATE_ABBR"]),
        (Field::StateName, &["State", "StateName"]),
        (Field::CountyTownName, &["CountyTownName", "COUNTY_TOWN_NAME"]),
    ],
};

/// Wage levels by area (`ALC_Export.csv`, `EDC_Export.csv`)
pub static WAGES: FieldMap = FieldMap {
    source: "wages",
    version: 1,
    mappings: &[
        (Field::AreaCode, &["Area", "AREA_CODE"]),
        (Field::SocCode, &["SocCode", "SOC_CODE"]),
        (Field::Label, &["Label"]),
        (Field::AnnualMarker, &["Level_1_Annual", "LEVEL_1_ANNUAL"]),
        (
            Field::Level1,
            &["Level1", "Level_1_Hourly", "LEVEL_1_HOURLY", "Level_1_Annual", "LEVEL_1_ANNUAL"],
        ),
        (
            Field::Level2,
            &["Level2", "Level_2_Hourly", "LEVEL_2_HOURLY", "Level_2_Annual", "LEVEL_2_ANNUAL"],
        ),
        (
            Field::Level3,
            &["Level3", "Level_3_Hourly", "LEVEL_3_HOURLY", "Level_3_Annual", "LEVEL_3_ANNUAL"],
        ),
        (
            Field::Level4,
            &["Level4", "Level_4_Hourly", "LEVEL_4_HOURLY", "Level_4_Annual", "LEVEL_4_ANNUAL"],
        ),
        (
            Field::Average,
            &["Average", "Mean_Hourly", "MEAN_HOURLY", "Mean_Annual", "MEAN_ANNUAL"],
        ),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_mixed_case_preferred_over_upper_snake() {
        let row = record(&[("AREA_CODE", "99999"), ("Area", "41940")]);
        assert_eq!(WAGES.get(&row, Field::AreaCode), "41940");
    }

    #[test]
    fn test_upper_snake_used_when_mixed_case_absent() {
        let row = record(&[("SOC_CODE", "15-1255")]);
        assert_eq!(WAGES.get(&row, Field::SocCode), "15-1255");
    }

    #[test]
    fn test_empty_value_falls_through_to_next_candidate() {
        let row = record(&[("Level1", ""), ("Level_1_Hourly", "55.12")]);
        assert_eq!(WAGES.get(&row, Field::Level1), "55.12");
    }

    #[test]
    fn test_annual_alternate_is_last_resort() {
        let row = record(&[("LEVEL_2_ANNUAL", "98000")]);
        assert_eq!(WAGES.get(&row, Field::Level2), "98000");
        assert!(WAGES.is_populated(&row, Field::Level2));
        assert!(!WAGES.is_populated(&row, Field::AnnualMarker));
    }

    #[test]
    fn test_missing_field_reads_empty() {
        let row = record(&[("Unrelated", "x")]);
        assert_eq!(WAGES.get(&row, Field::Average), "");
        assert_eq!(GEOGRAPHY.get(&row, Field::CountyTownName), "");
    }

    #[test]
    fn test_geography_state_columns() {
        let row = record(&[("StateAb", "CA"), ("State", "California")]);
        assert_eq!(GEOGRAPHY.get(&row, Field::StateAbbr), "CA");
        assert_eq!(GEOGRAPHY.get(&row, Field::StateName), "California");
    }

    #[test]
    fn test_unmapped_field_has_no_candidates() {
        assert!(SOC_CATALOG.candidates(Field::Level1).is_empty());
        assert_eq!(SOC_CATALOG.candidates(Field::SocCode)[0], "soccode");
    }
}
