//! SOC title index
//!
//! Flattens the SOC catalog into `(code, title)` pairs. The first occurrence
//! of a code wins; rows missing either value are dropped. Source order is
//! kept, so the listing is not sorted.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;
use wagemap_common::api::types::SocEntry;
use wagemap_common::{tabular, Record, Result};

use super::fields::{Field, SOC_CATALOG};

#[derive(Debug, Default)]
pub struct SocTitleIndex {
    entries: Vec<SocEntry>,
    positions: HashMap<String, usize>,
}

impl SocTitleIndex {
    /// Load and index the SOC catalog
    pub fn load(path: &Path) -> Result<Self> {
        let records = tabular::read_table(path)?;
        let index = Self::from_records(&records);
        debug!(
            source = SOC_CATALOG.source,
            schema_version = SOC_CATALOG.version,
            rows = records.len(),
            codes = index.len(),
            "Indexed SOC catalog"
        );
        Ok(index)
    }

    pub fn from_records(records: &[Record]) -> Self {
        let mut index = Self::default();
        for record in records {
            let soc = SOC_CATALOG.get(record, Field::SocCode);
            let title = SOC_CATALOG.get(record, Field::SocTitle);
            if soc.is_empty() || title.is_empty() || index.positions.contains_key(soc) {
                continue;
            }
            index.positions.insert(soc.to_string(), index.entries.len());
            index.entries.push(SocEntry {
                soc: soc.to_string(),
                title: title.to_string(),
            });
        }
        index
    }

    /// Deduplicated catalog in source order
    pub fn list(&self) -> &[SocEntry] {
        &self.entries
    }

    /// Title lookup reads the same catalog columns as the listing
    pub fn title_for(&self, soc: &str) -> Option<&str> {
        self.positions
            .get(soc)
            .map(|&i| self.entries[i].title.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_occurrence_wins_and_order_kept() {
        let records = vec![
            record(&[("SocCode", "15-1255"), ("SocTitle", "Web and Digital Interface Designers")]),
            record(&[("SocCode", "11-1011"), ("SocTitle", "Chief Executives")]),
            record(&[("SocCode", "15-1255"), ("SocTitle", "Duplicate Title")]),
        ];
        let index = SocTitleIndex::from_records(&records);

        let codes: Vec<&str> = index.list().iter().map(|e| e.soc.as_str()).collect();
        assert_eq!(codes, vec!["15-1255", "11-1011"]);
        assert_eq!(
            index.title_for("15-1255"),
            Some("Web and Digital Interface Designers")
        );
    }

    #[test]
    fn test_entries_missing_code_or_title_dropped() {
        let records = vec![
            record(&[("SocCode", ""), ("SocTitle", "No Code")]),
            record(&[("SocCode", "29-1141")]),
            record(&[("soccode", "25-1011"), ("Title", "Business Teachers, Postsecondary")]),
        ];
        let index = SocTitleIndex::from_records(&records);

        assert_eq!(index.len(), 1);
        assert_eq!(index.list()[0].soc, "25-1011");
        assert_eq!(index.title_for("29-1141"), None);
    }

    #[test]
    fn test_dropped_empty_title_does_not_block_later_row() {
        let records = vec![
            record(&[("SOC_CODE", "13-2011"), ("SOC_TITLE", "")]),
            record(&[("SOC_CODE", "13-2011"), ("SOC_TITLE", "Accountants and Auditors")]),
        ];
        let index = SocTitleIndex::from_records(&records);
        assert_eq!(index.title_for("13-2011"), Some("Accountants and Auditors"));
    }

    #[test]
    fn test_listing_has_unique_non_empty_codes() {
        let records: Vec<Record> = (0..50)
            .map(|i| {
                let code = format!("11-{:04}", i % 7);
                let title = if i % 5 == 0 { String::new() } else { format!("Title {}", i) };
                record(&[("SocCode", code.as_str()), ("SocTitle", title.as_str())])
            })
            .collect();
        let index = SocTitleIndex::from_records(&records);

        let mut seen = HashSet::new();
        for entry in index.list() {
            assert!(!entry.soc.is_empty());
            assert!(!entry.title.is_empty());
            assert!(seen.insert(entry.soc.clone()));
        }
        assert_eq!(index.len(), 7);
    }
}
