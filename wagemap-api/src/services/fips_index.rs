//! County reference index
//!
//! Maps `STATE|county name` to the 5-digit county FIPS code from the Census
//! `national_county.txt` file. Each line is
//! `ST,StateFIPS,CountyFIPS,CountyName,ClassCode`; lines with fewer than four
//! fields are skipped. Keys keep the state abbreviation as written and
//! lower-case the county name. Codes stay strings so leading zeros survive.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tracing::debug;
use wagemap_common::{Error, Result};

/// Exact-match lookup from county key to FIPS code
#[derive(Debug, Default)]
pub struct FipsIndex {
    entries: HashMap<String, String>,
}

impl FipsIndex {
    /// Build the lookup key for a state abbreviation and an already lower-cased county name
    pub fn key(state_abbr: &str, county_lower: &str) -> String {
        format!("{}|{}", state_abbr, county_lower)
    }

    /// Load the county reference file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::missing(path));
        }
        let file = std::fs::File::open(path)?;
        let index = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(path = %path.display(), counties = index.len(), "Loaded county reference");
        Ok(index)
    }

    /// Parse reference lines; a later line with the same key replaces an earlier one
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected; older
    /// Census files are Latin-1 encoded.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries = HashMap::new();
        for line in reader.split(b'\n') {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            if parts.len() < 4 {
                continue;
            }
            let key = Self::key(parts[0], &parts[3].to_lowercase());
            entries.insert(key, format!("{}{}", parts[1], parts[2]));
        }
        Ok(Self { entries })
    }

    /// Exact lookup by prebuilt key
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
