//! Tabular source reading
//!
//! Two access patterns over header-row CSV files:
//! - [`read_table`]: bounded reference tables, read fully into memory
//! - [`read_filtered`]: unbounded tables, read row-at-a-time on a blocking
//!   thread, keeping only rows accepted by a predicate
//!
//! Header names have any UTF-8 BOM stripped and all values are trimmed.
//! Bytes that are not valid UTF-8 are replaced, never rejected.
//! Empty lines are skipped.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, Trim};
use tracing::debug;

use crate::{Error, Result};

/// One source row keyed by column header
pub type Record = BTreeMap<String, String>;

/// Read a whole CSV file into memory
pub fn read_table(path: &Path) -> Result<Vec<Record>> {
    ensure_exists(path)?;
    let file = std::fs::File::open(path)?;
    let rows = read_rows(file, |_| true)?;
    debug!(path = %path.display(), rows = rows.len(), "Loaded table");
    Ok(rows)
}

/// Stream a CSV file, returning only rows for which `keep` returns true
///
/// Rows are decoded one at a time on a blocking thread; rejected rows are
/// dropped immediately so memory is bounded by the matching rows.
pub async fn read_filtered<F>(path: PathBuf, keep: F) -> Result<Vec<Record>>
where
    F: Fn(&Record) -> bool + Send + 'static,
{
    ensure_exists(&path)?;
    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&path)?;
        let rows = read_rows(file, keep)?;
        debug!(path = %path.display(), matched = rows.len(), "Filtered table");
        Ok(rows)
    })
    .await
    .map_err(|e| Error::Internal(format!("Table reader task failed: {}", e)))?
}

/// Decode rows from any reader, keeping those accepted by `keep`
pub fn read_rows<R, F>(input: R, keep: F) -> Result<Vec<Record>>
where
    R: Read,
    F: Fn(&Record) -> bool,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| decode(h).trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        let row = to_record(&headers, &record);
        if keep(&row) {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn to_record(headers: &[String], record: &ByteRecord) -> Record {
    headers
        .iter()
        .zip(record.iter())
        .map(|(key, value)| (key.clone(), decode(value).trim().to_string()))
        .collect()
}

/// Invalid UTF-8 (Latin-1 exports) becomes U+FFFD instead of failing the read
fn decode(field: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(field)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::missing(path))
    }
}
