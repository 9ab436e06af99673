//! Load-once cache of the reference tables
//!
//! The SOC catalog, geography table and county reference are read-only for
//! the life of the process. Each is loaded on first use and then shared.
//!
//! Loading takes no lock. Two requests that miss at the same time both load
//! the file and the first to finish is kept; the other copy is dropped. A
//! failed load leaves the slot empty so a later request retries.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;
use wagemap_common::config::DataSources;
use wagemap_common::{Error, Result};

use super::fips_index::FipsIndex;
use super::geography::GeographyIndex;
use super::soc_index::SocTitleIndex;

pub struct ReferenceCache {
    sources: DataSources,
    soc_titles: OnceCell<Arc<SocTitleIndex>>,
    geography: OnceCell<Arc<GeographyIndex>>,
    fips: OnceCell<Arc<FipsIndex>>,
}

impl ReferenceCache {
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources,
            soc_titles: OnceCell::new(),
            geography: OnceCell::new(),
            fips: OnceCell::new(),
        }
    }

    pub fn sources(&self) -> &DataSources {
        &self.sources
    }

    pub fn soc_titles(&self) -> Result<Arc<SocTitleIndex>> {
        load_once(&self.soc_titles, "SOC catalog", || {
            SocTitleIndex::load(&self.sources.soc_catalog())
        })
    }

    pub fn geography(&self) -> Result<Arc<GeographyIndex>> {
        load_once(&self.geography, "geography", || {
            GeographyIndex::load(&self.sources.geography())
        })
    }

    pub fn fips(&self) -> Result<Arc<FipsIndex>> {
        load_once(&self.fips, "county reference", || {
            FipsIndex::load(&self.sources.county_reference())
        })
    }

    /// Load all three tables now
    pub fn warm(&self) -> Result<()> {
        self.soc_titles()?;
        self.geography()?;
        self.fips()?;
        Ok(())
    }

    /// Whether every table has been loaded
    pub fn is_warm(&self) -> bool {
        self.soc_titles.get().is_some()
            && self.geography.get().is_some()
            && self.fips.get().is_some()
    }

    /// Run a cache access on the blocking pool
    ///
    /// First loads read whole files; this keeps them off the async workers.
    pub async fn run_blocking<T, F>(self: &Arc<Self>, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&ReferenceCache) -> Result<T> + Send + 'static,
    {
        let cache = Arc::clone(self);
        tokio::task::spawn_blocking(move || f(&cache))
            .await
            .map_err(|e| Error::Internal(format!("Reference load task failed: {}", e)))?
    }
}

fn load_once<T, F>(cell: &OnceCell<Arc<T>>, name: &str, load: F) -> Result<Arc<T>>
where
    F: FnOnce() -> Result<T>,
{
    if let Some(value) = cell.get() {
        return Ok(Arc::clone(value));
    }

    let loaded = Arc::new(load()?);
    info!(table = name, "Reference table loaded");

    // A concurrent loader may have finished first; keep whichever landed
    let _ = cell.set(Arc::clone(&loaded));
    Ok(cell.get().map(Arc::clone).unwrap_or(loaded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wagemap_common::config::SourceFiles;

    fn write_reference_files(dir: &std::path::Path) {
        std::fs::write(
            dir.join("oes_soc_occs.csv"),
            "SocCode,SocTitle\n15-1255,Web and Digital Interface Designers\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("Geography.csv"),
            "Area,StateAb,State,CountyTownName\n41940,CA,California,Santa Clara\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("national_county.txt"),
            "CA,06,085,Santa Clara County,H1\n",
        )
        .unwrap();
    }

    #[test]
    fn test_tables_loaded_once_and_shared() {
        let dir = tempfile::tempdir().unwrap();
        write_reference_files(dir.path());
        let cache = ReferenceCache::new(DataSources::new(dir.path(), SourceFiles::default()));

        let first = cache.geography().unwrap();
        // Removing the file proves the second call is served from memory
        std::fs::remove_file(dir.path().join("Geography.csv")).unwrap();
        let second = cache.geography().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ReferenceCache::new(DataSources::new(dir.path(), SourceFiles::default()));

        assert!(matches!(cache.fips(), Err(Error::ResourceMissing { .. })));
        assert!(!cache.is_warm());

        write_reference_files(dir.path());
        assert_eq!(cache.fips().unwrap().lookup("CA|santa clara county"), Some("06085"));
    }

    #[test]
    fn test_warm_loads_everything() {
        let dir = tempfile::tempdir().unwrap();
        write_reference_files(dir.path());
        let cache = ReferenceCache::new(DataSources::new(dir.path(), SourceFiles::default()));

        cache.warm().unwrap();
        assert!(cache.is_warm());
        assert_eq!(cache.soc_titles().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_first_loads_agree() {
        let dir = tempfile::tempdir().unwrap();
        write_reference_files(dir.path());
        let cache = Arc::new(ReferenceCache::new(DataSources::new(
            dir.path(),
            SourceFiles::default(),
        )));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.soc_titles().unwrap())
            })
            .collect();
        let loaded: Vec<Arc<SocTitleIndex>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        let kept = cache.soc_titles().unwrap();
        for index in &loaded {
            assert_eq!(index.list(), kept.list());
        }
    }
}
