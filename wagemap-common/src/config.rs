//! Configuration loading and data directory resolution
//!
//! Bootstrap configuration lives in a single TOML file. Every field has a
//! built-in default, so a missing file is not an error: the service starts
//! with defaults and logs a warning. A file that exists but fails to parse is
//! a configuration error.
//!
//! # Priority order
//!
//! Config file: `--config` argument, then `WAGEMAP_CONFIG`, then
//! `<config dir>/wagemap/config.toml`.
//!
//! Data directory: `--data-dir` argument, then `WAGEMAP_DATA_DIR`, then the
//! TOML `data_dir` key, then `./data`.

use crate::api::types::Collection;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "WAGEMAP_CONFIG";

/// Environment variable naming the data directory
pub const DATA_DIR_ENV_VAR: &str = "WAGEMAP_DATA_DIR";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Directory holding the reference and wage source files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Load all reference tables at startup instead of on first request
    #[serde(default)]
    pub preload: bool,

    #[serde(default)]
    pub sources: SourceFiles,

    #[serde(default)]
    pub meta: MetaConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File names of the source tables, relative to the data directory
#[derive(Debug, Clone, Deserialize)]
pub struct SourceFiles {
    #[serde(default = "default_soc_catalog")]
    pub soc_catalog: String,
    #[serde(default = "default_geography")]
    pub geography: String,
    #[serde(default = "default_county_reference")]
    pub county_reference: String,
    /// Wage levels for all industries
    #[serde(default = "default_wages_all")]
    pub wages_all: String,
    /// Wage levels for the education-sector collection
    #[serde(default = "default_wages_ed")]
    pub wages_ed: String,
}

/// Descriptive values echoed in every wage response
#[derive(Debug, Clone, Deserialize)]
pub struct MetaConfig {
    #[serde(default = "default_wage_year")]
    pub wage_year: String,
    #[serde(default = "default_source")]
    pub source: String,
}

/// HTTP surface settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Cache-Control value sent with successful data responses
    #[serde(default = "default_cache_control")]
    pub cache_control: String,

    /// Pre-built frontend served for routes the API does not handle
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5730
}

fn default_soc_catalog() -> String {
    "oes_soc_occs.csv".to_string()
}

fn default_geography() -> String {
    "Geography.csv".to_string()
}

fn default_county_reference() -> String {
    "national_county.txt".to_string()
}

fn default_wages_all() -> String {
    "ALC_Export.csv".to_string()
}

fn default_wages_ed() -> String {
    "EDC_Export.csv".to_string()
}

fn default_wage_year() -> String {
    "2025–2026".to_string()
}

fn default_source() -> String {
    "U.S. DOL OFLC (FLAG wage data)".to_string()
}

fn default_cache_control() -> String {
    "s-maxage=86400, stale-while-revalidate=604800".to_string()
}

fn default_log_level() -> String {
    "wagemap_api=info,tower_http=info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            host: default_host(),
            port: default_port(),
            preload: false,
            sources: SourceFiles::default(),
            meta: MetaConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            soc_catalog: default_soc_catalog(),
            geography: default_geography(),
            county_reference: default_county_reference(),
            wages_all: default_wages_all(),
            wages_ed: default_wages_ed(),
        }
    }
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            wage_year: default_wage_year(),
            source: default_source(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cache_control: default_cache_control(),
            static_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load configuration from `path`, falling back to defaults if the file is absent
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            info!("No config file found, using built-in defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using built-in defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }
}

/// Locate the config file
///
/// Returns `None` when neither the argument nor the environment names a file
/// and no file exists in the platform config directory.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    dirs::config_dir()
        .map(|d| d.join("wagemap").join("config.toml"))
        .filter(|p| p.exists())
}

/// Resolve the data directory
pub fn resolve_data_dir(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATA_DIR_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.data_dir {
        return path.clone();
    }

    // Priority 4: relative to the working directory
    PathBuf::from("data")
}

/// Resolved locations of every source table
#[derive(Debug, Clone)]
pub struct DataSources {
    pub dir: PathBuf,
    pub files: SourceFiles,
}

impl DataSources {
    pub fn new(dir: impl Into<PathBuf>, files: SourceFiles) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    pub fn soc_catalog(&self) -> PathBuf {
        self.dir.join(&self.files.soc_catalog)
    }

    pub fn geography(&self) -> PathBuf {
        self.dir.join(&self.files.geography)
    }

    pub fn county_reference(&self) -> PathBuf {
        self.dir.join(&self.files.county_reference)
    }

    /// Wage source file for a collection
    pub fn wages(&self, collection: Collection) -> PathBuf {
        match collection {
            Collection::All => self.dir.join(&self.files.wages_all),
            Collection::Education => self.dir.join(&self.files.wages_ed),
        }
    }
}
