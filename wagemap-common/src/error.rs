//! Common error types for wagemap

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for wagemap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across wagemap crates
#[derive(Error, Debug)]
pub enum Error {
    /// A required reference or source file does not exist
    #[error("File {name} not found in {}", dir.display())]
    ResourceMissing { name: String, dir: PathBuf },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a `ResourceMissing` error for `path`, splitting it into file name and directory
    pub fn missing(path: &std::path::Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        Error::ResourceMissing { name, dir }
    }
}
