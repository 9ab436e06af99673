//! # wagemap Common Library
//!
//! Shared code for the wagemap service crates:
//! - Error type and result alias
//! - Bootstrap configuration (TOML) and data directory resolution
//! - Tabular source reading (bounded full reads, streamed filtered reads)
//! - API response types

pub mod api;
pub mod config;
pub mod error;
pub mod tabular;

pub use error::{Error, Result};
pub use tabular::Record;
