//! Wage resolution services
//!
//! Leaf-first: field maps and unit rules, the three reference indexes, the
//! county join, and the engine that ties them together.

pub mod county_join;
pub mod fields;
pub mod fips_index;
pub mod geography;
pub mod reference_cache;
pub mod soc_index;
pub mod wage_engine;
pub mod wage_rows;
pub mod wage_units;

pub use fips_index::FipsIndex;
pub use geography::{GeographyIndex, GeographyRecord};
pub use reference_cache::ReferenceCache;
pub use soc_index::SocTitleIndex;
pub use wage_engine::{assemble_response, WageEngine, UNKNOWN_TITLE};
pub use wage_rows::{WageFigures, WageRow};
pub use wage_units::{resolve_annual, UnitHint};
