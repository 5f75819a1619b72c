//! File formats around the matcher.
//!
//! - [`catalog`]: load crater catalogs from CSV via a [`CatalogSchema`]
//! - [`mapping`]: write overlap mappings as JSON and CSV, read JSON back
//! - [`checkpoint`]: persist a raw mapping before final output

pub mod catalog;
pub mod checkpoint;
pub mod mapping;

pub use catalog::{load_catalog, read_catalog, CatalogSchema, LoadOptions, DEFAULT_MAX_CHILD_DIAMETER_KM};
pub use checkpoint::Checkpoint;
pub use mapping::{read_json, write_csv, write_json};
