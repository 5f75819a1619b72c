//! Crater-in-crater matching for planetary crater catalogs.
//!
//! Finds which small ("child") craters lie inside the footprint of large
//! ("parent") craters and produces a parent → children mapping. Built on the
//! geometry in `crater_core`.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`matching::matcher`] | [`Matcher`](matching::Matcher), first-match assignment, optional rayon sharding |
//! | [`matching::corrector`] | [`correct`](matching::correct), inclusive radius re-validation of an existing mapping |
//! | [`matching::progress`] | [`MatchProgress`](matching::MatchProgress), ETA estimation, [`ProgressObserver`](matching::ProgressObserver) |
//! | [`io::catalog`] | CSV catalog loading with [`CatalogSchema`](io::CatalogSchema) presets for Robbins and Yang |
//! | [`io::mapping`] | JSON and CSV mapping output, JSON input |
//! | [`io::checkpoint`] | [`Checkpoint`](io::Checkpoint) persistence of raw results |
//!
//! # Quick Start
//!
//! ```ignore
//! use crater_catalog::io::{load_catalog, write_json, CatalogSchema, LoadOptions};
//! use crater_catalog::matching::match_craters;
//!
//! let children = load_catalog("lunar_crater_database_robbins_2018.csv",
//!     &CatalogSchema::robbins(), &LoadOptions::children())?;
//! let parents = load_catalog("yang_aged_database.csv",
//!     &CatalogSchema::yang(), &LoadOptions::default())?;
//!
//! let mapping = match_craters(&children, &parents);
//! write_json("robbins_in_yang.json", &mapping)?;
//! ```
//!
//! # Features
//!
//! - **`cli`** (default): builds the `craters` binary with `download`,
//!   `match` and `correct` subcommands.

pub mod error;
pub mod io;
pub mod matching;

pub use error::{CatalogError, Result};
