//! Durable hand-off between matching and output formatting.
//!
//! A full match can take hours. The raw mapping is persisted as JSON before
//! any final output is formatted, so a failure while writing CSV or JSON
//! output does not lose the result.

use super::mapping::{read_json, write_json_atomic};
use crate::error::{CatalogError, Result};
use crater_core::OverlapMapping;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    path: PathBuf,
}

impl Checkpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<output_dir>/<name>.checkpoint.json`
    pub fn for_output(output_dir: &Path, name: &str) -> Self {
        Self::new(output_dir.join(format!("{}.checkpoint.json", name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, mapping: &OverlapMapping) -> Result<()> {
        write_json_atomic(&self.path, mapping)?;
        tracing::info!(path = %self.path.display(), parents = mapping.len(), "checkpoint saved");
        Ok(())
    }

    pub fn load(&self) -> Result<OverlapMapping> {
        read_json(&self.path)
    }

    /// Removes the checkpoint file. A missing file is not an error.
    pub fn discard(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "checkpoint discarded");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CatalogError::file(&self.path, e)),
        }
    }
}
