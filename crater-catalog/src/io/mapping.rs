//! Overlap mapping serialization.
//!
//! Two forms are written:
//!
//! - **JSON**: an object keyed by parent id (text) with a list of child ids
//!   per parent. Integer ids are written as numbers. Indented by four spaces.
//! - **CSV**: one row per parent with columns `parent_id` and `child_ids`,
//!   the child ids joined by `;`.
//!
//! Only the JSON form is read back; it is also the checkpoint and correction
//! input format.

use crate::error::{CatalogError, Result};
use crater_core::OverlapMapping;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub const CHILD_ID_SEPARATOR: &str = ";";

pub fn write_json_to<W: Write>(writer: W, mapping: &OverlapMapping) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    mapping.serialize(&mut serializer)?;
    Ok(())
}

pub fn read_json_from<R: Read>(reader: R) -> Result<OverlapMapping> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_json(path: impl AsRef<Path>, mapping: &OverlapMapping) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CatalogError::file(path, e))?;
    let mut writer = BufWriter::new(file);
    write_json_to(&mut writer, mapping)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), parents = mapping.len(), "wrote mapping json");
    Ok(())
}

pub fn read_json(path: impl AsRef<Path>) -> Result<OverlapMapping> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CatalogError::file(path, e))?;
    let mapping = read_json_from(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        parents = mapping.len(),
        associations = mapping.association_count(),
        "read mapping json"
    );
    Ok(mapping)
}

pub fn write_csv_to<W: Write>(writer: W, mapping: &OverlapMapping) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["parent_id", "child_ids"])?;
    for (parent, children) in mapping {
        let joined = children
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(CHILD_ID_SEPARATOR);
        csv_writer.write_record([parent.to_string(), joined])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv(path: impl AsRef<Path>, mapping: &OverlapMapping) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CatalogError::file(path, e))?;
    write_csv_to(BufWriter::new(file), mapping)?;
    tracing::debug!(path = %path.display(), parents = mapping.len(), "wrote mapping csv");
    Ok(())
}

/// Writes `mapping` as JSON to a sibling temp file, then renames it over
/// `path`, so a crash never leaves a truncated file behind.
pub fn write_json_atomic(path: impl AsRef<Path>, mapping: &OverlapMapping) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("json.tmp");
    write_json(&tmp_path, mapping)?;
    fs::rename(&tmp_path, path).map_err(|e| CatalogError::file(path, e))?;
    Ok(())
}
