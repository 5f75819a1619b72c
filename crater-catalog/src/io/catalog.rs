//! Crater catalog loading from CSV.
//!
//! Source catalogs carry dozens of columns under their own names. A
//! [`CatalogSchema`] names the four (or five, with age) columns the matcher
//! needs; everything else in the file is ignored.
//!
//! Loading is all-or-nothing: a missing column, an empty or non-numeric
//! coordinate, a latitude outside [-90, 90] or a non-positive diameter aborts
//! the whole load with the catalog name and line number. Longitudes are
//! wrapped into [0, 360) as records are built.

use crate::error::{CatalogError, Result};
use crater_core::{Crater, CraterError, CraterId};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Children smaller than this are kept by the Robbins preset, in kilometers.
pub const DEFAULT_MAX_CHILD_DIAMETER_KM: f64 = 10.0;

/// Column names for one source catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSchema {
    /// Short catalog name used in log lines and errors.
    pub name: String,
    pub id: String,
    pub longitude: String,
    pub latitude: String,
    pub diameter: String,
    /// Optional pass-through age column.
    pub age: Option<String>,
}

impl CatalogSchema {
    /// Robbins (2018) lunar crater database, circle-fit image columns.
    pub fn robbins() -> Self {
        Self {
            name: "robbins".to_string(),
            id: "CRATER_ID".to_string(),
            longitude: "LON_CIRC_IMG".to_string(),
            latitude: "LAT_CIRC_IMG".to_string(),
            diameter: "DIAM_CIRC_IMG".to_string(),
            age: None,
        }
    }

    /// Yang et al. (2020) aged lunar crater database.
    pub fn yang() -> Self {
        Self {
            name: "yang".to_string(),
            id: "ID".to_string(),
            longitude: "Lon".to_string(),
            latitude: "Lat".to_string(),
            diameter: "Diam_km".to_string(),
            age: Some("Age".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    /// Keep only craters with `diameter < max_diameter_km`.
    pub max_diameter_km: Option<f64>,
}

impl LoadOptions {
    pub fn children() -> Self {
        Self {
            max_diameter_km: Some(DEFAULT_MAX_CHILD_DIAMETER_KM),
        }
    }
}

pub fn load_catalog(
    path: impl AsRef<Path>,
    schema: &CatalogSchema,
    options: &LoadOptions,
) -> Result<Vec<Crater>> {
    let path = path.as_ref();
    tracing::info!(catalog = %schema.name, path = %path.display(), "loading catalog");
    let file = File::open(path).map_err(|e| CatalogError::file(path, e))?;
    read_catalog(BufReader::new(file), schema, options)
}

pub fn read_catalog<R: Read>(
    reader: R,
    schema: &CatalogSchema,
    options: &LoadOptions,
) -> Result<Vec<Crater>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnIndices::resolve(csv_reader.headers()?, schema)?;

    let mut craters = Vec::new();
    let mut filtered = 0u64;
    let mut record = csv::StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let crater = columns.parse(&record, schema, line)?;
        if let Some(max) = options.max_diameter_km {
            if crater.diameter_km >= max {
                filtered += 1;
                continue;
            }
        }
        craters.push(crater);
    }

    tracing::info!(
        catalog = %schema.name,
        kept = craters.len(),
        filtered,
        "catalog loaded"
    );
    Ok(craters)
}

struct ColumnIndices {
    id: usize,
    longitude: usize,
    latitude: usize,
    diameter: usize,
    age: Option<usize>,
}

impl ColumnIndices {
    fn resolve(headers: &csv::StringRecord, schema: &CatalogSchema) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| CatalogError::MissingColumn {
                    catalog: schema.name.clone(),
                    column: column.to_string(),
                })
        };
        Ok(Self {
            id: find(&schema.id)?,
            longitude: find(&schema.longitude)?,
            latitude: find(&schema.latitude)?,
            diameter: find(&schema.diameter)?,
            age: schema.age.as_deref().map(find).transpose()?,
        })
    }

    fn parse(&self, record: &csv::StringRecord, schema: &CatalogSchema, line: u64) -> Result<Crater> {
        let row = Row {
            record,
            catalog: &schema.name,
            line,
        };

        let id = CraterId::parse(row.field(self.id, &schema.id)?)
            .map_err(|e| row.malformed(e.to_string()))?;
        let lon = row.number(self.longitude, &schema.longitude)?;
        let lat = row.number(self.latitude, &schema.latitude)?;
        let diameter = row.number(self.diameter, &schema.diameter)?;

        let mut crater =
            Crater::new(id, lon, lat, diameter).map_err(|e| row.malformed(e.to_string()))?;
        if let Some(age_index) = self.age {
            if let Some(age) = record.get(age_index).filter(|a| !a.is_empty()) {
                crater = crater.with_age(age);
            }
        }
        Ok(crater)
    }
}

struct Row<'r> {
    record: &'r csv::StringRecord,
    catalog: &'r str,
    line: u64,
}

impl<'r> Row<'r> {
    fn malformed(&self, message: String) -> CraterError {
        CraterError::malformed_record(self.catalog, self.line, &message)
    }

    fn field(&self, index: usize, column: &str) -> std::result::Result<&'r str, CraterError> {
        match self.record.get(index) {
            Some(value) if !value.is_empty() => Ok(value),
            Some(_) => Err(self.malformed(format!("empty field {}", column))),
            None => Err(self.malformed(format!("missing field {}", column))),
        }
    }

    fn number(&self, index: usize, column: &str) -> std::result::Result<f64, CraterError> {
        let raw = self.field(index, column)?;
        raw.parse::<f64>()
            .map_err(|_| self.malformed(format!("non-numeric value '{}' in {}", raw, column)))
    }
}
