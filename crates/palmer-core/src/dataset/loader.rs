//! Dataset provider.
//!
//! The dashboard reads its table exactly once at startup. By default this is
//! the sample bundled with the crate; a Palmer-format CSV (as published by the
//! `palmerpenguins` package, `NA` for missing values) can be loaded instead.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::schema::{Dataset, Island, PenguinRecord, Sex, Species};
use crate::error::{Error, Result};

/// Sample of the Palmer Archipelago penguin observations bundled with the crate.
pub const SAMPLE_CSV: &str = include_str!("../../data/penguins.csv");

/// Columns a CSV must provide. `sex` and `year` are optional.
const REQUIRED_COLUMNS: [&str; 6] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
];

#[derive(Debug, Deserialize)]
struct CsvRow {
    species: Species,
    island: Island,
    #[serde(deserialize_with = "csv::invalid_option")]
    bill_length_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    bill_depth_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    flipper_length_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    body_mass_g: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    sex: Option<Sex>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    year: Option<u16>,
}

/// `inf` and `NaN` parse as floats but are not measurements; treat them like `NA`.
fn measurement(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl From<CsvRow> for PenguinRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            species: row.species,
            island: row.island,
            bill_length_mm: measurement(row.bill_length_mm),
            bill_depth_mm: measurement(row.bill_depth_mm),
            flipper_length_mm: measurement(row.flipper_length_mm),
            body_mass_g: measurement(row.body_mass_g),
            sex: row.sex,
            year: row.year,
        }
    }
}

/// Load the bundled sample dataset.
pub fn load_dataset() -> Result<Dataset> {
    parse_csv(SAMPLE_CSV.as_bytes(), None)
}

/// Load a dataset from a CSV file on disk.
pub fn load_dataset_from(path: &Path) -> Result<Dataset> {
    let file = File::open(path)?;
    parse_csv(file, Some(path))
}

/// Parse a Palmer-format CSV. `origin` is only used in error messages.
pub fn parse_csv<R: Read>(reader: R, origin: Option<&Path>) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(Error::Dataset {
            path: origin.map(Path::to_path_buf),
            message: format!("missing column(s): {}", missing.join(", ")),
        });
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row.map_err(|e| Error::Dataset {
            path: origin.map(Path::to_path_buf),
            message: e.to_string(),
        })?;
        records.push(PenguinRecord::from(row));
    }

    if records.is_empty() {
        tracing::warn!("Dataset contains no rows");
    }
    tracing::debug!(
        rows = records.len(),
        source = %origin.map(|p| p.display().to_string()).unwrap_or_else(|| "bundled sample".to_string()),
        "Loaded penguin dataset"
    );

    Ok(Dataset::new(records))
}
