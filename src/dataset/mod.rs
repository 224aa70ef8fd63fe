//! Dataset loading.
//!
//! Reads the Bengaluru listings CSV into [`RawRecord`]s. Every cell is kept as
//! an optional string: interpretation (range parsing, NA detection, integer
//! conversion) belongs to the cleaning pipeline, which drops bad rows instead
//! of failing the whole read.
//!
//! # Example
//!
//! ```no_run
//! use bangalore_homeprice::dataset::load_raw_records;
//!
//! let records = load_raw_records("Bengaluru_House_Data.csv").unwrap();
//! println!("{} raw rows", records.len());
//! ```

use crate::preprocessing::PipelineError;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub mod matrix;
pub use self::matrix::{split_sizes, FeatureMatrix};

/// Columns the cleaning pipeline cannot do without.
pub const REQUIRED_COLUMNS: [&str; 5] = ["location", "size", "total_sqft", "bath", "price"];

/// Cell values treated as missing, mirroring the default NA set of
/// data-frame CSV readers. Matching is exact and case-sensitive.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns `true` when a cell counts as missing.
pub fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

/// One row of the source dataset, exactly as read.
///
/// `area_type`, `availability`, `society` and `balcony` are carried for
/// completeness and discarded by the first cleaning stage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub area_type: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub society: Option<String>,
    #[serde(default)]
    pub total_sqft: Option<String>,
    #[serde(default)]
    pub bath: Option<String>,
    #[serde(default)]
    pub balcony: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

impl RawRecord {
    /// Convenience constructor for the five columns the pipeline reads.
    pub fn new(location: &str, size: &str, total_sqft: &str, bath: &str, price: &str) -> Self {
        Self {
            location: Some(location.to_string()),
            size: Some(size.to_string()),
            total_sqft: Some(total_sqft.to_string()),
            bath: Some(bath.to_string()),
            price: Some(price.to_string()),
            ..Self::default()
        }
    }
}

/// Shape errors when assembling a [`FeatureMatrix`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("feature matrix has {rows} rows but target has {targets} values")]
    TargetMismatch { rows: usize, targets: usize },
    #[error("feature matrix has {features} columns but {names} names were given")]
    ColumnMismatch { features: usize, names: usize },
}

/// Loads raw records from a CSV file on disk.
///
/// # Errors
/// - [`PipelineError::DatasetMissing`] when `path` does not exist
/// - [`PipelineError::MissingColumn`] when a required header is absent
/// - [`PipelineError::Csv`] on malformed CSV
pub fn load_raw_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, PipelineError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::DatasetMissing(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    read_raw_records(std::io::BufReader::new(file))
}

/// Reads raw records from any CSV source with a header row.
pub fn read_raw_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PipelineError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: RawRecord = result?;
        records.push(record);
    }
    tracing::debug!(rows = records.len(), "read raw dataset");
    Ok(records)
}
