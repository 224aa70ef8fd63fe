//! Error types for the cleaning pipeline.
//!
//! Two levels exist. [`RowError`] describes why a single raw record could not
//! be turned into a cleaned record; the pipeline counts and discards those.
//! [`PipelineError`] is dataset-wide and aborts the build.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single record was dropped during cleaning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// A required column holds an empty or NA-like cell.
    #[error("missing value in column `{0}`")]
    Missing(&'static str),
    /// The size column does not start with an integer bedroom count.
    #[error("cannot parse bedroom count from size `{0}`")]
    InvalidSize(String),
    /// The total area is neither a number nor an `a - b` range.
    #[error("cannot parse total area `{0}`")]
    InvalidArea(String),
    /// A numeric column holds something other than a finite number.
    #[error("invalid number `{value}` in column `{column}`")]
    InvalidNumber { column: &'static str, value: String },
}

/// Dataset-wide failure; the build cannot continue.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file does not exist.
    #[error("dataset not found at {}", .0.display())]
    DatasetMissing(PathBuf),
    /// The input could not be read as CSV.
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),
    /// The input lacks one of the columns the pipeline needs.
    #[error("dataset has no `{0}` column")]
    MissingColumn(&'static str),
    /// Nothing is left after a cleaning stage.
    #[error("no rows left after {stage}")]
    EmptyData { stage: &'static str },
    /// The assembled matrix is inconsistent.
    #[error(transparent)]
    Shape(#[from] crate::dataset::DatasetError),
    /// I/O error while reading the dataset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
