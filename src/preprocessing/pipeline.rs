//! The cleaning and feature-building pipeline.
//!
//! Stages run in a fixed order; changing it changes which rows survive and
//! therefore the trained coefficients.
//!
//! 1. drop rows with missing cells, parse bedroom count and total area
//! 2. drop rows with less than `min_sqft_per_bhk` square feet per bedroom
//! 3. trim locations and merge rare ones into `"other"`
//! 4. price-per-sqft outliers per location
//! 5. bedroom-count outliers per location
//! 6. drop rows with more than `bhk + max_extra_baths` bathrooms
//! 7. one-hot encode locations and assemble the feature matrix

use crate::dataset::{FeatureMatrix, RawRecord};
use crate::preprocessing::encoding::{FittedOneHotEncoder, OneHotEncoder};
use crate::preprocessing::error::{PipelineError, RowError};
use crate::preprocessing::outliers::{remove_bhk_outliers, remove_pps_outliers};
use crate::preprocessing::record::CleanedRecord;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Name of the bucket that absorbs rare locations.
pub const OTHER_LOCATION: &str = "other";

/// Numeric feature columns, in schema order.
pub const NUMERIC_COLUMNS: [&str; 3] = ["total_sqft", "bath", "bhk"];

/// Thresholds used by the cleaning stages.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningConfig {
    /// Locations seen this many times or fewer become `"other"`.
    pub rare_location_threshold: usize,
    pub min_sqft_per_bhk: f64,
    pub max_extra_baths: u32,
    /// The smaller-bhk group must have more rows than this to be used as a
    /// reference by the bedroom-count filter.
    pub min_bhk_group_size: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            rare_location_threshold: 10,
            min_sqft_per_bhk: 300.0,
            max_extra_baths: 2,
            min_bhk_group_size: 5,
        }
    }
}

impl CleaningConfig {
    pub fn with_rare_location_threshold(mut self, n: usize) -> Self {
        self.rare_location_threshold = n;
        self
    }

    pub fn with_min_sqft_per_bhk(mut self, sqft: f64) -> Self {
        self.min_sqft_per_bhk = sqft;
        self
    }

    pub fn with_max_extra_baths(mut self, n: u32) -> Self {
        self.max_extra_baths = n;
        self
    }

    pub fn with_min_bhk_group_size(mut self, n: usize) -> Self {
        self.min_bhk_group_size = n;
        self
    }
}

/// Row counts after each stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningReport {
    pub raw_rows: usize,
    pub dropped_missing: usize,
    pub dropped_unparsable: usize,
    pub after_parse: usize,
    pub after_sqft_per_bhk: usize,
    pub rare_locations: usize,
    pub after_pps_outliers: usize,
    pub after_bhk_outliers: usize,
    pub after_bath_filter: usize,
    pub location_columns: usize,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub matrix: FeatureMatrix,
    pub report: CleaningReport,
}

/// Runs the cleaning stages over raw records.
///
/// # Example
/// ```no_run
/// use bangalore_homeprice::dataset::load_raw_records;
/// use bangalore_homeprice::preprocessing::{CleaningConfig, CleaningPipeline};
///
/// let raw = load_raw_records("Bengaluru_House_Data.csv")?;
/// let cleaned = CleaningPipeline::new(CleaningConfig::default()).run(&raw)?;
/// println!("X = {:?}", cleaned.matrix.x().dim());
/// # Ok::<(), bangalore_homeprice::preprocessing::PipelineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    config: CleaningConfig,
}

fn non_empty(records: &[CleanedRecord], stage: &'static str) -> Result<(), PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::EmptyData { stage });
    }
    Ok(())
}

impl CleaningPipeline {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Cleans and encodes `raw` into a feature matrix.
    pub fn run(&self, raw: &[RawRecord]) -> Result<CleanedDataset, PipelineError> {
        let (records, mut report) = self.clean(raw)?;
        let (matrix, encoder) = self.encode(&records)?;
        report.location_columns = encoder.n_features_out();

        tracing::info!(
            raw = report.raw_rows,
            parsed = report.after_parse,
            sqft_per_bhk = report.after_sqft_per_bhk,
            pps = report.after_pps_outliers,
            bhk = report.after_bhk_outliers,
            bath = report.after_bath_filter,
            locations = report.location_columns,
            "cleaning finished"
        );
        Ok(CleanedDataset { matrix, report })
    }

    /// Runs every filtering stage, returning surviving rows in pipeline order.
    pub fn clean(
        &self,
        raw: &[RawRecord],
    ) -> Result<(Vec<CleanedRecord>, CleaningReport), PipelineError> {
        let mut report = CleaningReport {
            raw_rows: raw.len(),
            ..CleaningReport::default()
        };

        let mut records = Vec::with_capacity(raw.len());
        for (i, row) in raw.iter().enumerate() {
            match CleanedRecord::try_from(row) {
                Ok(r) => records.push(r),
                Err(RowError::Missing(column)) => {
                    report.dropped_missing += 1;
                    tracing::trace!(row = i, column, "dropping row with missing value");
                }
                Err(e) => {
                    report.dropped_unparsable += 1;
                    tracing::debug!(row = i, error = %e, "dropping unparsable row");
                }
            }
        }
        report.after_parse = records.len();
        non_empty(&records, "parsing")?;

        // a ratio that cannot be compared (0 bedrooms) is kept
        let min_sqft = self.config.min_sqft_per_bhk;
        records.retain(|r| !(r.sqft_per_bhk() < min_sqft));
        report.after_sqft_per_bhk = records.len();
        non_empty(&records, "sqft per bedroom filter")?;

        report.rare_locations = self.merge_rare_locations(&mut records);

        let records = remove_pps_outliers(records);
        report.after_pps_outliers = records.len();
        non_empty(&records, "price per sqft outlier removal")?;

        let mut records = remove_bhk_outliers(records, self.config.min_bhk_group_size);
        report.after_bhk_outliers = records.len();
        non_empty(&records, "bedroom outlier removal")?;

        // saturating: a bedroom count near u32::MAX leaves every bath count in range
        let extra = self.config.max_extra_baths;
        records.retain(|r| r.bath <= r.bhk.saturating_add(extra));
        report.after_bath_filter = records.len();
        non_empty(&records, "bathroom filter")?;

        Ok((records, report))
    }

    /// Trims locations and renames rare ones to [`OTHER_LOCATION`].
    ///
    /// Returns the number of distinct locations merged.
    fn merge_rare_locations(&self, records: &mut [CleanedRecord]) -> usize {
        for r in records.iter_mut() {
            let trimmed = r.location.trim();
            if trimmed.len() != r.location.len() {
                r.location = trimmed.to_string();
            }
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for r in records.iter() {
            *counts.entry(r.location.clone()).or_default() += 1;
        }
        let threshold = self.config.rare_location_threshold;
        let rare = counts.values().filter(|&&c| c <= threshold).count();

        for r in records.iter_mut() {
            if counts[&r.location] <= threshold {
                r.location = OTHER_LOCATION.to_string();
            }
        }
        tracing::debug!(
            distinct = counts.len(),
            rare,
            "merged rare locations into `{}`",
            OTHER_LOCATION
        );
        rare
    }

    /// Assembles `X = [total_sqft, bath, bhk, locations...]` and `y = price`.
    pub fn encode(
        &self,
        records: &[CleanedRecord],
    ) -> Result<(FeatureMatrix, FittedOneHotEncoder), PipelineError> {
        let encoder = OneHotEncoder::new()
            .with_drop(OTHER_LOCATION)
            .fit(records.iter().map(|r| r.location.as_str()))?;

        let n_loc = encoder.n_features_out();
        let n_cols = NUMERIC_COLUMNS.len() + n_loc;
        let mut x = Array2::<f64>::zeros((records.len(), n_cols));
        let mut y = Array1::<f64>::zeros(records.len());

        for (i, r) in records.iter().enumerate() {
            let mut row = x.row_mut(i);
            row[0] = r.total_sqft;
            row[1] = r.bath as f64;
            row[2] = r.bhk as f64;
            if let Some(j) = encoder.index_of(&r.location) {
                row[NUMERIC_COLUMNS.len() + j] = 1.0;
            }
            y[i] = r.price;
        }

        let columns = NUMERIC_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(encoder.categories().iter().cloned())
            .collect();
        let matrix = FeatureMatrix::new(columns, x, y)?;
        Ok((matrix, encoder))
    }
}
