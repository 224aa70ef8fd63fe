//! Holdout training of the price model.

use crate::dataset::{split_sizes, FeatureMatrix};
use crate::metrics::{Metrics, RegressionMetrics};
use crate::model::{Fitted, InferenceModel, LinearModel, LinearRegression, ModelError};
use thiserror::Error;

pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("test size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),
    #[error("{n} samples cannot be split into {n_train} train and {n_test} test rows")]
    TooFewSamples {
        n: usize,
        n_train: usize,
        n_test: usize,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A trained model together with what it was trained on.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: LinearModel<Fitted>,
    /// Feature names in model input order.
    pub columns: Vec<String>,
    /// Scores on the held-out rows.
    pub holdout: RegressionMetrics,
    pub n_train: usize,
    pub n_test: usize,
}

// --- Main structure (immutable after build) ---
#[derive(Debug, Clone)]
pub struct Trainer {
    pub(crate) test_size: f64,
    pub(crate) seed: u64,
    pub(crate) verbose: bool,
}

// --- Builder ---
#[derive(Debug, Clone)]
pub struct TrainerBuilder {
    test_size: f64,
    seed: u64,
    verbose: bool,
}

impl Default for TrainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainerBuilder {
    pub fn new() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
            verbose: false,
        }
    }

    /// Fraction of rows held out for scoring.
    pub fn test_size(mut self, fraction: f64) -> Self {
        self.test_size = fraction;
        self
    }

    /// Seed of the shuffle that picks the holdout rows.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Log holdout scores at `info` instead of `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Result<Trainer, TrainError> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(TrainError::InvalidTestSize(self.test_size));
        }
        Ok(Trainer {
            test_size: self.test_size,
            seed: self.seed,
            verbose: self.verbose,
        })
    }
}

impl Trainer {
    pub fn builder() -> TrainerBuilder {
        TrainerBuilder::new()
    }

    pub fn test_size(&self) -> f64 {
        self.test_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Splits `data`, fits OLS on the train side and scores the test side.
    ///
    /// The same matrix and seed always give the same split and therefore
    /// the same coefficients.
    pub fn fit(&self, data: &FeatureMatrix) -> Result<TrainingOutcome, TrainError> {
        let n = data.n_samples();
        let (n_train, n_test) = split_sizes(n, self.test_size);
        if n_train == 0 || n_test == 0 {
            return Err(TrainError::TooFewSamples { n, n_train, n_test });
        }

        let (train, test) = data.train_test_split(self.test_size, self.seed);
        let model =
            LinearRegression::new(data.n_features()).fit(train.x().view(), train.y().view())?;

        let y_pred = model.predict_batch(test.x().view())?;
        let holdout = Metrics::calculate_all(test.y().view(), y_pred.view());

        if self.verbose {
            tracing::info!(
                n_train,
                n_test,
                r2 = holdout.r_squared,
                rmse = holdout.rmse,
                "holdout score"
            );
        } else {
            tracing::debug!(n_train, n_test, r2 = holdout.r_squared, "holdout score");
        }

        Ok(TrainingOutcome {
            model,
            columns: data.columns().to_vec(),
            holdout,
            n_train,
            n_test,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn linear_data(n: usize) -> FeatureMatrix {
        // y = 0.05 * sqft + 3 * bath + 1, with a small deterministic wobble
        let x = Array2::from_shape_fn((n, 2), |(r, c)| match c {
            0 => 500.0 + 37.0 * r as f64,
            _ => (r % 4) as f64 + 1.0,
        });
        let y = Array1::from_iter(
            x.rows()
                .into_iter()
                .map(|row| 0.05 * row[0] + 3.0 * row[1] + 1.0),
        );
        FeatureMatrix::new(vec!["total_sqft".into(), "bath".into()], x, y).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let t = Trainer::builder().build().unwrap();
        assert_eq!(t.test_size(), 0.2);
        assert_eq!(t.seed(), 42);
    }

    #[test]
    fn test_builder_rejects_bad_test_size() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                Trainer::builder().test_size(bad).build(),
                Err(TrainError::InvalidTestSize(_))
            ));
        }
    }

    #[test]
    fn test_fit_recovers_exact_relationship() {
        let t = Trainer::builder().build().unwrap();
        let out = t.fit(&linear_data(20)).unwrap();
        assert_eq!(out.n_train, 16);
        assert_eq!(out.n_test, 4);
        assert!((out.model.coefficients()[0] - 0.05).abs() < 1e-9);
        assert!((out.model.coefficients()[1] - 3.0).abs() < 1e-9);
        assert!((out.holdout.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(out.columns, vec!["total_sqft", "bath"]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let data = linear_data(30);
        let t = Trainer::builder().seed(9).build().unwrap();
        let a = t.fit(&data).unwrap();
        let b = t.fit(&data).unwrap();
        assert_eq!(a.model.extract_params(), b.model.extract_params());
    }

    #[test]
    fn test_fit_needs_both_sides() {
        let t = Trainer::builder().build().unwrap();
        assert!(matches!(
            t.fit(&linear_data(1)),
            Err(TrainError::TooFewSamples { n: 1, .. })
        ));
    }
}
