//! Regression models with compile-time state tracking.

pub mod linear;
pub mod lstsq;
pub mod state;

pub use linear::{LinearModel, LinearParams, LinearRegression, SerializableLinearParams};
pub use state::{Fitted, Unfitted};

use crate::serialization::SerializableParams;
use ndarray::{Array1, ArrayView1, ArrayView2};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("expected {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("{rows} rows but {targets} targets")]
    TargetMismatch { rows: usize, targets: usize },
    #[error("cannot fit on an empty dataset")]
    EmptyData,
    #[error("model produced a non-finite value")]
    NonFinite,
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A trained model that can predict and be persisted.
///
/// Prediction is fallible: a feature vector of the wrong length or a
/// non-finite result is reported as a [`ModelError`] rather than a panic.
pub trait InferenceModel {
    /// Plain-data form of the parameters, as written to disk.
    type ParamsRepr: SerializableParams;

    /// Number of features the model expects.
    fn n_features(&self) -> usize;

    /// Predict on a single sample (feature vector).
    fn predict(&self, input: ArrayView1<'_, f64>) -> Result<f64, ModelError>;

    fn predict_batch(&self, input: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError>;

    fn extract_params(&self) -> Self::ParamsRepr;

    fn from_params(params: Self::ParamsRepr) -> Result<Self, ModelError>
    where
        Self: Sized;

    /// Save the fitted model to a file, replacing any previous one.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let params = self.extract_params();
        let bytes = params
            .to_bytes()
            .map_err(|e| ModelError::Serialization(e.to_string()))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a fitted model from a file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::ParamsRepr::from_bytes(&bytes)
            .map_err(|e| ModelError::Serialization(e.to_string()))?;
        Self::from_params(params)
    }
}
