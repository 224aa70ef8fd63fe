//! Ordinary least squares linear regression.
//!
//! This module implements a type-safe linear model with compile-time state tracking:
//! - [`LinearRegression`] = `LinearModel<Unfitted>`, holds fit settings.
//! - [`LinearModel<Fitted>`], inference-only, serializable predictor.
//!
//! Fitting centres `X` and `y` when an intercept is requested and solves the
//! centred problem with [`lstsq`](crate::model::lstsq::lstsq).

use crate::model::lstsq::lstsq;
pub use crate::model::{Fitted, InferenceModel, ModelError, Unfitted};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Parameters of a linear model: `y = coefficients · x + intercept`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearParams {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

/// Serializable representation of linear model parameters.
///
/// Used by [`InferenceModel::save_to_file`] and [`InferenceModel::load_from_file`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLinearParams {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl From<&LinearParams> for SerializableLinearParams {
    fn from(params: &LinearParams) -> Self {
        Self {
            coefficients: params.coefficients.to_vec(),
            intercept: params.intercept,
        }
    }
}

impl TryFrom<SerializableLinearParams> for LinearParams {
    type Error = ModelError;

    fn try_from(value: SerializableLinearParams) -> Result<Self, Self::Error> {
        if !value.intercept.is_finite() || value.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        Ok(Self {
            coefficients: Array1::from(value.coefficients),
            intercept: value.intercept,
        })
    }
}

/// A linear model with state encoded at the type level.
///
/// - When `S = Unfitted`: carries fit settings and can be [`fit`](LinearRegression::fit).
/// - When `S = Fitted`: implements [`InferenceModel`], used for prediction and serialization.
#[derive(Debug, Clone)]
pub struct LinearModel<S> {
    params: LinearParams,
    state: S,
}

pub type LinearRegression = LinearModel<Unfitted>;

impl LinearRegression {
    /// An unfitted model expecting `n_features` inputs, with intercept.
    pub fn new(n_features: usize) -> Self {
        Self {
            params: LinearParams {
                coefficients: Array1::zeros(n_features),
                intercept: 0.0,
            },
            state: Unfitted::default(),
        }
    }

    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.state.fit_intercept = fit_intercept;
        self
    }

    pub fn n_features(&self) -> usize {
        self.params.coefficients.len()
    }

    /// Fits the model by least squares, consuming the unfitted model.
    ///
    /// Rank-deficient directions (for example two identical columns) get a
    /// zero coefficient.
    pub fn fit(
        self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
    ) -> Result<LinearModel<Fitted>, ModelError> {
        if x.ncols() != self.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features(),
                got: x.ncols(),
            });
        }
        if x.nrows() != y.len() {
            return Err(ModelError::TargetMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }

        let (coefficients, intercept, rank) = if self.state.fit_intercept {
            let x_mean = x.mean_axis(Axis(0)).ok_or(ModelError::EmptyData)?;
            let y_mean = y.mean().ok_or(ModelError::EmptyData)?;
            let xc = &x - &x_mean;
            let yc = &y - y_mean;
            let sol = lstsq(xc.view(), yc.view())?;
            let intercept = y_mean - x_mean.dot(&sol.coefficients);
            (sol.coefficients, intercept, sol.rank)
        } else {
            let sol = lstsq(x, y)?;
            (sol.coefficients, 0.0, sol.rank)
        };

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        if rank < self.n_features() {
            tracing::debug!(rank, n_features = self.n_features(), "design matrix is rank deficient");
        }

        Ok(LinearModel::<Fitted>::new(LinearParams {
            coefficients,
            intercept,
        }))
    }
}

impl LinearModel<Fitted> {
    /// Creates a fitted linear model from trained parameters.
    pub fn new(params: LinearParams) -> Self {
        Self {
            params,
            state: Fitted,
        }
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.params.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.params.intercept
    }
}

/// Inference for a trained linear model: `y = w^T x + b`.
impl InferenceModel for LinearModel<Fitted> {
    type ParamsRepr = SerializableLinearParams;

    fn n_features(&self) -> usize {
        self.params.coefficients.len()
    }

    fn predict(&self, input: ArrayView1<'_, f64>) -> Result<f64, ModelError> {
        if input.len() != self.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features(),
                got: input.len(),
            });
        }
        let y = self.params.coefficients.dot(&input) + self.params.intercept;
        if !y.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(y)
    }

    fn predict_batch(&self, input: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        if input.ncols() != self.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features(),
                got: input.ncols(),
            });
        }
        let y = input.dot(&self.params.coefficients) + self.params.intercept;
        if y.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        Ok(y)
    }

    fn extract_params(&self) -> Self::ParamsRepr {
        (&self.params).into()
    }

    fn from_params(params: Self::ParamsRepr) -> Result<Self, ModelError> {
        let internal_params = LinearParams::try_from(params)?;
        Ok(Self::new(internal_params))
    }
}
