//! Holdout scores for the price model. All errors are in lakhs.

use ndarray::ArrayView1;

/// Metrics for evaluating regression models.
///
/// Every function panics if the two arrays differ in length and returns 0
/// for empty input.
pub struct Metrics;

impl Metrics {
    fn residuals(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> ndarray::Array1<f64> {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );
        &y_true - &y_pred
    }

    /// MSE = mean((y_true - y_pred)^2)
    pub fn mse(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
        Self::residuals(y_true, y_pred)
            .mapv(|r| r * r)
            .mean()
            .unwrap_or(0.0)
    }

    pub fn rmse(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
        Self::mse(y_true, y_pred).sqrt()
    }

    /// MAE = mean(|y_true - y_pred|)
    pub fn mae(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
        Self::residuals(y_true, y_pred)
            .mapv(f64::abs)
            .mean()
            .unwrap_or(0.0)
    }

    /// R² = 1 - SS_res / SS_tot.
    ///
    /// Negative when the model is worse than predicting the mean. A constant
    /// target scores 1 if matched exactly and 0 otherwise.
    pub fn r_squared(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
        let resid = Self::residuals(y_true, y_pred);
        let Some(mean_true) = y_true.mean() else {
            return 0.0;
        };

        let ss_res = resid.dot(&resid);
        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        if ss_tot == 0.0 {
            return if ss_res == 0.0 { 1.0 } else { 0.0 };
        }
        1.0 - ss_res / ss_tot
    }

    /// Calculate all metrics at once.
    pub fn calculate_all(
        y_true: ArrayView1<'_, f64>,
        y_pred: ArrayView1<'_, f64>,
    ) -> RegressionMetrics {
        RegressionMetrics {
            mse: Self::mse(y_true, y_pred),
            rmse: Self::rmse(y_true, y_pred),
            mae: Self::mae(y_true, y_pred),
            r_squared: Self::r_squared(y_true, y_pred),
        }
    }
}

/// All regression metrics for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r_squared: f64,
}
