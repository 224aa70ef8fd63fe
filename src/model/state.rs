/// A marker type indicating that a model is **not yet trained**.
///
/// Carries the fit settings. Inference methods (`predict`) are not available
/// on `LinearModel<Unfitted>`; [`LinearRegression::fit`] consumes it and
/// returns a `LinearModel<Fitted>`.
///
/// [`LinearRegression::fit`]: crate::model::linear::LinearRegression::fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unfitted {
    pub(crate) fit_intercept: bool,
}

impl Default for Unfitted {
    fn default() -> Self {
        Self {
            fit_intercept: true,
        }
    }
}

/// A marker type indicating that a model has been **fully trained**.
///
/// A `Fitted` model contains only inference parameters; the fit settings
/// are gone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fitted;
