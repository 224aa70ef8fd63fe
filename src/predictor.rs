//! Price estimates from the persisted model.
//!
//! [`Predictor`] rebuilds a feature vector in the training-time column order
//! and runs the model on it. Loading never fails: missing or unreadable
//! artifacts leave the predictor in a degraded state where every estimate is
//! [`Unavailable`].

use crate::artifacts::{load_columns, load_model, ArtifactPaths};
use crate::model::{Fitted, InferenceModel, LinearModel};
use crate::preprocessing::NUMERIC_COLUMNS;
use ndarray::Array1;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Why no estimate could be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Unavailable {
    #[error("model not loaded: {0}")]
    ModelNotLoaded(String),
    #[error("columns not loaded: {0}")]
    ColumnsNotLoaded(String),
    #[error("column `{0}` is not in the schema")]
    MissingColumn(&'static str),
    #[error("estimator failed: {0}")]
    EstimatorFailure(String),
}

/// Column layout read from `columns.json`.
#[derive(Debug, Clone)]
struct Schema {
    width: usize,
    /// Positions of total_sqft, bath, bhk.
    numeric: [Option<usize>; 3],
    /// Lower-cased location name to column position; first occurrence wins.
    locations: HashMap<String, usize>,
    /// Location column names as stored, sorted.
    location_names: Vec<String>,
}

impl Schema {
    fn new(columns: &[String]) -> Self {
        let lower: Vec<String> = columns.iter().map(|c| c.to_lowercase()).collect();
        let mut numeric = [None; 3];
        for (slot, name) in numeric.iter_mut().zip(NUMERIC_COLUMNS) {
            *slot = lower.iter().position(|c| c == name);
        }

        let mut locations = HashMap::new();
        let mut location_names = Vec::new();
        for (i, (raw, low)) in columns.iter().zip(&lower).enumerate() {
            if NUMERIC_COLUMNS.contains(&low.as_str()) {
                continue;
            }
            locations.entry(low.clone()).or_insert(i);
            location_names.push(raw.clone());
        }
        location_names.sort();

        Self {
            width: columns.len(),
            numeric,
            locations,
            location_names,
        }
    }
}

/// Loaded artifacts plus the lookups derived from them.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: Result<LinearModel<Fitted>, String>,
    schema: Result<Schema, String>,
}

impl Predictor {
    /// Loads both artifacts; a failure is logged and kept as degraded state.
    pub fn load(paths: &ArtifactPaths) -> Self {
        let model = load_model(paths.model()).map_err(|e| {
            tracing::warn!(error = %e, "model unavailable");
            e.to_string()
        });
        if let Ok(m) = &model {
            tracing::info!(n_features = m.n_features(), "model loaded");
        }

        let schema = load_columns(paths.columns())
            .map(|columns| Schema::new(&columns))
            .map_err(|e| {
                tracing::warn!(error = %e, "columns unavailable");
                e.to_string()
            });
        if let Ok(s) = &schema {
            tracing::info!(
                columns = s.width,
                locations = s.location_names.len(),
                "columns loaded"
            );
        }

        Self { model, schema }
    }

    /// Builds a predictor from in-memory parts.
    pub fn from_parts(model: LinearModel<Fitted>, columns: &[String]) -> Self {
        Self {
            model: Ok(model),
            schema: Ok(Schema::new(columns)),
        }
    }

    /// True when both artifacts loaded.
    pub fn is_ready(&self) -> bool {
        self.model.is_ok() && self.schema.is_ok()
    }

    /// Known location names, sorted. Empty when the columns did not load.
    pub fn locations(&self) -> &[String] {
        match &self.schema {
            Ok(s) => &s.location_names,
            Err(_) => &[],
        }
    }

    /// The model input for one listing.
    ///
    /// Location matching ignores case. A location without a column (including
    /// `"other"`) leaves every location entry at zero.
    pub fn feature_vector(
        &self,
        location: &str,
        sqft: f64,
        bath: u32,
        bhk: u32,
    ) -> Result<Array1<f64>, Unavailable> {
        let schema = self
            .schema
            .as_ref()
            .map_err(|e| Unavailable::ColumnsNotLoaded(e.clone()))?;

        let mut x = Array1::<f64>::zeros(schema.width);
        let values = [sqft, bath as f64, bhk as f64];
        for ((slot, name), value) in schema.numeric.iter().zip(NUMERIC_COLUMNS).zip(values) {
            let idx = slot.ok_or(Unavailable::MissingColumn(name))?;
            x[idx] = value;
        }

        if let Some(&idx) = schema.locations.get(&location.to_lowercase()) {
            x[idx] = 1.0;
        }
        Ok(x)
    }

    /// Estimated price in lakhs, rounded to two decimals.
    pub fn estimate(
        &self,
        location: &str,
        sqft: f64,
        bath: u32,
        bhk: u32,
    ) -> Result<f64, Unavailable> {
        let model = self
            .model
            .as_ref()
            .map_err(|e| Unavailable::ModelNotLoaded(e.clone()))?;
        let x = self.feature_vector(location, sqft, bath, bhk)?;

        let price = model.predict(x.view()).map_err(|e| {
            tracing::warn!(error = %e, location, "prediction failed");
            Unavailable::EstimatorFailure(e.to_string())
        })?;
        Ok(round_cents(price))
    }
}

/// Rounds to two decimals on the exact binary value, ties to even.
fn round_cents(price: f64) -> f64 {
    let scaled = price * 100.0;
    let cents = if scaled - scaled.floor() == 0.5 {
        // the product may have rounded onto the midpoint
        let residual = price.mul_add(100.0, -scaled);
        if residual > 0.0 {
            scaled.ceil()
        } else if residual < 0.0 {
            scaled.floor()
        } else {
            scaled.round_ties_even()
        }
    } else {
        scaled.round()
    };
    cents / 100.0
}

/// A [`Predictor`] loaded on first use and shared afterwards.
///
/// The first caller loads the artifacts; concurrent first callers wait for
/// that single load. A degraded result is kept until the process restarts.
#[derive(Debug, Clone)]
pub struct LazyPredictor {
    paths: ArtifactPaths,
    cell: Arc<OnceCell<Predictor>>,
}

impl LazyPredictor {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            cell: Arc::new(OnceCell::new()),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    pub fn get(&self) -> &Predictor {
        self.cell.get_or_init(|| Predictor::load(&self.paths))
    }

    /// Same as [`get`](Self::get) for async callers: a first load runs on
    /// the blocking thread pool instead of the calling worker.
    pub async fn get_async(&self) -> &Predictor {
        if !self.is_loaded() {
            let lazy = self.clone();
            let loaded = tokio::task::spawn_blocking(move || {
                lazy.get();
            })
            .await;
            if let Err(e) = loaded {
                tracing::warn!(error = %e, "artifact load task failed");
            }
        }
        self.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearParams;
    use ndarray::array;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn predictor() -> Predictor {
        let model = LinearModel::<Fitted>::new(LinearParams {
            coefficients: array![0.05, 2.0, 3.0, 40.0, -10.0],
            intercept: 1.0,
        });
        Predictor::from_parts(
            model,
            &columns(&["total_sqft", "bath", "bhk", "1st block", "hebbal"]),
        )
    }

    #[test]
    fn test_feature_vector_layout() {
        let x = predictor().feature_vector("hebbal", 1000.0, 2, 3).unwrap();
        assert_eq!(x.to_vec(), vec![1000.0, 2.0, 3.0, 0.0, 1.0]);
    }

    #[test]
    fn test_feature_vector_unknown_location_is_all_zero() {
        let x = predictor().feature_vector("Mysore", 1000.0, 2, 3).unwrap();
        assert_eq!(x.slice(ndarray::s![3..]).sum(), 0.0);
    }

    #[test]
    fn test_location_lookup_ignores_case() {
        let p = predictor();
        assert_eq!(
            p.estimate("1st block", 1000.0, 2, 2).unwrap(),
            p.estimate("1ST BLOCK", 1000.0, 2, 2).unwrap()
        );
    }

    #[test]
    fn test_estimate_value_and_rounding() {
        // 0.05 * 1001 + 2 * 2 + 3 * 2 + 40 + 1 = 101.05
        let p = predictor();
        assert_eq!(p.estimate("1st block", 1001.0, 2, 2).unwrap(), 101.05);
        // no location term
        assert_eq!(p.estimate("other", 1000.0, 2, 2).unwrap(), 61.0);
    }

    #[test]
    fn test_round_cents_ties_to_even() {
        assert_eq!(round_cents(0.125), 0.12);
        assert_eq!(round_cents(0.375), 0.38);
        assert_eq!(round_cents(-0.125), -0.12);
        // 2.675 and 1.005 sit just below the midpoint in binary
        assert_eq!(round_cents(2.675), 2.67);
        assert_eq!(round_cents(1.005), 1.0);
        assert_eq!(round_cents(57.4449), 57.44);
        assert_eq!(round_cents(57.4451), 57.45);
    }

    #[test]
    fn test_location_never_sets_numeric_column() {
        let x = predictor().feature_vector("BATH", 1000.0, 2, 3).unwrap();
        assert_eq!(x.to_vec(), vec![1000.0, 2.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_schema_without_numeric_column() {
        let model = LinearModel::<Fitted>::new(LinearParams {
            coefficients: array![1.0, 1.0],
            intercept: 0.0,
        });
        let p = Predictor::from_parts(model, &columns(&["total_sqft", "bath"]));
        assert_eq!(
            p.estimate("x", 1000.0, 2, 2),
            Err(Unavailable::MissingColumn("bhk"))
        );
    }

    #[test]
    fn test_width_mismatch_is_estimator_failure() {
        let model = LinearModel::<Fitted>::new(LinearParams {
            coefficients: array![1.0, 1.0],
            intercept: 0.0,
        });
        let p = Predictor::from_parts(model, &columns(&["total_sqft", "bath", "bhk"]));
        assert!(matches!(
            p.estimate("x", 1000.0, 2, 2),
            Err(Unavailable::EstimatorFailure(_))
        ));
    }

    #[test]
    fn test_locations_sorted_without_numeric() {
        let model = LinearModel::<Fitted>::new(LinearParams {
            coefficients: array![0.0, 0.0, 0.0, 0.0, 0.0],
            intercept: 0.0,
        });
        let p = Predictor::from_parts(
            model,
            &columns(&["total_sqft", "bath", "bhk", "whitefield", "hebbal"]),
        );
        assert_eq!(p.locations(), ["hebbal", "whitefield"]);
    }

    #[test]
    fn test_missing_artifacts_degrade() {
        let tmp = tempfile::tempdir().unwrap();
        let p = Predictor::load(&ArtifactPaths::in_dir(tmp.path()));
        assert!(!p.is_ready());
        assert!(p.locations().is_empty());
        assert!(matches!(
            p.estimate("hebbal", 1000.0, 2, 2),
            Err(Unavailable::ModelNotLoaded(_))
        ));
    }

    #[test]
    fn test_lazy_predictor_loads_once() {
        let tmp = tempfile::tempdir().unwrap();
        let lazy = LazyPredictor::new(ArtifactPaths::in_dir(tmp.path()));
        assert!(!lazy.is_loaded());
        assert!(!lazy.get().is_ready());
        assert!(lazy.is_loaded());

        // artifacts appearing later are not picked up
        let model = LinearModel::<Fitted>::new(LinearParams {
            coefficients: array![1.0, 1.0, 1.0],
            intercept: 0.0,
        });
        crate::artifacts::write_artifacts(
            lazy.paths(),
            &model,
            &columns(&["total_sqft", "bath", "bhk"]),
        )
        .unwrap();
        assert!(!lazy.get().is_ready());
        assert!(LazyPredictor::new(lazy.paths().clone()).get().is_ready());
    }

    #[tokio::test]
    async fn test_lazy_predictor_async_load_is_shared() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(tmp.path());
        let model = LinearModel::<Fitted>::new(LinearParams {
            coefficients: array![0.1, 1.0, 1.0],
            intercept: 0.0,
        });
        crate::artifacts::write_artifacts(&paths, &model, &columns(&["total_sqft", "bath", "bhk"]))
            .unwrap();

        let lazy = LazyPredictor::new(paths);
        let clone = lazy.clone();
        assert!(lazy.get_async().await.is_ready());
        assert!(clone.is_loaded());
        assert_eq!(clone.get_async().await.estimate("x", 100.0, 1, 1), Ok(12.0));
    }
}
