use crate::dataset::DatasetError;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Numeric feature matrix with named columns and a target vector.
///
/// Produced by the cleaning pipeline; `columns[j]` names `x.column(j)`.
/// The column order is the schema persisted next to the trained model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    x: Array2<f64>,
    y: Array1<f64>,
}

impl FeatureMatrix {
    /// Builds a matrix, checking that names, rows and targets line up.
    pub fn new(columns: Vec<String>, x: Array2<f64>, y: Array1<f64>) -> Result<Self, DatasetError> {
        if x.nrows() != y.len() {
            return Err(DatasetError::TargetMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }
        if x.ncols() != columns.len() {
            return Err(DatasetError::ColumnMismatch {
                features: x.ncols(),
                names: columns.len(),
            });
        }
        Ok(Self { columns, x, y })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Returns a new matrix holding only `rows`, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            x: self.x.select(Axis(0), rows),
            y: self.y.select(Axis(0), rows),
        }
    }

    /// Shuffled train/test split, reproducible for a given `seed`.
    ///
    /// The test side receives `ceil(test_size * n)` rows. Callers are
    /// expected to have validated `test_size` (see [`split_sizes`]).
    ///
    /// Returns `(train, test)`.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> (Self, Self) {
        let (_, n_test) = split_sizes(self.n_samples(), test_size);

        let mut indices: Vec<usize> = (0..self.n_samples()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        (self.select_rows(train_idx), self.select_rows(test_idx))
    }
}

/// Number of `(train, test)` rows for `n` samples.
///
/// The test side is rounded up, the train side takes the rest.
pub fn split_sizes(n: usize, test_size: f64) -> (usize, usize) {
    let n_test = ((n as f64) * test_size).ceil() as usize;
    let n_test = n_test.min(n);
    (n - n_test, n_test)
}
