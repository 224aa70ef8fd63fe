//! Least squares via Householder QR with column pivoting.
//!
//! Solves `min ||A b - y||` for `b`. Columns are pivoted by remaining norm,
//! so the diagonal of `R` is non-increasing in magnitude and the numerical
//! rank is the number of leading pivots above the cutoff. Columns beyond the
//! rank get a zero coefficient (the "basic" solution).

use crate::model::ModelError;
use ndarray::{s, Array1, ArrayView1, ArrayView2};

/// Outcome of a least-squares solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LstsqSolution {
    pub coefficients: Array1<f64>,
    /// Numerical rank of `A`.
    pub rank: usize,
}

/// Solves `a · b ≈ y` in the least-squares sense.
///
/// A pivot counts as zero below `max(rows, cols) * f64::EPSILON` relative to
/// the largest one.
pub fn lstsq(
    a: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
) -> Result<LstsqSolution, ModelError> {
    let (m, n) = a.dim();
    if m != y.len() {
        return Err(ModelError::TargetMismatch {
            rows: m,
            targets: y.len(),
        });
    }
    if m == 0 {
        return Err(ModelError::EmptyData);
    }

    let mut r = a.to_owned();
    let mut rhs = y.to_owned();
    let mut perm: Vec<usize> = (0..n).collect();
    let steps = m.min(n);

    for k in 0..steps {
        let mut pivot = k;
        let mut best = -1.0;
        for j in k..n {
            let col = r.slice(s![k.., j]);
            let norm2 = col.dot(&col);
            if norm2 > best {
                best = norm2;
                pivot = j;
            }
        }
        if pivot != k {
            for i in 0..m {
                r.swap([i, k], [i, pivot]);
            }
            perm.swap(k, pivot);
        }

        let norm = best.sqrt();
        if norm == 0.0 {
            // remaining columns are zero below row k
            break;
        }

        let mut v = r.slice(s![k.., k]).to_owned();
        let alpha = if v[0] >= 0.0 { -norm } else { norm };
        v[0] -= alpha;
        let vv = v.dot(&v);

        for j in k..n {
            let mut col = r.slice_mut(s![k.., j]);
            let f = 2.0 * v.dot(&col) / vv;
            col.scaled_add(-f, &v);
        }
        let mut tail = rhs.slice_mut(s![k..]);
        let f = 2.0 * v.dot(&tail) / vv;
        tail.scaled_add(-f, &v);
    }

    let cutoff = m.max(n) as f64 * f64::EPSILON;
    let tol = if steps > 0 { cutoff * r[[0, 0]].abs() } else { 0.0 };
    let rank = (0..steps).take_while(|&k| r[[k, k]].abs() > tol).count();

    let mut z = Array1::<f64>::zeros(rank);
    for i in (0..rank).rev() {
        let mut acc = rhs[i];
        for j in (i + 1)..rank {
            acc -= r[[i, j]] * z[j];
        }
        z[i] = acc / r[[i, i]];
    }

    let mut coefficients = Array1::<f64>::zeros(n);
    for (i, &value) in z.iter().enumerate() {
        coefficients[perm[i]] = value;
    }
    Ok(LstsqSolution { coefficients, rank })
}
