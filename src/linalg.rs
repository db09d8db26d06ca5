//! Least-squares plumbing on top of `nalgebra`.
//!
//! Matrices live as `ndarray` arrays everywhere else in the crate; this module
//! converts at the boundary, runs the thin QR factorization and the triangular
//! solve, and converts the solution back.

use crate::error::{LinearModelError, Result};
use crate::{Matrix, Vector};
use nalgebra::{DMatrix, DVector};
use ndarray::{ArrayView1, ArrayView2, s};

/// Returns `[1, x]`: a column of ones followed by the columns of `x`.
pub fn add_intercept_column(x: &Matrix) -> Matrix {
    let mut augmented = Matrix::ones((x.nrows(), x.ncols() + 1));
    augmented.slice_mut(s![.., 1..]).assign(x);
    augmented
}

pub fn to_dmatrix(x: ArrayView2<'_, f64>) -> DMatrix<f64> {
    DMatrix::from_fn(x.nrows(), x.ncols(), |i, j| x[(i, j)])
}

pub fn to_dvector(y: ArrayView1<'_, f64>) -> DVector<f64> {
    DVector::from_iterator(y.len(), y.iter().copied())
}

/// Reduced QR factorization.
///
/// For an `n x m` matrix returns `Q` (`n x k`) with orthonormal columns and an
/// upper-triangular `R` (`k x m`), where `k = min(n, m)`.
pub fn thin_qr(x: &Matrix) -> (DMatrix<f64>, DMatrix<f64>) {
    let qr = to_dmatrix(x.view()).qr();
    (qr.q(), qr.r())
}

/// Euclidean norm of every column of `x`.
pub fn column_norms(x: &Matrix) -> Vec<f64> {
    x.columns().into_iter().map(|c| c.dot(&c).sqrt()).collect()
}

/// Numerical rank read off the diagonal of `R`.
///
/// `R_ii` counts when its magnitude exceeds `tolerance` times the norm of
/// column `i` of the factorized matrix, so rescaling a column does not change
/// the result.
pub fn diagonal_rank(r: &DMatrix<f64>, column_norms: &[f64], tolerance: f64) -> usize {
    r.diagonal()
        .iter()
        .zip(column_norms)
        .filter(|&(d, norm)| d.abs() > tolerance * norm)
        .count()
}

/// Solves `min ||y - x b||` through `x = QR` and back-substitution on
/// `R b = Q^T y`.
///
/// `x` must already carry any intercept column. Fails with
/// [`LinearModelError::RankDeficient`] instead of returning an unstable
/// solution when `x` lacks full column rank.
pub fn least_squares(x: &Matrix, y: &Vector, tolerance: f64) -> Result<Vector> {
    let ncols = x.ncols();
    let (q, r) = thin_qr(x);

    let rank = diagonal_rank(&r, &column_norms(x), tolerance);
    log::trace!("R diagonal: {:?}", r.diagonal().as_slice());
    if rank < ncols {
        log::warn!("design matrix has rank {} but {} columns", rank, ncols);
        return Err(LinearModelError::RankDeficient { rank, ncols });
    }

    // Full column rank implies ncols <= nrows, so R is square here.
    let qty = q.tr_mul(&to_dvector(y.view()));
    let beta = r
        .solve_upper_triangular(&qty)
        .ok_or(LinearModelError::RankDeficient { rank, ncols })?;

    Ok(beta.iter().copied().collect())
}
