use crate::Vector;
use crate::error::{LinearModelError, Result};
use ndarray::ArrayView1;

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(LinearModelError::DimensionMismatch {
            context: "y_true vs. y_pred",
            expected: y_true.len(),
            got: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(LinearModelError::EmptyInput { nrows: 0, ncols: 1 });
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let diff = y_true - y_pred;
    Ok(diff.dot(&diff) / diff.len() as f64)
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let diff = y_true - y_pred;
    Ok(diff.mapv(f64::abs).sum() / diff.len() as f64)
}

pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    Ok(r2(y_true.view(), y_pred.view()))
}

/// Lengths must already agree and be non-zero.
pub(crate) fn r2(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = (&y_true - &y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return 1.0; // Perfect prediction when variance is zero
    }

    1.0 - ss_res / ss_tot
}
