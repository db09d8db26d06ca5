use super::FittedLinearModel;
use crate::data::DataFrame;
use crate::error::{LinearModelError, Result};
use crate::formula::{FormulaEvaluator, TermEvaluator};
use crate::linalg;
use crate::{Matrix, Vector};

/// Ordinary least squares estimator.
///
/// Holds configuration only; every `fit` call returns a new
/// [`FittedLinearModel`] that owns the data it was estimated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearModel {
    add_intercept: bool,
    rank_tolerance: f64,
}

impl LinearModel {
    pub fn new() -> Self {
        Self {
            add_intercept: true,
            rank_tolerance: 1e-10,
        }
    }

    /// Whether `fit` prepends a column of ones to the design matrix.
    ///
    /// Ignored by the formula entry points, whose evaluator decides about the
    /// intercept.
    pub fn add_intercept(mut self, add_intercept: bool) -> Self {
        self.add_intercept = add_intercept;
        self
    }

    /// Threshold below which `|R_ii|`, relative to the norm of design column
    /// `i`, counts as zero.
    pub fn rank_tolerance(mut self, rank_tolerance: f64) -> Self {
        if !rank_tolerance.is_finite() || rank_tolerance < 0.0 {
            panic!(
                "rank_tolerance must be finite and non-negative, got {}",
                rank_tolerance
            );
        }
        self.rank_tolerance = rank_tolerance;
        self
    }

    pub fn adds_intercept(&self) -> bool {
        self.add_intercept
    }

    pub fn tolerance(&self) -> f64 {
        self.rank_tolerance
    }

    /// Regresses `y` on `x`, prepending an intercept column when configured.
    pub fn fit(&self, y: &Vector, x: &Matrix) -> Result<FittedLinearModel> {
        if x.nrows() != y.len() {
            return Err(LinearModelError::DimensionMismatch {
                context: "response length vs. design rows",
                expected: x.nrows(),
                got: y.len(),
            });
        }

        let design = if self.add_intercept {
            linalg::add_intercept_column(x)
        } else {
            x.clone()
        };

        self.estimate(y.clone(), design)
    }

    /// Fits the model described by `formula` over `data` using [`TermEvaluator`].
    pub fn fit_from_formula(&self, formula: &str, data: &DataFrame) -> Result<FittedLinearModel> {
        self.fit_from_formula_with(&TermEvaluator, formula, data)
    }

    /// Fits through a caller-supplied formula evaluator.
    ///
    /// The evaluator's design matrix is used as is: no intercept column is
    /// added here, whatever `add_intercept` says.
    pub fn fit_from_formula_with<E>(
        &self,
        evaluator: &E,
        formula: &str,
        data: &DataFrame,
    ) -> Result<FittedLinearModel>
    where
        E: FormulaEvaluator + ?Sized,
    {
        let matrices = evaluator.evaluate(formula, data)?;
        if matrices.design.nrows() != matrices.response.len() {
            return Err(LinearModelError::DimensionMismatch {
                context: "response length vs. design rows",
                expected: matrices.design.nrows(),
                got: matrices.response.len(),
            });
        }

        let fitted = self
            .add_intercept(false)
            .estimate(matrices.response, matrices.design)?;
        Ok(fitted.with_names(matrices.response_name, matrices.column_names))
    }

    /// `design` is final here: any intercept column is already in place.
    fn estimate(&self, y: Vector, design: Matrix) -> Result<FittedLinearModel> {
        let (nrows, ncols) = design.dim();
        if nrows == 0 || ncols == 0 {
            return Err(LinearModelError::EmptyInput { nrows, ncols });
        }
        if !y.iter().all(|v| v.is_finite()) {
            return Err(LinearModelError::NonFiniteInput { context: "response" });
        }
        if !design.iter().all(|v| v.is_finite()) {
            return Err(LinearModelError::NonFiniteInput { context: "design matrix" });
        }

        log::debug!(
            "fitting OLS on {}x{} design (intercept added: {})",
            nrows,
            ncols,
            self.add_intercept
        );
        let params = linalg::least_squares(&design, &y, self.rank_tolerance)?;

        Ok(FittedLinearModel::new(*self, params, y, design))
    }
}

impl Default for LinearModel {
    fn default() -> Self {
        Self::new()
    }
}
