use super::LinearModel;
use crate::error::{LinearModelError, Result};
use crate::metrics;
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, ArrayView2};
use std::sync::OnceLock;

/// Result of a successful OLS fit.
///
/// Owns the coefficients together with the response and the design matrix
/// they were estimated from. The design is the one actually solved, so it
/// includes the intercept column whenever one was added. Fitted values and
/// residuals are computed on first access and cached.
#[derive(Clone, Debug)]
pub struct FittedLinearModel {
    model: LinearModel,
    params: Vector,
    endog: Vector,
    exog: Matrix,
    endog_name: Option<String>,
    exog_names: Option<Vec<String>>,
    fittedvalues: OnceLock<Vector>,
    resid: OnceLock<Vector>,
}

impl FittedLinearModel {
    pub(crate) fn new(model: LinearModel, params: Vector, endog: Vector, exog: Matrix) -> Self {
        debug_assert_eq!(params.len(), exog.ncols());
        debug_assert_eq!(endog.len(), exog.nrows());
        Self {
            model,
            params,
            endog,
            exog,
            endog_name: None,
            exog_names: None,
            fittedvalues: OnceLock::new(),
            resid: OnceLock::new(),
        }
    }

    pub(crate) fn with_names(mut self, endog_name: String, exog_names: Vec<String>) -> Self {
        self.endog_name = Some(endog_name);
        self.exog_names = Some(exog_names);
        self
    }

    /// Estimated coefficients, one per design column.
    pub fn params(&self) -> ArrayView1<'_, f64> {
        self.params.view()
    }

    /// Configuration of the estimator that produced this fit.
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Training response.
    pub fn endog(&self) -> ArrayView1<'_, f64> {
        self.endog.view()
    }

    /// Training design matrix, intercept column included.
    pub fn exog(&self) -> ArrayView2<'_, f64> {
        self.exog.view()
    }

    pub fn endog_name(&self) -> Option<&str> {
        self.endog_name.as_deref()
    }

    /// Coefficient names, available when fitted from a formula.
    pub fn exog_names(&self) -> Option<&[String]> {
        self.exog_names.as_deref()
    }

    pub fn nobs(&self) -> usize {
        self.endog.len()
    }

    /// Computes `x · params`.
    ///
    /// `x` must have one column per coefficient. No intercept column is added,
    /// so callers include it themselves when the fit used one.
    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        if x.ncols() != self.params.len() {
            return Err(LinearModelError::DimensionMismatch {
                context: "design columns vs. coefficients",
                expected: self.params.len(),
                got: x.ncols(),
            });
        }
        Ok(x.dot(&self.params))
    }

    /// Predictions for the training design.
    pub fn fittedvalues(&self) -> ArrayView1<'_, f64> {
        self.fittedvalues
            .get_or_init(|| self.exog.dot(&self.params))
            .view()
    }

    /// `endog - fittedvalues`.
    pub fn resid(&self) -> ArrayView1<'_, f64> {
        self.resid
            .get_or_init(|| &self.endog - &self.fittedvalues())
            .view()
    }

    /// Sum of squared residuals.
    pub fn ssr(&self) -> f64 {
        let resid = self.resid();
        resid.dot(&resid)
    }

    /// Coefficient of determination on the training data.
    pub fn rsquared(&self) -> f64 {
        metrics::r2(self.endog.view(), self.fittedvalues())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn fitted_line() -> FittedLinearModel {
        // y = 1 + 2x with residuals [0.5, -1, 0.5]
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![1.5, 2.0, 5.5];
        LinearModel::new().fit(&y, &x).unwrap()
    }

    #[test]
    fn test_params_and_training_data() {
        let fitted = fitted_line();

        assert_abs_diff_eq!(fitted.params()[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fitted.params()[1], 2.0, epsilon = 1e-12);
        assert_eq!(fitted.exog(), array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]]);
        assert_eq!(fitted.endog(), array![1.5, 2.0, 5.5]);
        assert_eq!(fitted.nobs(), 3);
        assert!(fitted.model().adds_intercept());
        assert!(fitted.exog_names().is_none());
        assert!(fitted.endog_name().is_none());
    }

    #[test]
    fn test_fittedvalues_and_resid() {
        let fitted = fitted_line();

        let expected_fit = [1.0, 3.0, 5.0];
        let expected_resid = [0.5, -1.0, 0.5];
        for (value, expected) in fitted.fittedvalues().iter().zip(expected_fit) {
            assert_abs_diff_eq!(*value, expected, epsilon = 1e-12);
        }
        for (value, expected) in fitted.resid().iter().zip(expected_resid) {
            assert_abs_diff_eq!(*value, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fittedvalues_use_augmented_design() {
        let fitted = fitted_line();
        let through_predict = fitted.predict(&fitted.exog().to_owned()).unwrap();
        assert_eq!(fitted.fittedvalues(), through_predict.view());
    }

    #[test]
    fn test_cached_values_are_stable() {
        let fitted = fitted_line();
        let first = fitted.resid().to_owned();
        let second = fitted.resid().to_owned();
        assert_eq!(first, second);

        let cloned = fitted.clone();
        assert_eq!(cloned.fittedvalues(), fitted.fittedvalues());
    }

    #[test]
    fn test_predict_new_inputs() {
        let fitted = fitted_line();
        let predictions = fitted.predict(&array![[1.0, 10.0], [1.0, -1.0]]).unwrap();

        assert_abs_diff_eq!(predictions[0], 21.0, epsilon = 1e-10);
        assert_abs_diff_eq!(predictions[1], -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let fitted = fitted_line();

        // Missing the intercept column.
        let err = fitted.predict(&array![[10.0]]).unwrap_err();
        assert_eq!(
            err,
            LinearModelError::DimensionMismatch {
                context: "design columns vs. coefficients",
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_goodness_of_fit() {
        let fitted = fitted_line();

        assert_abs_diff_eq!(fitted.ssr(), 1.5, epsilon = 1e-12);
        // mean 3, total sum of squares 2.25 + 1 + 6.25
        assert_abs_diff_eq!(fitted.rsquared(), 1.0 - 1.5 / 9.5, epsilon = 1e-12);
    }

    #[test]
    fn test_fitted_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FittedLinearModel>();
    }
}
