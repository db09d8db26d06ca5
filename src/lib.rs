//! Ordinary least squares linear regression.
//!
//! Fit a [`LinearModel`] from a response vector and a design matrix, or from a
//! formula over a [`DataFrame`], and inspect the resulting
//! [`FittedLinearModel`].
//!
//! ```rust
//! use linearmodels::LinearModel;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![1.0, 2.0, 3.0, 4.0];
//!
//! let fitted = LinearModel::new().fit(&y, &x).unwrap();
//! assert!((fitted.params()[1] - 1.0).abs() < 1e-10);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod data;
pub mod error;
pub mod formula;
pub mod linalg;
pub mod linear_model;
pub mod metrics;

pub use data::DataFrame;
pub use error::{FormulaError, LinearModelError, Result};
pub use formula::{DesignMatrices, Formula, FormulaEvaluator, TermEvaluator};
pub use linear_model::{FittedLinearModel, LinearModel};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
