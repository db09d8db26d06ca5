//! Ordinary least squares estimation.
//!
//! - `LinearModel`: the estimator configuration and its `fit` entry points
//! - `FittedLinearModel`: the immutable result of a successful fit
//!
//! # Examples
//!
//! ## Raw arrays
//! ```rust
//! use linearmodels::LinearModel;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![3.0, 5.0, 7.0, 9.0];
//!
//! let fitted = LinearModel::new().fit(&y, &x).unwrap();
//! let params = fitted.params();
//! assert!((params[0] - 1.0).abs() < 1e-10);
//! assert!((params[1] - 2.0).abs() < 1e-10);
//!
//! // New inputs carry the intercept column themselves.
//! let predictions = fitted.predict(&array![[1.0, 5.0]]).unwrap();
//! assert!((predictions[0] - 11.0).abs() < 1e-10);
//! ```
//!
//! ## Formula
//! ```rust
//! use linearmodels::{DataFrame, LinearModel};
//! use ndarray::array;
//!
//! let data = DataFrame::new()
//!     .with_column("y", array![3.0, 5.0, 7.0, 9.0]).unwrap()
//!     .with_column("x", array![1.0, 2.0, 3.0, 4.0]).unwrap();
//!
//! let fitted = LinearModel::new().fit_from_formula("y ~ x", &data).unwrap();
//! assert_eq!(fitted.exog_names().unwrap(), &["Intercept", "x"]);
//! ```

mod fitted;
mod ols;

pub use fitted::FittedLinearModel;
pub use ols::LinearModel;
