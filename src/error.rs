//! Error types for model fitting and formula evaluation.

use thiserror::Error;

pub type Result<T, E = LinearModelError> = std::result::Result<T, E>;

/// Errors raised while fitting a model or predicting from it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinearModelError {
    /// The (augmented) design matrix does not have full column rank.
    #[error("design matrix is rank deficient: rank {rank} < {ncols} columns")]
    RankDeficient { rank: usize, ncols: usize },

    /// Two shapes that must agree do not.
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// No observations, or no columns left to estimate.
    #[error("input must have at least one row and one column, got {nrows}x{ncols}")]
    EmptyInput { nrows: usize, ncols: usize },

    /// NaN or an infinity in the response or the design matrix.
    #[error("{context} contains non-finite values")]
    NonFiniteInput { context: &'static str },

    #[error(transparent)]
    Formula(#[from] FormulaError),
}

/// Errors raised while turning a formula and tabular data into matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("malformed formula `{formula}`: {reason}")]
    Syntax { formula: String, reason: String },

    #[error("formula `{0}` has no response variable")]
    MissingResponse(String),

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("unsupported term `{0}`")]
    UnsupportedTerm(String),

    #[error("column `{name}` has {got} values, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Every row contained a missing value.
    #[error("no complete observations remain after dropping missing values")]
    NoObservations,
}
