//! Formula evaluation: turning `y ~ x1 + x2` and a [`DataFrame`] into a
//! response vector and a design matrix.
//!
//! Evaluation sits behind the [`FormulaEvaluator`] trait so callers can plug
//! in their own conventions. The bundled [`TermEvaluator`] understands plain
//! additive formulas:
//!
//! - `y ~ a + b` regresses `y` on an intercept, `a` and `b`
//! - `y ~ a - 1` or `y ~ 0 + a` drops the intercept
//! - `y ~ a + b - b` removes a previously added term
//!
//! A sign may follow `+`, so `y ~ a + -1` equals `y ~ a - 1`. A second sign
//! after `-` is rejected.
//!
//! The intercept is included unless the formula removes it, so design matrices
//! produced here already carry their intercept column.
//!
//! ```rust
//! use linearmodels::{DataFrame, FormulaEvaluator, TermEvaluator};
//! use ndarray::array;
//!
//! let data = DataFrame::new()
//!     .with_column("y", array![1.0, 2.0, 3.0]).unwrap()
//!     .with_column("x", array![2.0, 4.0, 6.0]).unwrap();
//!
//! let matrices = TermEvaluator.evaluate("y ~ x", &data).unwrap();
//! assert_eq!(matrices.column_names, vec!["Intercept", "x"]);
//! assert_eq!(matrices.design.ncols(), 2);
//! ```

use crate::data::DataFrame;
use crate::error::FormulaError;
use crate::{Matrix, Vector};
use std::str::FromStr;

/// Name given to the constant column.
pub const INTERCEPT: &str = "Intercept";

const UNSUPPORTED_OPERATORS: &[char] = &['(', ')', ':', '*', '^', '/', '|'];

/// A parsed additive model formula.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    response: String,
    terms: Vec<String>,
    intercept: bool,
}

impl Formula {
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Predictor names in the order they first appear.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn has_intercept(&self) -> bool {
        self.intercept
    }

    /// Design matrix column names, intercept first when present.
    pub fn column_names(&self) -> Vec<String> {
        let intercept = self.intercept.then(|| INTERCEPT.to_string());
        intercept.into_iter().chain(self.terms.iter().cloned()).collect()
    }

    fn apply(&mut self, word: &str, positive: bool) -> Result<(), FormulaError> {
        match word {
            "1" => self.intercept = positive,
            "0" => self.intercept = !positive,
            _ => {
                validate_name(word)?;
                let existing = self.terms.iter().position(|t| t == word);
                match (positive, existing) {
                    (true, None) => self.terms.push(word.to_string()),
                    (false, Some(idx)) => {
                        self.terms.remove(idx);
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Operator { positive: bool },
    Word(&'a str),
}

fn tokenize(rhs: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (idx, ch) in rhs.char_indices() {
        if ch == '+' || ch == '-' {
            let word = rhs[start..idx].trim();
            if !word.is_empty() {
                tokens.push(Token::Word(word));
            }
            tokens.push(Token::Operator { positive: ch == '+' });
            start = idx + 1;
        }
    }
    let word = rhs[start..].trim();
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

fn validate_name(word: &str) -> Result<(), FormulaError> {
    if word.contains(UNSUPPORTED_OPERATORS) {
        return Err(FormulaError::UnsupportedTerm(word.to_string()));
    }
    let starts_with_digit = word.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit {
        return Err(FormulaError::UnsupportedTerm(word.to_string()));
    }
    let is_identifier = word
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '.');
    if !is_identifier {
        return Err(FormulaError::Syntax {
            formula: word.to_string(),
            reason: "expected a variable name".to_string(),
        });
    }
    Ok(())
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = |reason: &str| FormulaError::Syntax {
            formula: s.to_string(),
            reason: reason.to_string(),
        };

        let (lhs, rhs) = s.split_once('~').ok_or_else(|| syntax("missing `~`"))?;
        if rhs.contains('~') {
            return Err(syntax("more than one `~`"));
        }

        let response = lhs.trim();
        if response.is_empty() {
            return Err(FormulaError::MissingResponse(s.to_string()));
        }
        validate_name(response)?;

        let mut formula = Formula {
            response: response.to_string(),
            terms: Vec::new(),
            intercept: true,
        };

        let mut pending: Option<bool> = None;
        let mut seen_term = false;
        for token in tokenize(rhs) {
            match token {
                Token::Operator { positive } => {
                    if pending == Some(false) {
                        return Err(syntax("operator after `-`"));
                    }
                    pending = Some(positive);
                }
                Token::Word(word) => {
                    let positive = pending.take().unwrap_or(true);
                    formula.apply(word, positive)?;
                    seen_term = true;
                }
            }
        }

        if pending.is_some() {
            return Err(syntax("dangling operator"));
        }
        if !seen_term {
            return Err(syntax("empty right-hand side"));
        }
        Ok(formula)
    }
}

/// Response and design matrix materialized from a formula.
#[derive(Clone, Debug, PartialEq)]
pub struct DesignMatrices {
    pub response: Vector,
    pub design: Matrix,
    pub response_name: String,
    pub column_names: Vec<String>,
}

/// Resolves a formula against tabular data.
///
/// Implementations own the intercept convention: any constant column must
/// already be part of the returned design, since the estimator does not add
/// one on the formula path.
pub trait FormulaEvaluator {
    fn evaluate(&self, formula: &str, data: &DataFrame) -> Result<DesignMatrices, FormulaError>;
}

/// Evaluator for additive formulas over numeric columns.
///
/// Includes an intercept by default and drops rows where the response or any
/// referenced predictor is `NaN`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TermEvaluator;

impl FormulaEvaluator for TermEvaluator {
    fn evaluate(&self, formula: &str, data: &DataFrame) -> Result<DesignMatrices, FormulaError> {
        let formula: Formula = formula.parse()?;

        let lookup = |name: &str| {
            data.column(name)
                .ok_or_else(|| FormulaError::UnknownVariable(name.to_string()))
        };
        let response = lookup(formula.response())?;
        let predictors = formula
            .terms()
            .iter()
            .map(|term| lookup(term.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let complete: Vec<usize> = (0..data.nrows())
            .filter(|&i| !response[i].is_nan() && predictors.iter().all(|c| !c[i].is_nan()))
            .collect();
        let dropped = data.nrows() - complete.len();
        if dropped > 0 {
            log::warn!("dropped {} of {} rows with missing values", dropped, data.nrows());
        }
        if complete.is_empty() {
            return Err(FormulaError::NoObservations);
        }

        let offset = usize::from(formula.has_intercept());
        let mut design = Matrix::ones((complete.len(), predictors.len() + offset));
        for (row, &i) in complete.iter().enumerate() {
            for (j, column) in predictors.iter().enumerate() {
                design[(row, j + offset)] = column[i];
            }
        }

        log::debug!(
            "formula resolved to {} observations and columns {:?}",
            complete.len(),
            formula.column_names()
        );

        Ok(DesignMatrices {
            response: complete.iter().map(|&i| response[i]).collect(),
            design,
            response_name: formula.response().to_string(),
            column_names: formula.column_names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_data() -> DataFrame {
        DataFrame::new()
            .with_column("y", array![1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_column("a", array![1.0, 0.0, 2.0, 5.0])
            .unwrap()
            .with_column("b", array![3.0, 1.0, 4.0, 1.0])
            .unwrap()
    }

    #[test]
    fn test_parse_simple_formula() {
        let formula: Formula = "y ~ a + b".parse().unwrap();
        assert_eq!(formula.response(), "y");
        assert_eq!(formula.terms(), &["a".to_string(), "b".to_string()]);
        assert!(formula.has_intercept());
        assert_eq!(formula.column_names(), vec!["Intercept", "a", "b"]);
    }

    #[test]
    fn test_parse_intercept_removal() {
        for text in ["y ~ a - 1", "y ~ 0 + a", "y ~ -1 + a", "y~a-1"] {
            let formula: Formula = text.parse().unwrap();
            assert!(!formula.has_intercept(), "{text}");
            assert_eq!(formula.column_names(), vec!["a"], "{text}");
        }

        let formula: Formula = "y ~ a - 1 + 1".parse().unwrap();
        assert!(formula.has_intercept());
    }

    #[test]
    fn test_parse_sign_after_plus() {
        let formula: Formula = "y ~ a + -1".parse().unwrap();
        assert!(!formula.has_intercept());
        assert_eq!(formula.terms(), &["a".to_string()]);

        let formula: Formula = "y ~ a + b + -b + +c".parse().unwrap();
        assert_eq!(formula.terms(), &["a".to_string(), "c".to_string()]);
        assert!(formula.has_intercept());
    }

    #[test]
    fn test_parse_term_removal_and_duplicates() {
        let formula: Formula = "y ~ a + b + a - b".parse().unwrap();
        assert_eq!(formula.terms(), &["a".to_string()]);
    }

    #[test]
    fn test_parse_intercept_only() {
        let formula: Formula = "y ~ 1".parse().unwrap();
        assert!(formula.terms().is_empty());
        assert_eq!(formula.column_names(), vec!["Intercept"]);
    }

    #[test]
    fn test_parse_syntax_errors() {
        for text in ["y a + b", "y ~ a ~ b", "y ~", "y ~ a +", "y ~ a - + b", "y ~ a - - b", "y ~ a b"] {
            let err = text.parse::<Formula>().unwrap_err();
            assert!(matches!(err, FormulaError::Syntax { .. }), "{text}: {err:?}");
        }
    }

    #[test]
    fn test_parse_missing_response() {
        let err = " ~ a".parse::<Formula>().unwrap_err();
        assert!(matches!(err, FormulaError::MissingResponse(_)));
    }

    #[test]
    fn test_parse_unsupported_terms() {
        for text in ["y ~ a:b", "y ~ a * b", "y ~ log(a)", "y ~ 2"] {
            let err = text.parse::<Formula>().unwrap_err();
            assert!(matches!(err, FormulaError::UnsupportedTerm(_)), "{text}: {err:?}");
        }
    }

    #[test]
    fn test_evaluate_with_intercept() {
        let matrices = TermEvaluator.evaluate("y ~ a + b", &sample_data()).unwrap();

        assert_eq!(matrices.response, array![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            matrices.design,
            array![[1.0, 1.0, 3.0], [1.0, 0.0, 1.0], [1.0, 2.0, 4.0], [1.0, 5.0, 1.0]]
        );
        assert_eq!(matrices.response_name, "y");
        assert_eq!(matrices.column_names, vec!["Intercept", "a", "b"]);
    }

    #[test]
    fn test_evaluate_follows_formula_order() {
        let matrices = TermEvaluator.evaluate("y ~ b + a - 1", &sample_data()).unwrap();

        assert_eq!(
            matrices.design,
            array![[3.0, 1.0], [1.0, 0.0], [4.0, 2.0], [1.0, 5.0]]
        );
        assert_eq!(matrices.column_names, vec!["b", "a"]);
    }

    #[test]
    fn test_evaluate_unknown_variable() {
        let err = TermEvaluator.evaluate("y ~ a + z", &sample_data()).unwrap_err();
        assert_eq!(err, FormulaError::UnknownVariable("z".to_string()));

        let err = TermEvaluator.evaluate("w ~ a", &sample_data()).unwrap_err();
        assert_eq!(err, FormulaError::UnknownVariable("w".to_string()));
    }

    #[test]
    fn test_evaluate_drops_missing_rows() {
        let data = DataFrame::new()
            .with_column("y", array![1.0, f64::NAN, 3.0, 4.0])
            .unwrap()
            .with_column("x", array![1.0, 2.0, f64::NAN, 4.0])
            .unwrap()
            .with_column("unused", Vector::from_elem(4, f64::NAN))
            .unwrap();

        let matrices = TermEvaluator.evaluate("y ~ x", &data).unwrap();
        assert_eq!(matrices.response, array![1.0, 4.0]);
        assert_eq!(matrices.design, array![[1.0, 1.0], [1.0, 4.0]]);
    }

    #[test]
    fn test_evaluate_all_rows_missing() {
        let data = DataFrame::new()
            .with_column("y", array![f64::NAN, 1.0])
            .unwrap()
            .with_column("x", array![1.0, f64::NAN])
            .unwrap();

        let err = TermEvaluator.evaluate("y ~ x", &data).unwrap_err();
        assert_eq!(err, FormulaError::NoObservations);
    }
}
