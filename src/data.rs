use crate::Vector;
use crate::error::FormulaError;

/// Named numeric columns of equal length.
///
/// Columns keep insertion order. Missing values are encoded as `NaN`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFrame {
    names: Vec<String>,
    columns: Vec<Vector>,
}

impl DataFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`DataFrame::insert`].
    pub fn with_column(mut self, name: &str, values: Vector) -> Result<Self, FormulaError> {
        self.insert(name, values)?;
        Ok(self)
    }

    /// Adds a column, replacing any existing column with the same name.
    pub fn insert(&mut self, name: &str, values: Vector) -> Result<(), FormulaError> {
        if let Some(first) = self.columns.first() {
            let is_replacing_only_column =
                self.columns.len() == 1 && self.names[0] == name;
            if values.len() != first.len() && !is_replacing_only_column {
                return Err(FormulaError::ColumnLength {
                    name: name.to_string(),
                    expected: first.len(),
                    got: values.len(),
                });
            }
        }

        match self.names.iter().position(|n| n == name) {
            Some(idx) => self.columns[idx] = values,
            None => {
                self.names.push(name.to_string());
                self.columns.push(values);
            }
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&Vector> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }
}
