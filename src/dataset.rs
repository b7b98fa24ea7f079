//! Input datasets.
//!
//! A [`Dataset`] is an ordered mapping from variable name to a column
//! of values. Columns are either numeric (continuous or binary kinds)
//! or categorical labels (Cramér's V); the correlation kind fixes which
//! is expected.
//!
//! # Examples
//!
//! ```
//! use corrstat::dataset::Dataset;
//!
//! let mut data = Dataset::new();
//! data.push_numeric("X", vec![1.0, 2.0, 3.0, 4.0, 5.0]);
//! data.push_numeric("Y", vec![2.0, 4.0, 6.0, 8.0, 10.0]);
//! assert_eq!(data.len(), 2);
//! ```

/// A single variable's values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Real-valued observations (continuous, or {0, 1} for binary).
    Numeric(Vec<f64>),
    /// Categorical labels.
    Categorical(Vec<String>),
}

impl Column {
    /// Number of observations in this column.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    /// Whether the column has no observations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The numeric values, if this is a numeric column.
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Column::Numeric(v) => Some(v),
            Column::Categorical(_) => None,
        }
    }

    /// The labels, if this is a categorical column.
    pub fn as_categorical(&self) -> Option<&[String]> {
        match self {
            Column::Numeric(_) => None,
            Column::Categorical(v) => Some(v),
        }
    }
}

/// Ordered collection of named variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    variables: Vec<(String, Column)>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named column.
    pub fn push(&mut self, name: impl Into<String>, column: Column) {
        self.variables.push((name.into(), column));
    }

    /// Appends a numeric variable.
    pub fn push_numeric(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.push(name, Column::Numeric(values));
    }

    /// Appends a categorical variable.
    pub fn push_categorical<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        labels: Vec<S>,
    ) {
        self.push(
            name,
            Column::Categorical(labels.into_iter().map(Into::into).collect()),
        );
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the dataset has no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variable at position `idx`, in insertion order.
    pub fn get(&self, idx: usize) -> Option<(&str, &Column)> {
        self.variables
            .get(idx)
            .map(|(name, col)| (name.as_str(), col))
    }

    /// Variable names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_preserved() {
        let mut data = Dataset::new();
        data.push_numeric("Y", vec![1.0, 2.0, 3.0]);
        data.push_numeric("X", vec![4.0, 5.0, 6.0]);

        let names: Vec<&str> = data.names().collect();
        assert_eq!(names, vec!["Y", "X"]);
        let (name, col) = data.get(0).expect("first variable");
        assert_eq!(name, "Y");
        assert_eq!(col.as_numeric(), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn column_type_accessors() {
        let numeric = Column::Numeric(vec![1.0]);
        let labels = Column::Categorical(vec!["A".to_string()]);
        assert!(numeric.as_categorical().is_none());
        assert!(labels.as_numeric().is_none());
        assert_eq!(numeric.len(), 1);
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn categorical_push_accepts_str() {
        let mut data = Dataset::new();
        data.push_categorical("V", vec!["A", "B", "A"]);
        let (_, col) = data.get(0).expect("variable");
        assert_eq!(col.as_categorical().map(|l| l.len()), Some(3));
    }
}
