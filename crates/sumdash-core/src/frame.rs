//! Named-column feature matrix.

use ndarray::{Array2, ArrayView1};

use crate::PredictError;

/// A numeric matrix with one name per column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureFrame {
    /// Creates a frame, checking that the column count matches the matrix width.
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self, PredictError> {
        if columns.len() != values.ncols() {
            return Err(PredictError::Shape(format!(
                "{} column names for a matrix with {} columns",
                columns.len(),
                values.ncols()
            )));
        }
        Ok(Self { columns, values })
    }

    /// Builds a single-row frame from `(name, value)` pairs.
    pub fn single_row(cells: &[(&str, f64)]) -> Self {
        let columns = cells.iter().map(|(name, _)| name.to_string()).collect();
        let values = Array2::from_shape_fn((1, cells.len()), |(_, j)| cells[j].1);
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Returns the named column, if present.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.values.column(idx))
    }
}
