//! Numeric CSV dataset with a header row.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use serde::Serialize;
use sumdash_core::{FeatureFrame, PredictError};
use thiserror::Error;

/// Errors from reading or slicing a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset has no header row")]
    Empty,

    #[error("Line {line}, column '{column}': '{value}' is not a finite number")]
    Parse { line: usize, column: String, value: String },

    #[error("Line {line}: expected {expected} cells, found {found}")]
    RaggedRow { line: usize, expected: usize, found: usize },

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Frame(#[from] PredictError),
}

/// A table of numbers with named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Dataset {
    /// Reads a CSV file.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses CSV text. Blank lines are skipped; cells may be double-quoted.
    pub fn parse(content: &str) -> Result<Self, DatasetError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (_, header) = lines.next().ok_or(DatasetError::Empty)?;
        let columns: Vec<String> = split_cells(header).map(str::to_string).collect();

        let mut rows = Vec::new();
        for (line, text) in lines {
            let cells: Vec<&str> = split_cells(text).collect();
            if cells.len() != columns.len() {
                return Err(DatasetError::RaggedRow {
                    line,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }

            let row = cells
                .iter()
                .zip(&columns)
                .map(|(cell, column)| {
                    cell.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| DatasetError::Parse {
                            line,
                            column: column.clone(),
                            value: cell.to_string(),
                        })
                })
                .collect::<Result<Vec<f64>, _>>()?;
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns every value of the named column.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, DatasetError> {
        let idx = self.index_of(name)?;
        Ok(self.rows.iter().map(|r| r[idx]).collect())
    }

    /// Selects the named columns, in order, as a feature frame.
    pub fn features(&self, names: &[&str]) -> Result<FeatureFrame, DatasetError> {
        let indices = names
            .iter()
            .map(|n| self.index_of(n))
            .collect::<Result<Vec<_>, _>>()?;

        let values = Array2::from_shape_fn((self.rows.len(), indices.len()), |(i, j)| {
            self.rows[i][indices[j]]
        });
        let columns = names.iter().map(|n| n.to_string()).collect();
        Ok(FeatureFrame::new(columns, values)?)
    }

    fn index_of(&self, name: &str) -> Result<usize, DatasetError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }
}

fn split_cells(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|c| c.trim().trim_matches('"'))
}
