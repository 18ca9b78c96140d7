//! Core domain types and prediction logic for sumdash.
//!
//! This crate provides the pieces shared by the server, the trainer and the
//! store:
//!
//! - [`InputPair`] — The two user-supplied inputs of a prediction request
//! - [`FeatureFrame`] — A named-column numeric matrix fed to a model
//! - [`LinearModel`] — The typed regression artifact (fit, predict, coefficients)
//! - [`compute_sum_hardcoded`] / [`compute_sum_model`] — The two prediction paths
//! - [`PredictError`] — Error type for everything above
//!
//! # Example
//!
//! ```rust
//! use sumdash_core::{compute_sum_hardcoded, compute_sum_model, InputPair, LinearModel};
//!
//! let input = InputPair::new(1.0, 2.0);
//! assert_eq!(compute_sum_hardcoded(&input).unwrap(), 3.0);
//!
//! let model = LinearModel::new(vec!["x1".into(), "x2".into()], vec![1.0, 1.0], 0.0).unwrap();
//! let pred = compute_sum_model(&model, &input).unwrap();
//! assert_eq!(pred.dim(), (1, 1));
//! ```

mod dispatch;
mod frame;
mod model;

pub use dispatch::{compute_sum_hardcoded, compute_sum_model, format_matrix, ModelReport};
pub use frame::FeatureFrame;
pub use model::LinearModel;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Feature column names the dashboard model is trained on.
pub const FEATURE_COLUMNS: [&str; 2] = ["x1", "x2"];

/// Target column name in the training dataset.
pub const TARGET_COLUMN: &str = "y";

/// Errors that can occur while building frames, fitting or predicting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// A required input field was empty or absent.
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// Frame columns do not match the features the model was fit on.
    #[error("Feature names mismatch: model expects {expected:?}, got {got:?}")]
    SchemaMismatch { expected: Vec<String>, got: Vec<String> },

    /// Matrix dimensions are inconsistent.
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// A parameter or result is NaN or infinite.
    #[error("Non-finite value: {0}")]
    NonFinite(String),

    /// The least-squares system has no unique solution.
    #[error("Design matrix is singular; cannot fit model")]
    Singular,
}

/// The two inputs of a prediction request.
///
/// Empty or non-numeric fields coerce to `None`, the same way a browser number
/// input reports an unusable value. Deserializes from both JSON bodies and
/// url-encoded forms using the field names `x_1` and `x_2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputPair {
    #[serde(rename = "x_1", default, deserialize_with = "lenient_number")]
    pub x1: Option<f64>,
    #[serde(rename = "x_2", default, deserialize_with = "lenient_number")]
    pub x2: Option<f64>,
}

impl InputPair {
    /// Creates a pair with both values present.
    pub fn new(x1: f64, x2: f64) -> Self {
        Self { x1: Some(x1), x2: Some(x2) }
    }

    /// Builds a pair from raw form text; blank or non-numeric fields become `None`.
    pub fn parse(x1: &str, x2: &str) -> Self {
        Self { x1: coerce(x1), x2: coerce(x2) }
    }

    /// Returns both values, failing on the first missing one.
    pub fn require(&self) -> Result<(f64, f64), PredictError> {
        let x1 = self.x1.ok_or(PredictError::MissingInput("x_1"))?;
        let x2 = self.x2.ok_or(PredictError::MissingInput("x_2"))?;
        Ok((x1, x2))
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n).filter(|n| n.is_finite()),
        Some(Raw::Text(s)) => coerce(&s),
        None => None,
    })
}

fn coerce(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
