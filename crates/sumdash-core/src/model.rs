//! Linear regression artifact: ordinary least squares fit and prediction.

use ndarray::{s, Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{FeatureFrame, PredictError};

/// Pivots smaller than this (relative to the largest Gram entry) count as zero.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// A fitted linear model `y = intercept + Σ coefficients[i] * features[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinearModel")]
pub struct LinearModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Creates a model with one coefficient per named feature.
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, PredictError> {
        if feature_names.len() != coefficients.len() {
            return Err(PredictError::Shape(format!(
                "{} feature names but {} coefficients",
                feature_names.len(),
                coefficients.len()
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PredictError::NonFinite(format!(
                "coefficients {:?}, intercept {}",
                coefficients, intercept
            )));
        }
        Ok(Self { feature_names, coefficients, intercept })
    }

    /// Fits the model on `frame` against `targets` by ordinary least squares.
    ///
    /// Solves the normal equations `(AᵀA) θ = Aᵀy`, where `A` is the frame with a
    /// leading column of ones for the intercept.
    pub fn fit(frame: &FeatureFrame, targets: &[f64]) -> Result<Self, PredictError> {
        let (n, k) = frame.values().dim();
        if targets.len() != n {
            return Err(PredictError::Shape(format!(
                "{} feature rows but {} targets",
                n,
                targets.len()
            )));
        }
        if n < k + 1 {
            return Err(PredictError::Shape(format!(
                "need at least {} rows to fit {} parameters, got {}",
                k + 1,
                k + 1,
                n
            )));
        }

        let mut design = Array2::<f64>::ones((n, k + 1));
        design.slice_mut(s![.., 1..]).assign(frame.values());
        let y = Array1::from(targets.to_vec());

        let gram = design.t().dot(&design);
        let rhs = design.t().dot(&y);
        let theta = solve(gram, rhs)?;

        let model = Self::new(
            frame.columns().to_vec(),
            theta.slice(s![1..]).to_vec(),
            theta[0],
        )?;
        debug!(
            rows = n,
            coefficients = ?model.coefficients,
            intercept = model.intercept,
            "Fitted linear model"
        );
        Ok(model)
    }

    /// Predicts one value per frame row, returned as an `n × 1` matrix.
    pub fn predict(&self, frame: &FeatureFrame) -> Result<Array2<f64>, PredictError> {
        if frame.columns() != self.feature_names.as_slice() {
            return Err(PredictError::SchemaMismatch {
                expected: self.feature_names.clone(),
                got: frame.columns().to_vec(),
            });
        }
        if self.coefficients.len() != frame.ncols() {
            return Err(PredictError::Shape(format!(
                "model has {} coefficients, frame has {} columns",
                self.coefficients.len(),
                frame.ncols()
            )));
        }

        let weights = Array1::from(self.coefficients.clone());
        let y = frame.values().dot(&weights) + self.intercept;
        Ok(y.insert_axis(Axis(1)))
    }

    /// Coefficients as a `1 × k` matrix, one column per feature.
    pub fn coef(&self) -> Array2<f64> {
        Array1::from(self.coefficients.clone()).insert_axis(Axis(0))
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

/// Unchecked on-disk form; [`LinearModel::new`] validates it on load.
#[derive(Deserialize)]
struct RawLinearModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl TryFrom<RawLinearModel> for LinearModel {
    type Error = PredictError;

    fn try_from(raw: RawLinearModel) -> Result<Self, Self::Error> {
        Self::new(raw.feature_names, raw.coefficients, raw.intercept)
    }
}

/// Gaussian elimination with partial pivoting on a square system.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, PredictError> {
    let n = b.len();
    let scale = a.iter().fold(1.0_f64, |m, v| m.max(v.abs()));

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot, col]].abs() < SINGULAR_TOLERANCE * scale {
            return Err(PredictError::Singular);
        }
        if pivot != col {
            for j in 0..n {
                a.swap([col, j], [pivot, j]);
            }
            b.swap(col, pivot);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            for j in col..n {
                a[[row, j]] -= factor * a[[col, j]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|j| a[[row, j]] * x[j]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sum_frame() -> (FeatureFrame, Vec<f64>) {
        let values = array![
            [1.0, 2.0],
            [2.0, 2.0],
            [3.0, 1.0],
            [0.0, 5.0],
            [4.0, 4.0],
            [7.0, 3.0],
        ];
        let targets = values.rows().into_iter().map(|r| r.sum()).collect();
        let frame = FeatureFrame::new(vec!["x1".into(), "x2".into()], values).unwrap();
        (frame, targets)
    }

    #[test]
    fn test_fit_recovers_sum() {
        let (frame, targets) = sum_frame();
        let model = LinearModel::fit(&frame, &targets).unwrap();

        assert_eq!(model.coefficients().len(), 2);
        assert!((model.coefficients()[0] - 1.0).abs() < 1e-9);
        assert!((model.coefficients()[1] - 1.0).abs() < 1e-9);
        assert!(model.intercept().abs() < 1e-9);
    }

    #[test]
    fn test_predict_shape_and_value() {
        let (frame, targets) = sum_frame();
        let model = LinearModel::fit(&frame, &targets).unwrap();

        let pred = model.predict(&FeatureFrame::single_row(&[("x1", 1.0), ("x2", 2.0)])).unwrap();
        assert_eq!(pred.dim(), (1, 1));
        assert!((pred[[0, 0]] - 3.0).abs() < 0.1);
    }

    #[test]
    fn test_coef_shape() {
        let model = LinearModel::new(vec!["x1".into(), "x2".into()], vec![1.0, 1.0], 0.0).unwrap();
        assert_eq!(model.coef().dim(), (1, 2));
    }

    #[test]
    fn test_fit_with_intercept() {
        let values = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [2.0, 3.0]];
        let targets: Vec<f64> = values
            .rows()
            .into_iter()
            .map(|r| 0.5 + 2.0 * r[0] - 1.0 * r[1])
            .collect();
        let frame = FeatureFrame::new(vec!["a".into(), "b".into()], values).unwrap();
        let model = LinearModel::fit(&frame, &targets).unwrap();

        assert!((model.intercept() - 0.5).abs() < 1e-9);
        assert!((model.coefficients()[0] - 2.0).abs() < 1e-9);
        assert!((model.coefficients()[1] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_singular_design() {
        let values = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let frame = FeatureFrame::new(vec!["x1".into(), "x2".into()], values).unwrap();
        let err = LinearModel::fit(&frame, &[2.0, 4.0, 6.0]).unwrap_err();
        assert_eq!(err, PredictError::Singular);
    }

    #[test]
    fn test_fit_rejects_too_few_rows() {
        let frame = FeatureFrame::new(vec!["x1".into(), "x2".into()], array![[1.0, 2.0]]).unwrap();
        let err = LinearModel::fit(&frame, &[3.0]).unwrap_err();
        assert!(matches!(err, PredictError::Shape(_)));
    }

    #[test]
    fn test_predict_rejects_wrong_columns() {
        let model = LinearModel::new(vec!["x1".into(), "x2".into()], vec![1.0, 1.0], 0.0).unwrap();
        let frame = FeatureFrame::single_row(&[("a", 1.0), ("b", 2.0)]);
        let err = model.predict(&frame).unwrap_err();
        assert!(matches!(err, PredictError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_fit_rejects_nan_targets() {
        let (frame, mut targets) = sum_frame();
        targets[2] = f64::NAN;
        let err = LinearModel::fit(&frame, &targets).unwrap_err();
        assert!(matches!(err, PredictError::NonFinite(_)));
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let err = LinearModel::new(vec!["x1".into()], vec![f64::INFINITY], 0.0).unwrap_err();
        assert!(matches!(err, PredictError::NonFinite(_)));
        let err = LinearModel::new(vec!["x1".into()], vec![1.0], f64::NAN).unwrap_err();
        assert!(matches!(err, PredictError::NonFinite(_)));
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let err = serde_json::from_str::<LinearModel>(
            r#"{"feature_names": ["x1", "x2"], "coefficients": [1.0], "intercept": 0.0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("2 feature names but 1 coefficients"));

        let model: LinearModel = serde_json::from_str(
            r#"{"feature_names": ["x1", "x2"], "coefficients": [1.0, 1.0], "intercept": 0.0}"#,
        )
        .unwrap();
        assert_eq!(model.coef().dim(), (1, 2));
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let err = LinearModel::new(vec!["x1".into()], vec![1.0, 1.0], 0.0).unwrap_err();
        assert!(matches!(err, PredictError::Shape(_)));
    }
}
