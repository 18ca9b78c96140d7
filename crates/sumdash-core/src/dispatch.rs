//! The two prediction paths behind the dashboard form.

use std::fmt;

use ndarray::Array2;
use serde::Serialize;

use crate::{FeatureFrame, InputPair, LinearModel, PredictError, FEATURE_COLUMNS};

/// Hardcoded path: `y = x_1 + x_2`.
pub fn compute_sum_hardcoded(input: &InputPair) -> Result<f64, PredictError> {
    let (x1, x2) = input.require()?;
    finite(x1 + x2)
}

/// Model path: runs `model` on a single `x1`, `x2` row. The result is `1 × 1`.
pub fn compute_sum_model(model: &LinearModel, input: &InputPair) -> Result<Array2<f64>, PredictError> {
    let (x1, x2) = input.require()?;
    let frame = FeatureFrame::single_row(&[(FEATURE_COLUMNS[0], x1), (FEATURE_COLUMNS[1], x2)]);
    let prediction = model.predict(&frame)?;
    if let Some(y) = prediction.iter().find(|y| !y.is_finite()) {
        return Err(PredictError::NonFinite(format!("prediction {}", y)));
    }
    Ok(prediction)
}

fn finite(y: f64) -> Result<f64, PredictError> {
    if y.is_finite() {
        Ok(y)
    } else {
        Err(PredictError::NonFinite(format!("sum {}", y)))
    }
}

/// A model prediction together with the coefficients that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReport {
    pub prediction: Array2<f64>,
    pub coefficients: Array2<f64>,
}

impl ModelReport {
    /// Runs the model path and captures the model's coefficients.
    pub fn run(model: &LinearModel, input: &InputPair) -> Result<Self, PredictError> {
        Ok(Self {
            prediction: compute_sum_model(model, input)?,
            coefficients: model.coef(),
        })
    }

    /// The single predicted value.
    pub fn value(&self) -> f64 {
        self.prediction.iter().copied().next().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " model said: pred={} coef={}",
            format_matrix(&self.prediction),
            format_matrix(&self.coefficients)
        )
    }
}

impl Serialize for ModelReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ModelReport", 3)?;
        state.serialize_field("prediction", &rows(&self.prediction))?;
        state.serialize_field("coefficients", &rows(&self.coefficients))?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

fn rows(m: &Array2<f64>) -> Vec<Vec<f64>> {
    m.rows().into_iter().map(|r| r.to_vec()).collect()
}

/// Formats a matrix as nested brackets, e.g. `[[1.0, 1.0]]`.
pub fn format_matrix(m: &Array2<f64>) -> String {
    let body: Vec<String> = m
        .rows()
        .into_iter()
        .map(|r| {
            let cells: Vec<String> = r.iter().map(|v| format!("{:?}", v)).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect();
    format!("[{}]", body.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn identity_sum_model() -> LinearModel {
        LinearModel::new(vec!["x1".into(), "x2".into()], vec![1.0, 1.0], 0.0).unwrap()
    }

    #[test]
    fn test_calculate_y_hardcode_1_plus_2_equal_3() {
        assert_eq!(compute_sum_hardcoded(&InputPair::new(1.0, 2.0)).unwrap(), 3.0);
    }

    #[test]
    fn test_calculate_y_hardcode_2_plus_2_equal_4() {
        assert_eq!(compute_sum_hardcoded(&InputPair::new(2.0, 2.0)).unwrap(), 4.0);
    }

    #[test]
    fn test_hardcoded_missing_input_fails() {
        let input = InputPair { x1: None, x2: Some(2.0) };
        assert_eq!(compute_sum_hardcoded(&input), Err(PredictError::MissingInput("x_1")));
    }

    #[test]
    fn test_hardcoded_overflow_fails() {
        let err = compute_sum_hardcoded(&InputPair::new(1e308, 1e308)).unwrap_err();
        assert!(matches!(err, PredictError::NonFinite(_)));
    }

    #[test]
    fn test_model_overflow_fails() {
        let err = compute_sum_model(&identity_sum_model(), &InputPair::new(1e308, 1e308)).unwrap_err();
        assert!(matches!(err, PredictError::NonFinite(_)));
    }

    #[test]
    fn test_model_output_shape() {
        let output = compute_sum_model(&identity_sum_model(), &InputPair::new(1.0, 2.0)).unwrap();
        assert_eq!(output.dim(), (1, 1));
        assert!((output[[0, 0]] - 3.0).abs() < 0.1);
    }

    #[test]
    fn test_model_missing_input_fails() {
        let input = InputPair { x1: Some(1.0), x2: None };
        let err = compute_sum_model(&identity_sum_model(), &input).unwrap_err();
        assert_eq!(err, PredictError::MissingInput("x_2"));
    }

    #[test]
    fn test_report_message() {
        let report = ModelReport::run(&identity_sum_model(), &InputPair::new(1.0, 2.0)).unwrap();
        assert_eq!(report.to_string(), " model said: pred=[[3.0]] coef=[[1.0, 1.0]]");
        assert_eq!(report.value(), 3.0);
    }

    #[test]
    fn test_report_json() {
        let report = ModelReport::run(&identity_sum_model(), &InputPair::new(2.0, 2.0)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["prediction"], serde_json::json!([[4.0]]));
        assert_eq!(json["coefficients"], serde_json::json!([[1.0, 1.0]]));
    }

    #[test]
    fn test_format_matrix() {
        assert_eq!(format_matrix(&array![[1.5], [2.0]]), "[[1.5], [2.0]]");
    }
}
