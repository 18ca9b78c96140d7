use serde::{Deserialize, Serialize};
use sumdash_core::InputPair;

// === HTML form DTOs ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
    Hardcode,
    Model,
}

/// Body of the `/model1` form. Fields stay as text so the page can echo them back.
#[derive(Debug, Clone, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub x_1: String,
    #[serde(default)]
    pub x_2: String,
    pub action: FormAction,
}

impl FormSubmission {
    pub fn input(&self) -> InputPair {
        InputPair::parse(&self.x_1, &self.x_2)
    }
}

// === JSON API DTOs ===

#[derive(Debug, Serialize)]
pub struct HardcodeResponse {
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub path: String,
    pub reload_model: bool,
}
