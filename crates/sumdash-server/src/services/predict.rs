//! Prediction dispatch service shared by the HTML and JSON handlers.

use sumdash_core::{compute_sum_hardcoded, InputPair, ModelReport};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::ServerState;

/// Hardcoded path.
pub fn hardcoded(input: &InputPair) -> Result<f64, AppError> {
    let y = compute_sum_hardcoded(input).map_err(|e| {
        warn!("Hardcoded prediction rejected: {}", e);
        e
    })?;
    debug!(x_1 = ?input.x1, x_2 = ?input.x2, y, "Hardcoded prediction");
    Ok(y)
}

/// Model path, using whichever model handle the server was started with.
pub async fn model(state: &ServerState, input: &InputPair) -> Result<ModelReport, AppError> {
    // Missing input fails before the artifact is touched.
    input.require()?;

    let model = state.model.get().await?;
    let report = ModelReport::run(&model, input).map_err(|e| {
        warn!("Model prediction failed: {}", e);
        e
    })?;
    debug!(x_1 = ?input.x1, x_2 = ?input.x2, y = report.value(), "Model prediction");
    Ok(report)
}
