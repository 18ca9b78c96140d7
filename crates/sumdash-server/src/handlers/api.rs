//! JSON prediction and inspection API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use sumdash_core::{InputPair, ModelReport};
use sumdash_store::Dataset;
use tracing::error;

use crate::dto::{HardcodeResponse, ModelInfoResponse};
use crate::error::AppError;
use crate::services::predict as predict_service;
use crate::ServerState;

/// POST /api/predict/hardcode - `y = x_1 + x_2`.
///
/// A sum that overflows to infinity is rejected rather than serialized as `null`.
pub async fn predict_hardcode(
    payload: Result<Json<InputPair>, JsonRejection>,
) -> Result<Json<HardcodeResponse>, AppError> {
    let Json(input) = payload?;
    let y = predict_service::hardcoded(&input)?;
    Ok(Json(HardcodeResponse { y }))
}

/// POST /api/predict/model - Model prediction with its coefficients.
pub async fn predict_model(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<InputPair>, JsonRejection>,
) -> Result<Json<ModelReport>, AppError> {
    let Json(input) = payload?;
    let report = predict_service::model(&state, &input).await?;
    Ok(Json(report))
}

/// GET /api/model - The artifact currently served.
pub async fn model_info(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ModelInfoResponse>, AppError> {
    let model = state.model.get().await.map_err(|e| {
        error!("Failed to get model: {:?}", e);
        e
    })?;

    Ok(Json(ModelInfoResponse {
        feature_names: model.feature_names().to_vec(),
        coefficients: model.coefficients().to_vec(),
        intercept: model.intercept(),
        path: state.config.model_path.display().to_string(),
        reload_model: matches!(state.model, crate::ModelHandle::ColdLoad(_)),
    }))
}

/// GET /api/dataset - The training dataset.
pub async fn dataset(State(state): State<Arc<ServerState>>) -> Json<Dataset> {
    Json(state.dataset.clone())
}
