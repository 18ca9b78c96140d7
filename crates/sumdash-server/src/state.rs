use std::path::PathBuf;
use std::sync::Arc;

use sumdash_config::AppConfig;
use sumdash_core::LinearModel;
use sumdash_store::Dataset;
use tracing::{info, warn};

use crate::error::AppError;

/// Where model predictions get their [`LinearModel`] from.
pub enum ModelHandle {
    /// Loaded once at startup and shared across requests.
    Loaded(Arc<LinearModel>),
    /// Re-read from disk on every call.
    ColdLoad(PathBuf),
}

impl ModelHandle {
    pub async fn get(&self) -> Result<Arc<LinearModel>, AppError> {
        match self {
            ModelHandle::Loaded(model) => Ok(model.clone()),
            ModelHandle::ColdLoad(path) => {
                let path = path.clone();
                let model = tokio::task::spawn_blocking(move || sumdash_store::load_model(&path))
                    .await
                    .map_err(AppError::internal)??;
                Ok(Arc::new(model))
            }
        }
    }
}

pub struct ServerState {
    pub model: ModelHandle,
    pub dataset: Dataset,
    pub config: AppConfig,
}

impl ServerState {
    pub fn new(model: ModelHandle, dataset: Dataset, config: AppConfig) -> Self {
        Self { model, dataset, config }
    }

    /// Loads the dataset and, unless cold-load mode is on, the model artifact.
    ///
    /// Neither file is required to start: a missing dataset renders an empty
    /// table, and a missing model falls back to per-request loading so the
    /// artifact can be trained while the server runs.
    pub fn init(config: AppConfig) -> Self {
        let dataset = match Dataset::from_csv(&config.dataset_path) {
            Ok(ds) => {
                info!("Loaded dataset {} ({} rows)", config.dataset_path.display(), ds.len());
                ds
            }
            Err(e) => {
                warn!("Dataset {} unavailable: {}", config.dataset_path.display(), e);
                Dataset::default()
            }
        };

        let model = if config.reload_model {
            info!("Cold-load mode: model is read from {} on every call", config.model_path.display());
            ModelHandle::ColdLoad(config.model_path.clone())
        } else {
            match sumdash_store::load_model(&config.model_path) {
                Ok(m) => ModelHandle::Loaded(Arc::new(m)),
                Err(e) => {
                    warn!("Model not loaded ({}); falling back to per-request loading", e);
                    ModelHandle::ColdLoad(config.model_path.clone())
                }
            }
        };

        Self::new(model, dataset, config)
    }
}
