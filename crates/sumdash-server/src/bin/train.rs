//! Fits the dashboard model on the configured dataset and saves the artifact.
//!
//! Run with: cargo run --bin sumdash-train

use anyhow::{Context, Result};
use sumdash_config::AppConfig;
use sumdash_core::{LinearModel, FEATURE_COLUMNS, TARGET_COLUMN};
use sumdash_store::Dataset;
use tracing::info;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    sumdash_server::init_tracing();

    let config = AppConfig::load().context("failed to load configuration")?;

    let dataset = Dataset::from_csv(&config.dataset_path)
        .with_context(|| format!("failed to read {}", config.dataset_path.display()))?;
    info!("Training on {} rows from {}", dataset.len(), config.dataset_path.display());

    let frame = dataset.features(&FEATURE_COLUMNS)?;
    let targets = dataset.column(TARGET_COLUMN)?;
    let model = LinearModel::fit(&frame, &targets).context("failed to fit model")?;

    info!("coef={:?} intercept={}", model.coefficients(), model.intercept());

    sumdash_store::save(&config.model_path, &model)
        .with_context(|| format!("failed to save {}", config.model_path.display()))?;
    info!("Saved model to {}", config.model_path.display());

    Ok(())
}
