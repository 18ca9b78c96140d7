//! sumdash: predict `y = x_1 + x_2` with a hardcoded formula or a fitted
//! linear regression model.
//!
//! This crate re-exports the workspace crates behind one name. Enable the
//! `server` feature to get the HTTP dashboard router as well.

pub use sumdash_config as config;
pub use sumdash_core as domain;
pub use sumdash_store as store;

#[cfg(feature = "server")]
pub use sumdash_server as server;

pub mod prelude {
    pub use sumdash_config::{AppConfig, ConfigError};
    pub use sumdash_core::{
        compute_sum_hardcoded, compute_sum_model, FeatureFrame, InputPair, LinearModel,
        ModelReport, PredictError, FEATURE_COLUMNS, TARGET_COLUMN,
    };
    pub use sumdash_store::{load, load_model, save, Dataset, DatasetError, StoreError};
}
