//! File-backed persistence for sumdash.
//!
//! [`save`] and [`load`] write and read any serde type as JSON; the caller picks
//! the type on load, there is no schema tag in the file. [`Dataset`] reads the
//! training CSV shown on the dashboard.

mod dataset;

pub use dataset::{Dataset, DatasetError};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use sumdash_core::LinearModel;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from artifact store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt artifact {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serializes `obj` to `path`, creating parent directories and replacing any
/// existing file.
pub fn save<T: Serialize + ?Sized>(path: impl AsRef<Path>, obj: &T) -> Result<(), StoreError> {
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(obj)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Saved artifact to {}", path.display());
    Ok(())
}

/// Deserializes the object stored at `path` as `T`.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, StoreError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Io { path: path.to_path_buf(), source },
    })?;

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a [`LinearModel`] artifact.
pub fn load_model(path: impl AsRef<Path>) -> Result<LinearModel, StoreError> {
    let path = path.as_ref();
    let model: LinearModel = load(path)?;
    info!(
        "Loaded model from {} (coef={:?}, intercept={})",
        path.display(),
        model.coefficients(),
        model.intercept()
    );
    Ok(model)
}
