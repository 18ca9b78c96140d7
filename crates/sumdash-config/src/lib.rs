use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment Keys
// ─────────────────────────────────────────────────────────────────────────────

pub const ENV_CONFIG_FILE: &str = "SUMDASH_CONFIG";
pub const ENV_ADDR: &str = "SUMDASH_ADDR";
pub const ENV_MODEL_PATH: &str = "SUMDASH_MODEL_PATH";
pub const ENV_DATASET_PATH: &str = "SUMDASH_DATASET_PATH";
pub const ENV_RELOAD_MODEL: &str = "SUMDASH_RELOAD_MODEL";

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    pub dataset_path: PathBuf,
    /// Re-read the model artifact on every model prediction instead of once at startup.
    pub reload_model: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8050)),
            model_path: PathBuf::from("./models/myModel.json"),
            dataset_path: PathBuf::from("./dataset/dataset.csv"),
            reload_model: false,
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid by the JSON file named in `SUMDASH_CONFIG` (if set),
    /// overlaid by individual `SUMDASH_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let base = match vars.get(ENV_CONFIG_FILE) {
            Some(path) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };
        base.with_overrides(vars)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn with_overrides(mut self, vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        if let Some(addr) = vars.get(ENV_ADDR) {
            self.bind_addr = addr.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_ADDR,
                value: addr.clone(),
            })?;
        }
        if let Some(path) = vars.get(ENV_MODEL_PATH) {
            self.model_path = PathBuf::from(path);
        }
        if let Some(path) = vars.get(ENV_DATASET_PATH) {
            self.dataset_path = PathBuf::from(path);
        }
        if let Some(flag) = vars.get(ENV_RELOAD_MODEL) {
            self.reload_model = parse_bool(flag).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_RELOAD_MODEL,
                value: flag.clone(),
            })?;
        }
        Ok(self)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model_path, PathBuf::from("./models/myModel.json"));
        assert!(!config.reload_model);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_vars(&vars(&[
            (ENV_ADDR, "127.0.0.1:9000"),
            (ENV_MODEL_PATH, "/tmp/m.json"),
            (ENV_RELOAD_MODEL, "true"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.model_path, PathBuf::from("/tmp/m.json"));
        assert!(config.reload_model);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_vars(&vars(&[(ENV_ADDR, "not-an-addr")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_ADDR, .. }));

        let err = AppConfig::from_vars(&vars(&[(ENV_RELOAD_MODEL, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_RELOAD_MODEL, .. }));
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sumdash.json");
        fs::write(
            &path,
            r#"{"dataset_path": "data/train.csv", "reload_model": true}"#,
        )
        .unwrap();

        let config = AppConfig::from_vars(&vars(&[
            (ENV_CONFIG_FILE, path.to_str().unwrap()),
            (ENV_RELOAD_MODEL, "off"),
        ]))
        .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("data/train.csv"));
        assert!(!config.reload_model);
        assert_eq!(config.bind_addr, AppConfig::default().bind_addr);
    }

    #[test]
    fn test_missing_config_file() {
        let err = AppConfig::from_vars(&vars(&[(ENV_CONFIG_FILE, "/nonexistent/sumdash.json")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
