//! Configuration Management Module
//!
//! Settings for the training job and the prediction server. Values come from
//! built-in defaults, an optional config file (TOML, JSON or YAML, chosen by
//! extension) and `FEEDRANK__SECTION__KEY` environment variables, in that
//! order of increasing precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::trainer::ForestParams;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "FEEDRANK";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub training: TrainingSettings,
    pub server: ServerSettings,
}

/// Training job settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSettings {
    /// CSV produced by the upstream export job
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub forest: ForestParams,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("training_data.csv"),
            model_path: PathBuf::from("model/model.bin"),
            forest: ForestParams::default(),
        }
    }
}

/// Prediction server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
            model_path: PathBuf::from("model/model.bin"),
        }
    }
}

impl RankerConfig {
    /// Load configuration from an optional file plus the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a file only, ignoring the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_fixed_paths() {
        let config = RankerConfig::default();
        assert_eq!(config.training.data_path, PathBuf::from("training_data.csv"));
        assert_eq!(config.training.model_path, config.server.model_path);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.training.forest, ForestParams::default());
    }

    #[test]
    fn test_partial_toml_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("feedrank.toml");
        fs::write(
            &path,
            r#"
[server]
port = 9100

[training.forest]
n_trees = 50
"#,
        )
        .unwrap();

        let config = RankerConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.training.forest.n_trees, 50);
        assert_eq!(config.training.forest.max_depth, Some(15));
        assert_eq!(config.training.data_path, PathBuf::from("training_data.csv"));
    }

    #[test]
    fn test_json_file_is_supported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("feedrank.json");
        fs::write(
            &path,
            r#"{ "training": { "data_path": "exports/rows.csv", "forest": { "seed": 7 } } }"#,
        )
        .unwrap();

        let config = RankerConfig::from_file(&path).unwrap();
        assert_eq!(config.training.data_path, PathBuf::from("exports/rows.csv"));
        assert_eq!(config.training.forest.seed, 7);
    }

    #[test]
    fn test_serialized_defaults_load_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("defaults.toml");
        let mut config = RankerConfig::default();
        config.training.forest.max_depth = Some(9);
        fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        assert_eq!(RankerConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("feedrank.toml");
        fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 9100
"#,
        )
        .unwrap();

        // Only this test reads the environment; the others use `from_file`.
        std::env::set_var("FEEDRANK__SERVER__PORT", "9200");
        std::env::set_var("FEEDRANK__TRAINING__FOREST__N_TREES", "7");
        let loaded = RankerConfig::load(Some(&path));
        std::env::remove_var("FEEDRANK__SERVER__PORT");
        std::env::remove_var("FEEDRANK__TRAINING__FOREST__N_TREES");

        let config = loaded.unwrap();
        assert_eq!(config.server.port, 9200);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.training.forest.n_trees, 7);
        assert_eq!(config.training.forest.seed, 42);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        assert!(RankerConfig::from_file(temp.path().join("absent.toml")).is_err());
    }
}
