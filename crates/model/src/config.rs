//! Application configuration shared by the trainer and the predictor
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `DISCHARGE_*` environment variables (`__` separates sections, e.g.
//! `DISCHARGE_TRAINING__SEED=7`). Command-line flags are applied on top by
//! each binary.

use config::{Config, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::artifact::DEFAULT_MODEL_PATH;
use crate::encoding::UnknownCategoryPolicy;
use crate::errors::{ModelError, Result};
use crate::pipeline::ForestParams;

/// Configuration file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "discharge.toml";

/// Default training data location
pub const DEFAULT_INPUT_PATH: &str = "data/input.csv";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub training: TrainingConfig,
}

/// File locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Training CSV
    pub input: PathBuf,
    /// Model artifact
    pub model: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            model: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

/// Training run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Seed for the split and the forest's bootstrap sampling
    pub seed: u64,
    /// Share of rows held out for evaluation
    pub test_fraction: f64,
    pub trees: u16,
    pub max_depth: u16,
    pub min_samples_leaf: usize,
    pub unknown_category: UnknownCategoryPolicy,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let forest = ForestParams::default();
        Self {
            seed: 42,
            test_fraction: 0.2,
            trees: forest.trees,
            max_depth: forest.max_depth,
            min_samples_leaf: forest.min_samples_leaf,
            unknown_category: UnknownCategoryPolicy::default(),
        }
    }
}

impl TrainingConfig {
    pub fn forest(&self) -> ForestParams {
        ForestParams {
            trees: self.trees,
            max_depth: self.max_depth,
            min_samples_leaf: self.min_samples_leaf,
        }
    }

    /// Reject values the trainer cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ModelError::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.trees == 0 {
            return Err(ModelError::InvalidConfig("trees must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(ModelError::InvalidConfig(
                "max_depth must be at least 1".into(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(ModelError::InvalidConfig(
                "min_samples_leaf must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `config_path` must exist. Without one, `discharge.toml` in
    /// the working directory is used if present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let resolved = match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ModelError::InvalidConfig(format!(
                        "configuration file {} not found",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                path.is_file().then_some(path)
            }
        };

        let mut builder = Config::builder();
        if let Some(path) = &resolved {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(ConfigFile::from(path.as_path()));
        }
        builder = builder.add_source(
            Environment::with_prefix("DISCHARGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
