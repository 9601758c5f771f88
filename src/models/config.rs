use crate::assets::AssetLoader;
use crate::error::ConfigError;
use colorgorical_scores::DEFAULT_PARALLEL_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the six binary lookup tables
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Weights applied to the palette minima
    #[serde(default)]
    pub weights: Weights,

    /// Batches with at least this many rows are scored in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/tables")
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

/// Score weights, each in `[0, 1]`
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, ToSchema)]
#[serde(default)]
pub struct Weights {
    /// Perceptual distance (CIEDE2000)
    pub ciede2000: f64,
    pub name_difference: f64,
    pub name_uniqueness: f64,
    pub pair_preference: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            ciede2000: 1.0,
            name_difference: 1.0,
            name_uniqueness: 0.0,
            pair_preference: 1.0,
        }
    }
}

impl Weights {
    /// Reject weights outside `[0, 1]` (NaN included).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("ciede2000", self.ciede2000),
            ("name_difference", self.name_difference),
            ("name_uniqueness", self.name_uniqueness),
            ("pair_preference", self.pair_preference),
        ];
        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WeightOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Per-request weights; unset fields keep the configured value
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, ToSchema)]
pub struct WeightOverrides {
    pub ciede2000: Option<f64>,
    pub name_difference: Option<f64>,
    pub name_uniqueness: Option<f64>,
    pub pair_preference: Option<f64>,
}

impl WeightOverrides {
    pub fn apply(&self, base: Weights) -> Weights {
        Weights {
            ciede2000: self.ciede2000.unwrap_or(base.ciede2000),
            name_difference: self.name_difference.unwrap_or(base.name_difference),
            name_uniqueness: self.name_uniqueness.unwrap_or(base.name_uniqueness),
            pair_preference: self.pair_preference.unwrap_or(base.pair_preference),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            weights: Weights::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    ///
    /// Unreadable or unparsable YAML falls back to defaults. Weights out of
    /// range are an error.
    pub fn load_from_assets(loader: &AssetLoader) -> Result<Self, ConfigError> {
        let config = match loader.read_config_string() {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        };
        config.weights.validate()?;

        tracing::info!(
            data_dir = %config.data_dir.display(),
            parallel_threshold = config.parallel_threshold,
            "Loaded configuration"
        );
        Ok(config)
    }

    fn parse(content: &str) -> Self {
        match serde_yaml::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply the `DATA_DIR` override, if set.
    pub fn with_data_dir_override(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            tracing::debug!(data_dir = %dir.display(), "DATA_DIR overrides config");
            self.data_dir = dir;
        }
        self
    }

    /// Read `DATA_DIR` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_data_dir_override(std::env::var("DATA_DIR").ok().map(PathBuf::from))
    }
}
