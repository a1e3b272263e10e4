//! Configuration loading from TOML files.
//!
//! Every section has a usable default, so a missing file section is not an
//! error; values that violate domain invariants
//! (weights not summing to 1.0, non-positive radii) fail at load time,
//! before anything touches the store.

use std::path::Path;

use serde::Deserialize;

use crate::domain::SimilarityWeights;
use crate::engine::{SimilarityConfig, WalkScoreConfig};
use crate::error::{ConfigError, Error, Result};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub similarity: SimilaritySection,
    pub walk_score: WalkScoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path or `:memory:`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimilaritySection {
    /// Default geographic radius cap in kilometers.
    pub max_radius_km: f64,
    /// Factor weights; must sum to exactly 1.0.
    pub weights: SimilarityWeights,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            similarity: SimilaritySection::default(),
            walk_score: WalkScoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "comps.db".into(),
        }
    }
}

impl Default for SimilaritySection {
    fn default() -> Self {
        Self {
            max_radius_km: 2.0,
            weights: SimilarityWeights::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        self.similarity.weights.validate().map_err(|e| {
            Error::Config(ConfigError::InvalidValue {
                field: "similarity.weights",
                reason: e.to_string(),
            })
        })?;
        if !(self.similarity.max_radius_km > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "similarity.max_radius_km",
                reason: format!("must be > 0, got {}", self.similarity.max_radius_km),
            }
            .into());
        }
        if !(self.walk_score.lookup_radius_m > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "walk_score.lookup_radius_m",
                reason: format!("must be > 0, got {}", self.walk_score.lookup_radius_m),
            }
            .into());
        }
        for entry in &self.walk_score.weights {
            if !(entry.weight > 0.0) || !(entry.max_distance_m > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field: "walk_score.weights",
                    reason: format!(
                        "weight and max_distance_m must be > 0 for type '{}'",
                        entry.kind
                    ),
                }
                .into());
            }
        }
        Ok(())
    }

    /// The similarity engine configuration derived from this config.
    #[must_use]
    pub fn similarity_config(&self) -> SimilarityConfig {
        SimilarityConfig {
            max_radius_km: self.similarity.max_radius_km,
            weights: self.similarity.weights,
        }
    }

    /// Initialize the global tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.logging.level.clone()));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        if self.logging.format == "json" {
            builder.json().init();
        } else {
            builder.init();
        }
    }
}
