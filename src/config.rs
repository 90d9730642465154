use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_max_payload_bytes() -> usize { 2 * 1024 * 1024 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_tag_weight")]
    pub tag_match: f64,
    #[serde(default = "default_title_weight")]
    pub title_match: f64,
    #[serde(default = "default_description_weight")]
    pub description_match: f64,
    #[serde(default = "default_venue_weight")]
    pub venue_match: f64,
    #[serde(default = "default_recency_per_day")]
    pub recency_per_day: f64,
    #[serde(default = "default_recency_window_days")]
    pub recency_window_days: i64,
    #[serde(default = "default_recency_horizon_days")]
    pub recency_horizon_days: i64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            tag_match: default_tag_weight(),
            title_match: default_title_weight(),
            description_match: default_description_weight(),
            venue_match: default_venue_weight(),
            recency_per_day: default_recency_per_day(),
            recency_window_days: default_recency_window_days(),
            recency_horizon_days: default_recency_horizon_days(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            tag_match: config.tag_match,
            title_match: config.title_match,
            description_match: config.description_match,
            venue_match: config.venue_match,
            recency_per_day: config.recency_per_day,
            recency_window_days: config.recency_window_days,
            recency_horizon_days: config.recency_horizon_days,
        }
    }
}

fn default_tag_weight() -> f64 { 3.0 }
fn default_title_weight() -> f64 { 3.0 }
fn default_description_weight() -> f64 { 2.0 }
fn default_venue_weight() -> f64 { 1.0 }
fn default_recency_per_day() -> f64 { 0.6 }
fn default_recency_window_days() -> i64 { 5 }
fn default_recency_horizon_days() -> i64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RECOMMENDER_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RECOMMENDER__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("RECOMMENDER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
