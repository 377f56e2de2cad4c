use crate::error::{FurrowError, Result};
use crate::ports::SubscriptionOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided programmatically by the embedding application
    Runtime,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Runtime => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the coverage engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// GPS accuracy gate: fixes worse than this are dropped
    pub accuracy_limit_m: ConfigValue<f64>,
    /// Auto-capture heading change, in degrees, that marks a corner
    pub heading_delta_deg: ConfigValue<f64>,
    /// Working implement (pass) width; grid cells are half this wide
    pub implement_width_m: ConfigValue<f64>,
    /// Minimum time between subscribed fixes
    pub min_interval_ms: ConfigValue<u64>,
    /// Minimum movement between subscribed fixes
    pub min_distance_m: ConfigValue<f64>,
    /// Base URL of the remote sync endpoint
    pub sync_base_url: ConfigValue<String>,
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            accuracy_limit_m: ConfigValue::new(12.0, ConfigSource::Default),
            heading_delta_deg: ConfigValue::new(30.0, ConfigSource::Default),
            implement_width_m: ConfigValue::new(4.0, ConfigSource::Default),
            min_interval_ms: ConfigValue::new(1000, ConfigSource::Default),
            min_distance_m: ConfigValue::new(1.0, ConfigSource::Default),
            sync_base_url: ConfigValue::new(
                "http://localhost:8080".to_string(),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| FurrowError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| FurrowError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(accuracy_limit_m) = file_config.accuracy_limit_m {
            self.accuracy_limit_m.update(accuracy_limit_m, ConfigSource::File);
        }

        if let Some(heading_delta_deg) = file_config.heading_delta_deg {
            self.heading_delta_deg.update(heading_delta_deg, ConfigSource::File);
        }

        if let Some(implement_width_m) = file_config.implement_width_m {
            self.implement_width_m.update(implement_width_m, ConfigSource::File);
        }

        if let Some(min_interval_ms) = file_config.min_interval_ms {
            self.min_interval_ms.update(min_interval_ms, ConfigSource::File);
        }

        if let Some(min_distance_m) = file_config.min_distance_m {
            self.min_distance_m.update(min_distance_m, ConfigSource::File);
        }

        if let Some(sync_base_url) = file_config.sync_base_url {
            self.sync_base_url.update(sync_base_url, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // FURROW_ACCURACY_LIMIT_M
        if let Ok(raw) = env::var("FURROW_ACCURACY_LIMIT_M") {
            match raw.parse::<f64>() {
                Ok(value) => self.accuracy_limit_m.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FURROW_ACCURACY_LIMIT_M value '{}': expected meters as a number",
                    raw
                ),
            }
        }

        // FURROW_HEADING_DELTA_DEG
        if let Ok(raw) = env::var("FURROW_HEADING_DELTA_DEG") {
            match raw.parse::<f64>() {
                Ok(value) => self.heading_delta_deg.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FURROW_HEADING_DELTA_DEG value '{}': expected degrees as a number",
                    raw
                ),
            }
        }

        // FURROW_IMPLEMENT_WIDTH_M
        if let Ok(raw) = env::var("FURROW_IMPLEMENT_WIDTH_M") {
            match raw.parse::<f64>() {
                Ok(value) => self.implement_width_m.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FURROW_IMPLEMENT_WIDTH_M value '{}': expected meters as a number",
                    raw
                ),
            }
        }

        // FURROW_MIN_INTERVAL_MS
        if let Ok(raw) = env::var("FURROW_MIN_INTERVAL_MS") {
            match raw.parse::<u64>() {
                Ok(value) => self.min_interval_ms.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FURROW_MIN_INTERVAL_MS value '{}': expected whole milliseconds",
                    raw
                ),
            }
        }

        // FURROW_MIN_DISTANCE_M
        if let Ok(raw) = env::var("FURROW_MIN_DISTANCE_M") {
            match raw.parse::<f64>() {
                Ok(value) => self.min_distance_m.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FURROW_MIN_DISTANCE_M value '{}': expected meters as a number",
                    raw
                ),
            }
        }

        // FURROW_SYNC_BASE_URL
        if let Ok(url) = env::var("FURROW_SYNC_BASE_URL") {
            self.sync_base_url.update(url, ConfigSource::Environment);
        }

        self
    }

    /// Apply overrides supplied programmatically by the embedding application
    pub fn apply_overrides(&mut self, overrides: RuntimeOverrides) {
        if let Some(accuracy_limit_m) = overrides.accuracy_limit_m {
            self.accuracy_limit_m.update(accuracy_limit_m, ConfigSource::Runtime);
        }

        if let Some(heading_delta_deg) = overrides.heading_delta_deg {
            self.heading_delta_deg.update(heading_delta_deg, ConfigSource::Runtime);
        }

        if let Some(implement_width_m) = overrides.implement_width_m {
            self.implement_width_m.update(implement_width_m, ConfigSource::Runtime);
        }

        if let Some(min_interval_ms) = overrides.min_interval_ms {
            self.min_interval_ms.update(min_interval_ms, ConfigSource::Runtime);
        }

        if let Some(min_distance_m) = overrides.min_distance_m {
            self.min_distance_m.update(min_distance_m, ConfigSource::Runtime);
        }

        if let Some(sync_base_url) = overrides.sync_base_url {
            self.sync_base_url.update(sync_base_url, ConfigSource::Runtime);
        }
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.accuracy_limit_m.value.is_finite() || self.accuracy_limit_m.value <= 0.0 {
            return Err(FurrowError::ConfigInvalid {
                key: "accuracy_limit_m".to_string(),
                reason: format!("must be a positive number, got {}", self.accuracy_limit_m.value),
            });
        }

        if !self.heading_delta_deg.value.is_finite()
            || self.heading_delta_deg.value <= 0.0
            || self.heading_delta_deg.value >= 180.0
        {
            return Err(FurrowError::ConfigInvalid {
                key: "heading_delta_deg".to_string(),
                reason: format!(
                    "must be between 0 and 180 degrees exclusive, got {}",
                    self.heading_delta_deg.value
                ),
            });
        }

        if !self.implement_width_m.value.is_finite() || self.implement_width_m.value <= 0.0 {
            return Err(FurrowError::ConfigInvalid {
                key: "implement_width_m".to_string(),
                reason: format!("must be a positive number, got {}", self.implement_width_m.value),
            });
        }

        if !self.min_distance_m.value.is_finite() || self.min_distance_m.value < 0.0 {
            return Err(FurrowError::ConfigInvalid {
                key: "min_distance_m".to_string(),
                reason: format!("must not be negative, got {}", self.min_distance_m.value),
            });
        }

        Ok(())
    }

    /// Subscription tuning derived from the interval settings
    pub fn subscription_options(&self) -> SubscriptionOptions {
        SubscriptionOptions {
            min_interval_ms: self.min_interval_ms.value,
            min_distance_m: self.min_distance_m.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "accuracy_limit_m".to_string(),
            (format!("{}", self.accuracy_limit_m.value), self.accuracy_limit_m.source),
        );

        map.insert(
            "heading_delta_deg".to_string(),
            (format!("{}", self.heading_delta_deg.value), self.heading_delta_deg.source),
        );

        map.insert(
            "implement_width_m".to_string(),
            (format!("{}", self.implement_width_m.value), self.implement_width_m.source),
        );

        map.insert(
            "min_interval_ms".to_string(),
            (format!("{}", self.min_interval_ms.value), self.min_interval_ms.source),
        );

        map.insert(
            "min_distance_m".to_string(),
            (format!("{}", self.min_distance_m.value), self.min_distance_m.source),
        );

        map.insert(
            "sync_base_url".to_string(),
            (self.sync_base_url.value.clone(), self.sync_base_url.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    accuracy_limit_m: Option<f64>,
    heading_delta_deg: Option<f64>,
    implement_width_m: Option<f64>,
    min_interval_ms: Option<u64>,
    min_distance_m: Option<f64>,
    sync_base_url: Option<String>,
}

/// Programmatic configuration overrides
#[derive(Debug, Default)]
pub struct RuntimeOverrides {
    pub accuracy_limit_m: Option<f64>,
    pub heading_delta_deg: Option<f64>,
    pub implement_width_m: Option<f64>,
    pub min_interval_ms: Option<u64>,
    pub min_distance_m: Option<f64>,
    pub sync_base_url: Option<String>,
}
