//! Application configuration
//!
//! Layered with the `config` crate, later sources overriding earlier ones:
//! - built-in defaults (serde `default` attributes)
//! - `bikeshare.toml` in the working directory, or an explicit file
//! - `BIKESHARE_*` environment variables, `__` separating nested keys
//!   (e.g. `BIKESHARE_STATIONS__DATASET_ID`)

use std::path::Path;

use application::DiscoveryConfig;
use integration_bikeshare::{NominatimConfig, StationFeedConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapters::LocationConfig;
use crate::retry::RetryConfig;
use crate::telemetry::LogConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BIKESHARE";

/// Default configuration file name (without extension)
pub const DEFAULT_CONFIG_FILE: &str = "bikeshare";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Nominatim geocoding
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// Station feed
    #[serde(default)]
    pub stations: StationFeedConfig,

    /// Marker merging and map framing
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Device position used for the startup and reset framing
    #[serde(default)]
    pub location: LocationConfig,

    /// Log output
    #[serde(default)]
    pub logging: LogConfig,

    /// Retry policy for whole searches
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AppConfig {
    /// Load configuration from `bikeshare.toml` (optional) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(None, None)
    }

    /// Load configuration from an explicit file (required) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or a source cannot be deserialized.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(Some(path), None)
    }

    /// Assemble the layered sources
    ///
    /// `env_source` replaces the process environment, which keeps tests
    /// independent of the caller's variables.
    fn build(
        path: Option<&Path>,
        env_source: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder().add_source(file).add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_source),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            geocoder = %config.geocoding.base_url,
            feed = %config.stations.resource_url(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with its section name.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding
            .validate()
            .map_err(|e| format!("geocoding: {e}"))?;
        self.stations
            .validate()
            .map_err(|e| format!("stations: {e}"))?;
        self.discovery
            .validate()
            .map_err(|e| format!("discovery: {e}"))?;
        self.retry.validate().map_err(|e| format!("retry: {e}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::telemetry::LogFormat;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        let mut map = config::Map::new();
        for (key, value) in pairs {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Some(map)
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::build(None, env(&[])).unwrap();
        assert_eq!(config.geocoding.min_request_interval_ms, 1100);
        assert_eq!(config.stations.dataset_id, "bbyy-e7gq");
        assert!((config.discovery.dedup_tolerance_degrees - 1e-6).abs() < f64::EPSILON);
        assert!(config.location.latitude.is_none());
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.retry.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = write_config(
            r#"
[stations]
base_url = "http://localhost:9000"
dataset_id = "abcd-1234"

[discovery]
dedup_tolerance_degrees = 0.0

[location]
latitude = 41.8786
longitude = -87.6403

[logging]
format = "json"
filter = "debug"
"#,
        );

        let config = AppConfig::build(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.stations.base_url, "http://localhost:9000");
        assert_eq!(config.stations.dataset_id, "abcd-1234");
        assert_eq!(config.stations.timeout_secs, 10);
        assert!(config.discovery.dedup_tolerance_degrees.abs() < f64::EPSILON);
        assert!(config.location.coordinate().is_some());
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("[stations]\ndataset_id = \"from-file\"\n");

        let config = AppConfig::build(
            Some(file.path()),
            env(&[
                ("BIKESHARE_STATIONS__DATASET_ID", "from-env"),
                ("BIKESHARE_GEOCODING__CACHE_TTL_HOURS", "0"),
            ]),
        )
        .unwrap();

        assert_eq!(config.stations.dataset_id, "from-env");
        assert_eq!(config.geocoding.cache_ttl_hours, 0);
    }

    #[test]
    fn explicit_file_is_required() {
        let result = AppConfig::build(Some(Path::new("/nonexistent/bikeshare.toml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_value_type_fails() {
        let file = write_config("[stations]\ntimeout_secs = \"soon\"\n");
        assert!(AppConfig::build(Some(file.path()), env(&[])).is_err());
    }

    #[test]
    fn validate_reports_section() {
        let mut config = AppConfig::default();
        config.stations.max_results = 0;
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("stations:"));

        let mut config = AppConfig::default();
        config.discovery.startup_region_radius_meters = -1.0;
        assert!(config.validate().unwrap_err().starts_with("discovery:"));
    }
}
