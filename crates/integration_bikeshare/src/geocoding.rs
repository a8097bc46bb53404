//! Nominatim geocoding client
//!
//! Converts free-form address strings to coordinates using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Requests are spaced by a minimum interval (Nominatim allows at most
//! one request per second) and results are cached.
//!
//! The spacing is shared by every caller of one client: the timestamp of the
//! last request sits behind a lock that is held while waiting. Two geocodes
//! started together therefore reach the server one after the other, at least
//! `min_request_interval_ms` apart. Set the interval to 0 for providers
//! without a usage limit to let concurrent lookups overlap.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::models::GeocodedPlace;

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Country code filter (e.g., "us"), empty for worldwide
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Minimum spacing between requests in milliseconds (0 to disable)
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// User-Agent sent with every request (required by the usage policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_country_filter() -> String {
    "us".to_string()
}

const fn default_min_request_interval_ms() -> u64 {
    1100
}

fn default_user_agent() -> String {
    concat!("bikeshare-finder/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: default_country_filter(),
            min_request_interval_ms: default_min_request_interval_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("base_url is not a valid URL: {e}"))?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Rate limit exceeded (max 1 req/sec for Nominatim)
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to its best matching place
    async fn geocode(&self, address: &str) -> Result<GeocodedPlace, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, GeocodedPlace>>,
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_hours > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_hours * 3600))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            min_interval: Duration::from_millis(config.min_request_interval_ms),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce the minimum spacing between requests
    async fn rate_limit(&self) {
        if self.min_interval.is_zero() {
            return;
        }
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Turn the first Nominatim result into a place
    fn convert_result(address: &str, results: &[NominatimResult]) -> Result<GeocodedPlace, GeocodingError> {
        let result = results
            .first()
            .ok_or_else(|| GeocodingError::AddressNotFound(address.to_string()))?;

        let lat: f64 = result
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid latitude".to_string()))?;
        let lon: f64 = result
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid longitude".to_string()))?;

        let location =
            Coordinate::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(GeocodedPlace {
            location,
            display_name: result
                .display_name
                .clone()
                .unwrap_or_else(|| address.to_string()),
        })
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodedPlace, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::AddressNotFound(
                "Address must not be empty".to_string(),
            ));
        }

        let cache_key = address.to_lowercase();
        if let Some(cache) = &self.cache {
            if let Some(place) = cache.get(&cache_key).await {
                debug!(%address, "Geocoding cache hit");
                return Ok(place);
            }
        }

        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("q", address.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%address, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }

        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let place = Self::convert_result(address, &results)?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, place.clone()).await;
        }
        debug!(%address, location = %place.location, "Geocoded address");

        Ok(place)
    }
}

/// Raw Nominatim API response
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_config_default() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.cache_ttl_hours, 24);
        assert_eq!(config.country_filter, "us");
        assert_eq!(config.min_request_interval_ms, 1100);
        assert!(config.user_agent.starts_with("bikeshare-finder/"));
    }

    #[test]
    fn test_nominatim_config_for_testing() {
        let config = NominatimConfig::for_testing();
        assert_eq!(config.cache_ttl_hours, 0);
        assert_eq!(config.min_request_interval_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nominatim_config_validation() {
        let config = NominatimConfig {
            user_agent: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NominatimConfig {
            base_url: "nominatim".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_geocoding_error_display() {
        let err = GeocodingError::AddressNotFound("Union Station".to_string());
        assert!(err.to_string().contains("Union Station"));

        let err = GeocodingError::Timeout;
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_convert_first_result() {
        let json = r#"[{"lat": "41.8786", "lon": "-87.6403", "display_name": "Union Station, Chicago"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        let place = NominatimGeocodingClient::convert_result("union station", &results).unwrap();
        assert_eq!(place.display_name, "Union Station, Chicago");
        assert!((place.location.latitude() - 41.8786).abs() < 1e-9);
    }

    #[test]
    fn test_convert_missing_display_name_uses_query() {
        let json = r#"[{"lat": "41.0", "lon": "-87.0"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        let place = NominatimGeocodingClient::convert_result("somewhere", &results).unwrap();
        assert_eq!(place.display_name, "somewhere");
    }

    #[test]
    fn test_convert_empty_result() {
        let result = NominatimGeocodingClient::convert_result("nowhere", &[]);
        assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
    }

    #[test]
    fn test_convert_bad_latitude() {
        let json = r#"[{"lat": "north", "lon": "-87.0"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        let result = NominatimGeocodingClient::convert_result("x", &results);
        assert!(matches!(result, Err(GeocodingError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_empty_address_rejected() {
        let client = NominatimGeocodingClient::new(&NominatimConfig::for_testing()).unwrap();
        let result = client.geocode("   ").await;
        assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
    }

    #[test]
    fn test_nominatim_config_serialization() {
        let config = NominatimConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: NominatimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.base_url, config.base_url);
        assert_eq!(deserialized.country_filter, config.country_filter);
    }
}
