//! Station feed configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the Socrata station feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationFeedConfig {
    /// Base URL of the open data portal
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Socrata dataset identifier of the station table
    #[serde(default = "default_dataset_id")]
    pub dataset_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Row limit per query (`$limit`)
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Optional Socrata application token (raises the rate limit)
    #[serde(default)]
    pub app_token: Option<String>,
}

fn default_base_url() -> String {
    "https://data.cityofchicago.org".to_string()
}

fn default_dataset_id() -> String {
    "bbyy-e7gq".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_results() -> u32 {
    1000
}

impl Default for StationFeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            dataset_id: default_dataset_id(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            app_token: None,
        }
    }
}

impl StationFeedConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            max_results: 50,
            ..Default::default()
        }
    }

    /// URL of the dataset's JSON resource
    #[must_use]
    pub fn resource_url(&self) -> String {
        format!(
            "{}/resource/{}.json",
            self.base_url.trim_end_matches('/'),
            self.dataset_id
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        Url::parse(&self.base_url).map_err(|e| format!("base_url is not a valid URL: {e}"))?;

        if self.dataset_id.trim().is_empty() {
            return Err("dataset_id must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        Ok(())
    }
}
