//! Socrata station feed client
//!
//! Reads bike-share docks from a Socrata open data dataset. Radius
//! filtering is delegated to the portal through the SoQL
//! `within_circle` function.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::StationFeedConfig;
use crate::error::StationFeedError;
use crate::models::FeedStation;

/// Trait for station feed clients
#[async_trait]
pub trait StationFeedClient: Send + Sync {
    /// Find docks within `radius_meters` of a point
    async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<FeedStation>, StationFeedError>;

    /// Fetch the whole feed
    async fn all_stations(&self) -> Result<Vec<FeedStation>, StationFeedError>;
}

/// Station feed client for a Socrata dataset
#[derive(Debug)]
pub struct SocrataStationClient {
    client: Client,
    config: StationFeedConfig,
}

impl SocrataStationClient {
    /// Create a new Socrata station client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &StationFeedConfig) -> Result<Self, StationFeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bikeshare-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StationFeedError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// SoQL filter selecting rows inside a circle
    fn within_circle(latitude: f64, longitude: f64, radius_meters: f64) -> String {
        format!("within_circle(location, {latitude}, {longitude}, {radius_meters})")
    }

    /// Run a query against the dataset resource
    async fn query(&self, filter: Option<String>) -> Result<Vec<FeedStation>, StationFeedError> {
        let url = self.config.resource_url();

        let mut params: Vec<(&str, String)> = vec![("$limit", self.config.max_results.to_string())];
        if let Some(filter) = filter {
            params.push(("$where", filter));
        }

        let mut request = self.client.get(&url).query(&params);
        if let Some(token) = &self.config.app_token {
            request = request.header("X-App-Token", token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StationFeedError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                StationFeedError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(StationFeedError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(StationFeedError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StationFeedError::ParseError(e.to_string()))?;

        let stations = Self::parse_rows(&body)?;
        debug!(count = stations.len(), "Stations received");
        Ok(stations)
    }

    /// Parse a Socrata JSON body into stations
    ///
    /// The body must be a JSON array. Rows that cannot be turned into a
    /// station are skipped.
    fn parse_rows(body: &str) -> Result<Vec<FeedStation>, StationFeedError> {
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(body).map_err(|e| StationFeedError::ParseError(e.to_string()))?;

        let mut stations = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let raw: RawStationRow = match serde_json::from_value(row) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(index, error = %e, "Skipping unreadable station row");
                    continue;
                },
            };
            match Self::convert_row(raw) {
                Some(station) => stations.push(station),
                None => warn!(index, "Skipping station row without id or valid coordinates"),
            }
        }
        Ok(stations)
    }

    /// Convert a raw row into a typed station
    fn convert_row(raw: RawStationRow) -> Option<FeedStation> {
        let id = raw.id.as_ref().and_then(FeedValue::as_u32)?;
        let latitude = raw.latitude.as_ref().and_then(FeedValue::as_f64)?;
        let longitude = raw.longitude.as_ref().and_then(FeedValue::as_f64)?;
        let location = Coordinate::new(latitude, longitude).ok()?;

        Some(FeedStation {
            id,
            name: raw.station_name.unwrap_or_default(),
            address: raw.address.unwrap_or_default(),
            status_label: raw.status,
            location,
        })
    }
}

#[async_trait]
impl StationFeedClient for SocrataStationClient {
    #[instrument(skip(self))]
    async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<FeedStation>, StationFeedError> {
        if Coordinate::new(latitude, longitude).is_err() {
            return Err(StationFeedError::InvalidQuery(format!(
                "center out of range: {latitude},{longitude}"
            )));
        }
        if !radius_meters.is_finite() || radius_meters < 0.0 {
            return Err(StationFeedError::InvalidQuery(format!(
                "radius must be a non-negative number, got {radius_meters}"
            )));
        }

        self.query(Some(Self::within_circle(latitude, longitude, radius_meters)))
            .await
    }

    #[instrument(skip(self))]
    async fn all_stations(&self) -> Result<Vec<FeedStation>, StationFeedError> {
        self.query(None).await
    }
}

/// Raw Socrata station row
#[derive(Debug, Deserialize)]
struct RawStationRow {
    id: Option<FeedValue>,
    station_name: Option<String>,
    address: Option<String>,
    status: Option<String>,
    latitude: Option<FeedValue>,
    longitude: Option<FeedValue>,
}

/// Socrata serializes numbers as strings; accept both
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedValue {
    Number(serde_json::Number),
    Text(String),
}

impl FeedValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}
