//! Station feed adapter - Implements StationRepositoryPort using integration_bikeshare

use std::sync::Arc;

use application::ports::{StationDataError, StationRepositoryPort};
use async_trait::async_trait;
use domain::entities::Station;
use domain::value_objects::Coordinate;
use integration_bikeshare::{
    FeedStation, SocrataStationClient, StationFeedClient, StationFeedConfig, StationFeedError,
};
use tracing::{debug, instrument, warn};

/// Adapter for station lookups through a station feed client
pub struct StationFeedAdapter {
    client: Arc<dyn StationFeedClient>,
}

impl std::fmt::Debug for StationFeedAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationFeedAdapter")
            .field("client", &"dyn StationFeedClient")
            .finish()
    }
}

impl StationFeedAdapter {
    /// Create an adapter around an existing client
    pub fn new(client: Arc<dyn StationFeedClient>) -> Self {
        Self { client }
    }

    /// Create an adapter backed by a Socrata dataset
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn socrata(config: &StationFeedConfig) -> Result<Self, StationFeedError> {
        Ok(Self::new(Arc::new(SocrataStationClient::new(config)?)))
    }

    fn convert_station(feed: FeedStation) -> Station {
        let status = feed.status();
        Station::new(feed.id, feed.name, feed.address, status, feed.location)
    }

    fn map_error(error: &StationFeedError) -> StationDataError {
        warn!(error = %error, "Station feed request failed");
        StationDataError::DataUnavailable(error.to_string())
    }
}

#[async_trait]
impl StationRepositoryPort for StationFeedAdapter {
    #[instrument(skip(self))]
    async fn find_within_radius(
        &self,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<Station>, StationDataError> {
        let stations = self
            .client
            .find_within_radius(center.latitude(), center.longitude(), radius_meters)
            .await
            .map_err(|e| Self::map_error(&e))?;

        debug!(count = stations.len(), "Stations within radius");
        Ok(stations.into_iter().map(Self::convert_station).collect())
    }

    #[instrument(skip(self))]
    async fn all_stations(&self) -> Result<Vec<Station>, StationDataError> {
        let stations = self
            .client
            .all_stations()
            .await
            .map_err(|e| Self::map_error(&e))?;

        debug!(count = stations.len(), "Stations in feed");
        Ok(stations.into_iter().map(Self::convert_station).collect())
    }
}
