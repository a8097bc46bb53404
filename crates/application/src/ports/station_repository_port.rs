//! Station repository port
//!
//! Looks up bike-share stations around a point. Radius filtering is the data
//! source's job; an empty list is a valid answer.

use async_trait::async_trait;
use domain::entities::Station;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Station feed failures
///
/// "No stations nearby" is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationDataError {
    /// The feed was unreachable or returned malformed data
    #[error("Station data unavailable: {0}")]
    DataUnavailable(String),
}

/// Port for station lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StationRepositoryPort: Send + Sync {
    /// Stations within `radius_meters` of `center`
    async fn find_within_radius(
        &self,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<Station>, StationDataError>;

    /// Every station in the feed
    async fn all_stations(&self) -> Result<Vec<Station>, StationDataError>;
}
