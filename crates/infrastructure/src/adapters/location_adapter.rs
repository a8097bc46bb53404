//! Fixed location provider - Implements LocationProviderPort from configuration

use application::ports::LocationProviderPort;
use async_trait::async_trait;
use domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configured device position
///
/// Both fields must be set for the position to be known.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocationConfig {
    /// The configured coordinate, if complete and in range
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        let (latitude, longitude) = (self.latitude?, self.longitude?);
        match Coordinate::new(latitude, longitude) {
            Ok(coordinate) => Some(coordinate),
            Err(e) => {
                warn!(%latitude, %longitude, error = %e, "Ignoring configured location");
                None
            },
        }
    }
}

/// Location provider that always reports the same position
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocationProvider {
    location: Option<Coordinate>,
}

impl FixedLocationProvider {
    /// Provider reporting `location`
    #[must_use]
    pub const fn new(location: Option<Coordinate>) -> Self {
        Self { location }
    }

    /// Provider reporting the configured position
    #[must_use]
    pub fn from_config(config: &LocationConfig) -> Self {
        Self::new(config.coordinate())
    }
}

#[async_trait]
impl LocationProviderPort for FixedLocationProvider {
    async fn current_location(&self) -> Option<Coordinate> {
        self.location
    }
}
