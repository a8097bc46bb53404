//! Geocoding port
//!
//! Resolves a free-text address to a coordinate. Adapters in the
//! infrastructure layer implement this port on top of a geocoding API.

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A successfully resolved address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Resolved position
    pub coordinate: Coordinate,
    /// Provider's canonical spelling of the address
    pub formatted_address: String,
}

/// Geocoding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The provider returned zero matches
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// The provider errored or timed out
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Port for address resolution
///
/// Implementations must allow concurrent calls and must not retry internally.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocoderPort: Send + Sync {
    /// Resolve an address to its best match
    async fn resolve(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;
}
