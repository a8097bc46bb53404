//! Search request value object

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Largest accepted search radius, about half the Earth's circumference
///
/// A circle this wide already covers the whole globe.
pub const MAX_SEARCH_RADIUS_METERS: f64 = 20_000_000.0;

/// A station search between two free-text addresses
///
/// Built once at the trigger point and passed by value into discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Where the trip starts ("Home")
    pub source_address: String,
    /// Where the trip ends ("Destination")
    pub destination_address: String,
    /// Station search radius around each address in meters
    pub radius_meters: f64,
}

impl SearchRequest {
    /// Create a new search request
    pub fn new(
        source_address: impl Into<String>,
        destination_address: impl Into<String>,
        radius_meters: f64,
    ) -> Self {
        Self {
            source_address: source_address.into(),
            destination_address: destination_address.into(),
            radius_meters,
        }
    }

    /// Check that both addresses are present and the radius is positive and
    /// at most [`MAX_SEARCH_RADIUS_METERS`]
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` describing the first problem found.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.source_address.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "source address must not be empty".to_string(),
            ));
        }
        if self.destination_address.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "destination address must not be empty".to_string(),
            ));
        }
        if !self.radius_meters.is_finite() || self.radius_meters <= 0.0 {
            return Err(DomainError::ValidationError(format!(
                "radius must be a positive number of meters, got {}",
                self.radius_meters
            )));
        }
        if self.radius_meters > MAX_SEARCH_RADIUS_METERS {
            return Err(DomainError::ValidationError(format!(
                "radius must be at most {MAX_SEARCH_RADIUS_METERS} meters, got {}",
                self.radius_meters
            )));
        }
        Ok(())
    }
}
