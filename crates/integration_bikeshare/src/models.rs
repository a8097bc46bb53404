//! Station feed and geocoding data models
//!
//! Typed representations of station rows as published by the Socrata
//! open data portal, and of a resolved Nominatim place.

use domain::entities::StationStatus;
use domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};

/// A single dock from the station feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedStation {
    /// Feed-assigned station identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// Street address, empty if the feed omits it
    pub address: String,
    /// Raw status label, e.g. "In Service"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_label: Option<String>,
    /// Dock position
    pub location: Coordinate,
}

impl FeedStation {
    /// Operational status derived from the feed label
    ///
    /// A missing label maps to [`StationStatus::All`].
    #[must_use]
    pub fn status(&self) -> StationStatus {
        self.status_label
            .as_deref()
            .map_or(StationStatus::All, StationStatus::from_feed_label)
    }
}

/// A place returned by the geocoder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodedPlace {
    /// Position of the best match
    pub location: Coordinate,
    /// Provider's display name for the match
    pub display_name: String,
}
