//! Bike-share station entity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Operational state reported by the station feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    /// In service
    Active,
    /// Not in service
    Inactive,
    /// Status unknown or not applicable (also used by anchors)
    All,
}

impl StationStatus {
    /// Map a feed status label to a status
    ///
    /// Unknown labels map to [`StationStatus::All`].
    #[must_use]
    pub fn from_feed_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "in service" | "active" => Self::Active,
            "not in service" | "inactive" => Self::Inactive,
            _ => Self::All,
        }
    }

    /// Pin color for markers with this status
    #[must_use]
    pub const fn marker_tint(self) -> MarkerTint {
        match self {
            Self::Active => MarkerTint::Green,
            Self::Inactive => MarkerTint::Red,
            Self::All => MarkerTint::Gray,
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Pin color of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerTint {
    /// Active station
    Green,
    /// Inactive station
    Red,
    /// Station with unknown status
    Gray,
    /// Source or destination anchor
    Purple,
}

/// A bike-share station returned by the station feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Feed-assigned unique identifier
    pub id: u32,
    /// Display name, e.g. "State St & Harrison St"
    pub name: String,
    /// Street address of the dock
    pub address: String,
    /// Operational state
    pub status: StationStatus,
    /// Dock position
    pub location: Coordinate,
}

impl Station {
    /// Create a new station
    pub fn new(
        id: u32,
        name: impl Into<String>,
        address: impl Into<String>,
        status: StationStatus,
        location: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            status,
            location,
        }
    }

    /// Pin color derived from the station status
    #[must_use]
    pub const fn marker_tint(&self) -> MarkerTint {
        self.status.marker_tint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_feed_label() {
        assert_eq!(StationStatus::from_feed_label("In Service"), StationStatus::Active);
        assert_eq!(
            StationStatus::from_feed_label("Not In Service"),
            StationStatus::Inactive
        );
        assert_eq!(StationStatus::from_feed_label(" ACTIVE "), StationStatus::Active);
        assert_eq!(StationStatus::from_feed_label("planned"), StationStatus::All);
        assert_eq!(StationStatus::from_feed_label(""), StationStatus::All);
    }

    #[test]
    fn tint_follows_status() {
        let location = Coordinate::new_unchecked(41.87, -87.62);
        let active = Station::new(5, "A", "a", StationStatus::Active, location);
        let inactive = Station::new(6, "B", "b", StationStatus::Inactive, location);
        let unknown = Station::new(7, "C", "c", StationStatus::All, location);

        assert_eq!(active.marker_tint(), MarkerTint::Green);
        assert_eq!(inactive.marker_tint(), MarkerTint::Red);
        assert_eq!(unknown.marker_tint(), MarkerTint::Gray);
    }

    #[test]
    fn status_display() {
        assert_eq!(StationStatus::Inactive.to_string(), "inactive");
    }
}
