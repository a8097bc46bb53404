//! Map markers: real stations and the synthetic source/destination anchors

use std::fmt;

use serde::{Deserialize, Serialize};

use super::station::{MarkerTint, Station, StationStatus};
use crate::value_objects::Coordinate;

/// Identifier reserved for anchor markers
pub const ANCHOR_MARKER_ID: u32 = 1000;

/// Which end of the trip an anchor represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    /// Resolved source address
    Home,
    /// Resolved destination address
    Destination,
}

impl AnchorKind {
    /// Marker title shown in the callout
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Destination => "Destination",
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Synthetic marker placed at a resolved address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorMarker {
    /// Home or destination
    pub kind: AnchorKind,
    /// The address as the user typed it
    pub address: String,
    /// Geocoded position
    pub location: Coordinate,
}

impl AnchorMarker {
    /// Create a new anchor
    pub fn new(kind: AnchorKind, address: impl Into<String>, location: Coordinate) -> Self {
        Self {
            kind,
            address: address.into(),
            location,
        }
    }

    /// Reserved anchor identifier
    #[must_use]
    pub const fn id(&self) -> u32 {
        ANCHOR_MARKER_ID
    }

    /// Anchors carry no station status
    #[must_use]
    pub const fn status(&self) -> StationStatus {
        StationStatus::All
    }
}

/// Anything that can be pinned on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Marker {
    /// A real bike-share station
    Station(Station),
    /// A resolved source or destination
    Anchor(AnchorMarker),
}

impl Marker {
    /// Position of the pin
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        match self {
            Self::Station(station) => station.location,
            Self::Anchor(anchor) => anchor.location,
        }
    }

    /// Marker identifier ([`ANCHOR_MARKER_ID`] for anchors)
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Station(station) => station.id,
            Self::Anchor(anchor) => anchor.id(),
        }
    }

    /// Callout title
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Station(station) => &station.name,
            Self::Anchor(anchor) => anchor.kind.title(),
        }
    }

    /// Callout subtitle: the station address or the requested address
    #[must_use]
    pub fn subtitle(&self) -> &str {
        match self {
            Self::Station(station) => &station.address,
            Self::Anchor(anchor) => &anchor.address,
        }
    }

    /// Pin color; anchors always use the anchor tint
    #[must_use]
    pub const fn tint(&self) -> MarkerTint {
        match self {
            Self::Station(station) => station.marker_tint(),
            Self::Anchor(_) => MarkerTint::Purple,
        }
    }

    /// Whether this is a source or destination anchor
    #[must_use]
    pub const fn is_anchor(&self) -> bool {
        matches!(self, Self::Anchor(_))
    }
}

impl From<Station> for Marker {
    fn from(station: Station) -> Self {
        Self::Station(station)
    }
}

impl From<AnchorMarker> for Marker {
    fn from(anchor: AnchorMarker) -> Self {
        Self::Anchor(anchor)
    }
}
