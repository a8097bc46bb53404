//! Renderer-agnostic description of what the map should show

use serde::{Deserialize, Serialize};

use super::marker::Marker;
use crate::value_objects::Coordinate;

/// Visual expansion applied to the search radius when drawing overlays
///
/// Display only; the station query uses the unscaled radius.
pub const OVERLAY_RADIUS_SCALE: f64 = 1.5;

/// A circle drawn around a search anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusOverlay {
    /// Circle center (the anchor position)
    pub center: Coordinate,
    /// Circle radius in meters
    pub radius_meters: f64,
}

impl RadiusOverlay {
    /// Overlay for a search of `search_radius_meters` around `center`
    #[must_use]
    pub fn for_search(center: Coordinate, search_radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters: search_radius_meters * OVERLAY_RADIUS_SCALE,
        }
    }
}

/// Markers and overlays for one rendered map state
///
/// No two markers share a position (within the tolerance the state was
/// built with). Markers keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    markers: Vec<Marker>,
    overlays: Vec<RadiusOverlay>,
}

impl ViewState {
    /// Empty state
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Markers in insertion order
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Overlays in insertion order
    #[must_use]
    pub fn overlays(&self) -> &[RadiusOverlay] {
        &self.overlays
    }

    /// Marker placed exactly at `coordinate`, if any
    #[must_use]
    pub fn marker_at(&self, coordinate: Coordinate) -> Option<&Marker> {
        self.markers.iter().find(|m| m.coordinate() == coordinate)
    }

    /// Anchor markers only
    pub fn anchors(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.is_anchor())
    }

    /// Whether the state has nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.overlays.is_empty()
    }
}

/// Single-writer builder enforcing the one-marker-per-position rule
#[derive(Debug, Clone, Default)]
pub struct ViewStateBuilder {
    state: ViewState,
    tolerance_degrees: f64,
}

impl ViewStateBuilder {
    /// Builder that treats markers within `tolerance_degrees` on both axes as
    /// the same position (`0.0` means exact equality)
    #[must_use]
    pub fn new(tolerance_degrees: f64) -> Self {
        Self {
            state: ViewState::default(),
            tolerance_degrees: tolerance_degrees.max(0.0),
        }
    }

    /// Insert a marker unless one already occupies its position
    ///
    /// Returns `false` when the marker was skipped; the existing one wins.
    pub fn insert_marker(&mut self, marker: impl Into<Marker>) -> bool {
        let marker = marker.into();
        let position = marker.coordinate();
        let occupied = self
            .state
            .markers
            .iter()
            .any(|existing| existing.coordinate().approx_eq(&position, self.tolerance_degrees));
        if occupied {
            return false;
        }
        self.state.markers.push(marker);
        true
    }

    /// Insert every marker in order, returning how many were kept
    pub fn extend_markers<I, M>(&mut self, markers: I) -> usize
    where
        I: IntoIterator<Item = M>,
        M: Into<Marker>,
    {
        let mut kept = 0;
        for marker in markers {
            if self.insert_marker(marker) {
                kept += 1;
            }
        }
        kept
    }

    /// Append an overlay
    pub fn push_overlay(&mut self, overlay: RadiusOverlay) {
        self.state.overlays.push(overlay);
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> ViewState {
        self.state
    }
}
