//! Map region value object

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Approximate length of one degree of latitude in meters
const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// The visible area of the map: a center and an edge length in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    /// Center of the visible area
    pub center: Coordinate,
    /// North-south and east-west extent in meters
    pub span_meters: f64,
}

impl MapRegion {
    /// Create a new region
    #[must_use]
    pub const fn new(center: Coordinate, span_meters: f64) -> Self {
        Self {
            center,
            span_meters,
        }
    }

    /// North-south span expressed in degrees of latitude
    #[must_use]
    pub fn latitude_delta_degrees(&self) -> f64 {
        self.span_meters / METERS_PER_DEGREE_LATITUDE
    }

    /// East-west span expressed in degrees of longitude at the center latitude
    ///
    /// Clamped to 360 degrees near the poles.
    #[must_use]
    pub fn longitude_delta_degrees(&self) -> f64 {
        let meters_per_degree = METERS_PER_DEGREE_LATITUDE * self.center.latitude().to_radians().cos();
        if meters_per_degree <= f64::EPSILON {
            return 360.0;
        }
        (self.span_meters / meters_per_degree).min(360.0)
    }
}
