//! Camera framing
//!
//! Pure functions computing which part of the map to show.

use domain::value_objects::{Coordinate, MapRegion};

use crate::error::DiscoveryError;

/// After a search the camera shows this many search radii around "Home"
pub const HOME_SPAN_MULTIPLIER: f64 = 5.0;

/// "Recenter on my location" zooms out this much relative to startup
pub const RESET_SPAN_MULTIPLIER: f64 = 3.0;

/// Region radius used to frame the device location at startup
pub const DEFAULT_STARTUP_REGION_RADIUS_METERS: f64 = 250.0;

/// Computes map regions
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraPlanner;

impl CameraPlanner {
    /// Region centered on `center` spanning `region_radius_meters`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive or non-finite radius.
    pub fn frame(center: Coordinate, region_radius_meters: f64) -> Result<MapRegion, DiscoveryError> {
        if !region_radius_meters.is_finite() || region_radius_meters <= 0.0 {
            return Err(DiscoveryError::InvalidInput(format!(
                "region radius must be positive, got {region_radius_meters}"
            )));
        }
        Ok(MapRegion::new(center, region_radius_meters))
    }

    /// Frame the resolved home anchor after a search
    pub fn frame_home(home: Coordinate, search_radius_meters: f64) -> Result<MapRegion, DiscoveryError> {
        Self::frame(home, search_radius_meters * HOME_SPAN_MULTIPLIER)
    }

    /// Frame the device location when the map first appears
    pub fn frame_startup(
        location: Coordinate,
        startup_radius_meters: f64,
    ) -> Result<MapRegion, DiscoveryError> {
        Self::frame(location, startup_radius_meters)
    }

    /// Frame the device location for "recenter on my location"
    pub fn frame_reset(
        location: Coordinate,
        startup_radius_meters: f64,
    ) -> Result<MapRegion, DiscoveryError> {
        Self::frame(location, startup_radius_meters * RESET_SPAN_MULTIPLIER)
    }
}
