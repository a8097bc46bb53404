//! Station discovery service
//!
//! Turns a [`SearchRequest`] into a [`ViewState`]: geocodes both addresses,
//! queries stations around each resolved point, and merges everything into
//! one deduplicated set of markers plus one radius overlay per branch.
//!
//! Both geocodes run concurrently and are awaited together, then both station
//! queries. Branches are merged source first, so the result does not depend
//! on which call returns first.

use std::fmt;
use std::sync::Arc;

use domain::entities::{AnchorKind, AnchorMarker, RadiusOverlay, Station, ViewState, ViewStateBuilder};
use domain::value_objects::{Coordinate, MapRegion, SearchRequest};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::camera_planner::{CameraPlanner, DEFAULT_STARTUP_REGION_RADIUS_METERS};
use crate::error::{Branch, BranchFailure, DiscoveryError};
use crate::ports::{GeocoderPort, LocationProviderPort, StationDataError, StationRepositoryPort};

/// Default tolerance when deciding two markers share a position
pub const DEFAULT_DEDUP_TOLERANCE_DEGREES: f64 = 1e-6;

/// Configuration for discovery behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Markers within this many degrees on both axes count as the same
    /// position (0 = exact equality)
    #[serde(default = "default_dedup_tolerance")]
    pub dedup_tolerance_degrees: f64,

    /// Region radius framing the device location at startup
    #[serde(default = "default_startup_region_radius")]
    pub startup_region_radius_meters: f64,
}

const fn default_dedup_tolerance() -> f64 {
    DEFAULT_DEDUP_TOLERANCE_DEGREES
}

const fn default_startup_region_radius() -> f64 {
    DEFAULT_STARTUP_REGION_RADIUS_METERS
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            dedup_tolerance_degrees: default_dedup_tolerance(),
            startup_region_radius_meters: default_startup_region_radius(),
        }
    }
}

impl DiscoveryConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.dedup_tolerance_degrees.is_finite() || self.dedup_tolerance_degrees < 0.0 {
            return Err("dedup_tolerance_degrees must be a non-negative number".to_string());
        }
        if !self.startup_region_radius_meters.is_finite() || self.startup_region_radius_meters <= 0.0
        {
            return Err("startup_region_radius_meters must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Result of a successful search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryOutcome {
    /// What to draw
    pub view_state: ViewState,
    /// Camera framing the home anchor
    pub camera: MapRegion,
    /// Branches whose station query failed; their markers and overlay are
    /// missing from `view_state`
    pub unavailable: Vec<BranchFailure>,
}

impl DiscoveryOutcome {
    /// Whether every branch contributed to the view state
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unavailable.is_empty()
    }
}

/// Orchestrates geocoding and station lookups for a search
pub struct DiscoveryService {
    geocoder: Arc<dyn GeocoderPort>,
    stations: Arc<dyn StationRepositoryPort>,
    location: Option<Arc<dyn LocationProviderPort>>,
    config: DiscoveryConfig,
    last_request: RwLock<Option<SearchRequest>>,
}

impl fmt::Debug for DiscoveryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryService")
            .field("has_location_provider", &self.location.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DiscoveryService {
    /// Create a service with default configuration and no location provider
    pub fn new(geocoder: Arc<dyn GeocoderPort>, stations: Arc<dyn StationRepositoryPort>) -> Self {
        Self {
            geocoder,
            stations,
            location: None,
            config: DiscoveryConfig::default(),
            last_request: RwLock::new(None),
        }
    }

    /// Use a custom configuration
    #[must_use]
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach the device location source
    #[must_use]
    pub fn with_location_provider(mut self, location: Arc<dyn LocationProviderPort>) -> Self {
        self.location = Some(location);
        self
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// The most recent request that passed validation
    #[must_use]
    pub fn last_request(&self) -> Option<SearchRequest> {
        self.last_request.read().clone()
    }

    /// Run a search
    ///
    /// Returns a fresh view state; the caller clears whatever was shown
    /// before applying it. If exactly one branch's station query fails the
    /// outcome is partial and lists the failure in
    /// [`DiscoveryOutcome::unavailable`].
    ///
    /// # Errors
    ///
    /// * `InvalidInput` when an address is blank or the radius is not
    ///   positive; no network call is made.
    /// * `AddressResolutionFailed` when either address does not geocode.
    /// * `DataUnavailable` when the station query fails for both branches.
    #[instrument(skip(self, request), fields(radius = request.radius_meters))]
    pub async fn discover(&self, request: SearchRequest) -> Result<DiscoveryOutcome, DiscoveryError> {
        request.validate()?;
        *self.last_request.write() = Some(request.clone());

        let radius = request.radius_meters;

        let (source, destination) = tokio::join!(
            self.geocoder.resolve(&request.source_address),
            self.geocoder.resolve(&request.destination_address),
        );

        let (source, destination) = match (source, destination) {
            (Ok(source), Ok(destination)) => (source, destination),
            (source, destination) => {
                let failures: Vec<BranchFailure> = [
                    (Branch::Source, source.err()),
                    (Branch::Destination, destination.err()),
                ]
                .into_iter()
                .filter_map(|(branch, err)| err.map(|e| BranchFailure::geocode(branch, &e)))
                .collect();
                warn!(failed = failures.len(), "Address resolution failed");
                return Err(DiscoveryError::AddressResolutionFailed { failures });
            },
        };

        debug!(
            source = %source.coordinate,
            destination = %destination.coordinate,
            "Both addresses resolved"
        );

        let home = AnchorMarker::new(AnchorKind::Home, request.source_address, source.coordinate);
        let target = AnchorMarker::new(
            AnchorKind::Destination,
            request.destination_address,
            destination.coordinate,
        );

        let (home_stations, target_stations) = tokio::join!(
            self.stations.find_within_radius(home.location, radius),
            self.stations.find_within_radius(target.location, radius),
        );

        let camera = CameraPlanner::frame_home(home.location, radius)?;

        let mut builder = ViewStateBuilder::new(self.config.dedup_tolerance_degrees);
        let mut unavailable = Vec::new();

        for (branch, anchor, stations) in [
            (Branch::Source, home, home_stations),
            (Branch::Destination, target, target_stations),
        ] {
            match stations {
                Ok(stations) => Self::merge_branch(&mut builder, branch, anchor, stations, radius),
                Err(e) => {
                    warn!(%branch, error = %e, "Station data not available for branch");
                    unavailable.push(BranchFailure::stations(branch, &e));
                },
            }
        }

        if unavailable.len() == 2 {
            return Err(DiscoveryError::DataUnavailable {
                failures: unavailable,
            });
        }

        let view_state = builder.build();
        info!(
            markers = view_state.markers().len(),
            overlays = view_state.overlays().len(),
            partial = !unavailable.is_empty(),
            "Discovery complete"
        );

        Ok(DiscoveryOutcome {
            view_state,
            camera,
            unavailable,
        })
    }

    /// Anchor first, then the branch's stations, then the overlay
    fn merge_branch(
        builder: &mut ViewStateBuilder,
        branch: Branch,
        anchor: AnchorMarker,
        stations: Vec<Station>,
        radius_meters: f64,
    ) {
        let center = anchor.location;
        let offered = stations.len();
        builder.insert_marker(anchor);
        let kept = builder.extend_markers(stations);
        if kept < offered {
            debug!(%branch, skipped = offered - kept, "Skipped markers at occupied positions");
        }
        builder.push_overlay(RadiusOverlay::for_search(center, radius_meters));
    }

    /// Every station in the feed, for the map before the first search
    #[instrument(skip(self))]
    pub async fn initial_view(&self) -> Result<ViewState, StationDataError> {
        let stations = self.stations.all_stations().await?;
        let mut builder = ViewStateBuilder::new(self.config.dedup_tolerance_degrees);
        let kept = builder.extend_markers(stations);
        debug!(markers = kept, "Initial view built");
        Ok(builder.build())
    }

    /// Region framing the device location at startup
    ///
    /// `None` when no location provider is attached or the location is unknown.
    pub async fn startup_region(&self) -> Option<MapRegion> {
        let location = self.current_location().await?;
        CameraPlanner::frame_startup(location, self.config.startup_region_radius_meters).ok()
    }

    /// Region for "recenter on my location"
    pub async fn reset_region(&self) -> Option<MapRegion> {
        let location = self.current_location().await?;
        CameraPlanner::frame_reset(location, self.config.startup_region_radius_meters).ok()
    }

    async fn current_location(&self) -> Option<Coordinate> {
        match &self.location {
            Some(provider) => provider.current_location().await,
            None => None,
        }
    }
}
