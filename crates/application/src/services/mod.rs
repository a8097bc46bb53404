//! Application services - Use case implementations

mod camera_planner;
mod discovery_service;
mod discovery_session;

pub use camera_planner::{
    CameraPlanner, DEFAULT_STARTUP_REGION_RADIUS_METERS, HOME_SPAN_MULTIPLIER,
    RESET_SPAN_MULTIPLIER,
};
pub use discovery_service::{
    DEFAULT_DEDUP_TOLERANCE_DEGREES, DiscoveryConfig, DiscoveryOutcome, DiscoveryService,
};
pub use discovery_session::{DiscoverySession, SearchSequencer, SearchTicket, SessionOutcome};
