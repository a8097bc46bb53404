//! Domain entities - Objects with identity and lifecycle

mod marker;
mod station;
mod view_state;

pub use marker::{ANCHOR_MARKER_ID, AnchorKind, AnchorMarker, Marker};
pub use station::{MarkerTint, Station, StationStatus};
pub use view_state::{OVERLAY_RADIUS_SCALE, RadiusOverlay, ViewState, ViewStateBuilder};
