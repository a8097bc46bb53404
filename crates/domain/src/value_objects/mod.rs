//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod map_region;
mod search_request;

pub use coordinate::{Coordinate, InvalidCoordinates};
pub use map_region::MapRegion;
pub use search_request::{MAX_SEARCH_RADIUS_METERS, SearchRequest};
