//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoder_adapter;
mod location_adapter;
mod station_feed_adapter;

pub use geocoder_adapter::GeocoderAdapter;
pub use location_adapter::{FixedLocationProvider, LocationConfig};
pub use station_feed_adapter::StationFeedAdapter;
