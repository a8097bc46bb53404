//! Bike-share data integration
//!
//! Provides station lookup against a [Socrata](https://dev.socrata.com)
//! open data dataset (the Divvy station table by default) and address
//! geocoding via [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! [`StationFeedClient`] defines the station lookup interface, implemented by
//! [`SocrataStationClient`]. [`GeocodingClient`] handles address-to-coordinate
//! conversion via [`NominatimGeocodingClient`]. Both return plain models; the
//! mapping onto application ports lives in the infrastructure crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_bikeshare::{SocrataStationClient, StationFeedClient, StationFeedConfig};
//!
//! let client = SocrataStationClient::new(&StationFeedConfig::default())?;
//! let nearby = client.find_within_radius(41.8786, -87.6403, 500.0).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{SocrataStationClient, StationFeedClient};
pub use config::StationFeedConfig;
pub use error::StationFeedError;
pub use geocoding::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
pub use models::{FeedStation, GeocodedPlace};
