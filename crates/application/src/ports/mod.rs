//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoder_port;
mod location_provider_port;
mod station_repository_port;

#[cfg(test)]
pub use geocoder_port::MockGeocoderPort;
pub use geocoder_port::{GeocodeError, GeocodeResult, GeocoderPort};
#[cfg(test)]
pub use location_provider_port::MockLocationProviderPort;
pub use location_provider_port::LocationProviderPort;
#[cfg(test)]
pub use station_repository_port::MockStationRepositoryPort;
pub use station_repository_port::{StationDataError, StationRepositoryPort};
