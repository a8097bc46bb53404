//! Application layer - Use cases and orchestration
//!
//! Defines the ports the station search depends on (geocoding, station
//! lookup, device location) and the services that orchestrate them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{Branch, BranchFailure, DiscoveryError, FailureCause};
pub use ports::*;
pub use services::*;
