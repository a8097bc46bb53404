//! Domain layer for the bike-share station finder
//!
//! Contains coordinates, stations, map markers and the view state produced
//! by a station search. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
