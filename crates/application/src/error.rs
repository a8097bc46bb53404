//! Application-level errors

use std::fmt;

use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::{GeocodeError, StationDataError};

/// One half of a search: geocode, station query and overlay for one address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// The source ("Home") address
    Source,
    /// The destination address
    Destination,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// Why a branch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// Geocoder found no match
    AddressNotFound,
    /// Geocoder errored or timed out
    GeocoderUnavailable,
    /// Station feed errored or returned malformed data
    DataUnavailable,
}

/// A failed branch with its cause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchFailure {
    /// Which branch failed
    pub branch: Branch,
    /// Failure category
    pub cause: FailureCause,
    /// Collaborator's error message
    pub reason: String,
}

impl BranchFailure {
    /// Failure from the geocoder
    #[must_use]
    pub fn geocode(branch: Branch, error: &GeocodeError) -> Self {
        let cause = match error {
            GeocodeError::AddressNotFound(_) => FailureCause::AddressNotFound,
            GeocodeError::ServiceUnavailable(_) => FailureCause::GeocoderUnavailable,
        };
        Self {
            branch,
            cause,
            reason: error.to_string(),
        }
    }

    /// Failure from the station repository
    #[must_use]
    pub fn stations(branch: Branch, error: &StationDataError) -> Self {
        Self {
            branch,
            cause: FailureCause::DataUnavailable,
            reason: error.to_string(),
        }
    }
}

impl fmt::Display for BranchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.branch, self.reason)
    }
}

fn join_failures(failures: &[BranchFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by station discovery
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// Malformed request, rejected before any I/O
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or both addresses could not be geocoded
    #[error("Address resolution failed ({})", join_failures(.failures))]
    AddressResolutionFailed {
        /// Every branch whose address did not resolve
        failures: Vec<BranchFailure>,
    },

    /// The station feed failed for every branch
    #[error("Station data not available ({})", join_failures(.failures))]
    DataUnavailable {
        /// Every branch whose station query failed
        failures: Vec<BranchFailure>,
    },
}

impl DiscoveryError {
    /// Check if repeating the same request could succeed
    ///
    /// A missing address will stay missing; an outage may not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidInput(_) => false,
            Self::AddressResolutionFailed { failures } => failures
                .iter()
                .any(|f| f.cause == FailureCause::GeocoderUnavailable),
            Self::DataUnavailable { .. } => true,
        }
    }
}

impl From<DomainError> for DiscoveryError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
