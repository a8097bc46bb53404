//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the Nominatim and Socrata
//! clients, and provides configuration loading, logging setup and retry.

pub mod adapters;
pub mod config;
pub mod retry;
pub mod telemetry;

pub use adapters::*;
pub use config::AppConfig;
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};
pub use telemetry::{LogConfig, LogFormat, TelemetryError, init_logging};
