//! Logging setup
//!
//! Installs a `tracing` subscriber writing human-readable or JSON lines.

mod logging;

pub use logging::{LogConfig, LogFormat, TelemetryError, init_logging};
