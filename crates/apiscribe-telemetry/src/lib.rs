//! Observability for the apiscribe recorder.
//!
//! - **Logging**: `tracing-subscriber` with pretty or JSON output
//! - **Metrics**: counters through the `metrics` facade
//!
//! # Example
//!
//! ```rust,ignore
//! use apiscribe_config::RecorderConfig;
//! use apiscribe_telemetry::init_telemetry;
//!
//! let config = RecorderConfig::default();
//! init_telemetry(&(&config.logging).into())?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes logging and registers metric descriptions.
///
/// # Errors
///
/// Returns `TelemetryError` if logging cannot be initialized.
pub fn init_telemetry(config: &LogConfig) -> TelemetryResult<()> {
    init_logging(config)?;
    metrics::describe_metrics();
    Ok(())
}
