//! # Apiscribe
//!
//! **Swagger 2 documentation recorded from your API tests**
//!
//! Apiscribe watches the requests a test suite sends to an application and
//! writes what it sees into a Swagger 2 document:
//!
//! - **Route resolution** maps concrete paths back to their templates
//! - **Type inference** turns observed values into `type`/`format` pairs
//! - **Non-destructive merging** accumulates every run into one document
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apiscribe::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_show_item() -> Result<(), Box<dyn std::error::Error>> {
//!     let recorder = apiscribe::start("apiscribe.toml")?;
//!     let mut client = RecordingClient::new(TestClient::new(app), recorder);
//!     client.route("GET", "/api/v1/items/{id}", "showItem");
//!
//!     client.get("/api/v1/items/7?active=true").send().await?;
//!     client.finish()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Flow
//!
//! ```text
//! TestRequest → app handler → TestResponse
//!      ↓                           ↓
//!   Exchange → RouteTable → fragment → SpecDocument → doc/swagger.json
//! ```

#![doc(html_root_url = "https://docs.rs/apiscribe/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::path::Path;

use apiscribe_config::{ConfigError, ConfigLoader, RecorderConfig, DEFAULT_ENV_PREFIX};
use apiscribe_core::Recorder;
use apiscribe_telemetry::{init_telemetry, LogConfig, TelemetryError};
use thiserror::Error;

// Re-export session types
pub use apiscribe_core as core;

// Re-export configuration types
pub use apiscribe_config as config;

// Re-export document synthesis
pub use apiscribe_docs as docs;

// Re-export route resolution
pub use apiscribe_router as router;

// Re-export telemetry
pub use apiscribe_telemetry as telemetry;

// Re-export request simulation
pub use apiscribe_test as testing;

/// Errors raised while starting a recording session.
#[derive(Debug, Error)]
pub enum StartError {
    /// The configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging could not be set up.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Loads configuration from defaults, `path` (when it exists), a `.env`
/// file and `APISCRIBE__*` environment variables.
pub fn load_config(path: impl AsRef<Path>) -> Result<RecorderConfig, ConfigError> {
    ConfigLoader::new()
        .with_defaults()
        .with_optional_file(path)?
        .with_dotenv()?
        .with_env_prefix(DEFAULT_ENV_PREFIX)
        .load()
}

/// Sets up logging and opens a session over the configured document.
///
/// A global subscriber installed earlier, by another test for instance, is
/// left in place.
pub fn start_with(config: &RecorderConfig) -> Result<Recorder, StartError> {
    match init_telemetry(&LogConfig::from(&config.logging)) {
        Ok(()) | Err(TelemetryError::LoggingInit(_)) => {}
        Err(e) => return Err(e.into()),
    }
    tracing::debug!(doc.path = %config.document.path, "Starting recording session");
    Ok(Recorder::from_config(config))
}

/// Loads configuration from `path` and starts a session.
pub fn start(path: impl AsRef<Path>) -> Result<Recorder, StartError> {
    start_with(&load_config(path)?)
}

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use apiscribe::prelude::*;
///
/// let table = RouteTable::from_definitions(&[RouteDefinition::new("GET", "/items/{id}", "showItem")]);
/// assert!(table.is_ok());
/// ```
pub mod prelude {
    pub use apiscribe_config::{ConfigLoader, RecorderConfig};
    pub use apiscribe_core::{
        DocumentStore, JsonFileStore, MemoryStore, Recorder, SessionError, StoreError,
    };
    pub use apiscribe_docs::{
        DescriptionOverride, DocumentMetadata, Exchange, ExpectedResponse, ParameterIn,
        SpecDocument,
    };
    pub use apiscribe_router::{RouteDefinition, RouteTable};
    pub use apiscribe_test::{
        json_response, RecordingClient, TestClient, TestError, TestRequest, TestResponse,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiscribe_config::LogFormat;
    use std::fs;

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apiscribe.toml");
        fs::write(
            &path,
            "[document]\nbase_path = \"/v2\"\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.document.base_path, "/v2");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.document.path, "doc/swagger.json");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apiscribe.toml");
        fs::write(&path, "[document]\nbase_path = \"v2\"\n").unwrap();

        assert!(matches!(start(&path), Err(StartError::Config(_))));
    }

    #[test]
    fn test_start_twice_keeps_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let config = RecorderConfig::builder()
            .document(apiscribe_config::DocumentConfig {
                path: dir.path().join("swagger.json").display().to_string(),
                ..Default::default()
            })
            .build();

        assert!(start_with(&config).is_ok());
        let recorder = start_with(&config).unwrap();
        assert_eq!(recorder.recorded(), 0);
    }
}
