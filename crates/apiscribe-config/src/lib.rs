//! Typed configuration for the apiscribe recorder.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! The configuration system is built around the [`RecorderConfig`] struct:
//!
//! - [`DocumentConfig`] - document location, `swagger` version, base path and host
//! - [`InfoConfig`] - the document's `info` block
//! - [`LoggingConfig`] - log level and format
//!
//! # Example
//!
//! ```no_run
//! use apiscribe_config::ConfigLoader;
//!
//! # fn main() -> Result<(), apiscribe_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("apiscribe.toml")?
//!     .with_env_prefix("APISCRIBE")
//!     .load()?;
//!
//! println!("Writing documentation to: {}", config.document.path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [document]
//! path = "doc/swagger.json"
//! swagger_version = "2.0"
//! base_path = "/api/v1"
//! host = "localhost"
//!
//! [info]
//! title = "Title"
//! description = "Description"
//! version = "0.1"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "pretty"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Every value can be overridden with `PREFIX__SECTION__KEY`:
//!
//! - `APISCRIBE__DOCUMENT__PATH=target/swagger.json`
//! - `APISCRIBE__INFO__VERSION=1.2.0`
//! - `APISCRIBE__LOGGING__FORMAT=json`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
pub use schema::*;
