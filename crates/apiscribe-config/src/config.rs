//! Main configuration types.
//!
//! This module provides the top-level [`RecorderConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{DocumentConfig, InfoConfig, LoggingConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete recorder configuration.
///
/// This is the root configuration type that contains all configuration sections.
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use apiscribe_config::RecorderConfig;
///
/// let config = RecorderConfig::default();
/// assert_eq!(config.document.path, "doc/swagger.json");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RecorderConfig {
    /// Document location and top-level values.
    #[serde(default)]
    pub document: DocumentConfig,

    /// The document's `info` block.
    #[serde(default)]
    pub info: InfoConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RecorderConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use apiscribe_config::{DocumentConfig, RecorderConfig};
    ///
    /// let config = RecorderConfig::builder()
    ///     .document(DocumentConfig {
    ///         base_path: "/v2".to_string(),
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.document.base_path, "/v2");
    /// ```
    #[must_use]
    pub fn builder() -> RecorderConfigBuilder {
        RecorderConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The document path is empty
    /// - The swagger version is empty
    /// - The base path is neither empty nor starts with `/`
    /// - The log level is not a known level
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        if self.document.path.trim().is_empty() {
            return Err(crate::ConfigError::invalid_value(
                "document.path",
                "must not be empty",
            ));
        }

        if self.document.swagger_version.trim().is_empty() {
            return Err(crate::ConfigError::invalid_value(
                "document.swagger_version",
                "must not be empty",
            ));
        }

        if !self.document.base_path.is_empty() && !self.document.base_path.starts_with('/') {
            return Err(crate::ConfigError::invalid_value(
                "document.base_path",
                format!("must start with '/': {}", self.document.base_path),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(crate::ConfigError::invalid_value(
                "logging.level",
                format!("unknown level: {}", self.logging.level),
            ));
        }

        Ok(())
    }
}

/// Builder for [`RecorderConfig`].
#[derive(Debug, Default)]
pub struct RecorderConfigBuilder {
    document: Option<DocumentConfig>,
    info: Option<InfoConfig>,
    logging: Option<LoggingConfig>,
}

impl RecorderConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document configuration.
    #[must_use]
    pub fn document(mut self, document: DocumentConfig) -> Self {
        self.document = Some(document);
        self
    }

    /// Set the info configuration.
    #[must_use]
    pub fn info(mut self, info: InfoConfig) -> Self {
        self.info = Some(info);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> RecorderConfig {
        RecorderConfig {
            document: self.document.unwrap_or_default(),
            info: self.info.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<RecorderConfig, crate::ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
