//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use serde::{Deserialize, Serialize};

/// Document section.
///
/// Controls where the Swagger document is stored and the top-level values
/// written into it on every merge.
///
/// # Example
///
/// ```
/// use apiscribe_config::DocumentConfig;
///
/// let config = DocumentConfig {
///     path: "target/swagger.json".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.base_path, "/api/v1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Location of the persisted document.
    #[serde(default = "default_document_path")]
    pub path: String,

    /// Value of the `swagger` key.
    #[serde(default = "default_swagger_version")]
    pub swagger_version: String,

    /// Prefix stripped from route templates; also the `basePath` key.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Value of the `host` key.
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
            swagger_version: default_swagger_version(),
            base_path: default_base_path(),
            host: default_host(),
        }
    }
}

fn default_document_path() -> String {
    "doc/swagger.json".to_string()
}

fn default_swagger_version() -> String {
    "2.0".to_string()
}

fn default_base_path() -> String {
    "/api/v1".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

/// The `info` section written into the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InfoConfig {
    /// API title.
    #[serde(default = "default_title")]
    pub title: String,

    /// API description.
    #[serde(default = "default_description")]
    pub description: String,

    /// API version.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            version: default_version(),
        }
    }
}

fn default_title() -> String {
    "Title".to_string()
}

fn default_description() -> String {
    "Description".to_string()
}

fn default_version() -> String {
    "0.1".to_string()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (CI pipelines).
    Json,
    /// Human-readable pretty format (local test runs).
    #[default]
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_defaults() {
        let config = DocumentConfig::default();
        assert_eq!(config.path, "doc/swagger.json");
        assert_eq!(config.swagger_version, "2.0");
        assert_eq!(config.base_path, "/api/v1");
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn test_info_defaults() {
        let config = InfoConfig::default();
        assert_eq!(config.title, "Title");
        assert_eq!(config.description, "Description");
        assert_eq!(config.version, "0.1");
    }

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: DocumentConfig = toml::from_str(r#"host = "api.example.com""#).unwrap();
        assert_eq!(config.host, "api.example.com");
        assert_eq!(config.base_path, "/api/v1");
    }

    #[test]
    fn test_log_format_serde() {
        let config: LoggingConfig = serde_json::from_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Json);
    }
}
