//! Error types for document generation.

use thiserror::Error;

/// Errors that can occur while building or parsing the document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// A value could not be converted to or from JSON.
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted document does not have the expected shape.
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// What is wrong with the document.
        reason: String,
    },
}

/// Result type for document operations.
pub type DocsResult<T> = Result<T, DocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error() {
        let err: DocsError = serde_json::from_str::<String>("invalid")
            .unwrap_err()
            .into();
        assert!(matches!(err, DocsError::Serialization(_)));
        assert!(err.to_string().contains("serialize"));
    }

    #[test]
    fn test_invalid_document_error() {
        let err = DocsError::InvalidDocument {
            reason: "document root is not an object".to_string(),
        };
        assert!(err.to_string().contains("root is not an object"));
    }
}
