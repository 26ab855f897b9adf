//! Test error types.

use apiscribe_core::SessionError;
use thiserror::Error;

/// Errors that can occur while simulating and recording requests.
#[derive(Debug, Error)]
pub enum TestError {
    /// Request building failed
    #[error("Request build error: {0}")]
    RequestBuild(String),
    /// Response body reading failed
    #[error("Body read error: {0}")]
    BodyRead(String),
    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Header name or value is invalid
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    /// The exchange could not be recorded
    #[error("Recording failed: {0}")]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiscribe_core::StoreError;

    #[test]
    fn test_display() {
        let err = TestError::InvalidHeader("bad name".to_string());
        assert_eq!(err.to_string(), "Invalid header: bad name");
    }

    #[test]
    fn test_from_session_error() {
        let err: TestError = SessionError::Store(StoreError::corrupt("memory", "bad")).into();
        assert!(matches!(err, TestError::Session(_)));
        assert!(err.to_string().starts_with("Recording failed"));
    }
}
