//! Error types for the recorder session.
//!
//! [`StoreError`] covers persistence of the document. [`SessionError`] is
//! what callers of [`Recorder`](crate::Recorder) see.

use std::path::PathBuf;

use apiscribe_docs::DocsError;
use apiscribe_router::RouterError;
use thiserror::Error;

/// Result type alias using [`SessionError`].
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised by a [`DocumentStore`](crate::DocumentStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document location could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Location of the document.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The persisted document is not a usable Swagger document.
    #[error("corrupt document at {location}: {reason}")]
    Corrupt {
        /// Where the document was read from.
        location: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The document could not be rendered.
    #[error("failed to serialize document: {0}")]
    Serialization(#[from] DocsError),
}

impl StoreError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a corrupt document error.
    pub fn corrupt(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced while recording exchanges.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A route definition could not be compiled.
    #[error("route table error: {0}")]
    Route(#[from] RouterError),

    /// The document could not be persisted.
    #[error("document store error: {0}")]
    Store(#[from] StoreError),

    /// The fragment could not be merged into the document.
    #[error("document error: {0}")]
    Docs(#[from] DocsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = StoreError::io(
            "/readonly/swagger.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/readonly/swagger.json"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_corrupt_error_display() {
        let err = StoreError::corrupt("doc/swagger.json", "expected value at line 1");
        assert!(err.to_string().starts_with("corrupt document"));
    }

    #[test]
    fn test_session_error_from_router_error() {
        let err: SessionError = RouterError::UnsupportedMethod("G E T".to_string()).into();
        assert!(matches!(err, SessionError::Route(_)));
        assert!(err.to_string().contains("G E T"));
    }

    #[test]
    fn test_session_error_from_store_error() {
        let err: SessionError = StoreError::corrupt("memory", "bad").into();
        assert!(matches!(err, SessionError::Store(StoreError::Corrupt { .. })));
    }
}
