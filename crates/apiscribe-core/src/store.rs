//! Persistence for the Swagger document.
//!
//! A [`DocumentStore`] is read once when a session opens and written once
//! when it finishes. [`JsonFileStore`] keeps the document on disk;
//! [`MemoryStore`] keeps it in memory for tests.

use std::fs;
use std::path::{Path, PathBuf};

use apiscribe_docs::SpecDocument;
use parking_lot::Mutex;

use crate::error::StoreError;

/// Where a session's document is loaded from and saved to.
pub trait DocumentStore: Send + Sync {
    /// Human readable location used in log records.
    fn location(&self) -> String;

    /// Loads the persisted document.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the location cannot be read and
    /// [`StoreError::Corrupt`] if its contents are not a document.
    fn load(&self) -> Result<Option<SpecDocument>, StoreError>;

    /// Replaces the persisted document.
    fn save(&self, document: &SpecDocument) -> Result<(), StoreError>;
}

/// Stores the document as pretty-printed JSON in a single file.
///
/// # Example
///
/// ```rust
/// use apiscribe_core::{DocumentStore, JsonFileStore};
///
/// let store = JsonFileStore::new("doc/swagger.json");
/// assert_eq!(store.location(), "doc/swagger.json");
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<SpecDocument>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text =
            fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        parse_document(&text, &self.location())
    }

    fn save(&self, document: &SpecDocument) -> Result<(), StoreError> {
        let text = document.to_pretty_json()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        fs::write(&self.path, text).map_err(|e| StoreError::io(&self.path, e))
    }
}

/// Keeps the rendered document in memory.
///
/// The stored text is exactly what [`JsonFileStore`] would write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `text`.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(text.into())),
        }
    }

    /// Returns the last saved text.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl DocumentStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn load(&self) -> Result<Option<SpecDocument>, StoreError> {
        match self.contents.lock().as_deref() {
            Some(text) => parse_document(text, "memory"),
            None => Ok(None),
        }
    }

    fn save(&self, document: &SpecDocument) -> Result<(), StoreError> {
        let text = document.to_pretty_json()?;
        *self.contents.lock() = Some(text);
        Ok(())
    }
}

// Blank input counts as nothing persisted.
fn parse_document(text: &str, location: &str) -> Result<Option<SpecDocument>, StoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    SpecDocument::from_json(text)
        .map(Some)
        .map_err(|e| StoreError::corrupt(location, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiscribe_docs::DocumentMetadata;

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("swagger.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_non_object_document_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("not an object"));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc").join("nested").join("swagger.json");
        let store = JsonFileStore::new(&path);

        let doc = SpecDocument::scaffold(&DocumentMetadata::default());
        store.save(&doc).unwrap();

        assert!(path.exists());
        assert_eq!(store.load().unwrap(), Some(doc));
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.json");
        fs::write(&path, "x".repeat(4096)).unwrap();

        let store = JsonFileStore::new(&path);
        store
            .save(&SpecDocument::scaffold(&DocumentMetadata::default()))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"swagger\": \"2.0\""));
        assert!(!text.contains('x'));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let doc = SpecDocument::scaffold(&DocumentMetadata::default());
        store.save(&doc).unwrap();

        assert!(store.contents().unwrap().contains("\"basePath\": \"/api/v1\""));
        assert_eq!(store.load().unwrap(), Some(doc));
    }

    #[test]
    fn test_memory_store_blank_contents() {
        let store = MemoryStore::with_contents("  \n");
        assert!(store.load().unwrap().is_none());
    }
}
