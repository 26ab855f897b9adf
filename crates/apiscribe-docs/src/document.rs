//! The cumulative Swagger document.
//!
//! A [`SpecDocument`] is an insertion-ordered JSON object. Keys this crate
//! does not manage (`definitions`, `tags`, vendor extensions) survive a load
//! and save cycle untouched.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Map, Value};

use crate::error::{DocsError, DocsResult};
use crate::fragment::PathFragment;
use crate::merge::deep_merge;

const PATHS: &str = "paths";
const RESPONSES: &str = "responses";

/// The `info` block of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API description.
    pub description: String,
    /// API version.
    pub version: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            description: "Description".to_string(),
            version: "0.1".to_string(),
        }
    }
}

/// Top-level metadata refreshed on every merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// Value of the `swagger` key.
    pub swagger: String,
    /// Value of the `basePath` key.
    pub base_path: String,
    /// Value of the `host` key.
    pub host: String,
    /// The `info` block.
    pub info: Info,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            swagger: "2.0".to_string(),
            base_path: "/api/v1".to_string(),
            host: "localhost".to_string(),
            info: Info::default(),
        }
    }
}

/// The Swagger document built up across exchanges.
///
/// # Example
///
/// ```rust
/// use apiscribe_docs::{DocumentMetadata, SpecDocument};
///
/// let doc = SpecDocument::scaffold(&DocumentMetadata::default());
/// assert_eq!(doc.get("swagger").and_then(|v| v.as_str()), Some("2.0"));
/// assert!(doc.paths().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecDocument {
    root: Map<String, Value>,
}

impl SpecDocument {
    /// Creates an empty document carrying `metadata`.
    #[must_use]
    pub fn scaffold(metadata: &DocumentMetadata) -> Self {
        let mut doc = Self { root: Map::new() };
        doc.apply_metadata(metadata);
        doc.root.insert(PATHS.to_string(), Value::Object(Map::new()));
        doc
    }

    /// Wraps a previously persisted document.
    ///
    /// The value must be an object, and its `paths` entry, when present,
    /// must be an object too.
    pub fn from_value(value: Value) -> DocsResult<Self> {
        let Value::Object(root) = value else {
            return Err(DocsError::InvalidDocument {
                reason: "document root is not an object".to_string(),
            });
        };
        if root.get(PATHS).is_some_and(|paths| !paths.is_object()) {
            return Err(DocsError::InvalidDocument {
                reason: "`paths` is not an object".to_string(),
            });
        }
        Ok(Self { root })
    }

    /// Parses a persisted document.
    pub fn from_json(text: &str) -> DocsResult<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Overwrites `swagger`, `basePath`, `host` and `info`.
    pub fn apply_metadata(&mut self, metadata: &DocumentMetadata) {
        self.root
            .insert("swagger".to_string(), Value::String(metadata.swagger.clone()));
        self.root.insert(
            "basePath".to_string(),
            Value::String(metadata.base_path.clone()),
        );
        self.root
            .insert("host".to_string(), Value::String(metadata.host.clone()));
        self.root.insert(
            "info".to_string(),
            json!({
                "title": metadata.info.title,
                "description": metadata.info.description,
                "version": metadata.info.version,
            }),
        );
    }

    /// Merges one exchange's fragment into the document.
    ///
    /// Parameters of an existing operation are concatenated. A response
    /// recorded for a status code in the fragment is replaced wholesale;
    /// other status codes are kept. Metadata is refreshed afterwards.
    pub fn merge_fragment(
        &mut self,
        fragment: PathFragment,
        metadata: &DocumentMetadata,
    ) -> DocsResult<()> {
        let PathFragment {
            path,
            method,
            parameters,
            responses,
        } = fragment;

        let mut operation = Map::new();
        operation.insert("parameters".to_string(), serde_json::to_value(parameters)?);
        operation.insert(RESPONSES.to_string(), Value::Object(Map::new()));
        let mut item = Map::new();
        item.insert(method.clone(), Value::Object(operation));
        let mut incoming = Map::new();
        incoming.insert(path.clone(), Value::Object(item));

        let paths = self
            .root
            .entry(PATHS)
            .or_insert_with(|| Value::Object(Map::new()));
        deep_merge(paths, Value::Object(incoming));

        let stored = paths
            .get_mut(path.as_str())
            .and_then(|item| item.get_mut(method.as_str()))
            .and_then(|op| op.get_mut(RESPONSES))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| DocsError::InvalidDocument {
                reason: format!("no responses object for {method} {path}"),
            })?;
        for (status, response) in responses {
            stored.insert(status, serde_json::to_value(response)?);
        }

        self.apply_metadata(metadata);
        Ok(())
    }

    /// Returns a top-level entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Returns the `paths` object.
    #[must_use]
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.root.get(PATHS)?.as_object()
    }

    /// Returns the operation recorded for `path` and lowercase `method`.
    #[must_use]
    pub fn operation(&self, path: &str, method: &str) -> Option<&Value> {
        self.paths()?.get(path)?.get(method)
    }

    /// Consumes the document, returning the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Renders the document as four-space indented JSON.
    ///
    /// Key order is insertion order; slashes and non-ASCII text are written
    /// unescaped.
    pub fn to_pretty_json(&self) -> DocsResult<String> {
        let mut buf = Vec::with_capacity(1024);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.root.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| DocsError::InvalidDocument {
            reason: e.to_string(),
        })
    }
}
