//! Response collection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{build_schema, SchemaObject};

/// Content type under which response examples are recorded.
pub const EXAMPLE_CONTENT_TYPE: &str = "application/json";

/// Responses keyed by status code.
pub type Responses = IndexMap<String, ResponseObject>;

/// A Swagger 2 response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Schema of the response body.
    pub schema: SchemaObject,
    /// Example payloads by content type.
    #[serde(default)]
    pub examples: IndexMap<String, Value>,
}

/// The outcome a test asserts for an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Value,
    /// Description recorded for the status code.
    pub description: String,
}

impl ExpectedResponse {
    /// Creates an expectation with an empty description.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Builds the response entry for one status code.
///
/// The body is recorded verbatim as the `application/json` example.
///
/// # Example
///
/// ```rust
/// use apiscribe_docs::collect_response;
/// use serde_json::json;
///
/// let responses = collect_response(200, &json!({"id": 7}), "found");
/// assert_eq!(responses["200"].description, "found");
/// assert_eq!(responses["200"].examples["application/json"], json!({"id": 7}));
/// ```
#[must_use]
pub fn collect_response(status: u16, body: &Value, description: &str) -> Responses {
    let mut examples = IndexMap::with_capacity(1);
    examples.insert(EXAMPLE_CONTENT_TYPE.to_string(), body.clone());

    let mut responses = IndexMap::with_capacity(1);
    responses.insert(
        status.to_string(),
        ResponseObject {
            description: description.to_string(),
            schema: build_schema(body),
            examples,
        },
    );
    responses
}
