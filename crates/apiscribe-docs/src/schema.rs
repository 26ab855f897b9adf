//! Schema objects built from observed payloads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inference::{infer_type, DataType, TypeDescriptor};

/// A Swagger schema object describing one observed value.
///
/// Objects carry a `properties` entry per member in payload order. Arrays
/// are described by their type alone; element schemas are never inferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    /// Inferred type and format.
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
    /// Member schemas, present only for non-empty objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaObject>>,
}

impl SchemaObject {
    /// Creates a schema with no properties.
    #[must_use]
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            properties: None,
        }
    }

    /// Returns the schema of the named property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&SchemaObject> {
        self.properties.as_ref()?.get(name)
    }

    /// Returns the schema type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.descriptor.data_type
    }
}

/// Builds the schema of a value, recursing into object members.
///
/// # Example
///
/// ```rust
/// use apiscribe_docs::{build_schema, DataType};
/// use serde_json::json;
///
/// let schema = build_schema(&json!({"id": 7, "tags": ["a"]}));
/// assert_eq!(schema.data_type(), DataType::Object);
/// assert_eq!(schema.property("id").unwrap().data_type(), DataType::Integer);
/// assert_eq!(schema.property("tags").unwrap().data_type(), DataType::Array);
/// ```
#[must_use]
pub fn build_schema(value: &Value) -> SchemaObject {
    let mut schema = SchemaObject::new(infer_type(value));
    if let Value::Object(members) = value {
        if !members.is_empty() {
            schema.properties = Some(
                members
                    .iter()
                    .map(|(name, member)| (name.clone(), build_schema(member)))
                    .collect(),
            );
        }
    }
    schema
}
