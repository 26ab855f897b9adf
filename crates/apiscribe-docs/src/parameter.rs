//! Parameter collection.
//!
//! Every observed exchange contributes parameter objects from four sources,
//! always in the same order: query pairs, path bindings, the request body
//! and form fields. Each parameter is marked required; nothing is inferred
//! about optionality.

use apiscribe_router::PathBindings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::exchange::Exchange;
use crate::inference::{infer_type, TypeDescriptor};
use crate::schema::{build_schema, SchemaObject};

/// Name of the single body parameter.
pub const BODY_PARAMETER: &str = "body";

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterIn {
    /// Query string parameter.
    Query,
    /// Path variable.
    Path,
    /// Form field.
    FormData,
    /// Request body.
    Body,
}

impl ParameterIn {
    /// Returns the Swagger spelling of the location.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path => "path",
            Self::FormData => "formData",
            Self::Body => "body",
        }
    }
}

/// A Swagger 2 parameter object.
///
/// Non-body parameters carry `type`/`format`; the body parameter carries a
/// `schema` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterObject {
    /// Parameter name.
    pub name: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Always `true`.
    pub required: bool,
    /// Type and format of a non-body parameter.
    #[serde(flatten)]
    pub descriptor: Option<TypeDescriptor>,
    /// Schema of the body parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaObject>,
}

impl ParameterObject {
    /// Creates a typed non-body parameter.
    pub fn typed(
        name: impl Into<String>,
        location: ParameterIn,
        descriptor: TypeDescriptor,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            location,
            required: true,
            descriptor: Some(descriptor),
            schema: None,
        }
    }

    /// Creates the body parameter.
    #[must_use]
    pub fn body(schema: SchemaObject) -> Self {
        Self {
            name: BODY_PARAMETER.to_string(),
            description: String::new(),
            location: ParameterIn::Body,
            required: true,
            descriptor: None,
            schema: Some(schema),
        }
    }
}

/// A caller-supplied description for one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionOverride {
    /// Parameter name.
    pub key: String,
    /// Description text.
    pub description: String,
    /// Parameter location.
    pub location: ParameterIn,
}

impl DescriptionOverride {
    /// Creates an override.
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        location: ParameterIn,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            location,
        }
    }
}

/// Returns the description of the first override matching `(name, location)`.
#[must_use]
pub fn resolve_description<'a>(
    overrides: &'a [DescriptionOverride],
    name: &str,
    location: ParameterIn,
) -> &'a str {
    overrides
        .iter()
        .find(|o| o.key == name && o.location == location)
        .map_or("", |o| o.description.as_str())
}

/// Collects the parameters of one exchange.
///
/// Sources are visited in order: query, path, body, form data. Every
/// non-empty body yields exactly one body parameter, whatever its content
/// type.
///
/// # Example
///
/// ```rust
/// use apiscribe_docs::{collect_parameters, Exchange, ParameterIn};
/// use apiscribe_router::PathBindings;
/// use http::Method;
///
/// let exchange = Exchange::new(Method::GET, "/items/7?active=true");
/// let mut bindings = PathBindings::new();
/// bindings.push("id", "7");
///
/// let params = collect_parameters(&exchange, &bindings, &[]);
/// assert_eq!(params[0].location, ParameterIn::Query);
/// assert_eq!(params[1].name, "id");
/// ```
#[must_use]
pub fn collect_parameters(
    exchange: &Exchange,
    bindings: &PathBindings,
    overrides: &[DescriptionOverride],
) -> Vec<ParameterObject> {
    let typed = |name: &str, value: &str, location: ParameterIn| {
        ParameterObject::typed(
            name,
            location,
            infer_type(&Value::String(value.to_string())),
            resolve_description(overrides, name, location),
        )
    };

    let mut parameters: Vec<ParameterObject> = exchange
        .query()
        .iter()
        .map(|(name, value)| typed(name.as_str(), value.as_str(), ParameterIn::Query))
        .collect();

    parameters.extend(
        bindings
            .iter()
            .map(|(name, value)| typed(name, value, ParameterIn::Path)),
    );

    if let Some(body) = exchange.parsed_body() {
        parameters.push(ParameterObject::body(build_schema(&body)));
    }

    if exchange.is_form_encoded() {
        parameters.extend(exchange.form().iter().map(|(name, value)| {
            typed(name.as_str(), value.as_str(), ParameterIn::FormData)
        }));
    }

    parameters
}
