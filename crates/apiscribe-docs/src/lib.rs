//! # Apiscribe Docs
//!
//! Swagger 2 document synthesis from observed HTTP exchanges.
//!
//! This crate provides:
//! - **Type inference**: an ordered classifier from runtime values to
//!   Swagger `type`/`format` pairs
//! - **Schema building**: recursive schemas for JSON payloads
//! - **Collectors**: parameter and response objects for one exchange
//! - **Merging**: a non-destructive merge of per-exchange fragments into the
//!   cumulative [`SpecDocument`]
//!
//! ## Quick Start
//!
//! ```rust
//! use apiscribe_docs::{build_fragment, DocumentMetadata, Exchange, ExpectedResponse, SpecDocument};
//! use apiscribe_router::{RouteDefinition, RouteTable};
//! use http::Method;
//! use serde_json::json;
//!
//! let table = RouteTable::from_definitions(&[
//!     RouteDefinition::new("GET", "/api/v1/items/{id}", "showItem"),
//! ])
//! .unwrap();
//!
//! let exchange = Exchange::new(Method::GET, "/api/v1/items/7?active=true");
//! let route_match = table.resolve(exchange.method(), exchange.path());
//! let expected = ExpectedResponse::new(200, json!({"id": 7, "name": "widget"}));
//!
//! let metadata = DocumentMetadata::default();
//! let fragment = build_fragment(&exchange, route_match.as_ref(), "/api/v1", &[], &expected);
//!
//! let mut doc = SpecDocument::scaffold(&metadata);
//! doc.merge_fragment(fragment, &metadata).unwrap();
//! assert!(doc.operation("/items/{id}", "get").is_some());
//! ```

mod document;
mod error;
mod exchange;
mod fragment;
mod inference;
mod merge;
mod parameter;
mod response;
mod schema;

pub use document::{DocumentMetadata, Info, SpecDocument};
pub use error::{DocsError, DocsResult};
pub use exchange::{decode_pairs, Exchange};
pub use fragment::{build_fragment, PathFragment};
pub use inference::{
    infer_type, is_numeric_literal, is_timestamp, DataFormat, DataType, TypeDescriptor,
};
pub use merge::deep_merge;
pub use parameter::{
    collect_parameters, resolve_description, DescriptionOverride, ParameterIn, ParameterObject,
    BODY_PARAMETER,
};
pub use response::{
    collect_response, ExpectedResponse, ResponseObject, Responses, EXAMPLE_CONTENT_TYPE,
};
pub use schema::{build_schema, SchemaObject};
