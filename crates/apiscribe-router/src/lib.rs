//! Route template resolver for apiscribe.
//!
//! When a test drives a request like `GET /api/v1/users/42`, the generated
//! documentation has to describe the *route* (`/users/{id}`), not the
//! concrete URL. This crate rebuilds the application's route table,
//! matches the concrete path against it and recovers the original template
//! together with the values bound to each path variable.
//!
//! # Features
//!
//! - **Template syntax**: `{name}` and `{name:regex}` placeholders
//! - **First match wins**: routes are tried in registration order
//! - **Positional binding**: capture group *i* binds variable *i*
//! - **Normalization**: base-path stripping and constraint collapsing for
//!   document keys
//!
//! # Example
//!
//! ```rust
//! use apiscribe_router::{normalize_template, RouteDefinition, RouteTable};
//! use http::Method;
//!
//! let table = RouteTable::from_definitions(&[
//!     RouteDefinition::new("GET", "/api/v1/users/{id:[0-9]+}", "getUser"),
//! ])
//! .unwrap();
//!
//! let route_match = table.resolve(&Method::GET, "/api/v1/users/42").unwrap();
//! assert_eq!(route_match.template, "/api/v1/users/{id:[0-9]+}");
//! assert_eq!(route_match.bindings.get("id"), Some("42"));
//!
//! assert_eq!(normalize_template(route_match.template, "/api/v1"), "/users/{id}");
//! ```

mod bindings;
mod error;
mod normalize;
mod router;
mod template;

pub use bindings::PathBindings;
pub use error::{RouterError, RouterResult};
pub use normalize::{collapse_constraints, normalize_template, strip_base_path};
pub use router::{parse_method, RouteDefinition, RouteTable};
pub use template::RouteTemplate;

/// A resolved route with its original template and extracted bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// The template exactly as registered, constraints included
    pub template: &'a str,
    /// The handler identifier of the matched route
    pub handler: &'a str,
    /// Values bound to the template's variables
    pub bindings: PathBindings,
}

impl<'a> RouteMatch<'a> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(template: &'a str, handler: &'a str, bindings: PathBindings) -> Self {
        Self {
            template,
            handler,
            bindings,
        }
    }

    /// The key this match is recorded under in the `paths` object.
    #[must_use]
    pub fn document_key(&self, base_path: &str) -> String {
        normalize_template(self.template, base_path)
    }
}

/// Chooses the document key for a request, falling back to the concrete
/// path (base path stripped) when no route matched.
#[must_use]
pub fn document_key(
    route_match: Option<&RouteMatch<'_>>,
    concrete_path: &str,
    base_path: &str,
) -> String {
    match route_match {
        Some(m) => m.document_key(base_path),
        None => normalize_template(concrete_path, base_path),
    }
}
