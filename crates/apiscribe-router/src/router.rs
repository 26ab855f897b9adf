//! Ordered route table.
//!
//! This module provides [`RouteTable`], the matcher that maps a concrete
//! request back to the template it was routed by.

use http::Method;

use crate::error::{RouterError, RouterResult};
use crate::template::RouteTemplate;
use crate::RouteMatch;

/// A route as registered by the application under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    /// HTTP method token (case-insensitive).
    pub method: String,
    /// URI template, e.g. `/api/v1/users/{id:[0-9]+}`.
    pub uri: String,
    /// Handler identifier, kept for diagnostics.
    pub handler: String,
}

impl RouteDefinition {
    /// Creates a route definition.
    pub fn new(
        method: impl Into<String>,
        uri: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            handler: handler.into(),
        }
    }
}

/// An ordered table of compiled route templates.
///
/// Resolution walks the routes in registration order and returns the first
/// template whose method and matcher both accept the request. There is no
/// specificity ranking: declaring `/users/{id}` before `/users/me` means
/// `/users/me` resolves to the former.
///
/// # Example
///
/// ```rust
/// use apiscribe_router::RouteTable;
/// use http::Method;
///
/// let mut table = RouteTable::new();
/// table.route(&Method::GET, "/users", "listUsers").unwrap();
/// table.route(&Method::GET, "/users/{id:[0-9]+}", "getUser").unwrap();
///
/// let route_match = table.resolve(&Method::GET, "/users/42").unwrap();
/// assert_eq!(route_match.template, "/users/{id:[0-9]+}");
/// assert_eq!(route_match.bindings.get("id"), Some("42"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteTemplate>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every definition, preserving declaration order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use apiscribe_router::{RouteDefinition, RouteTable};
    ///
    /// let table = RouteTable::from_definitions(&[
    ///     RouteDefinition::new("get", "/items/{id}", "showItem"),
    ///     RouteDefinition::new("POST", "/items", "storeItem"),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn from_definitions<'a, I>(definitions: I) -> RouterResult<Self>
    where
        I: IntoIterator<Item = &'a RouteDefinition>,
    {
        let mut table = Self::new();
        for definition in definitions {
            let method = parse_method(&definition.method)?;
            table.route(&method, &definition.uri, definition.handler.as_str())?;
        }
        Ok(table)
    }

    /// Appends an already compiled template.
    pub fn insert(&mut self, template: RouteTemplate) {
        self.routes.push(template);
    }

    /// Compiles and appends a single route.
    pub fn route(
        &mut self,
        method: &Method,
        pattern: &str,
        handler: impl Into<String>,
    ) -> RouterResult<()> {
        let template = RouteTemplate::compile(method.clone(), pattern, handler)?;
        self.insert(template);
        Ok(())
    }

    /// Resolves a concrete request to its template.
    ///
    /// `HEAD` requests with no `HEAD` route fall back to `GET` routes.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.first_match(method, path).or_else(|| {
            if *method == Method::HEAD {
                self.first_match(&Method::GET, path)
            } else {
                None
            }
        })
    }

    fn first_match(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes
            .iter()
            .filter(|route| route.method() == method)
            .find_map(|route| {
                route
                    .matches(path)
                    .map(|bindings| RouteMatch::new(route.pattern(), route.handler(), bindings))
            })
    }

    /// Iterates the compiled routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteTemplate> {
        self.routes.iter()
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Parses a method token, accepting any letter case.
pub fn parse_method(token: &str) -> RouterResult<Method> {
    Method::from_bytes(token.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| RouterError::UnsupportedMethod(token.to_string()))
}
