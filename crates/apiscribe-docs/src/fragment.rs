//! Per-exchange document fragments.

use apiscribe_router::{document_key, PathBindings, RouteMatch};

use crate::exchange::Exchange;
use crate::parameter::{collect_parameters, DescriptionOverride, ParameterObject};
use crate::response::{collect_response, ExpectedResponse, Responses};

/// Everything one exchange contributes to the document:
/// `paths[path][method] = {parameters, responses}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFragment {
    /// Normalized document key, e.g. `/users/{id}`.
    pub path: String,
    /// Lowercase HTTP method.
    pub method: String,
    /// Collected parameters in source order.
    pub parameters: Vec<ParameterObject>,
    /// The single asserted response.
    pub responses: Responses,
}

/// Builds the fragment for one exchange.
///
/// Without a route match the concrete path, base path stripped, becomes the
/// document key and no path parameters are emitted.
#[must_use]
pub fn build_fragment(
    exchange: &Exchange,
    route_match: Option<&RouteMatch<'_>>,
    base_path: &str,
    overrides: &[DescriptionOverride],
    expected: &ExpectedResponse,
) -> PathFragment {
    let no_bindings = PathBindings::new();
    let bindings = route_match.map_or(&no_bindings, |m| &m.bindings);

    PathFragment {
        path: document_key(route_match, exchange.path(), base_path),
        method: exchange.method().as_str().to_ascii_lowercase(),
        parameters: collect_parameters(exchange, bindings, overrides),
        responses: collect_response(expected.status, &expected.body, &expected.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterIn;
    use apiscribe_router::{RouteDefinition, RouteTable};
    use http::Method;
    use serde_json::json;

    #[test]
    fn test_fragment_for_resolved_route() {
        let table = RouteTable::from_definitions(&[RouteDefinition::new(
            "GET",
            "/api/v1/items/{id:[0-9]+}",
            "showItem",
        )])
        .unwrap();
        let exchange = Exchange::new(Method::GET, "/api/v1/items/7?active=true");
        let route_match = table.resolve(exchange.method(), exchange.path());
        let expected = ExpectedResponse::new(200, json!({"id": 7, "name": "widget"}));

        let fragment = build_fragment(&exchange, route_match.as_ref(), "/api/v1", &[], &expected);

        assert_eq!(fragment.path, "/items/{id}");
        assert_eq!(fragment.method, "get");
        assert_eq!(fragment.parameters.len(), 2);
        assert_eq!(fragment.parameters[1].location, ParameterIn::Path);
        assert!(fragment.responses.contains_key("200"));
    }

    #[test]
    fn test_fragment_for_unresolved_route() {
        let exchange = Exchange::new(Method::DELETE, "/api/v1/items/7");
        let expected = ExpectedResponse::new(204, json!(null));

        let fragment = build_fragment(&exchange, None, "/api/v1", &[], &expected);

        assert_eq!(fragment.path, "/items/7");
        assert_eq!(fragment.method, "delete");
        assert!(fragment.parameters.is_empty());
    }
}
