//! Observed HTTP exchanges.
//!
//! An [`Exchange`] is the request half of one simulated call, decoded into
//! the pieces the parameter collector needs: the concrete path, the query
//! pairs, the raw body and, for form-encoded requests, the form fields.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use serde_json::Value;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM: &str = "multipart/form-data";

/// One observed request.
///
/// # Example
///
/// ```rust
/// use apiscribe_docs::Exchange;
/// use http::Method;
///
/// let exchange = Exchange::new(Method::GET, "/api/v1/items/7?active=true");
/// assert_eq!(exchange.path(), "/api/v1/items/7");
/// assert_eq!(exchange.query(), [("active".to_string(), "true".to_string())]);
/// ```
#[derive(Debug, Clone)]
pub struct Exchange {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
    form: Vec<(String, String)>,
}

impl Exchange {
    /// Creates an exchange without headers or body.
    ///
    /// A query string in `target` is split off and decoded.
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, decode_pairs(query)),
            None => (target, Vec::new()),
        };
        Self {
            method,
            path: path.to_string(),
            query,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            form: Vec::new(),
        }
    }

    /// Creates an exchange from request parts.
    ///
    /// Urlencoded bodies are decoded into form fields. Multipart bodies are
    /// kept raw; their fields are added with [`Exchange::with_form_field`].
    pub fn from_parts(method: Method, uri: &Uri, headers: HeaderMap, body: Bytes) -> Self {
        let query = uri.query().map(decode_pairs).unwrap_or_default();
        let mut exchange = Self {
            method,
            path: uri.path().to_string(),
            query,
            headers,
            body,
            form: Vec::new(),
        };
        if exchange.media_type().as_deref() == Some(FORM_URLENCODED) {
            exchange.form = decode_pairs(&String::from_utf8_lossy(&exchange.body));
        }
        exchange
    }

    /// Adds a query pair.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a header, ignoring names or values that are not valid header text.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets a JSON body and its content type.
    #[must_use]
    pub fn with_json(mut self, value: &Value) -> Self {
        self.body = Bytes::from(value.to_string());
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Sets a raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a decoded form field.
    #[must_use]
    pub fn with_form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    /// Returns the request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the concrete request path, without query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the decoded query pairs in request order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the decoded form fields in request order.
    pub fn form(&self) -> &[(String, String)] {
        &self.form
    }

    /// Returns the `Content-Type` header value.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)?.to_str().ok()
    }

    fn media_type(&self) -> Option<String> {
        let content_type = self.content_type()?;
        let essence = content_type.split(';').next().unwrap_or(content_type);
        Some(essence.trim().to_ascii_lowercase())
    }

    /// Returns true for urlencoded and multipart form requests.
    pub fn is_form_encoded(&self) -> bool {
        matches!(
            self.media_type().as_deref(),
            Some(FORM_URLENCODED | MULTIPART_FORM)
        )
    }

    /// Returns the body parsed according to its content type.
    ///
    /// Form bodies become an object of their fields. Any other body is read
    /// as JSON, or as a string when it is not JSON. An empty body yields
    /// `None`.
    pub fn parsed_body(&self) -> Option<Value> {
        if self.body.is_empty() {
            return None;
        }
        match self.media_type().as_deref() {
            Some(FORM_URLENCODED) => {
                return Some(fields_object(decode_pairs(&String::from_utf8_lossy(
                    &self.body,
                ))));
            }
            Some(MULTIPART_FORM) => return Some(fields_object(self.form.clone())),
            _ => {}
        }
        Some(serde_json::from_slice(&self.body).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&self.body).into_owned())
        }))
    }
}

fn fields_object(fields: Vec<(String, String)>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    )
}

/// Decodes `a=1&b=two+words` into ordered key/value pairs.
///
/// `+` decodes to a space. Malformed percent escapes are kept verbatim.
#[must_use]
pub fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
    encoded
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_splits_query() {
        let exchange = Exchange::new(Method::GET, "/items?page=2&q=red+shoes");
        assert_eq!(exchange.path(), "/items");
        assert_eq!(
            exchange.query(),
            [
                ("page".to_string(), "2".to_string()),
                ("q".to_string(), "red shoes".to_string())
            ]
        );
    }

    #[test]
    fn test_decode_pairs() {
        let pairs = decode_pairs("a=1&&flag&name=J%C3%BCrgen&bad=%zz");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("flag".to_string(), String::new()),
                ("name".to_string(), "Jürgen".to_string()),
                ("bad".to_string(), "%zz".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_parts_decodes_urlencoded_form() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        let uri: Uri = "/api/v1/users?invite=1".parse().unwrap();
        let exchange = Exchange::from_parts(
            Method::POST,
            &uri,
            headers,
            Bytes::from_static(b"name=Ada+Lovelace&age=36"),
        );

        assert!(exchange.is_form_encoded());
        assert_eq!(exchange.query().len(), 1);
        assert_eq!(
            exchange.form(),
            [
                ("name".to_string(), "Ada Lovelace".to_string()),
                ("age".to_string(), "36".to_string())
            ]
        );
    }

    #[test]
    fn test_multipart_is_form_encoded() {
        let exchange = Exchange::new(Method::POST, "/upload")
            .with_header("content-type", "multipart/form-data; boundary=xyz")
            .with_form_field("title", "report");
        assert!(exchange.is_form_encoded());
        assert_eq!(exchange.form().len(), 1);
    }

    #[test]
    fn test_parsed_body() {
        let exchange = Exchange::new(Method::POST, "/items").with_json(&json!({"name": "widget"}));
        assert_eq!(exchange.parsed_body(), Some(json!({"name": "widget"})));
        assert!(!exchange.is_form_encoded());
    }

    #[test]
    fn test_parsed_body_falls_back_to_string() {
        let exchange = Exchange::new(Method::POST, "/notes").with_body("plain text");
        assert_eq!(exchange.parsed_body(), Some(json!("plain text")));
    }

    #[test]
    fn test_parsed_urlencoded_body_is_object() {
        let exchange = Exchange::new(Method::POST, "/users")
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_body("name=Ada+Lovelace&age=36");
        assert_eq!(
            exchange.parsed_body(),
            Some(json!({"name": "Ada Lovelace", "age": "36"}))
        );
    }

    #[test]
    fn test_parsed_multipart_body_uses_fields() {
        let exchange = Exchange::new(Method::POST, "/upload")
            .with_header("content-type", "multipart/form-data; boundary=xyz")
            .with_body("--xyz\r\n...")
            .with_form_field("title", "report");
        assert_eq!(exchange.parsed_body(), Some(json!({"title": "report"})));
    }

    #[test]
    fn test_empty_body() {
        let exchange = Exchange::new(Method::GET, "/items");
        assert_eq!(exchange.parsed_body(), None);
        assert_eq!(exchange.content_type(), None);
    }
}
