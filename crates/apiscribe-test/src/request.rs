//! Simulated requests.

use crate::error::TestError;
use apiscribe_docs::Exchange;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Uri};
use serde::Serialize;
use serde_json::Value;

const MULTIPART_BOUNDARY: &str = "apiscribe-form-boundary";

/// A request sent through a [`TestClient`](crate::TestClient).
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// HTTP method
    pub method: Method,
    /// Request URI
    pub uri: Uri,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Bytes,
    /// Multipart form fields, in the order they were added
    pub form_fields: Vec<(String, String)>,
}

impl TestRequest {
    /// Creates a new GET request.
    pub fn get(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::GET, uri)
    }

    /// Creates a new POST request.
    pub fn post(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::POST, uri)
    }

    /// Creates a new PUT request.
    pub fn put(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PUT, uri)
    }

    /// Creates a new PATCH request.
    pub fn patch(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PATCH, uri)
    }

    /// Creates a new DELETE request.
    pub fn delete(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::DELETE, uri)
    }

    /// Creates a new HEAD request.
    pub fn head(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::HEAD, uri)
    }

    /// Describes this request as an [`Exchange`] for the recorder.
    ///
    /// Urlencoded bodies are decoded by the exchange itself; multipart
    /// fields are carried over as added.
    #[must_use]
    pub fn to_exchange(&self) -> Exchange {
        self.form_fields.iter().fold(
            Exchange::from_parts(
                self.method.clone(),
                &self.uri,
                self.headers.clone(),
                self.body.clone(),
            ),
            |exchange, (key, value)| exchange.with_form_field(key.as_str(), value.as_str()),
        )
    }
}

/// Builder for constructing test requests.
///
/// Invalid headers or bodies are reported by [`TestRequestBuilder::build`]
/// rather than when they are set.
#[must_use]
#[derive(Debug)]
pub struct TestRequestBuilder {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    form_fields: Vec<(String, String)>,
    error: Option<TestError>,
}

impl TestRequestBuilder {
    /// Creates a new request builder.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        Self {
            method,
            uri: uri.as_ref().to_string(),
            headers: HeaderMap::new(),
            body: None,
            form_fields: Vec::new(),
            error: None,
        }
    }

    /// Sets a header on the request.
    ///
    /// # Example
    ///
    /// ```
    /// use apiscribe_test::TestRequest;
    ///
    /// let request = TestRequest::get("/api/v1/items")
    ///     .header("Accept", "application/json")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(request.headers["accept"], "application/json");
    /// ```
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        match (
            HeaderName::try_from(name),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => self.fail(TestError::InvalidHeader(name.to_string())),
        }
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Sets the raw request body.
    ///
    /// A body cannot be combined with multipart fields.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.set_body(body.into());
        self
    }

    /// Sets the request body as JSON.
    ///
    /// This also sets the `Content-Type` header to `application/json`.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.set_body(Bytes::from(bytes)),
            Err(e) => self.fail(TestError::Json(e)),
        }
        self.content_type("application/json")
    }

    /// Sets the request body as form-urlencoded.
    ///
    /// `value` must serialize to a flat object. This also sets the
    /// `Content-Type` header to `application/x-www-form-urlencoded`.
    pub fn form<T: Serialize>(mut self, value: &T) -> Self {
        match encode_form(value) {
            Ok(encoded) => self.set_body(Bytes::from(encoded)),
            Err(e) => self.fail(e),
        }
        self.content_type("application/x-www-form-urlencoded")
    }

    /// Adds a multipart form field.
    ///
    /// The body is rendered as `multipart/form-data` when the request is
    /// built, so a request that already has a body fails to build.
    pub fn multipart_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if self.body.is_some() {
            self.fail(conflicting_body());
        }
        self.form_fields.push((name.into(), value.into()));
        self
    }

    /// Builds the test request.
    pub fn build(self) -> Result<TestRequest, TestError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let uri: Uri = self
            .uri
            .parse()
            .map_err(|e| TestError::RequestBuild(format!("Invalid URI: {e}")))?;

        let mut headers = self.headers;
        let body = if self.form_fields.is_empty() {
            self.body.unwrap_or_default()
        } else {
            let content_type = format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}");
            let value = HeaderValue::try_from(content_type)
                .map_err(|e| TestError::InvalidHeader(e.to_string()))?;
            headers.insert(header::CONTENT_TYPE, value);
            Bytes::from(encode_multipart(&self.form_fields))
        };

        Ok(TestRequest {
            method: self.method,
            uri,
            headers,
            body,
            form_fields: self.form_fields,
        })
    }

    fn set_body(&mut self, body: Bytes) {
        if !self.form_fields.is_empty() {
            self.fail(conflicting_body());
        }
        self.body = Some(body);
    }

    // Only the first error is kept.
    fn fail(&mut self, error: TestError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

fn conflicting_body() -> TestError {
    TestError::RequestBuild("a request body cannot be combined with multipart fields".to_string())
}

fn encode_form<T: Serialize>(value: &T) -> Result<String, TestError> {
    let Value::Object(map) = serde_json::to_value(value)? else {
        return Err(TestError::RequestBuild(
            "form body must be an object".to_string(),
        ));
    };

    let pairs: Vec<String> = map
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            format!(
                "{}={}",
                urlencoding::encode(&key),
                urlencoding::encode(&value)
            )
        })
        .collect();
    Ok(pairs.join("&"))
}

fn encode_multipart(fields: &[(String, String)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    body
}
