//! In-memory test client.

use crate::error::TestError;
use crate::request::{TestRequest, TestRequestBuilder};
use crate::response::TestResponse;
use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::Full;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Response type produced by a simulated application.
pub type Response = http::Response<Full<Bytes>>;

/// Handler function type for the test client.
pub type TestHandler =
    Arc<dyn Fn(TestRequest) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// Sends requests to an application handler without a network.
///
/// # Example
///
/// ```
/// use apiscribe_test::{json_response, TestClient};
/// use http::StatusCode;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let client = TestClient::new(|_req| async {
///     json_response(StatusCode::OK, &json!({"status": "ok"}))
/// });
/// let response = client.get("/health").send().await.unwrap();
/// assert_eq!(response.status_code(), 200);
/// # });
/// ```
#[must_use]
#[derive(Clone)]
pub struct TestClient {
    handler: TestHandler,
}

impl TestClient {
    /// Creates a client around `handler`.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(TestRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |req| Box::pin(handler(req))),
        }
    }

    /// Creates a GET request builder.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Creates a POST request builder.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Creates a PUT request builder.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Creates a DELETE request builder.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Creates a request builder with a custom method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest {
            client: self,
            builder: TestRequestBuilder::new(method, uri),
        }
    }

    /// Passes a built request to the handler.
    pub async fn send_request(&self, request: TestRequest) -> Result<TestResponse, TestError> {
        let handler = Arc::clone(&self.handler);
        let response = (handler)(request).await;
        TestResponse::from_http(response).await
    }
}

impl std::fmt::Debug for TestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClient").finish_non_exhaustive()
    }
}

/// Builds a JSON response for handlers.
pub fn json_response(status: StatusCode, body: &serde_json::Value) -> Response {
    let mut response = http::Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}

/// A request builder bound to a test client.
#[derive(Debug)]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl TestClientRequest<'_> {
    /// Sets a header on the request.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        self.client.send_request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_handler_sees_request() {
        let client = TestClient::new(|req| async move {
            let body = json!({
                "method": req.method.as_str(),
                "path": req.uri.path(),
                "trace": req.headers.get("X-Trace").and_then(|v| v.to_str().ok()),
            });
            json_response(StatusCode::CREATED, &body)
        });
        let response = client
            .post("/test/path")
            .header("X-Trace", "abc")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status_code(), 201);
        assert_eq!(
            response.body_value(),
            json!({"method": "POST", "path": "/test/path", "trace": "abc"})
        );
    }

    #[tokio::test]
    async fn test_json_request_body() {
        let client = TestClient::new(|req| async move {
            http::Response::new(Full::new(req.body))
        });

        let response = client
            .put("/items/1")
            .json(&json!({"name": "widget"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.body_value(), json!({"name": "widget"}));
    }

    #[test]
    fn test_invalid_header_fails_send() {
        let client = TestClient::new(|_req| async {
            json_response(StatusCode::OK, &json!({}))
        });
        let result = tokio_test::block_on(client.delete("/items/1").header("bad header", "x").send());
        assert!(matches!(result, Err(TestError::InvalidHeader(_))));
    }

    #[test]
    fn test_json_response_helper() {
        let response = json_response(StatusCode::NOT_FOUND, &json!({"error": "missing"}));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
