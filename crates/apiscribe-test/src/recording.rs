//! Recording client.
//!
//! [`RecordingClient`] sends requests through a [`TestClient`] and merges
//! every exchange into a [`Recorder`] session. The status, body and
//! description recorded for a response come from the `expect_*` calls on
//! the request; whatever is not set is taken from the actual response.

use crate::client::TestClient;
use crate::error::TestError;
use crate::request::TestRequestBuilder;
use crate::response::TestResponse;
use apiscribe_core::Recorder;
use apiscribe_docs::{DescriptionOverride, ExpectedResponse, ParameterIn, SpecDocument};
use apiscribe_router::RouteDefinition;
use bytes::Bytes;
use http::Method;
use parking_lot::Mutex;
use serde_json::Value;

/// A test client that documents every request it sends.
///
/// # Example
///
/// ```
/// use apiscribe_config::RecorderConfig;
/// use apiscribe_core::{MemoryStore, Recorder};
/// use apiscribe_test::{json_response, RecordingClient, TestClient};
/// use http::StatusCode;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let app = TestClient::new(|_req| async {
///     json_response(StatusCode::OK, &json!({"id": 7}))
/// });
/// let recorder = Recorder::open(&RecorderConfig::default(), MemoryStore::new());
///
/// let mut client = RecordingClient::new(app, recorder);
/// client.route("GET", "/api/v1/items/{id}", "showItem");
///
/// client.get("/api/v1/items/7").send().await.unwrap();
/// assert!(client.document().operation("/items/{id}", "get").is_some());
/// # });
/// ```
#[derive(Debug)]
pub struct RecordingClient {
    client: TestClient,
    routes: Vec<RouteDefinition>,
    recorder: Mutex<Recorder>,
}

impl RecordingClient {
    /// Wraps `client` and records into `recorder`.
    pub fn new(client: TestClient, recorder: Recorder) -> Self {
        Self {
            client,
            routes: Vec::new(),
            recorder: Mutex::new(recorder),
        }
    }

    /// Registers a route used to resolve later requests.
    pub fn route(
        &mut self,
        method: impl Into<String>,
        uri: impl Into<String>,
        handler: impl Into<String>,
    ) -> &mut Self {
        self.routes.push(RouteDefinition::new(method, uri, handler));
        self
    }

    /// Registers several routes at once.
    pub fn with_routes(mut self, routes: impl IntoIterator<Item = RouteDefinition>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Returns the registered routes in declaration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    /// Creates a GET request.
    pub fn get(&self, uri: impl AsRef<str>) -> RecordingRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Creates a POST request.
    pub fn post(&self, uri: impl AsRef<str>) -> RecordingRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Creates a PUT request.
    pub fn put(&self, uri: impl AsRef<str>) -> RecordingRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Creates a PATCH request.
    pub fn patch(&self, uri: impl AsRef<str>) -> RecordingRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// Creates a DELETE request.
    pub fn delete(&self, uri: impl AsRef<str>) -> RecordingRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Creates a request with a custom method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> RecordingRequest<'_> {
        RecordingRequest {
            owner: self,
            builder: TestRequestBuilder::new(method, uri),
            status: None,
            body: None,
            description: None,
            overrides: Vec::new(),
        }
    }

    /// Returns a copy of the document recorded so far.
    #[must_use]
    pub fn document(&self) -> SpecDocument {
        self.recorder.lock().document().clone()
    }

    /// Saves the document without ending the session.
    pub fn flush(&self) -> Result<(), TestError> {
        self.recorder.lock().flush()?;
        Ok(())
    }

    /// Saves the document and ends the session.
    pub fn finish(self) -> Result<SpecDocument, TestError> {
        Ok(self.recorder.into_inner().finish()?)
    }
}

/// A request that is recorded once sent.
#[must_use]
#[derive(Debug)]
pub struct RecordingRequest<'a> {
    owner: &'a RecordingClient,
    builder: TestRequestBuilder,
    status: Option<u16>,
    body: Option<Value>,
    description: Option<String>,
    overrides: Vec<DescriptionOverride>,
}

impl RecordingRequest<'_> {
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

    /// Sets the request body as form-urlencoded.
    pub fn form<T: serde::Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.form(value);
        self
    }

    /// Adds a multipart form field.
    pub fn multipart_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.multipart_field(name, value);
        self
    }

    /// Records `status` instead of the actual status.
    pub fn expect_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Records `body` instead of the actual body.
    pub fn expect_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the description recorded for the response.
    pub fn expect_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Describes a query, path or form parameter of this request.
    ///
    /// When the same parameter is described twice, the first description
    /// is used.
    pub fn describe(
        mut self,
        key: impl Into<String>,
        description: impl Into<String>,
        location: ParameterIn,
    ) -> Self {
        self.overrides
            .push(DescriptionOverride::new(key, description, location));
        self
    }

    /// Sends the request and records the exchange.
    pub async fn send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        let exchange = request.to_exchange();
        let response = self.owner.client.send_request(request).await?;

        let mut expected = ExpectedResponse::new(
            self.status.unwrap_or_else(|| response.status_code()),
            self.body.unwrap_or_else(|| response.body_value()),
        );
        if let Some(description) = self.description {
            expected = expected.with_description(description);
        }

        self.owner.recorder.lock().record(
            &self.owner.routes,
            &exchange,
            &self.overrides,
            &expected,
        )?;

        Ok(response)
    }
}
