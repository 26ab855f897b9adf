//! # Apiscribe Test
//!
//! In-memory request simulation that documents an API while its tests run.
//!
//! ## Key Features
//!
//! - **In-Memory Testing**: requests go straight to a handler closure, no
//!   port binding
//! - **Request Builder**: fluent API for headers, JSON, urlencoded and
//!   multipart bodies
//! - **Recording**: [`RecordingClient`] merges every exchange into a Swagger
//!   document through an [`apiscribe_core::Recorder`]
//!
//! ## Example
//!
//! ```ignore
//! use apiscribe_core::Recorder;
//! use apiscribe_test::{RecordingClient, TestClient};
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_show_item() {
//!     let recorder = Recorder::from_config(&config);
//!     let mut client = RecordingClient::new(TestClient::new(app), recorder);
//!     client.route("GET", "/api/v1/items/{id}", "showItem");
//!
//!     client
//!         .get("/api/v1/items/7?active=true")
//!         .expect_status(200)
//!         .expect_body(json!({"id": 7, "name": "widget"}))
//!         .send()
//!         .await
//!         .unwrap();
//!
//!     client.finish().unwrap();
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/apiscribe-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod recording;
mod request;
mod response;

pub use client::{json_response, Response, TestClient, TestClientRequest, TestHandler};
pub use error::TestError;
pub use recording::{RecordingClient, RecordingRequest};
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
