//! The recorder session.
//!
//! A [`Recorder`] owns the cumulative document for one test run: it is
//! loaded once when the session opens, every recorded exchange is merged
//! into it, and it is saved once when the session finishes.

use apiscribe_config::RecorderConfig;
use apiscribe_docs::{
    build_fragment, DescriptionOverride, DocumentMetadata, Exchange, ExpectedResponse, Info,
    SpecDocument,
};
use apiscribe_router::{RouteDefinition, RouteTable};
use apiscribe_telemetry::metrics;
use tracing::{debug, info, warn};

use crate::error::SessionResult;
use crate::store::{DocumentStore, JsonFileStore};

/// Builds the document metadata from the recorder configuration.
#[must_use]
pub fn metadata_from(config: &RecorderConfig) -> DocumentMetadata {
    DocumentMetadata {
        swagger: config.document.swagger_version.clone(),
        base_path: config.document.base_path.clone(),
        host: config.document.host.clone(),
        info: Info {
            title: config.info.title.clone(),
            description: config.info.description.clone(),
            version: config.info.version.clone(),
        },
    }
}

/// Records exchanges into a Swagger document.
///
/// # Example
///
/// ```rust
/// use apiscribe_config::RecorderConfig;
/// use apiscribe_core::{MemoryStore, Recorder};
/// use apiscribe_docs::{Exchange, ExpectedResponse};
/// use apiscribe_router::RouteDefinition;
/// use http::Method;
/// use serde_json::json;
///
/// let routes = vec![RouteDefinition::new("GET", "/api/v1/items/{id}", "showItem")];
/// let mut recorder = Recorder::open(&RecorderConfig::default(), MemoryStore::new());
///
/// recorder
///     .record(
///         &routes,
///         &Exchange::new(Method::GET, "/api/v1/items/7"),
///         &[],
///         &ExpectedResponse::new(200, json!({"id": 7})),
///     )
///     .unwrap();
///
/// assert!(recorder.document().operation("/items/{id}", "get").is_some());
/// ```
pub struct Recorder {
    metadata: DocumentMetadata,
    document: SpecDocument,
    store: Box<dyn DocumentStore>,
    recorded: usize,
}

impl Recorder {
    /// Opens a session over `store`.
    ///
    /// A store that is empty, unreadable or corrupt yields a fresh document;
    /// the latter two are logged as warnings.
    pub fn open(config: &RecorderConfig, store: impl DocumentStore + 'static) -> Self {
        metrics::describe_metrics();

        let metadata = metadata_from(config);
        let location = store.location();
        let document = match store.load() {
            Ok(Some(document)) => {
                info!(doc.path = %location, "Loaded existing document");
                document
            }
            Ok(None) => {
                debug!(doc.path = %location, "No document yet, starting from scaffold");
                SpecDocument::scaffold(&metadata)
            }
            Err(e) => {
                warn!(
                    doc.path = %location,
                    error = %e,
                    "Failed to load document, starting from scaffold"
                );
                SpecDocument::scaffold(&metadata)
            }
        };

        Self {
            metadata,
            document,
            store: Box::new(store),
            recorded: 0,
        }
    }

    /// Opens a session over the file named by `document.path`.
    pub fn from_config(config: &RecorderConfig) -> Self {
        Self::open(config, JsonFileStore::new(&config.document.path))
    }

    /// Merges one exchange into the document.
    ///
    /// The route table is compiled from `routes` on every call, so routes
    /// registered between exchanges are picked up. An exchange that matches
    /// no route is recorded under its concrete path.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Route`](crate::SessionError::Route) if a
    /// definition does not compile and
    /// [`SessionError::Docs`](crate::SessionError::Docs) if the stored
    /// document cannot take the fragment.
    pub fn record(
        &mut self,
        routes: &[RouteDefinition],
        exchange: &Exchange,
        overrides: &[DescriptionOverride],
        expected: &ExpectedResponse,
    ) -> SessionResult<()> {
        let table = RouteTable::from_definitions(routes)?;
        let method = exchange.method().as_str();
        let route_match = table.resolve(exchange.method(), exchange.path());

        match &route_match {
            Some(m) => debug!(
                http.method = %method,
                http.path = %exchange.path(),
                route.template = %m.template,
                "Resolved route"
            ),
            None => {
                warn!(
                    http.method = %method,
                    http.path = %exchange.path(),
                    "No route matched, recording concrete path"
                );
                metrics::record_unresolved_route(method);
            }
        }

        let fragment = build_fragment(
            exchange,
            route_match.as_ref(),
            &self.metadata.base_path,
            overrides,
            expected,
        );
        let key = fragment.path.clone();
        self.document.merge_fragment(fragment, &self.metadata)?;
        self.recorded += 1;

        debug!(
            http.method = %method,
            http.status_code = expected.status,
            doc.key = %key,
            "Recorded exchange"
        );
        metrics::record_exchange(method);
        metrics::set_document_paths(self.document.paths().map_or(0, |paths| paths.len()));

        Ok(())
    }

    /// Returns the document as recorded so far.
    #[must_use]
    pub fn document(&self) -> &SpecDocument {
        &self.document
    }

    /// Returns the metadata written into the document.
    #[must_use]
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Number of exchanges recorded in this session.
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Saves the document without ending the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`](crate::SessionError::Store) if the
    /// store rejects the write.
    pub fn flush(&self) -> SessionResult<()> {
        let location = self.store.location();
        match self.store.save(&self.document) {
            Ok(()) => {
                info!(
                    doc.path = %location,
                    exchanges = self.recorded,
                    "Saved document"
                );
                metrics::record_document_save(true);
                Ok(())
            }
            Err(e) => {
                warn!(doc.path = %location, error = %e, "Failed to save document");
                metrics::record_document_save(false);
                Err(e.into())
            }
        }
    }

    /// Saves the document and ends the session.
    pub fn finish(self) -> SessionResult<SpecDocument> {
        self.flush()?;
        Ok(self.document)
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("store", &self.store.location())
            .field("recorded", &self.recorded)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::SessionError;
    use apiscribe_config::{DocumentConfig, InfoConfig};
    use http::Method;
    use serde_json::json;

    fn routes() -> Vec<RouteDefinition> {
        vec![
            RouteDefinition::new("GET", "/api/v1/items/{id:[0-9]+}", "showItem"),
            RouteDefinition::new("POST", "/api/v1/items", "storeItem"),
        ]
    }

    #[test]
    fn test_metadata_from_config() {
        let config = RecorderConfig::builder()
            .document(DocumentConfig {
                base_path: "/v2".to_string(),
                host: "api.example.com".to_string(),
                ..Default::default()
            })
            .info(InfoConfig {
                title: "Inventory".to_string(),
                ..Default::default()
            })
            .build();

        let metadata = metadata_from(&config);
        assert_eq!(metadata.base_path, "/v2");
        assert_eq!(metadata.host, "api.example.com");
        assert_eq!(metadata.info.title, "Inventory");
        assert_eq!(metadata.swagger, "2.0");
    }

    #[test]
    fn test_open_empty_store_uses_scaffold() {
        let recorder = Recorder::open(&RecorderConfig::default(), MemoryStore::new());
        assert_eq!(recorder.recorded(), 0);
        assert!(recorder.document().paths().unwrap().is_empty());
    }

    #[test]
    fn test_open_corrupt_store_uses_scaffold() {
        let recorder = Recorder::open(
            &RecorderConfig::default(),
            MemoryStore::with_contents("{\"paths\": 42}"),
        );
        assert!(recorder.document().paths().unwrap().is_empty());
    }

    #[test]
    fn test_open_keeps_unknown_keys() {
        let store = MemoryStore::with_contents(r#"{"definitions": {"Item": {}}, "paths": {}}"#);
        let recorder = Recorder::open(&RecorderConfig::default(), store);
        assert!(recorder.document().get("definitions").is_some());
    }

    #[test]
    fn test_record_resolved_exchange() {
        let mut recorder = Recorder::open(&RecorderConfig::default(), MemoryStore::new());
        let exchange = Exchange::new(Method::GET, "/api/v1/items/7?active=true");

        recorder
            .record(
                &routes(),
                &exchange,
                &[],
                &ExpectedResponse::new(200, json!({"id": 7})),
            )
            .unwrap();

        let operation = recorder.document().operation("/items/{id}", "get").unwrap();
        assert_eq!(operation["parameters"].as_array().unwrap().len(), 2);
        assert!(operation["responses"]["200"].is_object());
        assert_eq!(recorder.recorded(), 1);
    }

    #[test]
    fn test_record_unresolved_exchange_uses_concrete_path() {
        let mut recorder = Recorder::open(&RecorderConfig::default(), MemoryStore::new());
        let exchange = Exchange::new(Method::GET, "/api/v1/orders/9");

        recorder
            .record(&routes(), &exchange, &[], &ExpectedResponse::new(404, json!(null)))
            .unwrap();

        assert!(recorder.document().operation("/orders/9", "get").is_some());
    }

    #[test]
    fn test_record_invalid_route_definition() {
        let mut recorder = Recorder::open(&RecorderConfig::default(), MemoryStore::new());
        let bad = vec![RouteDefinition::new("GET", "/items/{id:(a|b)}", "showItem")];

        let err = recorder
            .record(
                &bad,
                &Exchange::new(Method::GET, "/items/a"),
                &[],
                &ExpectedResponse::new(200, json!({})),
            )
            .unwrap_err();

        assert!(matches!(err, SessionError::Route(_)));
        assert_eq!(recorder.recorded(), 0);
    }

    #[test]
    fn test_finish_saves_document() {
        let mut recorder = Recorder::open(&RecorderConfig::default(), MemoryStore::new());
        recorder
            .record(
                &routes(),
                &Exchange::new(Method::POST, "/api/v1/items").with_json(&json!({"name": "widget"})),
                &[],
                &ExpectedResponse::new(201, json!({"id": 8, "name": "widget"})),
            )
            .unwrap();

        let document = recorder.finish().unwrap();
        let operation = document.operation("/items", "post").unwrap();
        assert_eq!(operation["parameters"][0]["in"], "body");
    }
}
