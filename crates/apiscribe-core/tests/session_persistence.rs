//! Session persistence tests.
//!
//! These run a recorder against a document on disk across several sessions
//! and check that later sessions extend, rather than replace, what earlier
//! ones recorded.

use apiscribe_config::{DocumentConfig, InfoConfig, RecorderConfig};
use apiscribe_core::{JsonFileStore, Recorder, SessionError};
use apiscribe_docs::{DescriptionOverride, Exchange, ExpectedResponse, ParameterIn, SpecDocument};
use apiscribe_router::RouteDefinition;
use http::Method;
use serde_json::json;
use std::fs;
use std::path::Path;

fn config_for(path: &Path) -> RecorderConfig {
    RecorderConfig::builder()
        .document(DocumentConfig {
            path: path.display().to_string(),
            ..Default::default()
        })
        .build()
}

fn routes() -> Vec<RouteDefinition> {
    vec![
        RouteDefinition::new("GET", "/api/v1/users/{id:[0-9]+}", "showUser"),
        RouteDefinition::new("GET", "/api/v1/users", "listUsers"),
    ]
}

fn read_document(path: &Path) -> SpecDocument {
    SpecDocument::from_json(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_first_session_creates_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc").join("swagger.json");

    let mut recorder = Recorder::from_config(&config_for(&path));
    recorder
        .record(
            &routes(),
            &Exchange::new(Method::GET, "/api/v1/users/42"),
            &[DescriptionOverride::new("id", "User identifier", ParameterIn::Path)],
            &ExpectedResponse::new(200, json!({"id": 42, "name": "Ada"})).with_description("OK"),
        )
        .unwrap();
    recorder.finish().unwrap();

    let document = read_document(&path);
    let operation = document.operation("/users/{id}", "get").unwrap();
    assert_eq!(operation["parameters"][0]["name"], "id");
    assert_eq!(operation["parameters"][0]["description"], "User identifier");
    assert_eq!(operation["parameters"][0]["type"], "integer");
    assert_eq!(operation["responses"]["200"]["description"], "OK");
}

#[test]
fn test_later_session_extends_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swagger.json");
    let config = config_for(&path);

    let mut first = Recorder::from_config(&config);
    first
        .record(
            &routes(),
            &Exchange::new(Method::GET, "/api/v1/users/42"),
            &[],
            &ExpectedResponse::new(200, json!({"id": 42})),
        )
        .unwrap();
    first.finish().unwrap();

    let mut second = Recorder::from_config(&config);
    second
        .record(
            &routes(),
            &Exchange::new(Method::GET, "/api/v1/users/42"),
            &[],
            &ExpectedResponse::new(404, json!({"error": "not found"})),
        )
        .unwrap();
    second
        .record(
            &routes(),
            &Exchange::new(Method::GET, "/api/v1/users?page=2"),
            &[],
            &ExpectedResponse::new(200, json!([])),
        )
        .unwrap();
    second.finish().unwrap();

    let document = read_document(&path);
    let show = document.operation("/users/{id}", "get").unwrap();
    assert!(show["responses"]["200"].is_object());
    assert!(show["responses"]["404"].is_object());
    // Parameters accumulate across observations of the same operation.
    assert_eq!(show["parameters"].as_array().unwrap().len(), 2);

    let list = document.operation("/users", "get").unwrap();
    assert_eq!(list["parameters"][0]["in"], "query");
    assert_eq!(list["responses"]["200"]["schema"]["type"], "array");
}

#[test]
fn test_metadata_refreshed_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swagger.json");
    fs::write(
        &path,
        r#"{"swagger": "2.0", "basePath": "/old", "host": "old.example.com", "paths": {}}"#,
    )
    .unwrap();

    let config = RecorderConfig::builder()
        .document(DocumentConfig {
            path: path.display().to_string(),
            host: "api.example.com".to_string(),
            ..Default::default()
        })
        .info(InfoConfig {
            title: "Users".to_string(),
            ..Default::default()
        })
        .build();

    let mut recorder = Recorder::from_config(&config);
    recorder
        .record(
            &routes(),
            &Exchange::new(Method::GET, "/api/v1/users"),
            &[],
            &ExpectedResponse::new(200, json!([])),
        )
        .unwrap();
    recorder.finish().unwrap();

    let document = read_document(&path);
    assert_eq!(document.get("basePath").unwrap(), "/api/v1");
    assert_eq!(document.get("host").unwrap(), "api.example.com");
    assert_eq!(document.get("info").unwrap()["title"], "Users");
}

#[test]
fn test_corrupt_document_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swagger.json");
    fs::write(&path, "<<not json>>").unwrap();

    let recorder = Recorder::from_config(&config_for(&path));
    assert!(recorder.document().paths().unwrap().is_empty());
    recorder.finish().unwrap();

    assert!(read_document(&path).paths().unwrap().is_empty());
}

#[test]
fn test_unwritable_location_fails_finish() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the parent directory should be.
    let blocker = dir.path().join("doc");
    fs::write(&blocker, "").unwrap();

    let recorder = Recorder::open(
        &RecorderConfig::default(),
        JsonFileStore::new(blocker.join("swagger.json")),
    );
    let err = recorder.finish().unwrap_err();
    assert!(matches!(err, SessionError::Store(_)));
}
