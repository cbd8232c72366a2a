//! Integration tests for the `GET /features` admin endpoint.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use agent_discovery::{MessageTypeRegistry, ProtocolRegistry, RegistryError, RegistryResult};
use agent_discovery_admin::transport::{router, AppState};

// ─────────────────────── helpers ───────────────────────

/// Registry returning a fixed answer and recording every query it sees.
struct FixedRegistry {
    protocols: Vec<String>,
    queries: Mutex<Vec<String>>,
}

impl FixedRegistry {
    fn new(protocols: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            protocols: protocols.iter().map(|p| p.to_string()).collect(),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl ProtocolRegistry for FixedRegistry {
    fn protocols_matching_query(&self, query: &str) -> RegistryResult<Vec<String>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.protocols.clone())
    }
}

/// Registry that always fails.
struct FailingRegistry;

impl ProtocolRegistry for FailingRegistry {
    fn protocols_matching_query(&self, _query: &str) -> RegistryResult<Vec<String>> {
        Err(RegistryError::Unavailable("backing store offline".to_string()))
    }
}

fn app(registry: Arc<dyn ProtocolRegistry>) -> Router {
    router(AppState::new(registry))
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let (status, _, body) = send_full(app, method, uri).await;
    (status, body)
}

async fn send_full(app: Router, method: Method, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn sample_registry() -> MessageTypeRegistry {
    let mut registry = MessageTypeRegistry::new();
    registry.register_message_types([
        (
            "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/connections/1.0/invitation",
            "connections::invitation",
        ),
        (
            "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/offer-credential",
            "issue_credential::offer",
        ),
        ("https://didcomm.org/trust_ping/1.0/ping", "trust_ping::ping"),
    ]);
    registry
}

// ─────────────────────── scenarios ───────────────────────

#[tokio::test]
async fn test_match_all_returns_every_protocol() {
    let registry = FixedRegistry::new(&["issue-credential/1.0", "connections/1.0"]);
    let (status, body) = get_json(app(registry.clone()), "/features?query=*").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "results": { "issue-credential/1.0": {}, "connections/1.0": {} } })
    );
    assert_eq!(registry.queries(), vec!["*"]);
}

#[tokio::test]
async fn test_no_matches_returns_empty_results() {
    let registry = FixedRegistry::new(&[]);
    let (status, body) = get_json(app(registry.clone()), "/features?query=did:sov:*").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "results": {} }));
    assert_eq!(registry.queries(), vec!["did:sov:*"]);
}

#[tokio::test]
async fn test_missing_query_defaults_to_match_all() {
    let registry = FixedRegistry::new(&["connections/1.0"]);
    let (status, body) = get_json(app(registry.clone()), "/features").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "results": { "connections/1.0": {} } }));
    assert_eq!(registry.queries(), vec!["*"]);
}

#[tokio::test]
async fn test_query_is_percent_decoded() {
    let registry = FixedRegistry::new(&[]);
    let uri = "/features?query=https%3A%2F%2Fdidcomm.org%2F*";
    let (status, _) = get_json(app(registry.clone()), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(registry.queries(), vec!["https://didcomm.org/*"]);
}

#[tokio::test]
async fn test_unknown_parameters_ignored() {
    let registry = FixedRegistry::new(&["connections/1.0"]);
    let (status, _) = get_json(app(registry.clone()), "/features?limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(registry.queries(), vec!["*"]);
}

#[tokio::test]
async fn test_repeated_requests_identical() {
    let registry: Arc<dyn ProtocolRegistry> = Arc::new(sample_registry());

    let (_, first) = get_json(app(registry.clone()), "/features?query=did:sov:*").await;
    let (_, second) = get_json(app(registry.clone()), "/features?query=did:sov:*").await;
    assert_eq!(first, second);
}

// ─────────────────────── registry semantics ───────────────────────

#[tokio::test]
async fn test_results_mirror_registry_for_each_pattern() {
    let registry = Arc::new(sample_registry());

    for pattern in [
        "*",
        "did:sov:*",
        "https://didcomm.org/*",
        "https://didcomm.org/trust_ping/1.0",
        "unknown/1.0",
    ] {
        let expected: Vec<String> = registry.protocols_matching_query(pattern).unwrap();
        let uri = format!("/features?query={}", pattern.replace('/', "%2F").replace(':', "%3A"));
        let (status, body) = get_json(app(registry.clone()), &uri).await;

        assert_eq!(status, StatusCode::OK, "pattern {pattern}");
        let results = body["results"].as_object().unwrap();
        let mut keys: Vec<String> = results.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, expected, "pattern {pattern}");
        assert!(results.values().all(|v| v == &json!({})));
    }
}

#[tokio::test]
async fn test_empty_query_matches_nothing() {
    let registry: Arc<dyn ProtocolRegistry> = Arc::new(sample_registry());
    let (status, body) = get_json(app(registry), "/features?query=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "results": {} }));
}

// ─────────────────────── errors ───────────────────────

#[tokio::test]
async fn test_registry_failure_is_internal_error() {
    let (status, body) = get_json(app(Arc::new(FailingRegistry)), "/features").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], 500);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("backing store offline"));
}

#[tokio::test]
async fn test_duplicate_query_key_is_bad_request() {
    let registry = FixedRegistry::new(&["connections/1.0"]);
    let (status, body) = get_json(app(registry.clone()), "/features?query=a&query=b").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
    assert!(registry.queries().is_empty());
}

#[tokio::test]
async fn test_other_verbs_rejected() {
    let registry: Arc<dyn ProtocolRegistry> = FixedRegistry::new(&[]);

    for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::HEAD] {
        let (status, headers, _) =
            send_full(app(registry.clone()), method.clone(), "/features").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "method {method}");
        assert_eq!(headers[header::ALLOW], "GET", "method {method}");
    }
}
