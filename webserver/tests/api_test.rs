//! Integration tests for the HTTP API
//!
//! Requests go straight through the router with `oneshot`, backed by stores
//! living in a temporary data directory.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tally::{CounterRecord, FeedbackRules, FileRepository, Storage, TallyStore, TallyTable};
use tempfile::TempDir;
use tower::ServiceExt;

use webserver::{WebServerState, build_router};

async fn create_state() -> (WebServerState, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let repository = FileRepository::initialize(temp_dir.path().join("data")).await.unwrap();
    let state = WebServerState::load(repository).await.unwrap();
    (state, temp_dir)
}

async fn create_seeded_state(records: Vec<(i64, CounterRecord)>) -> (WebServerState, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let repository = FileRepository::initialize(temp_dir.path().join("data")).await.unwrap();
    let storage: Arc<dyn Storage> = Arc::new(repository);

    let tallies = TallyStore::with_table(storage.clone(), records.into_iter().collect::<TallyTable>());
    let rules = FeedbackRules::with_defaults(storage);
    (WebServerState::new(tallies, rules), temp_dir)
}

async fn send(router: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, String) {
    let request = Request::builder().method(method).uri(uri).body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    send(router, Method::GET, uri, Body::empty()).await
}

async fn post(router: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    send(router, Method::POST, uri, Body::from(body.to_string())).await
}

#[tokio::test]
async fn test_home() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    let (status, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Home!");
}

#[tokio::test]
async fn test_prime_lookup() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    let (status, body) = get(&router, "/primes/2").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, json!({"isPrime": true, "message": "It is prime. Hurray!"}));
}

#[tokio::test]
async fn test_non_prime_feedback_escalates() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    let mut messages = Vec::new();
    for _ in 0..4 {
        let (status, body) = get(&router, "/primes/22").await;
        assert_eq!(status, StatusCode::OK);
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["isPrime"], json!(false));
        messages.push(parsed["message"].as_str().unwrap().to_string());
    }

    assert_eq!(
        messages,
        vec!["No", "No", "No, and we already told you so!", "No, and we already told you so!"]
    );
}

#[tokio::test]
async fn test_seeded_tally_uses_stored_count() {
    let (state, _temp) = create_seeded_state(vec![(6, CounterRecord::new(2, false))]).await;
    let router = build_router(state);

    let (status, body) = get(&router, "/primes/6").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, json!({"isPrime": false, "message": "No, and we already told you so!"}));
}

#[tokio::test]
async fn test_history_lists_lookups() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    let (_, body) = get(&router, "/history").await;
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, json!({"requests": []}));

    get(&router, "/primes/7").await;
    get(&router, "/primes/4").await;
    get(&router, "/primes/7").await;

    let (status, body) = get(&router, "/history/").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        parsed,
        json!({"requests": [{"number": 4, "count": 1}, {"number": 7, "count": 2}]})
    );
}

#[tokio::test]
async fn test_unknown_paths_are_not_found() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    for uri in ["/unknown", "/primes", "/primes/", "/primes/non-prime", "/primes/-7", "/primes/2/3"] {
        let (status, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, "404 page not found\n", "{uri}");
    }
}

#[tokio::test]
async fn test_oversized_number_is_bad_request() {
    let (state, _temp) = create_state().await;
    let router = build_router(state.clone());

    let (status, body) = get(&router, "/primes/99999999999999999999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Not an integer: 99999999999999999999"));
    assert!(state.tallies.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    let (status, body) = post(&router, "/", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, "No can do");

    let (status, _) = send(&router, Method::DELETE, "/messages", Body::empty()).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = post(&router, "/primes/7", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    // Non-digit segments never belong to the lookup route
    let (status, body) = post(&router, "/primes/abc", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "404 page not found\n");

    let (status, _) = post(&router, "/history", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_default_messages() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    let (status, body) = get(&router, "/messages").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        parsed,
        json!({"messages": [
            {"lowerLimit": 3, "message": "No, and we already told you so!"},
            {"lowerLimit": 0, "message": "No"}
        ]})
    );
}

#[tokio::test]
async fn test_post_messages_replaces_rules() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    let rules = r#"{"messages":[{"lowerLimit":0,"message":"Nope"},{"lowerLimit":2,"message":"Still nope"}]}"#;
    let (status, _) = post(&router, "/messages/", rules).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, body) = get(&router, "/messages").await;
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        parsed,
        json!({"messages": [
            {"lowerLimit": 2, "message": "Still nope"},
            {"lowerLimit": 0, "message": "Nope"}
        ]})
    );

    let (_, body) = get(&router, "/primes/9").await;
    assert!(body.contains("\"Nope\""));
    let (_, body) = get(&router, "/primes/9").await;
    assert!(body.contains("\"Still nope\""));
}

#[tokio::test]
async fn test_post_messages_rejects_bad_bodies() {
    let (state, _temp) = create_state().await;
    let router = build_router(state);

    let (status, body) = post(&router, "/messages", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Can't unmarshal request from not json\n");

    let missing_default = r#"{"messages":[{"lowerLimit":5,"message":"Five"}]}"#;
    let (status, body) = post(&router, "/messages", missing_default).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("must contain element with lower limit 0"));

    let negative = r#"{"messages":[{"lowerLimit":0,"message":"No"},{"lowerLimit":-1,"message":"Neg"}]}"#;
    let (status, body) = post(&router, "/messages", negative).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        "must contain only positive lower limits, found negatives in {lowerLimit:-1 message:Neg}\n"
    );

    // Rejected updates leave the defaults in place
    let (_, body) = get(&router, "/messages").await;
    assert!(body.contains("No, and we already told you so!"));
}

#[tokio::test]
async fn test_lookups_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");

    let state = WebServerState::load(FileRepository::initialize(&data_dir).await.unwrap())
        .await
        .unwrap();
    let router = build_router(state.clone());
    get(&router, "/primes/15").await;
    get(&router, "/primes/15").await;
    state.shutdown().await;

    let state = WebServerState::load(FileRepository::initialize(&data_dir).await.unwrap())
        .await
        .unwrap();
    let router = build_router(state);
    let (_, body) = get(&router, "/primes/15").await;
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["message"], json!("No, and we already told you so!"));
}
