//! Integration tests for the hosted-model classifier against a mock endpoint.

use mockito::Matcher;
use mood_diary::ai::{ClassifierBackend, HuggingFaceClient};
use mood_diary::errors::{AppError, ClassifierError};
use mood_diary::sentiment::{Category, SentimentClassifier};
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;

const MODEL_PATH: &str = "/models/savasy/bert-base-turkish-sentiment-cased";
const TOKEN: &str = "hf_test_token";

fn classifier_for(server: &mockito::Server) -> SentimentClassifier<HuggingFaceClient> {
    let endpoint = format!("{}{}", server.url(), MODEL_PATH);
    SentimentClassifier::new(HuggingFaceClient::new(endpoint, TOKEN).expect("client"))
}

#[test]
fn test_flat_response_over_http() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", MODEL_PATH)
        .match_header("authorization", "Bearer hf_test_token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"inputs": "Bugün harika bir gündü"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"label":"LABEL_1","score":0.97},{"label":"LABEL_0","score":0.03}]"#)
        .create();

    let result = classifier_for(&server)
        .classify("  Bugün harika bir gündü ")
        .expect("classify");

    mock.assert();
    assert_eq!(result.category, Category::Positive);
    assert_eq!(result.confidence, 0.97);
    assert!(!result.summary.is_empty());
    assert!(!result.advice.is_empty());
}

#[test]
fn test_both_constructors_send_user_agent() {
    let mut server = mockito::Server::new();
    let endpoint = format!("{}{}", server.url(), MODEL_PATH);
    let mock = server
        .mock("POST", MODEL_PATH)
        .match_header(
            "user-agent",
            Matcher::Exact(format!("mood-diary/{}", env!("CARGO_PKG_VERSION"))),
        )
        .with_status(200)
        .with_body(r#"[{"label":"POSITIVE","score":0.9}]"#)
        .expect(2)
        .create();

    let plain = HuggingFaceClient::new(endpoint.as_str(), TOKEN).expect("client");
    let timed = HuggingFaceClient::with_timeout(endpoint.as_str(), TOKEN, Duration::from_secs(5))
        .expect("client");

    plain.infer("hello").expect("plain client");
    timed.infer("hello").expect("timed client");
    mock.assert();
}

#[test]
fn test_nested_response_over_http() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body(r#"[[{"label":"NEGATIVE","score":0.64},{"label":"POSITIVE","score":0.36}]]"#)
        .create();

    let result = classifier_for(&server).classify("rough day").expect("classify");

    mock.assert();
    assert_eq!(result.category, Category::Negative);
    assert_eq!(result.confidence, 0.64);
}

#[test]
fn test_blank_input_sends_no_request() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", MODEL_PATH).expect(0).create();

    let err = classifier_for(&server).classify("   ").unwrap_err();

    mock.assert();
    assert!(matches!(
        err,
        AppError::Classifier(ClassifierError::EmptyInput)
    ));
}

#[test]
fn test_error_status_is_unavailable_with_status() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", MODEL_PATH)
        .with_status(503)
        .with_body(r#"{"error":"Model is currently loading","estimated_time":20.0}"#)
        .create();

    let err = classifier_for(&server).classify("hello").unwrap_err();

    mock.assert();
    assert!(err.is_retryable());
    match err {
        AppError::Classifier(ClassifierError::Unavailable { status, reason }) => {
            assert_eq!(status, Some(503));
            assert!(reason.contains("Model is currently loading"));
        }
        other => panic!("Expected Unavailable, got {:?}", other),
    }
}

#[test]
fn test_unauthorized_is_unavailable() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", MODEL_PATH)
        .with_status(401)
        .with_body("Invalid credentials in Authorization header")
        .create();

    match classifier_for(&server).classify("hello") {
        Err(AppError::Classifier(ClassifierError::Unavailable { status, .. })) => {
            assert_eq!(status, Some(401));
        }
        other => panic!("Expected Unavailable, got {:?}", other),
    }
}

#[test]
fn test_html_body_is_unavailable() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body("<html><body>gateway</body></html>")
        .create();

    match classifier_for(&server).classify("hello") {
        Err(AppError::Classifier(ClassifierError::Unavailable { reason, .. })) => {
            assert!(reason.contains("malformed response body"));
        }
        other => panic!("Expected Unavailable, got {:?}", other),
    }
}

#[test]
fn test_object_body_is_unparsable() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body(r#"{"label":"POSITIVE","score":0.9}"#)
        .create();

    let err = classifier_for(&server).classify("hello").unwrap_err();
    assert!(!err.is_retryable());
    assert!(matches!(
        err,
        AppError::Classifier(ClassifierError::UnparsableResponse { .. })
    ));
}

#[test]
fn test_empty_list_is_unparsable() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body("[]")
        .create();

    assert!(matches!(
        classifier_for(&server).classify("hello"),
        Err(AppError::Classifier(ClassifierError::UnparsableResponse { .. }))
    ));
}

#[test]
fn test_connection_refused_is_unavailable_without_status() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = HuggingFaceClient::with_timeout(
        format!("http://{}{}", addr, MODEL_PATH),
        TOKEN,
        Duration::from_secs(5),
    )
    .expect("client");

    match client.infer("hello") {
        Err(AppError::Classifier(ClassifierError::Unavailable { status, reason })) => {
            assert_eq!(status, None);
            assert!(reason.contains("request failed"));
        }
        other => panic!("Expected Unavailable, got {:?}", other),
    }
}
