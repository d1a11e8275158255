//! Tests for the transcript client against a mock timedtext endpoint.

use scrollwise_core::Error;
use scrollwise_inference::{TranscriptClient, TranscriptConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TranscriptClient {
    TranscriptClient::new(TranscriptConfig {
        base_url: server.uri(),
        language: "en".to_string(),
        timeout_seconds: 5,
    })
    .expect("Failed to create transcript client")
}

#[tokio::test]
async fn test_fetch_joins_caption_lines_with_spaces() {
    let mock_server = MockServer::start().await;

    let payload = serde_json::json!({
        "events": [
            { "segs": [{ "utf8": "hello" }, { "utf8": "world" }] },
            { "tStartMs": 1200 },
            { "segs": [{ "utf8": "second line" }] }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("v", "dQw4w9WgXcQ"))
        .and(query_param("lang", "en"))
        .and(query_param("fmt", "json3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let transcript = client
        .fetch("dQw4w9WgXcQ")
        .await
        .expect("Fetch should succeed");

    assert_eq!(transcript, "hello world second line");
}

#[tokio::test]
async fn test_fetch_empty_body_is_transcript_error() {
    let mock_server = MockServer::start().await;

    // Videos without a caption track answer with an empty body.
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch("noCaption01")
        .await
        .expect_err("Missing captions must fail");

    match err {
        Error::Transcript(msg) => assert!(msg.contains("noCaption01")),
        other => panic!("Expected Transcript error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_http_error_is_transcript_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch("dQw4w9WgXcQ")
        .await
        .expect_err("HTTP failure must surface");

    assert!(matches!(err, Error::Transcript(_)));
}

#[tokio::test]
async fn test_fetch_events_without_text_is_transcript_error() {
    let mock_server = MockServer::start().await;

    let payload = serde_json::json!({ "events": [{ "tStartMs": 0 }] });

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch("dQw4w9WgXcQ")
        .await
        .expect_err("Empty transcript must fail");

    assert!(matches!(err, Error::Transcript(_)));
}

#[tokio::test]
async fn test_requested_language_is_forwarded() {
    let mock_server = MockServer::start().await;

    let payload = serde_json::json!({
        "events": [{ "segs": [{ "utf8": "hallo" }] }]
    });

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("lang", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TranscriptClient::new(TranscriptConfig {
        base_url: mock_server.uri(),
        language: "de".to_string(),
        timeout_seconds: 5,
    })
    .expect("Failed to create transcript client");

    let transcript = client
        .fetch("dQw4w9WgXcQ")
        .await
        .expect("Fetch should succeed");
    assert_eq!(transcript, "hallo");
}
