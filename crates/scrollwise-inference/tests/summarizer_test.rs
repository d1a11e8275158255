//! End-to-end tests for the summarization orchestrator with mocked
//! transcript and generation endpoints.

use scrollwise_core::Error;
use scrollwise_inference::{
    OpenAIBackend, OpenAIConfig, Summarizer, TranscriptClient, TranscriptConfig,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn summarizer_for(
    transcript_server: &MockServer,
    openai_server: &MockServer,
) -> Summarizer<OpenAIBackend> {
    let transcripts = TranscriptClient::new(TranscriptConfig {
        base_url: transcript_server.uri(),
        language: "en".to_string(),
        timeout_seconds: 5,
    })
    .expect("Failed to create transcript client");

    let backend = OpenAIBackend::new(OpenAIConfig {
        base_url: openai_server.uri(),
        api_key: Some("test-key".to_string()),
        gen_model: "test-gen".to_string(),
        timeout_seconds: 5,
    })
    .expect("Failed to create backend");

    Summarizer::new(transcripts, backend)
}

#[tokio::test]
async fn test_summarize_fetches_transcript_once_and_generates() {
    let transcript_server = MockServer::start().await;
    let openai_server = MockServer::start().await;

    let transcript_payload = serde_json::json!({
        "events": [
            { "segs": [{ "utf8": "the talk begins" }] },
            { "segs": [{ "utf8": "and ends" }] }
        ]
    });

    // The transcript must be fetched exactly once per summarize call.
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&transcript_payload))
        .expect(1)
        .mount(&transcript_server)
        .await;

    let chat_response = serde_json::json!({
        "id": "chatcmpl-123",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "A dense summary." },
            "finish_reason": "stop"
        }]
    });

    // The flattened transcript is the user message.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-gen",
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "the talk begins and ends" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&chat_response))
        .expect(1)
        .mount(&openai_server)
        .await;

    let summarizer = summarizer_for(&transcript_server, &openai_server);
    let summary = summarizer
        .summarize("https://youtu.be/dQw4w9WgXcQ")
        .await
        .expect("Summarize should succeed");

    assert_eq!(summary, "A dense summary.");
}

#[tokio::test]
async fn test_summarize_invalid_url_makes_no_requests() {
    let transcript_server = MockServer::start().await;
    let openai_server = MockServer::start().await;

    // Neither backend may be contacted for input that has no video id.
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&transcript_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&openai_server)
        .await;

    let summarizer = summarizer_for(&transcript_server, &openai_server);
    let err = summarizer
        .summarize("not a url")
        .await
        .expect_err("Invalid URL must fail");

    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_summarize_transcript_failure_skips_generation() {
    let transcript_server = MockServer::start().await;
    let openai_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&transcript_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&openai_server)
        .await;

    let summarizer = summarizer_for(&transcript_server, &openai_server);
    let err = summarizer
        .summarize("https://youtu.be/dQw4w9WgXcQ")
        .await
        .expect_err("Transcript failure must surface");

    assert!(matches!(err, Error::Transcript(_)));
}

#[tokio::test]
async fn test_summarize_generation_failure_is_inference_error() {
    let transcript_server = MockServer::start().await;
    let openai_server = MockServer::start().await;

    let transcript_payload = serde_json::json!({
        "events": [{ "segs": [{ "utf8": "some content" }] }]
    });
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&transcript_payload))
        .mount(&transcript_server)
        .await;

    let error_body = serde_json::json!({
        "error": { "message": "model overloaded", "type": "server_error" }
    });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(&error_body))
        .mount(&openai_server)
        .await;

    let summarizer = summarizer_for(&transcript_server, &openai_server);
    let err = summarizer
        .summarize("https://youtu.be/dQw4w9WgXcQ")
        .await
        .expect_err("Generation failure must surface");

    match err {
        Error::Inference(msg) => assert!(msg.contains("model overloaded")),
        other => panic!("Expected Inference error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transcript_helper_exposes_flattened_text() {
    let transcript_server = MockServer::start().await;
    let openai_server = MockServer::start().await;

    let transcript_payload = serde_json::json!({
        "events": [{ "segs": [{ "utf8": "just the text" }] }]
    });
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&transcript_payload))
        .mount(&transcript_server)
        .await;

    let summarizer = summarizer_for(&transcript_server, &openai_server);
    let transcript = summarizer
        .transcript("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .await
        .expect("Transcript should succeed");

    assert_eq!(transcript, "just the text");
}
