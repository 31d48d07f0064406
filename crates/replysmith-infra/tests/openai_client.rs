//! Integration tests for `OpenAiChatClient` using wiremock HTTP mocks.

use std::time::Duration;

use replysmith_core::ports::{ChatCompletion, CompletionError};
use replysmith_core::prompts::{ModelTier, Prompt};
use replysmith_infra::{OpenAiChatClient, OpenAiConfig};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str, api_key: Option<&str>) -> OpenAiChatClient {
    OpenAiChatClient::new(OpenAiConfig {
        api_key: api_key.map(str::to_owned),
        base_url: base_url.to_owned(),
        model: "small-model".to_owned(),
        premium_model: "big-model".to_owned(),
        timeout: Duration::from_secs(5),
    })
    .expect("client construction should not fail")
}

fn prompt(tier: ModelTier, system: Option<&str>) -> Prompt {
    Prompt {
        system: system.map(str::to_owned),
        user: "Analyze this post".to_owned(),
        temperature: 0.7,
        max_tokens: 1000,
        tier,
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn complete_returns_first_choice_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "small-model",
            "max_tokens": 1000,
            "messages": [{ "role": "user", "content": "Analyze this post" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("1. Main Problem")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Some("sk-test"));
    let reply = client
        .complete(&prompt(ModelTier::Standard, None))
        .await
        .expect("completion should succeed");

    assert_eq!(reply, "1. Main Problem");
}

#[tokio::test]
async fn premium_tier_uses_premium_model_and_system_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "big-model",
            "messages": [
                { "role": "system", "content": "You are a commenter." },
                { "role": "user", "content": "Analyze this post" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Great point")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Some("sk-test"));
    let reply = client
        .complete(&prompt(ModelTier::Premium, Some("You are a commenter.")))
        .await
        .expect("completion should succeed");

    assert_eq!(reply, "Great point");
}

#[tokio::test]
async fn upstream_error_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "message": "Rate limit reached for requests" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Some("sk-test"));
    let err = client
        .complete(&prompt(ModelTier::Standard, None))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "OpenAI API error: Rate limit reached for requests");
}

#[tokio::test]
async fn upstream_error_without_body_is_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Some("sk-test"));
    let err = client
        .complete(&prompt(ModelTier::Standard, None))
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::Upstream(ref m) if m == "Unknown error"));
}

#[tokio::test]
async fn missing_api_key_fails_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), None);
    let err = client
        .complete(&prompt(ModelTier::Standard, None))
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::NotConfigured));
}

#[tokio::test]
async fn empty_choices_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Some("sk-test"));
    let err = client
        .complete(&prompt(ModelTier::Standard, None))
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}
