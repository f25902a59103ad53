//! Shared fixtures for tests that talk to a mocked chat-completions endpoint.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::Config;
use crate::jobs::source::SampleJobSource;
use crate::llm_client::LlmClient;
use crate::models::job::JobListing;
use crate::state::AppState;

pub fn chat_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120 }
    })
}

/// Starts a mock server whose chat endpoint always answers with `reply`.
/// Keep the returned server alive for the duration of the test.
pub async fn mock_llm(reply: &str) -> (MockServer, LlmClient) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(reply)))
        .mount(&server)
        .await;
    let llm = LlmClient::new(Some("test-key".to_string()), server.uri());
    (server, llm)
}

/// A client whose every call fails with `LlmError::MissingApiKey`.
pub fn unconfigured_llm() -> LlmClient {
    LlmClient::new(None, "http://127.0.0.1:9")
}

pub fn listing(id: &str, title: &str) -> JobListing {
    JobListing {
        id: id.to_string(),
        title: title.to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        description: format!("{title} role building web services."),
        skills: vec!["Rust".to_string()],
        apply_link: format!("https://example.com/apply/{id}"),
        posted_at: Some("2025-02-01".to_string()),
        experience_required: None,
        compensation_min: None,
    }
}

/// Sample-mode state around the given LLM client.
pub fn test_state(llm: LlmClient) -> AppState {
    AppState {
        llm,
        jobs: Arc::new(SampleJobSource),
        config: Config {
            groq_api_key: None,
            llm_base_url: "http://127.0.0.1:9".to_string(),
            adzuna: None,
            port: 0,
            rust_log: "debug".to_string(),
        },
    }
}
