//! Abstractions over the chat-completion generation capability.
//!
//! The pipeline treats generation as a black box: a role-tagged message list plus sampling
//! parameters go in, one text string comes out. Clients are constructed explicitly and
//! injected into the pipeline so tests can substitute a scripted double. Both backends issue
//! plain HTTP requests through `reqwest`; no client retains state between calls, so one
//! handle may serve concurrent chunk fan-outs.

use crate::config::{GenerationProvider, get_config};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors surfaced while attempting text generation.
#[derive(Debug, Error)]
pub enum GenerationClientError {
    /// Provider was unreachable or rejected the endpoint.
    #[error("Generation provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate text: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Role tag attached to a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instruction framing the assistant's behavior.
    System,
    /// Content supplied on behalf of the caller.
    User,
}

/// One role-tagged message in a generation request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role tag understood by the provider.
    pub role: MessageRole,
    /// Message body.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request payload passed to the generation provider.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Ordered message list assembled by the prompt templates.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature requested by the template.
    pub temperature: f32,
    /// Optional cap on generated tokens.
    pub max_tokens: Option<u32>,
}

/// Interface implemented by generation backends.
///
/// Output is best-effort natural text from temperature-controlled sampling; callers must not
/// rely on exact-equality comparisons against it.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate one text completion for the supplied messages.
    async fn generate(&self, request: GenerationRequest)
    -> Result<String, GenerationClientError>;
}

/// Build a generation client based on configuration.
pub fn client_from_config() -> Box<dyn GenerationClient> {
    let config = get_config();
    match config.generation_provider {
        GenerationProvider::OpenAI => {
            let base_url = config
                .openai_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
            Box::new(OpenAiGenerationClient::new(
                base_url,
                config.openai_api_key.clone().unwrap_or_default(),
                config.generation_model.clone(),
            ))
        }
        GenerationProvider::Ollama => {
            let base_url = config
                .ollama_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
            Box::new(OllamaGenerationClient::new(
                base_url,
                config.generation_model.clone(),
            ))
        }
    }
}

/// Client for the OpenAI chat-completions API and compatible endpoints.
pub struct OpenAiGenerationClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiGenerationClient {
    /// Construct a client for the given endpoint, credential, and model.
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let http = Client::builder()
            .user_agent("session-lens/generate")
            .build()
            .expect("Failed to construct reqwest::Client for generation");
        Self {
            http,
            base_url,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: String,
}

#[async_trait]
impl GenerationClient for OpenAiGenerationClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<String, GenerationClientError> {
        let mut payload = json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
        });
        if let Some(max_tokens) = request.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                GenerationClientError::ProviderUnavailable(format!(
                    "failed to reach OpenAI endpoint at {}: {error}",
                    self.base_url
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationClientError::GenerationFailed(format!(
                "OpenAI returned {status}: {body}"
            )));
        }

        let body: OpenAiResponse = response.json().await.map_err(|error| {
            GenerationClientError::InvalidResponse(format!(
                "failed to decode OpenAI response: {error}"
            ))
        })?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            GenerationClientError::InvalidResponse("OpenAI response contained no choices".into())
        })?;

        Ok(choice.message.content.trim().to_string())
    }
}

/// Client for a local Ollama runtime's chat endpoint.
pub struct OllamaGenerationClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaGenerationClient {
    /// Construct a client for the given runtime URL and model.
    pub fn new(base_url: String, model: String) -> Self {
        let http = Client::builder()
            .user_agent("session-lens/generate")
            .build()
            .expect("Failed to construct reqwest::Client for generation");
        Self {
            http,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[async_trait]
impl GenerationClient for OllamaGenerationClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<String, GenerationClientError> {
        let mut options = json!({ "temperature": request.temperature });
        if let Some(max_tokens) = request.max_tokens {
            options["num_predict"] = json!(max_tokens);
        }
        let payload = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": false,
            "options": options,
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                GenerationClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GenerationClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            GenerationClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;

        if !body.done {
            return Err(GenerationClientError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.message.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn request() -> GenerationRequest {
        GenerationRequest {
            messages: vec![ChatMessage::user("Summarize")],
            temperature: 0.5,
            max_tokens: Some(1000),
        }
    }

    #[tokio::test]
    async fn openai_client_handles_successful_response() {
        let server = MockServer::start_async().await;
        let client = OpenAiGenerationClient::new(
            server.base_url(),
            "test-key".into(),
            "gpt-4o-mini".into(),
        );

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [
                        { "message": { "role": "assistant", "content": "  Summary text  " } }
                    ]
                }));
            })
            .await;

        let summary = client.generate(request()).await.expect("summary");

        mock.assert();
        assert_eq!(summary, "Summary text");
    }

    #[tokio::test]
    async fn openai_client_handles_error_status() {
        let server = MockServer::start_async().await;
        let client = OpenAiGenerationClient::new(
            server.base_url(),
            "test-key".into(),
            "gpt-4o-mini".into(),
        );

        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(500).body("boom");
            })
            .await;

        let error = client.generate(request()).await.expect_err("error response");
        assert!(matches!(error, GenerationClientError::GenerationFailed(message) if message.contains("500")));
    }

    #[tokio::test]
    async fn openai_client_rejects_empty_choices() {
        let server = MockServer::start_async().await;
        let client = OpenAiGenerationClient::new(
            server.base_url(),
            "test-key".into(),
            "gpt-4o-mini".into(),
        );

        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let error = client.generate(request()).await.expect_err("empty choices");
        assert!(matches!(error, GenerationClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn ollama_client_handles_successful_response() {
        let server = MockServer::start_async().await;
        let client = OllamaGenerationClient::new(server.base_url(), "llama3".into());

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(200).json_body(json!({
                    "message": { "role": "assistant", "content": "Summary text" },
                    "done": true
                }));
            })
            .await;

        let summary = client.generate(request()).await.expect("summary");

        mock.assert();
        assert_eq!(summary, "Summary text");
    }

    #[tokio::test]
    async fn ollama_client_rejects_incomplete_response() {
        let server = MockServer::start_async().await;
        let client = OllamaGenerationClient::new(server.base_url(), "llama3".into());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(200).json_body(json!({
                    "message": { "role": "assistant", "content": "partial" },
                    "done": false
                }));
            })
            .await;

        let error = client.generate(request()).await.expect_err("incomplete");
        assert!(matches!(error, GenerationClientError::InvalidResponse(_)));
    }
}
