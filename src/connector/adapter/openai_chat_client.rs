use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::{ChatClient, SecretProvider};
use crate::domain::{ChatMessage, Completion, CompletionOptions, DomainError, ResponseFormat};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Name of the secret holding the provider API key.
pub const API_KEY_SECRET: &str = "OPENAI_API_KEY";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ApiResponseFormat>,
}

#[derive(Serialize)]
struct ApiResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// HTTP client for OpenAI-compatible chat completion endpoints.
///
/// Implements [`ChatClient`]: one POST per call, streaming disabled, no retries
/// and no timeout beyond the HTTP client default. The API key is resolved from
/// the [`SecretProvider`] on every call, so rotating the secret needs no restart.
///
/// Configuration via environment variables:
///
/// | Variable              | Default                  |
/// |-----------------------|--------------------------|
/// | `SOLACE_LLM_BASE_URL` | `https://api.openai.com` |
/// | `SOLACE_LLM_MODEL`    | `gpt-4o-mini`            |
///
/// The response body is classified by [`Completion::from_text`]. When the body
/// is a chat-completion envelope, the message content inside it is classified
/// instead.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    secrets: Arc<dyn SecretProvider>,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    pub fn new(
        secrets: Arc<dyn SecretProvider>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            secrets,
            model: model.into(),
            url,
        }
    }

    pub fn from_env(secrets: Arc<dyn SecretProvider>) -> Self {
        let model = std::env::var("SOLACE_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(secrets, model, Self::configured_base_url())
    }

    /// Return the configured base URL (for logging purposes).
    pub fn configured_base_url() -> String {
        std::env::var("SOLACE_LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pull `choices[0].message.content` out of a chat-completion envelope.
    fn envelope_content(value: &Value) -> Option<&str> {
        value
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
    }

    fn interpret(body: &str) -> Result<Completion, DomainError> {
        let completion = Completion::from_text(body)?;
        if let Some(content) = completion.as_json().and_then(Self::envelope_content) {
            return Completion::from_text(content);
        }
        Ok(completion)
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<Completion, DomainError> {
        let api_key = self.secrets.resolve(API_KEY_SECRET).await?;

        let request = ApiRequest {
            model: &self.model,
            messages,
            temperature: options.temperature(),
            stream: false,
            response_format: match options.response_format() {
                ResponseFormat::JsonObject => Some(ApiResponseFormat {
                    kind: "json_object",
                }),
                ResponseFormat::Text => None,
            },
        };

        debug!(
            "OpenAiChatClient: {} request to {} ({} messages)",
            options.purpose().as_str(),
            self.url,
            messages.len()
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("OpenAiChatClient: request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::transport(format!("OpenAiChatClient: failed to read body: {e}")))?;

        if !status.is_success() {
            warn!("OpenAiChatClient: API returned {status}: {body}");
            return Err(DomainError::upstream(status.as_u16(), body));
        }

        Self::interpret(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
