//! OpenAI-compatible API client base implementation
//!
//! This module provides a generic base for OpenAI-compatible chat completion APIs
//! that is reused by every backend the relay can talk to (OpenAI, Groq).

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatProvider, ChatResponse};
use crate::error::LLMError;

/// Generic OpenAI-compatible provider
///
/// Different providers customize behavior by implementing the `OpenAICompatibleConfig` trait.
pub struct OpenAICompatibleProvider<T: OpenAICompatibleConfig> {
    pub api_key: String,
    pub base_url: Url,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub client: Client,
    _phantom: PhantomData<T>,
}

/// Configuration trait for OpenAI-compatible providers
pub trait OpenAICompatibleConfig: Send + Sync {
    /// The display name of the provider (e.g., "OpenAI", "Groq")
    const PROVIDER_NAME: &'static str;

    /// Lowercase identifier reported by the health check
    const PROVIDER_ID: &'static str;

    /// Default base URL for the provider
    const DEFAULT_BASE_URL: &'static str;

    /// Default model for the provider
    const DEFAULT_MODEL: &'static str;

    /// Chat completions endpoint path (usually "chat/completions")
    const CHAT_ENDPOINT: &'static str = "chat/completions";
}

/// Generic OpenAI-compatible chat message
#[derive(Serialize, Debug)]
pub struct OpenAICompatibleChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Generic OpenAI-compatible chat request
#[derive(Serialize, Debug)]
pub struct OpenAICompatibleChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<OpenAICompatibleChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

/// Generic OpenAI-compatible chat response
#[derive(Deserialize, Debug)]
pub struct OpenAICompatibleChatResponse {
    pub choices: Vec<OpenAICompatibleChatChoice>,
}

#[derive(Deserialize, Debug)]
pub struct OpenAICompatibleChatChoice {
    pub message: OpenAICompatibleChatMsg,
}

#[derive(Deserialize, Debug)]
pub struct OpenAICompatibleChatMsg {
    pub role: String,
    pub content: Option<String>,
}

/// Error envelope used by OpenAI-compatible APIs: `{"error": {"message": ...}}`
#[derive(Deserialize, Debug)]
struct OpenAICompatibleErrorEnvelope {
    error: OpenAICompatibleErrorBody,
}

#[derive(Deserialize, Debug)]
struct OpenAICompatibleErrorBody {
    message: String,
}

impl ChatResponse for OpenAICompatibleChatResponse {
    fn text(&self) -> Option<String> {
        self.choices.first().and_then(|c| c.message.content.clone())
    }
}

impl std::fmt::Display for OpenAICompatibleChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.choices.first().and_then(|c| c.message.content.as_deref()) {
            Some(content) => write!(f, "{content}"),
            None => write!(f, ""),
        }
    }
}

impl<T: OpenAICompatibleConfig> OpenAICompatibleProvider<T> {
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }

        let base_url = base_url.unwrap_or_else(|| T::DEFAULT_BASE_URL.to_owned());
        let base_url = Url::parse(&with_trailing_slash(&base_url)).map_err(|e| {
            LLMError::InvalidRequest(format!("Invalid {} base URL: {e}", T::PROVIDER_NAME))
        })?;

        Ok(Self {
            api_key: api_key.into(),
            base_url,
            model: model.unwrap_or_else(|| T::DEFAULT_MODEL.to_string()),
            max_tokens,
            client: builder.build()?,
            _phantom: PhantomData,
        })
    }
}

#[async_trait]
impl<T: OpenAICompatibleConfig> ChatProvider for OpenAICompatibleProvider<T> {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        if self.api_key.is_empty() {
            return Err(LLMError::AuthError(format!(
                "Missing {} API key",
                T::PROVIDER_NAME
            )));
        }

        let body = OpenAICompatibleChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| OpenAICompatibleChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: self.max_tokens,
            stream: false,
        };

        let url = self
            .base_url
            .join(T::CHAT_ENDPOINT)
            .map_err(|e| LLMError::HttpError(e.to_string()))?;

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("{} request payload: {}", T::PROVIDER_NAME, json);
            }
        }

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        log::debug!("{} HTTP status: {}", T::PROVIDER_NAME, response.status());

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(LLMError::UpstreamStatus {
                status: status.as_u16(),
                message: upstream_error_message(T::PROVIDER_NAME, status, &error_text),
            });
        }

        let resp_text = response.text().await?;
        match serde_json::from_str::<OpenAICompatibleChatResponse>(&resp_text) {
            Ok(response) => Ok(Box::new(response)),
            Err(e) => Err(LLMError::ResponseFormatError {
                message: format!("Failed to decode {} API response: {e}", T::PROVIDER_NAME),
                raw_response: resp_text,
            }),
        }
    }

    fn name(&self) -> &'static str {
        T::PROVIDER_ID
    }
}

/// Picks the most useful message out of a failed upstream response.
fn upstream_error_message(provider: &str, status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<OpenAICompatibleErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    format!("{provider} API returned error status: {status}")
}

// `Url::join` drops the last path segment unless the base ends with '/'.
fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_openai_envelope() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"tokens"}}"#;
        let msg = upstream_error_message("Groq", StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(msg, "Rate limit reached");
    }

    #[test]
    fn error_message_falls_back_to_raw_body_then_status() {
        assert_eq!(
            upstream_error_message("OpenAI", StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            upstream_error_message("OpenAI", StatusCode::BAD_GATEWAY, ""),
            "OpenAI API returned error status: 502 Bad Gateway"
        );
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        assert_eq!(with_trailing_slash("http://h/v1"), "http://h/v1/");
        assert_eq!(with_trailing_slash("http://h/v1/"), "http://h/v1/");
    }

    #[test]
    fn missing_content_renders_empty() {
        let resp: OpenAICompatibleChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert_eq!(resp.text(), None);
        assert_eq!(resp.to_string(), "");
    }
}
