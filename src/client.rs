//! Client side of the relay: an HTTP client plus the chat session that owns
//! the transcript.

use reqwest::{Client, Url};

use crate::api::{ChatReply, ConfigResponse, ErrorBody, WireMessage};
use crate::error::LLMError;
use crate::transcript::{Transcript, Turn};

/// Message used when a failed response carries no `error` field.
pub const GENERIC_FAILURE: &str = "Network error";

/// Thin HTTP client for the relay endpoints.
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: Url,
    client: Client,
}

impl RelayClient {
    /// `base_url` may carry a path prefix (e.g. `https://host/chat`); endpoints are resolved below it.
    pub fn new(base_url: &str) -> Result<Self, LLMError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| LLMError::InvalidRequest(format!("Invalid relay URL: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, LLMError> {
        self.base_url
            .join(path)
            .map_err(|e| LLMError::InvalidRequest(e.to_string()))
    }

    /// Topic the relay is restricted to. Any failure degrades to `None`.
    pub async fn fetch_config(&self) -> Option<String> {
        let result = async {
            let response = self.client.get(self.endpoint("api/config")?).send().await?;
            Ok::<_, LLMError>(response.error_for_status()?.json::<ConfigResponse>().await?)
        }
        .await;

        match result {
            Ok(config) => config.topic,
            Err(e) => {
                log::debug!("ignoring /api/config failure: {e}");
                None
            }
        }
    }

    /// Posts the conversation and returns the assistant's reply.
    pub async fn post_chat(&self, messages: &[WireMessage]) -> Result<String, LLMError> {
        let response = self
            .client
            .post(self.endpoint("api/chat")?)
            .json(&serde_json::json!({ "messages": messages }))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| GENERIC_FAILURE.to_string());
            return Err(LLMError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatReply = serde_json::from_str(&text)?;
        Ok(reply.message)
    }
}

/// Tagline shown above the conversation.
pub fn tagline(topic: Option<&str>) -> String {
    match topic {
        Some(topic) => format!("Ask me anything about {topic}."),
        None => "Ask me anything.".to_string(),
    }
}

/// One conversation with the relay.
///
/// `send` takes `&mut self`, so a session never has more than one request in flight.
pub struct ChatSession {
    client: RelayClient,
    transcript: Transcript,
    last_error: Option<String>,
    topic: Option<String>,
}

impl ChatSession {
    pub fn new(client: RelayClient) -> Self {
        Self {
            client,
            transcript: Transcript::new(),
            last_error: None,
            topic: None,
        }
    }

    /// Fetches the session descriptor from the relay.
    pub async fn load_config(&mut self) {
        self.topic = self.client.fetch_config().await;
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn tagline(&self) -> String {
        tagline(self.topic())
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Error of the last failed send, cleared by the next send.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Submits user text and appends the outcome to the transcript.
    ///
    /// A relay failure is not an `Err`: it becomes an `AssistantError` turn and
    /// the banner error. `Err` is only returned for blank input, in which case
    /// nothing is sent.
    pub async fn send(&mut self, text: &str) -> Result<&Turn, LLMError> {
        self.transcript.append(Turn::User(text.trim().to_string()))?;
        self.last_error = None;

        let turn = match self.client.post_chat(&self.transcript.to_wire()).await {
            Ok(reply) => Turn::Assistant(reply),
            Err(e) => {
                let message = e.to_string();
                log::debug!("relay call failed: {message}");
                self.last_error = Some(message.clone());
                Turn::AssistantError(message)
            }
        };
        self.transcript.append(turn)?;

        self.transcript
            .last()
            .ok_or_else(|| LLMError::Generic("transcript unexpectedly empty".to_string()))
    }
}
