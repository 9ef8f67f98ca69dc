use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::RelayError;
use crate::chat::{ChatMessage, ChatRole};

/// Single message of the transcript as it travels between client and relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    /// Role of the message sender ("user" or "assistant")
    pub role: ChatRole,
    /// Content of the message
    pub content: String,
}

/// Successful reply of `POST /api/chat`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Read-only session descriptor served by `GET /api/config`
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub topic: Option<String>,
}

/// Diagnostic payload served by `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub provider: String,
    pub topic: Option<String>,
    #[serde(rename = "companyContext")]
    pub company_context: bool,
}

/// Parses a `{ "messages": [...] }` body into the conversation to forward.
///
/// Only `user` and `assistant` roles with string content are accepted.
pub fn parse_chat_request(body: &[u8]) -> Result<Vec<ChatMessage>, RelayError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::Validation(format!("invalid JSON body: {e}")))?;

    let items = value
        .get("messages")
        .and_then(Value::as_array)
        .ok_or_else(|| RelayError::Validation("messages array required".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let msg = WireMessage::deserialize(item)
                .map_err(|e| RelayError::Validation(format!("messages[{i}]: {e}")))?;
            match msg.role {
                ChatRole::User | ChatRole::Assistant => Ok(ChatMessage {
                    role: msg.role,
                    content: msg.content,
                }),
                ChatRole::System => Err(RelayError::Validation(format!(
                    "messages[{i}]: role must be user or assistant"
                ))),
            }
        })
        .collect()
}
