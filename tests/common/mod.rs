#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::net::TcpListener;

use chat_relay::api::Server;
use chat_relay::chat::{ChatMessage, ChatProvider, ChatResponse};
use chat_relay::error::LLMError;

#[derive(Debug)]
pub struct MockReply(pub Option<String>);

impl fmt::Display for MockReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_deref().unwrap_or_default())
    }
}

impl ChatResponse for MockReply {
    fn text(&self) -> Option<String> {
        self.0.clone()
    }
}

/// What the mock provider answers with.
#[derive(Clone)]
pub enum Outcome {
    Reply(Option<String>),
    Fail { status: u16, message: String },
}

/// Provider that records every outbound conversation.
#[derive(Clone)]
pub struct RecordingProvider {
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl RecordingProvider {
    pub fn replying(text: &str) -> Self {
        Self::with_outcome(Outcome::Reply(Some(text.to_string())))
    }

    pub fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_conversation(&self) -> Option<Vec<ChatMessage>> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatProvider for RecordingProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(messages.to_vec());
        match &self.outcome {
            Outcome::Reply(text) => Ok(Box::new(MockReply(text.clone()))),
            Outcome::Fail { status, message } => Err(LLMError::UpstreamStatus {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Serves the relay on an ephemeral port and returns its base URL.
pub async fn spawn(server: Server) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server.serve(listener));
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on, so requests fail with connection refused.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
