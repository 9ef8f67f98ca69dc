//! Startup configuration for the relay.
//!
//! Everything here is read once when the process starts and is immutable
//! afterwards. Handlers receive it through the router state.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::builder::{LLMBackend, LLMBuilder};
use crate::chat::ChatProvider;
use crate::error::LLMError;
use crate::prompt::MAX_OUTPUT_TOKENS;

/// Topic restriction and knowledge text shared by every conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    topic: Option<String>,
    knowledge_text: Option<String>,
}

impl SessionConfig {
    /// Blank or whitespace-only values are treated as absent.
    pub fn new(topic: Option<String>, knowledge_text: Option<String>) -> Self {
        Self {
            topic: non_blank(topic),
            knowledge_text: non_blank(knowledge_text),
        }
    }

    /// Builds the configuration, reading the knowledge file if one is given.
    ///
    /// A missing or unreadable knowledge file is logged and treated as absent.
    pub fn load(topic: Option<String>, knowledge_path: Option<&Path>) -> Self {
        let knowledge_text = knowledge_path.and_then(load_knowledge);
        Self::new(topic, knowledge_text)
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn knowledge_text(&self) -> Option<&str> {
        self.knowledge_text.as_deref()
    }

    pub fn has_knowledge(&self) -> bool {
        self.knowledge_text.is_some()
    }
}

/// Reads the knowledge file verbatim (trimmed). Relative paths resolve against
/// the working directory.
pub fn load_knowledge(path: &Path) -> Option<String> {
    let full_path = match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    };

    match std::fs::read_to_string(&full_path) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                log::warn!("Company knowledge file is empty: {}", path.display());
                None
            } else {
                log::info!("Company context loaded from {}", path.display());
                Some(text.to_string())
            }
        }
        Err(e) => {
            log::warn!("Company knowledge file not found: {} {e}", path.display());
            None
        }
    }
}

/// Command line / environment arguments of the relay binary.
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "chat-relay",
    about = "HTTP relay between a chat front-end and an OpenAI-compatible completion API"
)]
pub struct RelayArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Groq API key; when set, Groq is used as the upstream provider
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// OpenAI API key, used when no Groq key is configured
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Model identifier, defaults to the provider's default model
    #[arg(long, env = "CHAT_MODEL")]
    pub model: Option<String>,

    /// Restrict answers to this topic
    #[arg(long, env = "CHAT_TOPIC")]
    pub topic: Option<String>,

    /// Text file whose content the assistant must answer from
    #[arg(long, env = "COMPANY_KNOWLEDGE_PATH")]
    pub knowledge_path: Option<PathBuf>,

    /// Directory holding the built front-end
    #[arg(long, env = "STATIC_DIR", default_value = "../client/dist")]
    pub static_dir: PathBuf,

    /// Override the upstream base URL
    #[arg(long, env = "UPSTREAM_BASE_URL")]
    pub base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECONDS")]
    pub timeout_seconds: Option<u64>,
}

/// Resolved relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub backend: LLMBackend,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub static_dir: PathBuf,
    pub session: SessionConfig,
}

impl RelayConfig {
    pub fn from_args(args: RelayArgs) -> Self {
        let (backend, api_key) = select_backend(args.groq_api_key, args.openai_api_key);
        let model = non_blank(args.model).unwrap_or_else(|| backend.default_model().to_string());
        let knowledge_path = args
            .knowledge_path
            .filter(|p| !p.as_os_str().is_empty());

        Self {
            port: args.port,
            backend,
            api_key,
            model,
            base_url: non_blank(args.base_url),
            timeout_seconds: args.timeout_seconds,
            static_dir: args.static_dir,
            session: SessionConfig::load(args.topic, knowledge_path.as_deref()),
        }
    }

    /// Builds the upstream provider, or `None` when no credential is configured.
    pub fn provider(&self) -> Result<Option<Box<dyn ChatProvider>>, LLMError> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };

        let mut builder = LLMBuilder::new()
            .backend(self.backend)
            .api_key(api_key.clone())
            .model(self.model.clone())
            .max_tokens(MAX_OUTPUT_TOKENS);
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            builder = builder.timeout_seconds(timeout);
        }
        builder.build().map(Some)
    }
}

/// Groq wins whenever its key is present; otherwise OpenAI, with or without a key.
pub fn select_backend(
    groq_api_key: Option<String>,
    openai_api_key: Option<String>,
) -> (LLMBackend, Option<String>) {
    match non_blank(groq_api_key) {
        Some(key) => (LLMBackend::Groq, Some(key)),
        None => (LLMBackend::OpenAI, non_blank(openai_api_key)),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
