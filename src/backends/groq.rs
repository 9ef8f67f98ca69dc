//! Groq API client implementation for chat functionality.
//!
//! This module provides integration with Groq's LLM models through their
//! OpenAI-compatible endpoint.

use crate::error::LLMError;
use crate::providers::openai_compatible::{OpenAICompatibleConfig, OpenAICompatibleProvider};

/// Groq configuration for the generic provider
pub struct GroqConfig;

impl OpenAICompatibleConfig for GroqConfig {
    const PROVIDER_NAME: &'static str = "Groq";
    const PROVIDER_ID: &'static str = "groq";
    const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1/";
    const DEFAULT_MODEL: &'static str = "llama-3.1-8b-instant";
}

pub type Groq = OpenAICompatibleProvider<GroqConfig>;

impl Groq {
    /// Creates a new Groq client with the specified configuration.
    pub fn with_config(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        OpenAICompatibleProvider::<GroqConfig>::new(
            api_key,
            base_url,
            model,
            max_tokens,
            timeout_seconds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatProvider;

    #[test]
    fn model_override_and_base_url_without_slash() {
        let llm = Groq::with_config(
            "gsk-test",
            Some("http://127.0.0.1:9999/openai/v1".into()),
            Some("llama-3.3-70b-versatile".into()),
            None,
            Some(30),
        )
        .unwrap();
        assert_eq!(llm.model, "llama-3.3-70b-versatile");
        assert_eq!(
            llm.base_url.join("chat/completions").unwrap().as_str(),
            "http://127.0.0.1:9999/openai/v1/chat/completions"
        );
        assert_eq!(llm.name(), "groq");
    }
}
