//! Builder module for configuring and instantiating upstream providers.
//!
//! This module provides a builder for creating the OpenAI-compatible provider
//! the relay forwards conversations to.

use crate::{
    backends::{
        groq::{Groq, GroqConfig},
        openai::{OpenAI, OpenAIConfig},
    },
    chat::ChatProvider,
    error::LLMError,
    providers::openai_compatible::OpenAICompatibleConfig,
};

/// Supported upstream backend providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMBackend {
    /// OpenAI API provider
    OpenAI,
    /// Groq API provider (free tier friendly)
    Groq,
}

impl LLMBackend {
    /// Lowercase identifier, as reported by `/health`.
    pub fn id(&self) -> &'static str {
        match self {
            LLMBackend::OpenAI => OpenAIConfig::PROVIDER_ID,
            LLMBackend::Groq => GroqConfig::PROVIDER_ID,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LLMBackend::OpenAI => OpenAIConfig::DEFAULT_MODEL,
            LLMBackend::Groq => GroqConfig::DEFAULT_MODEL,
        }
    }

    /// Fixed message returned to clients when this backend has no credential.
    pub fn missing_key_message(&self) -> &'static str {
        match self {
            LLMBackend::Groq => {
                "GROQ_API_KEY not set. Create a .env file (see .env.example) or use OPENAI_API_KEY."
            }
            LLMBackend::OpenAI => {
                "OPENAI_API_KEY not set. For free tier set GROQ_API_KEY in .env (see README)."
            }
        }
    }
}

/// Builder for configuring and instantiating upstream providers.
#[derive(Default)]
pub struct LLMBuilder {
    /// Selected backend provider
    backend: Option<LLMBackend>,
    /// API key for authentication with the provider
    api_key: Option<String>,
    /// Base URL override, mainly for tests and self-hosted gateways
    base_url: Option<String>,
    /// Model identifier/name to use
    model: Option<String>,
    /// Maximum tokens to generate in responses
    max_tokens: Option<u32>,
    /// Request timeout duration in seconds
    timeout_seconds: Option<u64>,
}

impl LLMBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend provider to use.
    pub fn backend(mut self, backend: LLMBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL for API requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model identifier to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Builds and returns a configured provider instance.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is specified or the API key is missing or blank.
    pub fn build(self) -> Result<Box<dyn ChatProvider>, LLMError> {
        let backend = self
            .backend
            .ok_or_else(|| LLMError::InvalidRequest("No backend specified".to_string()))?;

        let key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LLMError::AuthError(backend.missing_key_message().to_string()))?;

        let provider: Box<dyn ChatProvider> = match backend {
            LLMBackend::OpenAI => Box::new(OpenAI::with_config(
                key,
                self.base_url,
                self.model,
                self.max_tokens,
                self.timeout_seconds,
            )?),
            LLMBackend::Groq => Box::new(Groq::with_config(
                key,
                self.base_url,
                self.model,
                self.max_tokens,
                self.timeout_seconds,
            )?),
        };

        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_backend_fails() {
        let err = LLMBuilder::new().api_key("k").build().err().unwrap();
        assert!(err.to_string().contains("No backend specified"));
    }

    #[test]
    fn build_without_key_reports_fixed_message() {
        let err = LLMBuilder::new()
            .backend(LLMBackend::OpenAI)
            .api_key("   ")
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY not set"));
    }

    #[test]
    fn build_groq_reports_its_id() {
        let llm = LLMBuilder::new()
            .backend(LLMBackend::Groq)
            .api_key("gsk-test")
            .max_tokens(1024)
            .build()
            .unwrap();
        assert_eq!(llm.name(), "groq");
        assert_eq!(LLMBackend::Groq.default_model(), "llama-3.1-8b-instant");
    }
}
