//! OpenAI API client implementation using the OpenAI-compatible base
//!
//! This module provides integration with OpenAI's GPT models through their API.

use crate::error::LLMError;
use crate::providers::openai_compatible::{OpenAICompatibleConfig, OpenAICompatibleProvider};

/// OpenAI configuration for the generic provider
pub struct OpenAIConfig;

impl OpenAICompatibleConfig for OpenAIConfig {
    const PROVIDER_NAME: &'static str = "OpenAI";
    const PROVIDER_ID: &'static str = "openai";
    const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1/";
    const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
}

/// Type alias for OpenAI client using the generic provider
pub type OpenAI = OpenAICompatibleProvider<OpenAIConfig>;

impl OpenAI {
    /// Creates a new OpenAI client with the specified configuration.
    pub fn with_config(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        OpenAICompatibleProvider::<OpenAIConfig>::new(
            api_key,
            base_url,
            model,
            max_tokens,
            timeout_seconds,
        )
    }
}
