//! chat-relay is a minimal chat front-end backed by a server-side relay to an
//! OpenAI-compatible completion API.
//!
//! # Overview
//! The client keeps the whole conversation and resends it on every turn; the
//! relay is stateless apart from its startup configuration. On each request it:
//!
//! - prepends a synthesized system instruction (language constraint, optional
//!   knowledge text, optional topic restriction)
//! - forwards the conversation to the upstream provider (Groq or OpenAI)
//! - returns the first choice's text, or the provider's error and status
//!
//! # Architecture
//! The crate is organized into modules that handle different sides of the exchange:

/// Relay HTTP server (axum)
pub mod api;

/// Upstream backends built on the OpenAI-compatible provider
pub mod backends;

/// Builder for configuring and instantiating upstream providers
pub mod builder;

/// Chat message types and the provider trait
pub mod chat;

/// Relay client and chat session used by front-ends
pub mod client;

/// Startup configuration
pub mod config;

/// Error types and handling
pub mod error;

/// System instruction synthesis
pub mod prompt;

/// Shared OpenAI-compatible provider implementation
pub mod providers;

/// Append-only client-side transcript
pub mod transcript;

/// Initialize logging using env_logger, defaulting to `info` when `RUST_LOG` is unset.
///
/// Calling it more than once is harmless.
#[inline]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
