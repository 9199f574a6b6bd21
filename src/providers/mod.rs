// src/providers/mod.rs

pub mod chain;
pub mod gemini;
pub mod ollama;

use std::fmt;

use async_trait::async_trait;

pub use chain::ProviderChain;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Failure of a single provider call. One provider failing is not fatal to a
/// job; the chain moves on to the next provider and only surfaces the last
/// of these when every provider is exhausted.
#[derive(Debug)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS).
    Request(String),

    /// The backend answered with a non-success status or an error payload.
    Api(String),

    /// The backend answered, but no usable text could be found in the reply.
    EmptyResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Request(msg) => write!(f, "request failed: {}", msg),
            ProviderError::Api(msg) => write!(f, "backend error: {}", msg),
            ProviderError::EmptyResponse(msg) => write!(f, "empty response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// A text-generation backend reachable over one request/response call.
/// No retries happen inside a single provider; retry granularity is "try the
/// next provider in the chain".
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        system: &str,
        user: &str,
        model_override: Option<&str>,
    ) -> Result<String, ProviderError>;
}
