// src/providers/chain.rs

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::providers::{GeminiProvider, OllamaProvider, Provider, ProviderError};

/// Ordered sequence of providers tried until one succeeds or all fail.
///
/// Order is fixed: the hosted provider first (when credentials are
/// configured), the local fallback second (when enabled). Each provider is
/// tried exactly once per call.
pub struct ProviderChain {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut providers: Vec<Arc<dyn Provider>> = Vec::new();
        if let Some(gemini) = GeminiProvider::from_config(config) {
            providers.push(Arc::new(gemini));
        }
        if config.use_ollama_fallback {
            if let Some(ollama) = OllamaProvider::from_config(config) {
                providers.push(Arc::new(ollama));
            }
        }
        Self::new(providers)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Try each provider in order; the first success wins. When the chain is
    /// empty or exhausted, fail with `ProviderUnavailable` carrying the last
    /// underlying error.
    pub async fn generate(
        &self,
        system: &str,
        user: &str,
        model_override: Option<&str>,
    ) -> Result<String, AppError> {
        let mut last_error: Option<ProviderError> = None;

        for provider in &self.providers {
            match provider.generate(system, user, model_override).await {
                Ok(text) => {
                    info!(provider = provider.name(), chars = text.len(), "generation succeeded");
                    return Ok(text);
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(AppError::ProviderUnavailable(match last_error {
            Some(e) => format!("all providers exhausted; last error: {}", e),
            None => "no text-generation provider is configured".to_string(),
        }))
    }
}
