// src/providers/ollama.rs

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::Config;
use crate::providers::{Provider, ProviderError};

/// Local fallback provider, talking to an Ollama server (`ollama serve`).
pub struct OllamaProvider {
    client: reqwest::Client,
    host: String,
    model: String,
}

impl OllamaProvider {
    pub fn from_config(config: &Config) -> Option<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            client,
            host: config.ollama_host.clone(),
            model: config.ollama_model.clone(),
        })
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(
        &self,
        system: &str,
        user: &str,
        model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        let model = model_override.unwrap_or(&self.model);
        let url = format!("{}/api/generate", self.host.trim_end_matches('/'));
        debug!(model, prompt_chars = user.len(), "calling Ollama");

        let payload = json!({
            "model": model,
            "prompt": format!("{}\n\n{}", system, user),
            "stream": false,
        });

        let res = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("Ollama HTTP {}: {}", status, body)));
        }

        let data: Value = res
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("unreadable Ollama reply: {}", e)))?;

        let text = reply_text(&data)
            .ok_or_else(|| ProviderError::EmptyResponse("no text in Ollama reply".to_string()))?;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(
                "Ollama returned empty text".to_string(),
            ));
        }
        Ok(text)
    }
}

/// The reply shape varies across Ollama versions; accept the common keys.
fn reply_text(data: &Value) -> Option<String> {
    if let Some(s) = data.get("response").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    if let Some(s) = data.get("text").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    // some versions mimic the OpenAI 'choices' layout
    data.get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|first| first.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
