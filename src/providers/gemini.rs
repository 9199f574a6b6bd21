// src/providers/gemini.rs

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::providers::{Provider, ProviderError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Hosted primary provider, speaking the Gemini `generateContent` REST API.
/// Only constructed when an API key is configured.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.gemini_api_key.clone()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            client,
            api_key,
            model: config.gemini_model.clone(),
        })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(
        &self,
        system: &str,
        user: &str,
        model_override: Option<&str>,
    ) -> Result<String, ProviderError> {
        let model = model_override.unwrap_or(&self.model);
        debug!(model, prompt_chars = user.len(), "calling Gemini");
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, model, self.api_key
        );

        // The generateContent API takes a single prompt; system and task
        // instructions are concatenated the same way for both providers.
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: format!("{}\n\n{}", system, user),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.15,
                max_output_tokens: 1500,
            },
        };

        let res = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            let msg = extract_api_error(&body).unwrap_or(body);
            return Err(ProviderError::Api(format!("Gemini HTTP {}: {}", status, msg)));
        }

        let body: GenerateContentResponse = res
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("unreadable Gemini reply: {}", e)))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(
                "Gemini returned no candidate text".to_string(),
            ));
        }
        Ok(text)
    }
}

// --- Wire DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Wrap {
        error: Obj,
    }
    #[derive(Deserialize)]
    struct Obj {
        message: String,
    }
    serde_json::from_str::<Wrap>(body)
        .ok()
        .map(|w| w.error.message)
}
