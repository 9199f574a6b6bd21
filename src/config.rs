// src/config.rs

use std::env;

use dotenvy::dotenv;

/// Process-wide configuration, built once at startup and passed by reference
/// into the services and the provider chain. Core logic never reads the
/// environment on its own.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    /// Root directory for staged uploads (one subdirectory per submission).
    pub uploads_root: String,

    /// Hosted provider credentials; the Gemini client is only constructed
    /// when a key is present.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,

    /// Per-call timeout applied to both providers.
    pub provider_timeout_secs: u64,

    /// Local fallback provider (Ollama).
    pub ollama_host: String,
    pub ollama_model: String,
    pub use_ollama_fallback: bool,

    /// Upper bound on concurrently running generation jobs.
    pub generation_workers: usize,

    /// Question counts: the submission default and the fixed rebuild count.
    pub default_question_count: usize,
    pub rebuild_question_count: usize,

    pub rust_log: String,

    /// When set, `telemetry::init_tracing` adds a rolling file layer here.
    pub log_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let uploads_root = env::var("UPLOADS_ROOT").unwrap_or_else(|_| "uploads".to_string());

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        let provider_timeout_secs = env::var("GEMINI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let ollama_host =
            env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost:11434".to_string());
        let ollama_model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| "mistral".to_string());
        let use_ollama_fallback = env_flag("USE_OLLAMA_FALLBACK", true);

        let generation_workers = env::var("GENERATION_WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_dir = env::var("LOG_DIR").ok().filter(|d| !d.is_empty());

        Self {
            database_url,
            uploads_root,
            gemini_api_key,
            gemini_model,
            provider_timeout_secs,
            ollama_host,
            ollama_model,
            use_ollama_fallback,
            generation_workers,
            default_question_count: 5,
            rebuild_question_count: 10,
            rust_log,
            log_dir,
        }
    }
}

/// "1", "true" and "yes" (any case) count as enabled.
fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}
