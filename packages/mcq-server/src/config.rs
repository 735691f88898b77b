use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;

use gemini_client::{GeminiClient, DEFAULT_MODEL};
use mcq_core::{ApiCredential, GeminiBackend, GenerationBackend};

/// Generation service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Absent or placeholder keys are reported per request, not at startup
    pub gemini_api_key: Option<ApiCredential>,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: gemini_key(env::var("GEMINI_API_KEY").ok()),
            gemini_model: env::var("GEMINI_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok().filter(|u| !u.trim().is_empty()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }

    /// Gemini backend, if a key is configured.
    pub fn backend(&self) -> Option<Arc<dyn GenerationBackend>> {
        let key = self.gemini_api_key.as_ref()?;
        let mut client = GeminiClient::new(key.expose());
        if let Some(url) = &self.gemini_base_url {
            client = client.with_base_url(url.as_str());
        }
        Some(Arc::new(GeminiBackend::new(client, self.gemini_model.as_str())))
    }
}

/// Placeholder values count as no key at all.
fn gemini_key(value: Option<String>) -> Option<ApiCredential> {
    value.and_then(|key| ApiCredential::new("GEMINI_API_KEY", key).ok())
}
