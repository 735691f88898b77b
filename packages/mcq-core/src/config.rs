//! Backend selection from the environment.
//!
//! | Variable               | Meaning                                       |
//! |------------------------|-----------------------------------------------|
//! | `MCQ_BACKEND_URL`      | Generation service root; selects that backend |
//! | `MCQ_BACKEND_ANON_KEY` | Bearer key for the generation service         |
//! | `GEMINI_API_KEY`       | Direct Gemini access                          |
//! | `GEMINI_MODEL`         | Model name (default `gemini-1.5-flash`)       |
//! | `GEMINI_BASE_URL`      | API root override                             |

use std::sync::Arc;

use gemini_client::{GeminiClient, DEFAULT_MODEL};
use tracing::info;

use crate::backends::{GeminiBackend, GenerationBackend, IntermediaryBackend};
use crate::credentials::ApiCredential;
use crate::error::{McqError, Result};

/// Which backend to use and how to reach it.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    Gemini {
        api_key: ApiCredential,
        model: String,
        base_url: Option<String>,
    },
    Intermediary {
        base_url: String,
        anon_key: ApiCredential,
    },
}

impl BackendConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for variable values.
    ///
    /// A generation service URL takes precedence over a Gemini key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = get("MCQ_BACKEND_URL") {
            let anon_key = ApiCredential::require("MCQ_BACKEND_ANON_KEY", get("MCQ_BACKEND_ANON_KEY"))?;
            return Ok(Self::Intermediary {
                base_url: base_url.trim().to_string(),
                anon_key,
            });
        }

        match get("GEMINI_API_KEY") {
            Some(key) => Ok(Self::Gemini {
                api_key: ApiCredential::new("GEMINI_API_KEY", key)?,
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("GEMINI_BASE_URL"),
            }),
            None => Err(McqError::Configuration(
                "no generation backend configured: set GEMINI_API_KEY, or MCQ_BACKEND_URL and MCQ_BACKEND_ANON_KEY"
                    .into(),
            )),
        }
    }

    /// Instantiate the configured backend.
    pub fn build_backend(&self) -> Arc<dyn GenerationBackend> {
        match self {
            Self::Gemini {
                api_key,
                model,
                base_url,
            } => {
                let mut client = GeminiClient::new(api_key.expose());
                if let Some(url) = base_url {
                    client = client.with_base_url(url.as_str());
                }
                info!(model = %model, "Using Gemini backend");
                Arc::new(GeminiBackend::new(client, model.as_str()))
            }
            Self::Intermediary { base_url, anon_key } => {
                info!(base_url = %base_url, "Using generation service backend");
                Arc::new(IntermediaryBackend::new(base_url, anon_key.clone()))
            }
        }
    }
}
