use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerationConfig};
use tracing::info;

use super::GenerationBackend;
use crate::error::BackendError;
use crate::normalize::normalize_reply;
use crate::prompt::build_prompt;
use crate::types::{GenerationSettings, Mcq};

const TOP_K: u32 = 40;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Calls Gemini directly and normalizes its reply.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: GeminiClient,
    model: String,
}

impl GeminiBackend {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sampling parameters for a request with `settings`.
    pub fn generation_config(settings: &GenerationSettings) -> GenerationConfig {
        GenerationConfig::default()
            .temperature(settings.temperature)
            .top_k(TOP_K)
            .top_p(TOP_P)
            .max_output_tokens(MAX_OUTPUT_TOKENS)
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(
        &self,
        content: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Mcq>, BackendError> {
        let prompt = build_prompt(content, settings);
        info!(model = %self.model, questions = settings.num_questions, "Generating MCQs with Gemini");

        let text = self
            .client
            .generate_text(&self.model, prompt, Self::generation_config(settings))
            .await?;

        let mcqs = normalize_reply(&text, settings)?;
        info!(count = mcqs.len(), "Successfully generated MCQs");
        Ok(mcqs)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
