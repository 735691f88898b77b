//! Backend calls with fallback on failure.

use std::sync::Arc;

use tracing::{info, warn};

use crate::backends::GenerationBackend;
use crate::error::GenerationFailure;
use crate::fallback::fallback_mcqs;
use crate::types::{GenerationSettings, Mcq};

/// Wraps a [`GenerationBackend`] so every failure carries fallback questions.
#[derive(Clone)]
pub struct McqGenerator {
    backend: Arc<dyn GenerationBackend>,
}

impl McqGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Generate questions for `content`.
    ///
    /// On success the list holds at most `settings.num_questions` records.
    /// On failure the error carries [`fallback_mcqs`] for the same settings.
    pub async fn generate(
        &self,
        content: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Mcq>, GenerationFailure> {
        match self.backend.generate(content, settings).await {
            Ok(mut mcqs) => {
                mcqs.truncate(settings.num_questions);
                info!(
                    backend = self.backend.name(),
                    count = mcqs.len(),
                    "Generated MCQs"
                );
                Ok(mcqs)
            }
            Err(cause) => {
                warn!(
                    backend = self.backend.name(),
                    error = %cause,
                    "Generation failed, using fallback questions"
                );
                Err(GenerationFailure {
                    cause,
                    fallback: fallback_mcqs(settings),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MockBackend;
    use crate::error::BackendError;

    #[tokio::test]
    async fn test_failure_carries_fallback() {
        let generator = McqGenerator::new(Arc::new(MockBackend::failing(BackendError::Backend(
            "GEMINI_API_KEY not configured in environment".into(),
        ))));

        let failure = generator
            .generate("text", &GenerationSettings::default().with_num_questions(1))
            .await
            .unwrap_err();

        assert_eq!(failure.fallback.len(), 1);
        assert_eq!(
            failure.to_string(),
            "Failed to generate MCQs with AI: GEMINI_API_KEY not configured in environment"
        );
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back() {
        let generator = McqGenerator::new(Arc::new(MockBackend::replying("not json at all")));

        let failure = generator
            .generate("text", &GenerationSettings::default())
            .await
            .unwrap_err();

        assert!(matches!(failure.cause, BackendError::Parse(_)));
        assert_eq!(failure.fallback.len(), 2);
    }
}
