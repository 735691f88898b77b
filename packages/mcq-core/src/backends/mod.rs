//! Generation backends.
//!
//! A backend turns article text plus settings into validated questions.
//! Two real backends exist: one calls Gemini directly, the other calls a
//! generation service over HTTP. [`MockBackend`] serves tests.

mod gemini;
mod intermediary;
mod mock;

pub use gemini::GeminiBackend;
pub use intermediary::IntermediaryBackend;
pub use mock::{MockBackend, MockBackendCall};

use async_trait::async_trait;

use crate::error::BackendError;
use crate::types::{GenerationSettings, Mcq};

/// Produces validated questions from content.
///
/// Implementations must return at most `settings.num_questions` records,
/// each already normalized.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        content: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Mcq>, BackendError>;

    /// Backend name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
