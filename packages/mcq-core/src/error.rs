//! Error types for question generation.

use content_extractor::ExtractionError;
use gemini_client::GeminiError;
use thiserror::Error;

use crate::types::Mcq;

/// Top-level error for a generation run.
#[derive(Debug, Error)]
pub enum McqError {
    /// No usable backend credentials, or a malformed backend setting
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Settings no backend can satisfy
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Article URL failed validation
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Pasted text was empty
    #[error("No content provided")]
    EmptyContent,

    /// Every retrieval strategy failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Generation failed; fallback questions were produced instead
    #[error(transparent)]
    Generation(#[from] GenerationFailure),
}

impl McqError {
    /// Fallback questions carried by a generation failure.
    pub fn fallback(&self) -> Option<&[Mcq]> {
        match self {
            Self::Generation(failure) => Some(&failure.fallback),
            _ => None,
        }
    }
}

/// Why a backend failed to produce questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Transport failure reaching the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with an error of its own
    #[error("{0}")]
    Backend(String),

    /// Reply text was not JSON, even after recovery
    #[error("{0}")]
    Parse(String),

    /// Reply was JSON, but not a usable question list
    #[error("{0}")]
    Format(String),
}

impl From<GeminiError> for BackendError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Network(message) => Self::Network(message),
            other => Self::Backend(other.to_string()),
        }
    }
}

/// A generation run that failed and fell back to sample questions.
///
/// The fallback set is already installed wherever the run was tracked;
/// this error only informs the caller.
#[derive(Debug, Error)]
#[error("Failed to generate MCQs with AI: {cause}")]
pub struct GenerationFailure {
    #[source]
    pub cause: BackendError,
    pub fallback: Vec<Mcq>,
}

pub type Result<T> = std::result::Result<T, McqError>;
