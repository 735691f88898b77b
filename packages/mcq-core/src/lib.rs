//! Multiple-choice question generation
//!
//! Turns an article URL or pasted text into a validated list of
//! multiple-choice questions.
//!
//! # Flow
//!
//! ```text
//! URL ──► ContentExtractor ──► text ──┐
//!                                     ├─► GenerationBackend ──► normalize ──► Vec<Mcq>
//! pasted text ────────────────────────┘          │
//!                                                └─ failure ──► fallback questions
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use content_extractor::ContentExtractor;
//! use mcq_core::{BackendConfig, GenerationSettings, McqGenerator, McqSession};
//!
//! let backend = BackendConfig::from_env()?.build_backend();
//! let session = McqSession::new(ContentExtractor::new(), McqGenerator::new(backend));
//!
//! let mcqs = session
//!     .generate_from_url("https://example.com/article", &GenerationSettings::default())
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Question records and settings
//! - [`prompt`] - Model prompt construction
//! - [`normalize`] - Reply parsing, repair and validation
//! - [`backends`] - Gemini, generation-service and mock backends
//! - [`generator`] - Backend calls with fallback
//! - [`session`] - Extract-then-generate state for front-ends

pub mod backends;
pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod input;
pub mod normalize;
pub mod prompt;
pub mod session;
pub mod types;

pub use backends::{GeminiBackend, GenerationBackend, IntermediaryBackend, MockBackend};
pub use config::BackendConfig;
pub use credentials::{ApiCredential, SecretString};
pub use envelope::{GenerateReply, GenerateRequest, GENERATE_PATH};
pub use error::{BackendError, GenerationFailure, McqError, Result};
pub use fallback::fallback_mcqs;
pub use generator::McqGenerator;
pub use input::normalize_article_url;
pub use normalize::{normalize_records, normalize_reply, parse_reply};
pub use prompt::build_prompt;
pub use session::{McqSession, Source};
pub use types::{
    CorrectAnswer, Difficulty, GenerationSettings, Mcq, QuestionType, ANSWER_OPTION_CHOICES,
    MAX_QUESTIONS, MIN_QUESTIONS,
};
