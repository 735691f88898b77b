//! Request and reply bodies of the generation service.
//!
//! `POST /functions/v1/generate-mcqs` takes a [`GenerateRequest`] and answers
//! with either `{"mcqs": [...]}` or `{"error": "..."}`.

use serde::{Deserialize, Serialize};

use crate::types::{GenerationSettings, Mcq};

/// Path of the generation endpoint, relative to the service root.
pub const GENERATE_PATH: &str = "/functions/v1/generate-mcqs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub content: String,
    pub settings: GenerationSettings,
}

/// Service reply.
///
/// Clients decode with `T = serde_json::Value` and validate records
/// themselves; the service encodes with `T = Mcq`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerateReply<T = Mcq> {
    Mcqs { mcqs: Vec<T> },
    Error { error: String },
}

impl<T> GenerateReply<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}
