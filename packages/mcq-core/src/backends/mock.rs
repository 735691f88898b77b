use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::GenerationBackend;
use crate::error::BackendError;
use crate::normalize::normalize_reply;
use crate::types::{GenerationSettings, Mcq};

/// A recorded `generate` call.
#[derive(Debug, Clone)]
pub struct MockBackendCall {
    pub content: String,
    pub settings: GenerationSettings,
}

/// Mock backend for testing.
///
/// Replays a canned model reply through the normal reply normalization, or
/// fails with a fixed error.
#[derive(Clone)]
pub struct MockBackend {
    reply: Result<String, BackendError>,
    calls: Arc<RwLock<Vec<MockBackendCall>>>,
}

impl MockBackend {
    /// Answer every call with `raw`, as if the model had produced it.
    pub fn replying(raw: impl Into<String>) -> Self {
        Self {
            reply: Ok(raw.into()),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fail every call with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self {
            reply: Err(error),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<MockBackendCall> {
        self.calls.read().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(
        &self,
        content: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Mcq>, BackendError> {
        if let Ok(mut calls) = self.calls.write() {
            calls.push(MockBackendCall {
                content: content.to_string(),
                settings: settings.clone(),
            });
        }

        match &self.reply {
            Ok(raw) => normalize_reply(raw, settings),
            Err(error) => Err(error.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
