//! Mock strategy for testing.
//!
//! Provides a configurable implementation of the ContentStrategy trait.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{StrategyError, StrategyResult};
use crate::traits::strategy::ContentStrategy;

#[derive(Debug, Clone)]
enum MockReply {
    Body(String),
    Status(u16),
    NoContent,
}

/// Mock strategy for testing.
///
/// Returns a canned body or failure, optionally after a delay, and records
/// every URL it was asked for.
///
/// # Example
///
/// ```rust
/// use content_extractor::strategies::MockStrategy;
///
/// let ok = MockStrategy::returning("ok", "<main>...</main>");
/// let blocked = MockStrategy::failing_with_status("blocked", 403);
/// ```
pub struct MockStrategy {
    name: String,
    reply: MockReply,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockStrategy {
    /// Strategy that returns `body` for any URL.
    pub fn returning(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_reply(name, MockReply::Body(body.into()))
    }

    /// Strategy whose proxy answers with a non-success status.
    pub fn failing_with_status(name: impl Into<String>, status: u16) -> Self {
        Self::with_reply(name, MockReply::Status(status))
    }

    /// Strategy whose proxy answers without usable content.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::with_reply(name, MockReply::NoContent)
    }

    fn with_reply(name: impl Into<String>, reply: MockReply) -> Self {
        Self {
            name: name.into(),
            reply,
            delay: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Wait this long before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of attempts made against this strategy.
    pub fn call_count(&self) -> usize {
        self.calls.read().map(|c| c.len()).unwrap_or(0)
    }

    /// URLs requested so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Clone for MockStrategy {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            reply: self.reply.clone(),
            delay: self.delay,
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl ContentStrategy for MockStrategy {
    async fn attempt(&self, url: &str) -> StrategyResult<String> {
        if let Ok(mut calls) = self.calls.write() {
            calls.push(url.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            MockReply::Body(body) => Ok(body.clone()),
            MockReply::Status(status) => Err(StrategyError::Status { status: *status }),
            MockReply::NoContent => Err(StrategyError::NoContent),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_across_clones() {
        let mock = MockStrategy::returning("m", "body");
        let clone = mock.clone();

        assert_eq!(clone.attempt("https://a.example").await.unwrap(), "body");
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls(), vec!["https://a.example".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_replies() {
        let blocked = MockStrategy::failing_with_status("b", 403);
        assert!(matches!(
            blocked.attempt("u").await,
            Err(StrategyError::Status { status: 403 })
        ));

        let empty = MockStrategy::empty("e");
        assert!(matches!(empty.attempt("u").await, Err(StrategyError::NoContent)));
    }
}
