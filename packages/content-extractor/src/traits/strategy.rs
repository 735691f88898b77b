//! Strategy trait for pluggable page retrieval.
//!
//! A strategy is one self-contained way of getting a page's raw markup:
//! it knows which proxy endpoint to call, how to embed the target URL,
//! and how to read the proxy's reply.
//!
//! # Usage
//!
//! ```rust,ignore
//! use content_extractor::{ContentStrategy, ProxyStrategy};
//!
//! let strategy = ProxyStrategy::corsproxy();
//! let html = strategy.attempt("https://example.com/article").await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StrategyResult;

/// Retrieval capability tried by [`ContentExtractor`](crate::ContentExtractor).
///
/// Implementations return the raw page body (usually HTML). Cleaning and
/// length checks happen in the extractor, not here.
#[async_trait]
pub trait ContentStrategy: Send + Sync {
    /// Fetch the raw markup for `url`.
    async fn attempt(&self, url: &str) -> StrategyResult<String>;

    /// Strategy name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Cleaned article text plus where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Target URL as given by the caller
    pub url: String,

    /// Cleaned, truncated plain text
    pub text: String,

    /// Name of the strategy that produced the text
    pub strategy: String,

    /// 1-based position of that strategy in the list
    pub attempt: usize,

    /// When extraction finished
    pub fetched_at: DateTime<Utc>,
}

impl ExtractedContent {
    /// Length of the text in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
