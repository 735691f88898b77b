//! Ordered, deadline-bound strategy orchestration.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::clean::clean_html;
use crate::error::{ExtractionError, Result, StrategyError, StrategyResult};
use crate::strategies::default_strategies;
use crate::traits::strategy::{ContentStrategy, ExtractedContent};

/// Tuning for [`ContentExtractor`].
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Deadline for each strategy attempt
    pub attempt_timeout: Duration,

    /// Cleaned text shorter than this (in characters) counts as a failure
    pub min_content_chars: usize,

    /// Returned text is cut to this many characters
    pub max_content_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(15),
            min_content_chars: 100,
            max_content_chars: 8000,
        }
    }
}

impl ExtractorConfig {
    /// Set the per-attempt deadline.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Set the minimum usable length.
    pub fn with_min_content_chars(mut self, chars: usize) -> Self {
        self.min_content_chars = chars;
        self
    }

    /// Set the truncation length.
    pub fn with_max_content_chars(mut self, chars: usize) -> Self {
        self.max_content_chars = chars;
        self
    }
}

/// Turns a URL into a bounded plain-text excerpt.
///
/// Strategies run strictly one after another. Each attempt is raced against
/// its deadline; a timeout, error, or too-short result moves on to the next
/// strategy and no strategy is retried.
///
/// # Example
///
/// ```rust,ignore
/// use content_extractor::ContentExtractor;
///
/// let extractor = ContentExtractor::new();
/// let text = extractor.extract("https://example.com/article").await?;
/// assert!(text.chars().count() <= 8000);
/// ```
#[derive(Clone)]
pub struct ContentExtractor {
    strategies: Vec<Arc<dyn ContentStrategy>>,
    config: ExtractorConfig,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor {
    /// Extractor over the default proxy list with default limits.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Extractor over the default proxy list using a shared HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self::with_strategies(default_strategies(&client))
    }

    /// Extractor over a custom strategy list, tried in the given order.
    pub fn with_strategies(strategies: Vec<Arc<dyn ContentStrategy>>) -> Self {
        Self {
            strategies,
            config: ExtractorConfig::default(),
        }
    }

    /// Replace the limits.
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a strategy at the lowest priority.
    pub fn push_strategy(mut self, strategy: Arc<dyn ContentStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Current limits.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Number of strategies that will be tried.
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Extract readable text from `url`.
    ///
    /// No URL validation happens here; callers normalize input first.
    pub async fn extract(&self, url: &str) -> Result<String> {
        self.extract_detailed(url).await.map(|content| content.text)
    }

    /// Like [`extract`](Self::extract), also reporting which strategy succeeded.
    pub async fn extract_detailed(&self, url: &str) -> Result<ExtractedContent> {
        let mut last_error: Option<StrategyError> = None;

        for (index, strategy) in self.strategies.iter().enumerate() {
            let attempt = index + 1;
            info!(url = %url, strategy = %strategy.name(), attempt, "Trying scraping strategy");

            match self.try_strategy(strategy.as_ref(), url).await {
                Ok(text) => {
                    let content = ExtractedContent {
                        url: url.to_string(),
                        text,
                        strategy: strategy.name().to_string(),
                        attempt,
                        fetched_at: Utc::now(),
                    };
                    info!(
                        url = %url,
                        strategy = %content.strategy,
                        chars = content.char_count(),
                        "Extracted content"
                    );
                    return Ok(content);
                }
                Err(e) => {
                    warn!(url = %url, strategy = %strategy.name(), error = %e, "Strategy failed");
                    last_error = Some(e);
                }
            }
        }

        Err(ExtractionError::exhausted(
            self.strategies.len(),
            last_error.as_ref(),
        ))
    }

    /// One attempt: fetch under deadline, clean, check length, truncate.
    async fn try_strategy(&self, strategy: &dyn ContentStrategy, url: &str) -> StrategyResult<String> {
        let timeout = self.config.attempt_timeout;

        // Dropping the fetch future on expiry cancels the request and the timer together
        let raw = tokio::time::timeout(timeout, strategy.attempt(url))
            .await
            .map_err(|_| StrategyError::Timeout(timeout))??;

        if raw.is_empty() {
            return Err(StrategyError::NoContent);
        }

        let cleaned = clean_html(&raw);
        let length = cleaned.chars().count();
        if length < self.config.min_content_chars {
            return Err(StrategyError::TooShort {
                length,
                minimum: self.config.min_content_chars,
            });
        }

        Ok(cleaned.chars().take(self.config.max_content_chars).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::MockStrategy;

    fn article(paragraphs: usize) -> String {
        let body: String = (0..paragraphs)
            .map(|i| format!("<p>Paragraph {i} explains one more idea about the topic.</p>\n"))
            .collect();
        format!("<html><body><nav>Menu entries here</nav><main>{body}</main></body></html>")
    }

    #[tokio::test]
    async fn test_first_usable_strategy_wins() {
        let first = MockStrategy::failing_with_status("first", 500);
        let second = MockStrategy::returning("second", article(5));
        let third = MockStrategy::returning("third", article(5));

        let extractor = ContentExtractor::with_strategies(vec![
            Arc::new(first.clone()),
            Arc::new(second.clone()),
            Arc::new(third.clone()),
        ]);

        let content = extractor
            .extract_detailed("https://example.com/a")
            .await
            .unwrap();

        assert_eq!(content.strategy, "second");
        assert_eq!(content.attempt, 2);
        assert!(content.text.starts_with("Paragraph 0"));
        assert!(!content.text.contains("Menu"));
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
        assert_eq!(third.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_content_advances_to_next_strategy() {
        let short = MockStrategy::returning("short", "<main><p>Too little text here.</p></main>");
        let long = MockStrategy::returning("long", article(4));

        let extractor =
            ContentExtractor::with_strategies(vec![Arc::new(short.clone()), Arc::new(long)]);

        let content = extractor.extract_detailed("https://example.com").await.unwrap();
        assert_eq!(content.strategy, "long");
        assert_eq!(short.call_count(), 1);
    }

    #[tokio::test]
    async fn test_truncates_to_max_chars() {
        let extractor =
            ContentExtractor::with_strategies(vec![Arc::new(MockStrategy::returning("big", article(400)))]);

        let content = extractor.extract_detailed("https://example.com").await.unwrap();
        assert_eq!(content.char_count(), 8000);
    }

    #[tokio::test]
    async fn test_timeout_advances_without_waiting_for_slow_strategy() {
        let slow = MockStrategy::returning("slow", article(5)).with_delay(Duration::from_secs(30));
        let fast = MockStrategy::returning("fast", article(5));

        let extractor = ContentExtractor::with_strategies(vec![Arc::new(slow), Arc::new(fast)])
            .with_config(ExtractorConfig::default().with_attempt_timeout(Duration::from_millis(50)));

        let started = std::time::Instant::now();
        let content = extractor.extract_detailed("https://example.com").await.unwrap();

        assert_eq!(content.strategy, "fast");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_all_strategies_failing() {
        let extractor = ContentExtractor::with_strategies(vec![
            Arc::new(MockStrategy::empty("a")),
            Arc::new(MockStrategy::failing_with_status("b", 429)),
            Arc::new(MockStrategy::returning("c", "<p>tiny</p>")),
        ]);

        let err = extractor.extract("https://example.com").await.unwrap_err();
        assert_eq!(err.attempted, 3);
        assert!(err.to_string().contains("after trying 3 different methods"));
        assert!(err.last_error.contains("too short"));
    }

    #[tokio::test]
    async fn test_no_strategies() {
        let extractor = ContentExtractor::with_strategies(Vec::new());
        let err = extractor.extract("https://example.com").await.unwrap_err();
        assert_eq!(err.attempted, 0);
    }

    #[test]
    fn test_default_extractor_uses_four_proxies() {
        assert_eq!(ContentExtractor::new().strategy_count(), 4);
        let config = ExtractorConfig::default();
        assert_eq!(config.attempt_timeout, Duration::from_secs(15));
        assert_eq!(config.min_content_chars, 100);
        assert_eq!(config.max_content_chars, 8000);
    }
}
