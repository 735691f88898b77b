//! Typed errors for the content extractor.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! single failed strategy apart from an exhausted strategy list.

use std::time::Duration;

use thiserror::Error;

/// Errors from a single retrieval strategy.
///
/// These never escape [`ContentExtractor::extract`](crate::ContentExtractor::extract)
/// directly; a failed strategy only advances the extractor to the next one.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Transport failure talking to the proxy
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Proxy answered with a non-success status
    #[error("proxy returned HTTP {status}")]
    Status { status: u16 },

    /// Attempt exceeded its deadline
    #[error("Strategy timeout after {}s", .0.as_secs())]
    Timeout(Duration),

    /// JSON-shaped proxy reply could not be decoded
    #[error("invalid proxy JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reply decoded, but carried no usable string payload
    #[error("No content received or invalid content type")]
    NoContent,

    /// Cleaned content fell below the usable minimum
    #[error("Extracted content is too short ({length} characters, need at least {minimum})")]
    TooShort { length: usize, minimum: usize },
}

/// Every strategy failed for a URL.
///
/// The message names how many strategies were tried, the usual causes,
/// what the user can do about it, and the last underlying failure.
#[derive(Debug, Error)]
#[error(
    "Unable to extract content from URL after trying {attempted} different methods.\n\n\
     This could be due to:\n\
     • The website blocking automated requests\n\
     • CORS restrictions\n\
     • The website requiring JavaScript to load content\n\
     • Network connectivity issues\n\
     • The URL requiring authentication\n\n\
     Please try:\n\
     • Copying and pasting the content directly using the text input option\n\
     • Checking if the URL is publicly accessible\n\
     • Trying a different article URL\n\
     • Waiting a few minutes and trying again\n\n\
     Last error: {last_error}"
)]
pub struct ExtractionError {
    /// Number of strategies attempted
    pub attempted: usize,

    /// Description of the final strategy's failure
    pub last_error: String,
}

impl ExtractionError {
    /// Build from the attempt count and the last strategy failure (if any).
    pub fn exhausted(attempted: usize, last_error: Option<&StrategyError>) -> Self {
        Self {
            attempted,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Unknown error".to_string()),
        }
    }
}

/// Result type alias for whole-extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for single strategy attempts.
pub type StrategyResult<T> = std::result::Result<T, StrategyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_lists_count_and_last_error() {
        let last = StrategyError::Status { status: 403 };
        let err = ExtractionError::exhausted(4, Some(&last));
        let msg = err.to_string();

        assert!(msg.contains("after trying 4 different methods"));
        assert!(msg.contains("blocking automated requests"));
        assert!(msg.contains("CORS restrictions"));
        assert!(msg.contains("requiring JavaScript"));
        assert!(msg.contains("requiring authentication"));
        assert!(msg.ends_with("Last error: proxy returned HTTP 403"));
    }

    #[test]
    fn test_exhausted_without_strategies() {
        let err = ExtractionError::exhausted(0, None);
        assert_eq!(err.attempted, 0);
        assert!(err.to_string().ends_with("Last error: Unknown error"));
    }

    #[test]
    fn test_timeout_message() {
        let err = StrategyError::Timeout(Duration::from_secs(15));
        assert_eq!(err.to_string(), "Strategy timeout after 15s");
    }
}
