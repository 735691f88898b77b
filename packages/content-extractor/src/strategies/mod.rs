//! Retrieval strategy implementations.
//!
//! # Available Strategies
//!
//! - `ProxyStrategy` - Public CORS proxies (allorigins, corsproxy, codetabs, scrape-it)
//! - `MockStrategy` - For testing

mod mock;
mod proxy;

pub use mock::MockStrategy;
pub use proxy::{default_strategies, ProxyStrategy, ResponseShape, URL_PLACEHOLDER};

// Re-export from traits for convenience
pub use crate::traits::strategy::{ContentStrategy, ExtractedContent};
