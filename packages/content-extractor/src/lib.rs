//! Article Content Extraction
//!
//! Fetches a web page through public CORS proxies and reduces it to a
//! bounded plain-text excerpt suitable for a generation prompt.
//!
//! # Design
//!
//! - Several interchangeable proxy strategies, tried in a fixed order
//! - Each attempt bound by a deadline; failures advance, never retry
//! - Boilerplate (scripts, navigation, footers, cookie banners) stripped
//! - Output capped at 8000 characters; under 100 characters is a failure
//!
//! # Usage
//!
//! ```rust,ignore
//! use content_extractor::ContentExtractor;
//!
//! let extractor = ContentExtractor::new();
//! match extractor.extract("https://example.com/article").await {
//!     Ok(text) => println!("{text}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The `ContentStrategy` abstraction
//! - [`strategies`] - Proxy strategies and a mock for tests
//! - [`clean`] - HTML to text cleaning pipeline
//! - [`extractor`] - Ordered, deadline-bound orchestration

pub mod clean;
pub mod error;
pub mod extractor;
pub mod strategies;
pub mod traits;

// Re-export core types at crate root
pub use clean::clean_html;
pub use error::{ExtractionError, StrategyError};
pub use extractor::{ContentExtractor, ExtractorConfig};
pub use strategies::{default_strategies, MockStrategy, ProxyStrategy, ResponseShape};
pub use traits::strategy::{ContentStrategy, ExtractedContent};
