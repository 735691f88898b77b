//! Proxy-based retrieval strategies.
//!
//! Each public CORS proxy differs in two ways: how the target URL is embedded
//! in the request, and whether the reply is the raw page or a JSON wrapper.
//! Both live together on [`ProxyStrategy`] so every proxy can be tested alone.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::error::{StrategyError, StrategyResult};
use crate::traits::strategy::ContentStrategy;

/// Placeholder replaced by the percent-encoded target URL.
pub const URL_PLACEHOLDER: &str = "{url}";

/// How a proxy wraps the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// Reply body is the page itself
    Text,

    /// Reply is a JSON object; the page is the first truthy field listed
    Json { fields: Vec<String> },
}

impl ResponseShape {
    /// JSON reply read from the given fields, in priority order.
    pub fn json<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Json {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Pull the page markup out of a proxy reply body.
    pub fn read(&self, body: &str) -> StrategyResult<String> {
        match self {
            Self::Text => {
                if body.is_empty() {
                    Err(StrategyError::NoContent)
                } else {
                    Ok(body.to_string())
                }
            }
            Self::Json { fields } => {
                let data: Value = serde_json::from_str(body)?;
                // First truthy field wins; a truthy non-string is still a failure
                let picked = fields
                    .iter()
                    .filter_map(|field| data.get(field))
                    .find(|value| is_truthy(value));

                match picked {
                    Some(Value::String(content)) => Ok(content.clone()),
                    _ => Err(StrategyError::NoContent),
                }
            }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strategy that fetches a page through a public CORS proxy.
///
/// # Example
///
/// ```rust,ignore
/// use content_extractor::strategies::{ProxyStrategy, ResponseShape};
///
/// let strategy = ProxyStrategy::new(
///     "my-proxy",
///     "https://proxy.example/fetch?target={url}",
///     ResponseShape::json(["html"]),
/// );
/// ```
#[derive(Clone)]
pub struct ProxyStrategy {
    name: String,
    template: String,
    shape: ResponseShape,
    client: reqwest::Client,
}

impl ProxyStrategy {
    /// Create a proxy strategy from a URL template containing `{url}`.
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        shape: ResponseShape,
    ) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            shape,
            client: reqwest::Client::new(),
        }
    }

    /// Use a shared HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// `api.allorigins.win` - JSON wrapper with the page in `contents`.
    pub fn allorigins() -> Self {
        Self::new(
            "allorigins",
            "https://api.allorigins.win/get?url={url}",
            ResponseShape::json(["contents"]),
        )
    }

    /// `corsproxy.io` - raw page body.
    pub fn corsproxy() -> Self {
        Self::new("corsproxy", "https://corsproxy.io/?{url}", ResponseShape::Text)
    }

    /// `api.codetabs.com` - raw page body.
    pub fn codetabs() -> Self {
        Self::new(
            "codetabs",
            "https://api.codetabs.com/v1/proxy?quest={url}",
            ResponseShape::Text,
        )
    }

    /// `scrape-it.cloud` - JSON wrapper with `content`, `text` or `body`.
    pub fn scrape_it() -> Self {
        Self::new(
            "scrape-it",
            "https://scrape-it.cloud/api/scrape?url={url}",
            ResponseShape::json(["content", "text", "body"]),
        )
    }

    /// Response shape of this proxy.
    pub fn shape(&self) -> &ResponseShape {
        &self.shape
    }

    /// Build the proxy request URL for a target page.
    pub fn proxy_url(&self, target: &str) -> String {
        self.template
            .replace(URL_PLACEHOLDER, &urlencoding::encode(target))
    }
}

#[async_trait]
impl ContentStrategy for ProxyStrategy {
    async fn attempt(&self, url: &str) -> StrategyResult<String> {
        let proxy_url = self.proxy_url(url);
        debug!(strategy = %self.name, proxy_url = %proxy_url, "Proxy fetch starting");

        let response = self
            .client
            .get(&proxy_url)
            .send()
            .await
            .map_err(|e| StrategyError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StrategyError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| StrategyError::Http(Box::new(e)))?;

        self.shape.read(&body)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The default proxy list in priority order, sharing one HTTP client.
pub fn default_strategies(client: &reqwest::Client) -> Vec<Arc<dyn ContentStrategy>> {
    [
        ProxyStrategy::allorigins(),
        ProxyStrategy::corsproxy(),
        ProxyStrategy::codetabs(),
        ProxyStrategy::scrape_it(),
    ]
    .into_iter()
    .map(|s| Arc::new(s.with_client(client.clone())) as Arc<dyn ContentStrategy>)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_url_encodes_target() {
        let strategy = ProxyStrategy::allorigins();
        assert_eq!(
            strategy.proxy_url("https://example.com/a b?x=1&y=2"),
            "https://api.allorigins.win/get?url=https%3A%2F%2Fexample.com%2Fa%20b%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_default_order() {
        let client = reqwest::Client::new();
        let names: Vec<String> = default_strategies(&client)
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["allorigins", "corsproxy", "codetabs", "scrape-it"]);
    }

    #[test]
    fn test_builtin_templates() {
        let target = "https://example.com";
        assert_eq!(
            ProxyStrategy::corsproxy().proxy_url(target),
            "https://corsproxy.io/?https%3A%2F%2Fexample.com"
        );
        assert_eq!(
            ProxyStrategy::codetabs().proxy_url(target),
            "https://api.codetabs.com/v1/proxy?quest=https%3A%2F%2Fexample.com"
        );
        assert_eq!(
            ProxyStrategy::scrape_it().proxy_url(target),
            "https://scrape-it.cloud/api/scrape?url=https%3A%2F%2Fexample.com"
        );
    }

    #[test]
    fn test_text_shape() {
        assert_eq!(ResponseShape::Text.read("<p>hi</p>").unwrap(), "<p>hi</p>");
        assert!(matches!(
            ResponseShape::Text.read(""),
            Err(StrategyError::NoContent)
        ));
    }

    #[test]
    fn test_json_shape_single_field() {
        let shape = ResponseShape::json(["contents"]);
        let body = r#"{"contents":"<html>page</html>","status":{"http_code":200}}"#;
        assert_eq!(shape.read(body).unwrap(), "<html>page</html>");
    }

    #[test]
    fn test_json_shape_falls_through_empty_fields() {
        let shape = ResponseShape::json(["content", "text", "body"]);
        let body = r#"{"content":"","text":null,"body":"<p>body</p>"}"#;
        assert_eq!(shape.read(body).unwrap(), "<p>body</p>");
    }

    #[test]
    fn test_json_shape_rejects_non_string() {
        let shape = ResponseShape::json(["content", "text"]);
        let body = r#"{"content":{"html":"x"},"text":"fallback"}"#;
        assert!(matches!(shape.read(body), Err(StrategyError::NoContent)));

        let missing = r#"{"other":"x"}"#;
        assert!(matches!(shape.read(missing), Err(StrategyError::NoContent)));
    }

    #[test]
    fn test_json_shape_invalid_json() {
        let shape = ResponseShape::json(["contents"]);
        assert!(matches!(
            shape.read("<html>not json</html>"),
            Err(StrategyError::Json(_))
        ));
    }
}
