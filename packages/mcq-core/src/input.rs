//! Article URL validation for front-ends.

use url::Url;

use crate::error::McqError;

/// Validate a user-entered article URL, adding `https://` when no scheme
/// is given.
///
/// Accepts http(s) URLs whose host is a dotted domain name or an IP address.
pub fn normalize_article_url(input: &str) -> Result<String, McqError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(McqError::InvalidUrl("Please enter a URL".into()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let invalid = || McqError::InvalidUrl(format!("Please enter a valid URL: {}", trimmed));
    let url = Url::parse(&candidate).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    let host_ok = match url.host() {
        Some(url::Host::Domain(domain)) => {
            let labels: Vec<&str> = domain.split('.').collect();
            labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
        }
        Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_)) => true,
        None => false,
    };
    if !host_ok {
        return Err(invalid());
    }

    Ok(url.to_string())
}
