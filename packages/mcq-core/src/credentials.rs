//! Credential handling with secure memory.
//!
//! Keys are wrapped in `secrecy` so they never reach logs or error messages,
//! and values that look like unfilled `.env` templates are rejected up front.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::McqError;

/// Backend key (`GEMINI_API_KEY` or `MCQ_BACKEND_ANON_KEY`) that prints as
/// `[REDACTED]` and is only read back when a request is built.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// Expose the secret value for use in a request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

const PLACEHOLDER_VALUES: &[&str] = &[
    "changeme", "change-me", "xxx", "todo", "none", "null", "undefined", "secret", "api-key",
    "api_key", "apikey",
];

/// Whether `value` is empty or an obvious template placeholder.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    if value.starts_with('<') && value.ends_with('>') {
        return true;
    }

    let lower = value.to_ascii_lowercase();
    lower.starts_with("your")
        || lower.contains("placeholder")
        || PLACEHOLDER_VALUES.contains(&lower.as_str())
        || lower.chars().all(|c| c == 'x' || c == '*' || c == '.')
}

/// A named credential read from configuration.
#[derive(Clone)]
pub struct ApiCredential {
    name: String,
    secret: SecretString,
}

impl ApiCredential {
    /// Wrap `value`, rejecting empty and placeholder values.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, McqError> {
        let name = name.into();
        let value = value.into();
        if is_placeholder(&value) {
            return Err(McqError::Configuration(format!(
                "{} is empty or still a placeholder value",
                name
            )));
        }
        Ok(Self {
            name,
            secret: SecretString::new(value.trim()),
        })
    }

    /// Like [`new`](Self::new), treating a missing value as an error.
    pub fn require(name: &str, value: Option<String>) -> Result<Self, McqError> {
        match value {
            Some(value) => Self::new(name, value),
            None => Err(McqError::Configuration(format!("{} is not set", name))),
        }
    }

    pub fn expose(&self) -> &str {
        self.secret.expose()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("name", &self.name)
            .field("secret", &self.secret)
            .finish()
    }
}
