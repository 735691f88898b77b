use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use super::GenerationBackend;
use crate::credentials::ApiCredential;
use crate::envelope::{GenerateReply, GenerateRequest, GENERATE_PATH};
use crate::error::BackendError;
use crate::normalize::normalize_records;
use crate::types::{GenerationSettings, Mcq};

const INVALID_SERVER_REPLY: &str = "Invalid response format from server";

/// Calls a generation service that holds the model credentials.
///
/// The service key is a public "anon" key sent as a bearer token. Records in
/// the reply are validated again on arrival.
#[derive(Debug, Clone)]
pub struct IntermediaryBackend {
    http_client: Client,
    endpoint: String,
    anon_key: ApiCredential,
}

impl IntermediaryBackend {
    /// Backend for the service rooted at `base_url`.
    pub fn new(base_url: &str, anon_key: ApiCredential) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH),
            anon_key,
        }
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationBackend for IntermediaryBackend {
    async fn generate(
        &self,
        content: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Mcq>, BackendError> {
        let request = GenerateRequest {
            content: content.to_string(),
            settings: settings.clone(),
        };

        info!(endpoint = %self.endpoint, "Requesting MCQs from generation service");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(self.anon_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GenerateReply<Value>>(&body) {
                Ok(GenerateReply::Error { error }) if !error.is_empty() => error,
                _ => format!("Server error: {}", status.as_u16()),
            };
            warn!(status = %status, error = %message, "Generation service error");
            return Err(BackendError::Backend(message));
        }

        match serde_json::from_str::<GenerateReply<Value>>(&body) {
            Ok(GenerateReply::Mcqs { mcqs }) => normalize_records(mcqs, settings),
            Ok(GenerateReply::Error { error }) => Err(BackendError::Backend(error)),
            Err(_) => Err(BackendError::Format(INVALID_SERVER_REPLY.into())),
        }
    }

    fn name(&self) -> &str {
        "intermediary"
    }
}
