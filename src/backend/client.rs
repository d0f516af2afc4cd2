//! Blocking HTTP client for the classification service.
//!
//! The ticket feed is a webhook returning JSON in one of the envelope shapes
//! the normalizer understands. The remaining endpoints live under `api_base`
//! and answer `{success, ...}` or `{error}`.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{
    feed_rejection, ApiResponse, AutoReplyRequest, ClassifyRequest, FeedbackRequest, HealthStatus,
};
use crate::config::BackendConfig;
use crate::triage::Category;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend refused: {0}")]
    Rejected(String),
}

/// The calls the UI makes in the background. Split out so the worker can be
/// driven by a fake in tests.
pub trait TriageBackend: Send + Sync {
    fn fetch_tickets(&self) -> Result<Value, BackendError>;
    fn send_auto_reply(
        &self,
        ticket_id: &str,
        reply_text: Option<&str>,
    ) -> Result<ApiResponse, BackendError>;
    fn submit_feedback(
        &self,
        ticket_id: &str,
        category: Category,
    ) -> Result<ApiResponse, BackendError>;
}

pub struct ClassifierClient {
    http: Client,
    tickets_url: String,
    api_base: String,
    health_url: String,
    provider: String,
}

impl ClassifierClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            tickets_url: config.tickets_url.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            health_url: config.health_url.clone(),
            provider: config.provider.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        let bytes = resp.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn checked(response: ApiResponse) -> Result<ApiResponse, BackendError> {
        match response.rejection() {
            Some(reason) => Err(BackendError::Rejected(reason)),
            None => Ok(response),
        }
    }

    fn get_api(&self, url: &str) -> Result<ApiResponse, BackendError> {
        tracing::debug!(url, "GET");
        Self::checked(Self::decode(self.http.get(url).send()?)?)
    }

    fn post_api<B: Serialize>(&self, url: &str, body: &B) -> Result<ApiResponse, BackendError> {
        tracing::debug!(url, "POST");
        Self::checked(Self::decode(self.http.post(url).json(body).send()?)?)
    }

    /// Ask the backend to pull new mail and classify it
    pub fn fetch_and_classify(&self) -> Result<ApiResponse, BackendError> {
        self.get_api(&self.endpoint("emails/fetch-classify"))
    }

    /// Classify one raw email. Uses the configured provider unless overridden.
    pub fn classify_email(
        &self,
        email: &str,
        provider: Option<&str>,
    ) -> Result<ApiResponse, BackendError> {
        let body = ClassifyRequest {
            email,
            provider: provider.unwrap_or(&self.provider),
        };
        self.post_api(&self.endpoint("emails/classify"), &body)
    }

    pub fn health_check(&self) -> Result<HealthStatus, BackendError> {
        tracing::debug!(url = %self.health_url, "GET");
        let health: HealthStatus = Self::decode(self.http.get(&self.health_url).send()?)?;
        if health.is_ok() {
            Ok(health)
        } else {
            Err(BackendError::Rejected(
                health
                    .message
                    .unwrap_or_else(|| "backend reported an error".to_string()),
            ))
        }
    }
}

impl TriageBackend for ClassifierClient {
    fn fetch_tickets(&self) -> Result<Value, BackendError> {
        tracing::debug!(url = %self.tickets_url, "GET");
        let body: Value = Self::decode(self.http.get(&self.tickets_url).send()?)?;
        match feed_rejection(&body) {
            Some(reason) => Err(BackendError::Rejected(reason)),
            None => Ok(body),
        }
    }

    fn send_auto_reply(
        &self,
        ticket_id: &str,
        reply_text: Option<&str>,
    ) -> Result<ApiResponse, BackendError> {
        let body = AutoReplyRequest::new(ticket_id, reply_text);
        self.post_api(&self.endpoint("emails/auto-reply"), &body)
    }

    fn submit_feedback(
        &self,
        ticket_id: &str,
        category: Category,
    ) -> Result<ApiResponse, BackendError> {
        let body = FeedbackRequest {
            email_id: ticket_id,
            correct_classification: category.as_str(),
        };
        self.post_api(&self.endpoint("emails/feedback"), &body)
    }
}
