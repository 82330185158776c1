//! Hugging Face inference API client.
//!
//! Posts `{"inputs": "<text>"}` with a bearer token to a model endpoint and
//! returns the body of a successful response untouched.

use super::ClassifierBackend;
use crate::constants::{APP_NAME, REDACTED_PLACEHOLDER};
use crate::errors::{snippet, AppError, AppResult, ClassifierError};
use reqwest::blocking::Client;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Request body for text classification.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Client for a single text-classification model endpoint.
pub struct HuggingFaceClient {
    endpoint: String,
    token: Zeroizing<String>,
    client: Client,
}

impl fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("endpoint", &self.endpoint)
            .field("token", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl HuggingFaceClient {
    /// Creates a client with no request timeout.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full model URL
    /// * `token` - API token sent as `Authorization: Bearer <token>`
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> AppResult<Self> {
        Self::build(endpoint.into(), token.into(), None)
    }

    /// Creates a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        Self::build(endpoint.into(), token.into(), Some(timeout))
    }

    fn build(endpoint: String, token: String, timeout: Option<Duration>) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            token: Zeroizing::new(token),
            client,
        })
    }

    /// The model URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ClassifierBackend for HuggingFaceClient {
    fn infer(&self, text: &str) -> AppResult<String> {
        debug!("Sending {} characters to {}", text.chars().count(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.token.as_str())
            .json(&InferenceRequest { inputs: text })
            .send()
            .map_err(|e| ClassifierError::Unavailable {
                status: e.status().map(|s| s.as_u16()),
                reason: format!("request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "Classifier returned an error response");

            return Err(ClassifierError::Unavailable {
                status: Some(status.as_u16()),
                reason: snippet(&error_text),
            }
            .into());
        }

        let body = response.text().map_err(|e| ClassifierError::Unavailable {
            status: Some(status.as_u16()),
            reason: format!("failed to read response body: {}", e),
        })?;

        debug!("Received {} byte classifier response", body.len());
        Ok(body)
    }
}
