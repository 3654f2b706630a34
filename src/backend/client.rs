//! HTTP client for the inference backend
//!
//! Endpoints:
//! - `GET /health`: liveness probe
//! - `POST /predict`: classify one text

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::errors::{AppError, PredictionError, Result};
use crate::prediction::{PredictionRequest, PredictionResult};

use super::types::{PredictRequestBody, PredictResponseBody};

/// Default backend endpoint
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:7860";

/// Default liveness probe budget (2 seconds)
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// The operations the orchestrator needs from a backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Probe liveness; every failure mode is `false`
    async fn health(&self) -> bool;

    /// Classify the request's text within its timeout budget
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionResult, PredictionError>;

    /// Base URL as shown to users
    fn location(&self) -> &str;
}

/// reqwest-backed implementation of [`Backend`]
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    location: String,
    health_timeout: Duration,
}

impl BackendClient {
    /// Create client for the default local backend
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_BACKEND_URL, DEFAULT_HEALTH_TIMEOUT)
    }

    /// Create client for a custom base URL
    pub fn with_config(base_url: &str, health_timeout: Duration) -> Result<Self> {
        Self::from_url(Url::parse(base_url)?, health_timeout)
    }

    /// Create client from an already parsed URL
    pub fn from_url(mut base_url: Url, health_timeout: Duration) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::ConfigError(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        // Url::join drops the last path segment unless it ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().build().map_err(AppError::HttpError)?;
        let location = base_url.as_str().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            location,
            health_timeout,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn classify_transport_error(&self, err: reqwest::Error, budget: Duration) -> PredictionError {
        if err.is_timeout() {
            PredictionError::TimeoutError {
                duration_ms: budget.as_millis() as u64,
            }
        } else {
            PredictionError::ConnectionError {
                url: self.location.clone(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn health(&self) -> bool {
        let url = match self.endpoint("health") {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot build health URL");
                return false;
            }
        };

        match self
            .client
            .get(url)
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) => {
                let healthy = response.status().is_success();
                debug!(status = response.status().as_u16(), healthy, "health probe answered");
                healthy
            }
            Err(e) => {
                debug!(error = %e, timeout = e.is_timeout(), "health probe failed");
                false
            }
        }
    }

    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionResult, PredictionError> {
        let url = self
            .endpoint("predict")
            .map_err(|e| PredictionError::ConnectionError {
                url: self.location.clone(),
                reason: e.to_string(),
            })?;

        let body = PredictRequestBody {
            text: request.text.as_str(),
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e, request.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::BackendError {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.classify_transport_error(e, request.timeout))?;

        PredictResponseBody::from_slice(&bytes)?.into_result()
    }

    fn location(&self) -> &str {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new().unwrap();
        assert_eq!(client.location(), "http://localhost:7860");
        assert_eq!(client.base_url().as_str(), "http://localhost:7860/");
    }

    #[test]
    fn test_client_with_path_prefix() {
        let base = "http://example.com/sarcasm";
        let client = BackendClient::with_config(base, Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint("predict").unwrap().as_str(),
            "http://example.com/sarcasm/predict"
        );
        assert_eq!(client.location(), "http://example.com/sarcasm");
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let result = BackendClient::with_config("not a url", DEFAULT_HEALTH_TIMEOUT);
        assert!(matches!(result, Err(AppError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_rejects_non_base_url() {
        let result =
            BackendClient::with_config("mailto:someone@example.com", DEFAULT_HEALTH_TIMEOUT);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
