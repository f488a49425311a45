//! Reqwest-backed signup adapter.
//!
//! Owns transport details only: JSON serialisation, timeout, and mapping of
//! non-success responses into the service's human-readable failure message.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::SignupRequestDto;
use crate::domain::ports::{SignupRequest, SignupService, SignupServiceError};
use crate::outbound::http::{HttpClientConfig, failure_message};

/// Signup adapter performing HTTP POST requests against one endpoint.
pub struct HttpSignupService {
    client: Client,
    endpoint: Url,
}

impl HttpSignupService {
    /// Build an adapter with default identity and timeout settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        Self::with_config(endpoint, &HttpClientConfig::default())
    }

    /// Build an adapter with explicit identity and timeout settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_config(endpoint: Url, config: &HttpClientConfig) -> Result<Self, reqwest::Error> {
        let client = config.build_client()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl SignupService for HttpSignupService {
    async fn create(&self, request: SignupRequest) -> Result<(), SignupServiceError> {
        let body = SignupRequestDto::from(&request);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Err(SignupServiceError::rejected(failure_message(
            status,
            bytes.as_ref(),
        )))
    }
}

fn map_transport_error(error: reqwest::Error) -> SignupServiceError {
    SignupServiceError::transport(error.to_string())
}
