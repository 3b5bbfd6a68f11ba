//! Backend HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use quill_auth::traits::{CredentialExchange, IdentityVerifier};
use quill_core::config::BackendConfig;
use quill_core::error::{AppError, ErrorKind};
use quill_core::result::AppResult;
use quill_entity::{BackendUser, ExchangeRequest, ExchangeResponse, IssuedCredential, MeResponse};

/// Client for the backend's `/auth` endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads a 2xx body, or describes a non-2xx answer.
    async fn read_body(response: Response) -> Result<String, (StatusCode, String)> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            Ok(body)
        } else {
            Err((status, body))
        }
    }
}

fn transport_error(endpoint: &str, error: reqwest::Error) -> AppError {
    if error.is_connect() || error.is_timeout() {
        AppError::with_source(
            ErrorKind::NetworkUnavailable,
            format!("Backend unreachable at {endpoint}"),
            error,
        )
    } else {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("Request to {endpoint} failed"),
            error,
        )
    }
}

#[async_trait]
impl CredentialExchange for BackendClient {
    async fn exchange(&self, request: &ExchangeRequest) -> AppResult<IssuedCredential> {
        let endpoint = self.url("/auth/google");
        debug!(endpoint = %endpoint, email = %request.email, "Exchanging provider identity");

        let response = self
            .client
            .post(&endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        let body = Self::read_body(response).await.map_err(|(status, body)| {
            warn!(status = %status, "Backend refused credential exchange");
            AppError::provider_exchange(format!("Backend answered {status}: {body}"))
        })?;

        let parsed: ExchangeResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::with_source(
                ErrorKind::ProviderExchange,
                "Malformed credential exchange response",
                e,
            )
        })?;
        parsed.into_issued()
    }
}

#[async_trait]
impl IdentityVerifier for BackendClient {
    async fn fetch_identity(&self, credential: &str) -> AppResult<BackendUser> {
        let endpoint = self.url("/auth/me");

        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(credential)
            .send()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        let body = Self::read_body(response).await.map_err(|(status, _)| match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AppError::credential_invalid(format!("Backend rejected credential: {status}"))
            }
            _ => AppError::external_service(format!("Backend answered {status}")),
        })?;

        let parsed: MeResponse = serde_json::from_str(&body)?;
        parsed.into_user()
    }
}
