//! Authenticated Request Client
//!
//! Wraps outbound calls with credential attachment, single-retry-on-expiry
//! semantics and error normalization.
//!
//! # Algorithm
//!
//! 1. Obtain a credential with a forced refresh (minimizes expired-token
//!    races), falling back to a non-forced lookup if the forced one fails.
//! 2. No credential at all fails fast with [`ClientError::Auth`].
//! 3. Attach the credential as a bearer header and issue the request.
//! 4. On 401: exactly one forced refresh and exactly one retry with the new
//!    credential. No new credential means the original failure stands.
//! 5. Non-2xx responses (after the single retry) are parsed as JSON error
//!    bodies on a best-effort basis; parse failure degrades to a generic
//!    error carrying the HTTP status.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::config::Config;
use crate::client::credentials::CredentialStore;
use crate::client::error::ClientError;
use crate::shared::ErrorBody;

/// HTTP client that attaches credentials and normalizes failures
pub struct ApiClient {
    config: Config,
    credentials: Arc<CredentialStore>,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config, credentials: Arc<CredentialStore>) -> Self {
        Self {
            config,
            credentials,
            client: Client::new(),
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Issue an authenticated request
    ///
    /// Returns the raw response on 2xx; every failure mode is normalized
    /// into a [`ClientError`].
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ClientError> {
        let token = match self.credentials.token(true).await {
            Some(token) => token,
            None => self
                .credentials
                .token(false)
                .await
                .ok_or(ClientError::Auth)?,
        };

        let response = self.send(method.clone(), path, body, &token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::finalize(response).await;
        }

        // Expired or invalidated mid-flight: one refresh, one retry. The
        // rejected token is named so the store cannot hand it straight back.
        match self.credentials.token_after_rejection(&token).await {
            Some(fresh) => {
                tracing::debug!("Retrying {} {} after credential refresh", method, path);
                let retry = self.send(method, path, body, &fresh).await?;
                Self::finalize(retry).await
            }
            None => Self::finalize(response).await,
        }
    }

    /// GET a JSON resource
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.call(Method::GET, path, None).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON payload, decoding a JSON response
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Validation(crate::shared::SharedError::from(e)))?;
        let response = self.call(Method::POST, path, Some(&value)).await?;
        Ok(response.json().await?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        token: &str,
    ) -> Result<Response, ClientError> {
        let url = self.config.api_url(path);
        let mut request = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {}", token));
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Normalize a response: 2xx passes through, everything else becomes
    /// an [`ClientError::Api`] with a best-effort parsed body.
    async fn finalize(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
                .unwrap_or_else(|_| ErrorBody::new(format!("HTTP {}", status.as_u16()))),
            Err(_) => ErrorBody::new(format!("HTTP {}", status.as_u16())),
        };

        tracing::warn!("API error {}: {}", status, body.error);
        Err(ClientError::api(status.as_u16(), body))
    }
}
