//! HTTP client for the storefront REST API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{errors::StoreError, session::Session};

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to the storefront API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, e.g. `"http://localhost:8080/api"`.
    pub base_url: String,

    /// Upper bound for a single request, connect through body.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Authenticated HTTP client shared by the cart and order gateways.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: Session,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start a request carrying the current bearer credential.
    ///
    /// Fails locally with [`StoreError::AuthenticationRequired`] when there is
    /// no credential, so no unauthenticated request ever leaves the client.
    pub(crate) async fn authorized(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, StoreError> {
        let token = self
            .session
            .credential()
            .await
            .ok_or(StoreError::AuthenticationRequired)?;

        Ok(self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(token.expose()))
    }

    /// Send a request and validate the response status.
    ///
    /// Returns the raw body, or `None` for `204` and other empty bodies. A
    /// `401`/`403` invalidates the session before the error is returned.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await?;

        if status.is_success() {
            debug!(%status, path = %url, "request succeeded");

            return Ok((!body.is_empty()).then(|| body.to_vec()));
        }

        debug!(%status, path = %url, "request rejected");

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            self.session.invalidate().await;
        }

        Err(StoreError::RemoteOperationFailed {
            status,
            message: error_message(status, &body),
        })
    }
}

/// Decode a JSON body, treating absence or a shape mismatch as malformed.
pub(crate) fn decode<T: DeserializeOwned>(
    body: Option<Vec<u8>>,
    expected: &str,
) -> Result<T, StoreError> {
    let body = body.ok_or_else(|| {
        StoreError::MalformedResponse(format!("expected {expected}, got an empty body"))
    })?;

    serde_json::from_slice(&body)
        .map_err(|error| StoreError::MalformedResponse(format!("expected {expected}: {error}")))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"))
}
