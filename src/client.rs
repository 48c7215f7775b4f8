use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::carros::CarrosApi;
use crate::config::{ApiConfig, Credentials};
use crate::errors::ApiClientError;
use crate::mantenimientos::MantenimientosApi;

/// Error bodies, when present, are JSON with an optional `message` field.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Shared HTTP layer for every resource. Holds the base URL, the connection
/// pool and the configured credentials; resource handles decide per call
/// whether the credentials are attached.
///
/// No retry, no cache, no timeout: a hung request hangs until the caller
/// cancels it.
#[derive(Debug)]
pub struct ApiClient {
    base_url: Url,
    http_client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiClientError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(ApiClientError::HttpClientBuildFailed)?;

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiClientError::InternalError(format!(
                "base URL '{base_url}' cannot carry path segments"
            )));
        }

        Ok(ApiClient {
            base_url,
            http_client,
            credentials: config.credentials.clone(),
        })
    }

    /// Convenience constructor using [`ApiConfig::from_env`].
    pub fn from_env() -> Result<Self, ApiClientError> {
        Self::new(&ApiConfig::from_env())
    }

    /// Handle for the vehicle collection (`api/carro`, authenticated).
    pub fn carros(&self) -> CarrosApi<'_> {
        CarrosApi::new(self)
    }

    /// Handle for the maintenance collection (`api/mantenimiento`,
    /// unauthenticated).
    pub fn mantenimientos(&self) -> MantenimientosApi<'_> {
        MantenimientosApi::new(self)
    }

    pub(crate) fn collection_url(&self, segments: &[&str]) -> Result<Url, ApiClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiClientError::InternalError("base URL cannot carry path segments".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Collection URL plus the key as one percent-encoded path segment, so a
    /// `/` inside the key becomes `%2F` instead of splitting the path.
    pub(crate) fn item_url(&self, segments: &[&str], key: &str) -> Result<Url, ApiClientError> {
        let mut url = self.collection_url(segments)?;
        url.path_segments_mut()
            .map_err(|_| {
                ApiClientError::InternalError("base URL cannot carry path segments".to_string())
            })?
            .push(key);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url, authenticated: bool) -> RequestBuilder {
        debug!(method = %method, url = %url, "sending request");
        let mut builder = self
            .http_client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if authenticated {
            if let Some(credentials) = &self.credentials {
                builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
            }
        }
        builder
    }

    /// Send the request and normalize the outcome: a response for 2xx, an
    /// `HttpError` with the server's message (or a status-line fallback) for
    /// non-2xx, and a `NetworkError` when no response was received at all.
    /// Normalization itself never fails.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ApiClientError> {
        let response = match builder.send().await {
            Ok(res) => res,
            Err(e) => {
                warn!(error = %e, "request could not be completed");
                return Err(ApiClientError::NetworkError(e));
            }
        };

        let status = response.status();
        debug!(status = %status, url = %response.url(), "received response");
        if status.is_success() {
            return Ok(response);
        }

        let message = match status {
            StatusCode::UNAUTHORIZED => "Authentication failed: invalid credentials".to_string(),
            StatusCode::FORBIDDEN => "Authorization failed: access denied".to_string(),
            _ => {
                let fallback = format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Error")
                );
                match response.json::<ErrorBody>().await {
                    Ok(ErrorBody {
                        message: Some(message),
                    }) => message,
                    _ => fallback,
                }
            }
        };
        warn!(status = %status, message = %message, "server reported an error");
        Err(ApiClientError::HttpError { status, message })
    }

    /// Execute and decode a JSON body. A 2xx response whose content type is
    /// not JSON yields `None`; deletions answer with plain text.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, ApiClientError> {
        let response = self.dispatch(builder).await?;
        if !is_json(&response) {
            debug!("response carried no JSON body");
            return Ok(None);
        }
        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(ApiClientError::DeserializationFailed)
    }

    /// Execute for operations whose success has no meaningful body.
    pub(crate) async fn execute_empty(
        &self,
        builder: RequestBuilder,
    ) -> Result<(), ApiClientError> {
        self.dispatch(builder).await.map(drop)
    }

    /// Execute and return the raw body text (health checks).
    pub(crate) async fn execute_text(
        &self,
        builder: RequestBuilder,
    ) -> Result<String, ApiClientError> {
        let response = self.dispatch(builder).await?;
        response
            .text()
            .await
            .map_err(ApiClientError::DeserializationFailed)
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false)
}

/// Pre-flight check for identifier arguments: blank keys fail synchronously,
/// before any network call. Returns the trimmed key.
pub(crate) fn require_key<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiClientError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiClientError::required(field));
    }
    Ok(trimmed)
}
