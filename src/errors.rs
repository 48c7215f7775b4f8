use reqwest::StatusCode;
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Configuration Error: Invalid base URL: {0}")]
    BaseUrlInvalid(#[from] UrlParseError),

    #[error("Configuration Error: Failed to build HTTP client: {0}")]
    HttpClientBuildFailed(reqwest::Error),

    #[error("Validation Error: {0}")]
    Validation(String),

    // Display is the message alone so a server-supplied message
    // ("Carro no encontrado") surfaces verbatim to callers.
    #[error("{message}")]
    HttpError {
        // Server responded with non-2xx
        status: StatusCode,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    #[error("Response Error: Failed to deserialize response body: {0}")]
    DeserializationFailed(reqwest::Error),

    #[error("Response Error: Expected a JSON body but the response had none")]
    EmptyResponse,

    #[error("Client Internal Error: {0}")]
    InternalError(String),
}

impl ApiClientError {
    /// Numeric status of an `HttpError`, `None` for every other kind
    /// (including transport failures, where no response was received).
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiClientError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        ApiClientError::Validation(format!("{field} is required"))
    }
}
