//! Environment configuration, read once when the client is constructed.

use std::env;

/// Basic-auth credentials for the resources that require them.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Connection settings for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
}

impl ApiConfig {
    /// Build from `API_BASE_URL`, `API_USERNAME` and `API_PASSWORD`, loading
    /// a `.env` file first when present. Defaults match the development
    /// backend: `http://localhost:8080` with `admin`/`admin`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let username = env::var("API_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password = env::var("API_PASSWORD").unwrap_or_else(|_| "admin".to_string());

        Self {
            base_url,
            credentials: Some(Credentials { username, password }),
        }
    }

    /// Explicit settings, bypassing the environment. Used by tests and by
    /// callers that manage configuration themselves.
    pub fn new(base_url: impl Into<String>, credentials: Option<Credentials>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }
}
