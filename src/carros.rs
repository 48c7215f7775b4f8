//! Resource functions for the vehicle collection (`api/carro`).
//!
//! This collection sits behind HTTP Basic auth, so every request carries the
//! configured credentials. Errors from the HTTP layer propagate unchanged;
//! the only error added here is the synchronous blank-key check.

use reqwest::Method;
use tracing::debug;

use crate::client::{require_key, ApiClient};
use crate::errors::ApiClientError;
use crate::models::{Carro, CarroData, CarroFilter};

const COLLECTION: &[&str] = &["api", "carro"];

/// Typed handle over the shared [`ApiClient`], bound to the vehicle
/// collection. Cheap to create; holds no state of its own.
pub struct CarrosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CarrosApi<'a> {
    const AUTHENTICATED: bool = true;

    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List vehicles, optionally narrowed by filters. An empty result is an
    /// empty vector, never an error.
    pub async fn list(&self, filter: Option<&CarroFilter>) -> Result<Vec<Carro>, ApiClientError> {
        let mut url = self.client.collection_url(COLLECTION)?;
        if let Some(filter) = filter {
            if let Some(query) = filter.to_query().query() {
                url.set_query(Some(&query));
            }
        }
        let builder = self.client.request(Method::GET, url, Self::AUTHENTICATED);
        let carros: Vec<Carro> = self.client.execute(builder).await?.unwrap_or_default();
        debug!(count = carros.len(), "fetched carros");
        Ok(carros)
    }

    /// Look up a single vehicle by plate. The backend exposes no direct
    /// by-key endpoint, so this filters the collection and takes the first
    /// match; zero matches is `None`, not an error.
    pub async fn get_by_placa(&self, placa: &str) -> Result<Option<Carro>, ApiClientError> {
        let placa = require_key(placa, "placa")?;
        let carros = self.list(Some(&CarroFilter::by_placa(placa))).await?;
        Ok(carros.into_iter().next())
    }

    /// Create a vehicle. The response is the server's canonical record,
    /// including its computed read-only fields.
    pub async fn create(&self, data: &CarroData) -> Result<Carro, ApiClientError> {
        let url = self.client.collection_url(COLLECTION)?;
        let builder = self
            .client
            .request(Method::POST, url, Self::AUTHENTICATED)
            .json(data);
        self.client
            .execute(builder)
            .await?
            .ok_or(ApiClientError::EmptyResponse)
    }

    pub async fn update(&self, placa: &str, data: &CarroData) -> Result<Carro, ApiClientError> {
        let placa = require_key(placa, "placa")?;
        let url = self.client.item_url(COLLECTION, placa)?;
        let builder = self
            .client
            .request(Method::PUT, url, Self::AUTHENTICATED)
            .json(data);
        self.client
            .execute(builder)
            .await?
            .ok_or(ApiClientError::EmptyResponse)
    }

    /// Delete a vehicle by plate. Success carries no body.
    pub async fn delete(&self, placa: &str) -> Result<(), ApiClientError> {
        let placa = require_key(placa, "placa")?;
        let url = self.client.item_url(COLLECTION, placa)?;
        let builder = self.client.request(Method::DELETE, url, Self::AUTHENTICATED);
        self.client.execute_empty(builder).await
    }

    /// Backend liveness probe, answers plain text.
    pub async fn health_check(&self) -> Result<String, ApiClientError> {
        let url = self.client.collection_url(&["api", "carro", "healthCheck"])?;
        let builder = self.client.request(Method::GET, url, Self::AUTHENTICATED);
        self.client.execute_text(builder).await
    }
}
