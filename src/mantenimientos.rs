//! Resource functions for the maintenance collection (`api/mantenimiento`).
//!
//! Unlike the vehicle collection this one is not authenticated. Beyond plain
//! CRUD the backend offers per-vehicle lookups and two action queries
//! (urgent records and aggregate statistics).

use reqwest::Method;
use tracing::debug;

use crate::client::{require_key, ApiClient};
use crate::errors::ApiClientError;
use crate::models::{Estadisticas, Mantenimiento, MantenimientoData, MantenimientoFilter};

const COLLECTION: &[&str] = &["api", "mantenimiento"];

/// Typed handle over the shared [`ApiClient`], bound to the maintenance
/// collection.
pub struct MantenimientosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MantenimientosApi<'a> {
    const AUTHENTICATED: bool = false;

    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        filter: Option<&MantenimientoFilter>,
    ) -> Result<Vec<Mantenimiento>, ApiClientError> {
        let mut url = self.client.collection_url(COLLECTION)?;
        if let Some(filter) = filter {
            if let Some(query) = filter.to_query().query() {
                url.set_query(Some(&query));
            }
        }
        let builder = self.client.request(Method::GET, url, Self::AUTHENTICATED);
        let registros: Vec<Mantenimiento> = self.client.execute(builder).await?.unwrap_or_default();
        debug!(count = registros.len(), "fetched mantenimientos");
        Ok(registros)
    }

    /// Look up one record by its server-generated id, via a filtered list.
    /// Zero matches is `None`, not an error.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Mantenimiento>, ApiClientError> {
        let id = require_key(id, "id")?;
        let registros = self.list(Some(&MantenimientoFilter::by_id(id))).await?;
        Ok(registros.into_iter().next())
    }

    /// All maintenance records of one vehicle
    /// (`GET api/mantenimiento/carro/<placa>`).
    pub async fn por_carro(&self, placa: &str) -> Result<Vec<Mantenimiento>, ApiClientError> {
        let placa = require_key(placa, "placa")?;
        let url = self
            .client
            .item_url(&["api", "mantenimiento", "carro"], placa)?;
        let builder = self.client.request(Method::GET, url, Self::AUTHENTICATED);
        Ok(self.client.execute(builder).await?.unwrap_or_default())
    }

    /// Records the backend flags as urgent (`?action=urgentes`).
    pub async fn urgentes(&self) -> Result<Vec<Mantenimiento>, ApiClientError> {
        let mut url = self.client.collection_url(COLLECTION)?;
        url.set_query(Some("action=urgentes"));
        let builder = self.client.request(Method::GET, url, Self::AUTHENTICATED);
        Ok(self.client.execute(builder).await?.unwrap_or_default())
    }

    /// Aggregate cost figures (`?action=estadisticas`).
    pub async fn estadisticas(&self) -> Result<Estadisticas, ApiClientError> {
        let mut url = self.client.collection_url(COLLECTION)?;
        url.set_query(Some("action=estadisticas"));
        let builder = self.client.request(Method::GET, url, Self::AUTHENTICATED);
        self.client
            .execute(builder)
            .await?
            .ok_or(ApiClientError::EmptyResponse)
    }

    pub async fn create(&self, data: &MantenimientoData) -> Result<Mantenimiento, ApiClientError> {
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

    pub async fn update(
        &self,
        id: &str,
        data: &MantenimientoData,
    ) -> Result<Mantenimiento, ApiClientError> {
        let id = require_key(id, "id")?;
        let url = self.client.item_url(COLLECTION, id)?;
        let builder = self
            .client
            .request(Method::PUT, url, Self::AUTHENTICATED)
            .json(data);
        self.client
            .execute(builder)
            .await?
            .ok_or(ApiClientError::EmptyResponse)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiClientError> {
        let id = require_key(id, "id")?;
        let url = self.client.item_url(COLLECTION, id)?;
        let builder = self.client.request(Method::DELETE, url, Self::AUTHENTICATED);
        self.client.execute_empty(builder).await
    }

    /// Backend liveness probe, answers plain text.
    pub async fn health_check(&self) -> Result<String, ApiClientError> {
        let url = self
            .client
            .collection_url(&["api", "mantenimiento", "healthCheck"])?;
        let builder = self.client.request(Method::GET, url, Self::AUTHENTICATED);
        self.client.execute_text(builder).await
    }
}
