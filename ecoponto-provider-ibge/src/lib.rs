//! Directory provider backed by the IBGE localities API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use ecoponto_core::{
    model::{Locality, RegionCode},
    ports::{DirectoryPort, PortError},
};

const BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// Federative unit from /estados
#[derive(Debug, Deserialize)]
struct UfEntry {
    sigla: String,
    // "id" and "nome" exist but the client keys everything on the sigla
}

/// Municipality from /estados/{uf}/municipios
#[derive(Debug, Deserialize)]
struct MunicipioEntry {
    nome: String,
}

/// Directory lookup implementation for Brazil via IBGE.
pub struct IbgeDirectoryPort {
    client: Client,
    base_url: String,
}

impl IbgeDirectoryPort {
    /// Create a new directory port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL.to_owned())
    }

    /// Create a directory port against a non-default base URL.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl DirectoryPort for IbgeDirectoryPort {
    async fn list_regions(&self) -> Result<Vec<RegionCode>, PortError> {
        let req = self
            .client
            .get(format!("{}/estados", self.base_url))
            .query(&[("orderBy", "nome")]);

        let entries = fetch_json::<Vec<UfEntry>>(req).await?;

        Ok(entries
            .into_iter()
            .map(|entry| RegionCode(entry.sigla))
            .collect())
    }

    async fn list_localities(&self, region: &RegionCode) -> Result<Vec<Locality>, PortError> {
        let req = self
            .client
            .get(format!("{}/estados/{}/municipios", self.base_url, region));

        let entries = fetch_json::<Vec<MunicipioEntry>>(req).await?;

        Ok(entries
            .into_iter()
            .map(|entry| Locality { name: entry.nome })
            .collect())
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
