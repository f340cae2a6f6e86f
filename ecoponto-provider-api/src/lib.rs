//! Catalog and registry provider for the collection-point backend API.
//!
//! The backend speaks the original wire vocabulary: regions are `uf`,
//! localities are `city`, categories are `items`. The mapping to the domain
//! names lives entirely in this crate.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use ecoponto_core::{
    model::{
        Category, CategoryId, CollectionPoint, Coordinate, PointDetail, PointId, PointItem,
        PointQuery, PointRegistration, PointSummary, RegionCode,
    },
    ports::{CatalogPort, PortError, RegistryPort},
};

/// Default backend address of a local development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Collection item from GET /items
#[derive(Debug, Deserialize)]
struct ItemEntry {
    id: i64,
    name: String,
    image_url: String,
}

/// Request body for POST /points
#[derive(Debug, Serialize)]
struct NewPointBody<'a> {
    name: &'a str,
    email: &'a str,
    whatsapp: &'a str,
    latitude: f64,
    longitude: f64,
    city: &'a str,
    uf: &'a str,
    items: Vec<i64>,
}

impl<'a> NewPointBody<'a> {
    fn from_registration(registration: &'a PointRegistration) -> Self {
        Self {
            name: &registration.name,
            email: &registration.email,
            whatsapp: &registration.whatsapp,
            latitude: registration.coordinate.latitude,
            longitude: registration.coordinate.longitude,
            city: &registration.locality,
            uf: &registration.region.0,
            items: registration.categories.iter().map(|id| id.0).collect(),
        }
    }
}

/// Response from GET /points/{id}
#[derive(Debug, Deserialize)]
struct DetailResponse {
    point: PointEntry,
    items: Vec<ItemTitleEntry>,
}

/// Point record inside `DetailResponse`.
#[derive(Debug, Deserialize)]
struct PointEntry {
    #[serde(default)]
    image_url: String,
    name: String,
    email: String,
    whatsapp: String,
    city: String,
    uf: String,
}

/// Item title inside `DetailResponse.items`.
#[derive(Debug, Deserialize)]
struct ItemTitleEntry {
    title: String,
}

/// Point entry from GET /points
#[derive(Debug, Deserialize)]
struct PointListEntry {
    id: i64,
    name: String,
    #[serde(default)]
    image_url: String,
    latitude: f64,
    longitude: f64,
}

/// Category catalog implementation against the backend.
pub struct ApiCatalogPort {
    client: Client,
    base_url: String,
}

impl ApiCatalogPort {
    /// Create a new catalog port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl CatalogPort for ApiCatalogPort {
    async fn list_categories(&self) -> Result<Vec<Category>, PortError> {
        let req = self.client.get(format!("{}/items", self.base_url));
        let entries = fetch_json::<Vec<ItemEntry>>(req).await?;

        Ok(entries
            .into_iter()
            .map(|entry| Category {
                id: CategoryId(entry.id),
                name: entry.name,
                image_url: entry.image_url,
            })
            .collect())
    }
}

/// Registration and point-read implementation against the backend.
pub struct ApiRegistryPort {
    client: Client,
    base_url: String,
}

impl ApiRegistryPort {
    /// Create a new registry port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl RegistryPort for ApiRegistryPort {
    async fn register_point(&self, registration: &PointRegistration) -> Result<(), PortError> {
        let body = NewPointBody::from_registration(registration);

        self.client
            .post(format!("{}/points", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(PortError::from)?
            .error_for_status()
            .map_err(PortError::from)?;

        Ok(())
    }

    async fn point_detail(&self, point: &PointId) -> Result<PointDetail, PortError> {
        let response = self
            .client
            .get(format!("{}/points/{point}", self.base_url))
            .send()
            .await
            .map_err(PortError::from)?;

        // The backend answers 400/404 for unknown ids; both mean "no point".
        if matches!(
            response.status(),
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND
        ) {
            return Err(PortError::PointNotFound);
        }

        let detail = response
            .error_for_status()
            .map_err(PortError::from)?
            .json::<DetailResponse>()
            .await
            .map_err(PortError::from)?;

        Ok(PointDetail {
            point: CollectionPoint {
                image_url: detail.point.image_url,
                name: detail.point.name,
                email: detail.point.email,
                whatsapp: detail.point.whatsapp,
                locality: detail.point.city,
                region: RegionCode(detail.point.uf),
            },
            items: detail
                .items
                .into_iter()
                .map(|entry| PointItem { title: entry.title })
                .collect(),
        })
    }

    async fn search_points(&self, query: &PointQuery) -> Result<Vec<PointSummary>, PortError> {
        let mut req = self.client.get(format!("{}/points", self.base_url));

        if let Some(region) = &query.region {
            req = req.query(&[("uf", region.0.as_str())]);
        }
        if let Some(locality) = &query.locality {
            req = req.query(&[("city", locality.as_str())]);
        }
        if !query.categories.is_empty() {
            let items = query
                .categories
                .iter()
                .map(|id| id.0.to_string())
                .collect::<Vec<String>>()
                .join(",");
            req = req.query(&[("items", items.as_str())]);
        }

        let entries = fetch_json::<Vec<PointListEntry>>(req).await?;

        Ok(entries
            .into_iter()
            .map(|entry| PointSummary {
                id: PointId(entry.id),
                name: entry.name,
                image_url: entry.image_url,
                coordinate: Coordinate {
                    latitude: entry.latitude,
                    longitude: entry.longitude,
                },
            })
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
