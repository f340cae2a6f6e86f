//! Traits describing the external collaborators and their shared error type.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{
    Category, Coordinate, Locality, PointDetail, PointId, PointQuery, PointRegistration,
    PointSummary, RegionCode,
};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to external services.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Requested point does not exist.
    #[error("Point not found")]
    PointNotFound,
    /// Geolocation provider could not resolve a position.
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Read-only lookup of regions and their localities from the geographic
/// directory service.
pub trait DirectoryPort: Send + Sync {
    /// List all known regions.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the directory request fails.
    async fn list_regions(&self) -> Result<Vec<RegionCode>, PortError>;

    /// List the localities of one region.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the directory request fails.
    async fn list_localities(&self, region: &RegionCode) -> Result<Vec<Locality>, PortError>;
}

#[async_trait]
/// Read-only lookup of the collection category catalog.
pub trait CatalogPort: Send + Sync {
    /// List the fixed set of collection categories.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the catalog request fails.
    async fn list_categories(&self) -> Result<Vec<Category>, PortError>;
}

#[async_trait]
/// Write and read access to the collection-point backend.
pub trait RegistryPort: Send + Sync {
    /// Register a new collection point. No response body is consumed.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend rejects the write.
    async fn register_point(&self, registration: &PointRegistration) -> Result<(), PortError>;

    /// Fetch one point together with its advertised categories.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::PointNotFound`] for an unknown identifier, or
    /// another [`PortError`] when the request fails.
    async fn point_detail(&self, point: &PointId) -> Result<PointDetail, PortError>;

    /// Search registered points matching the query.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails.
    async fn search_points(&self, query: &PointQuery) -> Result<Vec<PointSummary>, PortError>;
}

#[async_trait]
/// One-shot device position lookup. No live tracking.
pub trait GeolocationPort: Send + Sync {
    /// Resolve the approximate current position.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when no position can be determined; callers
    /// are expected to fall back to [`crate::model::DEFAULT_ORIGIN`].
    async fn locate(&self) -> Result<Coordinate, PortError>;
}
