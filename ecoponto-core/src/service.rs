//! High-level service facade combining all backend-facing collaborators.

use std::sync::Arc;

use crate::model::{
    Category, Locality, PointDetail, PointId, PointQuery, PointRegistration, PointSummary,
    RegionCode,
};
use crate::ports::{CatalogPort, DirectoryPort, PortError, RegistryPort};

/// Public entry point for directory lookups, the category catalog, and the
/// collection-point backend.
pub struct EcopontoService {
    directory: Arc<dyn DirectoryPort>,
    catalog: Arc<dyn CatalogPort>,
    registry: Arc<dyn RegistryPort>,
}

impl EcopontoService {
    /// Create a new service bound to the provided collaborators.
    #[must_use]
    pub fn new(
        directory: Arc<dyn DirectoryPort>,
        catalog: Arc<dyn CatalogPort>,
        registry: Arc<dyn RegistryPort>,
    ) -> Self {
        Self {
            directory,
            catalog,
            registry,
        }
    }

    /// The backend abstraction shared with the submission pipeline and the
    /// detail composer.
    #[must_use]
    pub fn registry(&self) -> Arc<dyn RegistryPort> {
        Arc::clone(&self.registry)
    }

    /// List all known regions.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the directory call fails.
    pub async fn regions(&self) -> Result<Vec<RegionCode>, PortError> {
        self.directory.list_regions().await
    }

    /// List the localities of one region.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the directory call fails.
    pub async fn localities(&self, region: &RegionCode) -> Result<Vec<Locality>, PortError> {
        self.directory.list_localities(region).await
    }

    /// List the collection category catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the catalog call fails.
    pub async fn categories(&self) -> Result<Vec<Category>, PortError> {
        self.catalog.list_categories().await
    }

    /// Register a new collection point.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend rejects the write.
    pub async fn register(&self, registration: &PointRegistration) -> Result<(), PortError> {
        self.registry.register_point(registration).await
    }

    /// Fetch one point together with its advertised categories.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::PointNotFound`] for an unknown identifier, or
    /// another [`PortError`] when the request fails.
    pub async fn detail(&self, point: &PointId) -> Result<PointDetail, PortError> {
        self.registry.point_detail(point).await
    }

    /// Search registered points matching the query.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails.
    pub async fn search_points(&self, query: &PointQuery) -> Result<Vec<PointSummary>, PortError> {
        self.registry.search_points(query).await
    }
}
