//! Domain data structures for regions, categories, and collection points.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Code of a first-level administrative division, e.g. `"SP"`.
pub struct RegionCode(pub String);

impl fmt::Display for RegionCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Named place scoped to exactly one region.
pub struct Locality {
    /// Localized place name as returned by the directory service.
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier of a collection category.
pub struct CategoryId(pub i64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Collectible waste type a point can advertise.
pub struct Category {
    /// Unique, stable identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL of the category illustration.
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Geographic coordinate in decimal degrees.
pub struct Coordinate {
    /// Latitude, south negative.
    pub latitude: f64,
    /// Longitude, west negative.
    pub longitude: f64,
}

/// Fallback map origin used when neither geolocation nor an explicit
/// selection produced a coordinate.
pub const DEFAULT_ORIGIN: Coordinate = Coordinate {
    latitude: 0.0,
    longitude: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier of a registered collection point.
pub struct PointId(pub i64);

impl fmt::Display for PointId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Fully assembled registration payload for a new collection point.
pub struct PointRegistration {
    /// Name of the registering entity.
    pub name: String,
    /// Contact e-mail address.
    pub email: String,
    /// Contact WhatsApp number.
    pub whatsapp: String,
    /// Region the point belongs to.
    pub region: RegionCode,
    /// Locality name within the region.
    pub locality: String,
    /// Map position of the point.
    pub coordinate: Coordinate,
    /// Advertised categories, in selection order.
    pub categories: Vec<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One entry of a point search result.
pub struct PointSummary {
    /// Identifier usable with the detail endpoint.
    pub id: PointId,
    /// Name of the point.
    pub name: String,
    /// URL of the point photo.
    pub image_url: String,
    /// Map position of the point.
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Default)]
/// Filter for searching registered points.
pub struct PointQuery {
    /// Restrict to a region.
    pub region: Option<RegionCode>,
    /// Restrict to a locality name.
    pub locality: Option<String>,
    /// Restrict to points advertising all of these categories.
    pub categories: Vec<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Core record of a single collection point as returned by the backend.
pub struct CollectionPoint {
    /// URL of the point photo.
    pub image_url: String,
    /// Name of the point.
    pub name: String,
    /// Contact e-mail address.
    pub email: String,
    /// Contact WhatsApp number.
    pub whatsapp: String,
    /// Locality name.
    pub locality: String,
    /// Region code.
    pub region: RegionCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Category advertised by a point, as shown on the detail screen.
pub struct PointItem {
    /// Display title of the category.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A point record merged with its advertised categories.
pub struct PointDetail {
    /// The point itself.
    pub point: CollectionPoint,
    /// Categories the point collects.
    pub items: Vec<PointItem>,
}
