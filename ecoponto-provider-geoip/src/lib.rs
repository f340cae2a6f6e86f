//! Geolocation provider resolving an approximate position from the caller's
//! IP address. One-shot, no tracking; failure just means the map keeps its
//! default origin.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use ecoponto_core::{
    model::Coordinate,
    ports::{GeolocationPort, PortError},
};

const BASE_URL: &str = "http://ip-api.com/json";

/// Response from the ip-api.com JSON endpoint.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    message: String,
}

/// One-shot IP geolocation lookup.
pub struct IpGeolocationPort {
    client: Client,
    base_url: String,
}

impl IpGeolocationPort {
    /// Create a new geolocation port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL.to_owned())
    }

    /// Create a geolocation port against a non-default base URL.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl GeolocationPort for IpGeolocationPort {
    async fn locate(&self) -> Result<Coordinate, PortError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .map_err(PortError::from)?
            .error_for_status()
            .map_err(PortError::from)?
            .json::<LookupResponse>()
            .await
            .map_err(PortError::from)?;

        position_from(response)
    }
}

fn position_from(response: LookupResponse) -> Result<Coordinate, PortError> {
    if response.status != "success" {
        return Err(PortError::PositionUnavailable(response.message));
    }

    Ok(Coordinate {
        latitude: response.lat,
        longitude: response.lon,
    })
}
