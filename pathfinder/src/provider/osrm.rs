//! OSRM driving routes.
//!
//! # URL Pattern
//!
//! `{endpoint}/route/v1/driving/{from_lon},{from_lat};{to_lon},{to_lat}?overview=full&geometries=geojson`
//!
//! OSRM orders coordinates longitude first, both in the path and in the
//! returned GeoJSON geometry.
//!
//! # Response Codes
//!
//! - `Ok` - at least one route in `routes`
//! - `NoRoute` - endpoints are not connected by the road network
//! - anything else (`InvalidQuery`, `NoSegment`, ...) - request or data error
//!
//! Error codes are returned with a 4xx status, so the body of a failed
//! request is still decoded.

use futures::future::BoxFuture;
use serde::Deserialize;

use super::http::HttpClient;
use super::types::ProviderError;
use crate::geo::Coordinate;
use crate::route::{Route, RouteError, RouteProvider};

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Decode an OSRM route response into the first route it contains.
fn parse_route(body: &[u8], from: Coordinate, to: Coordinate) -> Result<Route, RouteError> {
    let response: OsrmResponse =
        serde_json::from_slice(body).map_err(ProviderError::from)?;

    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" => return Err(RouteError::NoRoute),
        code => {
            return Err(RouteError::Provider(format!(
                "{}: {}",
                code,
                response.message.unwrap_or_default()
            )))
        }
    }

    let route = response.routes.into_iter().next().ok_or(RouteError::NoRoute)?;
    let coordinates: Vec<Coordinate> = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| Coordinate::new(lat, lon))
        .collect();

    if coordinates.is_empty() {
        return Err(RouteError::NoRoute);
    }

    Ok(Route::new(coordinates, from, to).with_summary(route.distance, route.duration))
}

/// OSRM routing provider (driving profile).
pub struct OsrmProvider<C: HttpClient> {
    http_client: C,
    endpoint: String,
}

impl<C: HttpClient> OsrmProvider<C> {
    /// Creates a provider against the given base URL.
    pub fn new(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the route URL for the given endpoints.
    fn build_url(&self, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/driving/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.endpoint, from.longitude, from.latitude, to.longitude, to.latitude
        )
    }
}

impl<C: HttpClient> RouteProvider for OsrmProvider<C> {
    fn name(&self) -> &str {
        "osrm"
    }

    fn route(&self, from: Coordinate, to: Coordinate) -> BoxFuture<'_, Result<Route, RouteError>> {
        Box::pin(async move {
            let url = self.build_url(from, to);
            match self.http_client.get(&url).await {
                Ok(body) => parse_route(&body, from, to),
                Err(ProviderError::HttpStatus { status, body }) => {
                    // Error codes come with a JSON body worth decoding
                    match parse_route(body.as_bytes(), from, to) {
                        Err(RouteError::Provider(_)) | Ok(_) => Err(RouteError::Provider(
                            format!("HTTP {} from routing server", status),
                        )),
                        Err(e) => Err(e),
                    }
                }
                Err(e) => Err(e.into()),
            }
        })
    }
}
