//! OpenStreetMap Nominatim place search.
//!
//! # Endpoints
//!
//! - `{endpoint}/search?q={text}&format=jsonv2&limit={n}` for suggestions
//! - `{endpoint}/lookup?osm_ids={handle}&format=jsonv2` for resolution
//!
//! A suggestion's handle is the OSM reference of the hit: the element type
//! initial followed by its id (`N240109189`, `W43956347`, `R2709`). Lookup
//! by reference is stable, so resolution never repeats the free-text search.
//!
//! # Usage Policy
//!
//! The public instance allows at most one request per second and requires a
//! meaningful user agent. The debounce in the search client keeps typing
//! well under that rate.

use futures::future::BoxFuture;
use reqwest::Url;
use serde::Deserialize;

use super::http::HttpClient;
use super::types::ProviderError;
use crate::geo::Coordinate;
use crate::search::{Destination, PlaceHandle, PlaceSearchProvider, PlaceSuggestion, SearchError};

/// Default number of hits requested per search.
pub const DEFAULT_NOMINATIM_LIMIT: usize = 8;

/// One hit in a `jsonv2` search or lookup response.
#[derive(Debug, Clone, Deserialize)]
struct NominatimPlace {
    osm_type: String,
    osm_id: u64,
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    display_name: String,
}

impl NominatimPlace {
    /// OSM reference usable with `/lookup`, if the element type is known.
    fn handle(&self) -> Option<PlaceHandle> {
        let prefix = match self.osm_type.as_str() {
            "node" => 'N',
            "way" => 'W',
            "relation" => 'R',
            _ => return None,
        };
        Some(PlaceHandle::new(format!("{}{}", prefix, self.osm_id)))
    }

    /// Short name, falling back to the first component of the full address.
    fn title(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }

    fn coordinate(&self) -> Result<Coordinate, ProviderError> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| ProviderError::ParseError(format!("invalid latitude '{}'", self.lat)))?;
        let lon: f64 = self
            .lon
            .parse()
            .map_err(|_| ProviderError::ParseError(format!("invalid longitude '{}'", self.lon)))?;
        Ok(Coordinate::new(lat, lon))
    }

    fn suggestion(&self) -> Option<PlaceSuggestion> {
        let handle = self.handle()?;
        Some(PlaceSuggestion::new(self.title(), handle).with_subtitle(self.display_name.clone()))
    }
}

fn parse_places(body: &[u8]) -> Result<Vec<NominatimPlace>, ProviderError> {
    Ok(serde_json::from_slice(body)?)
}

/// Whether a handle looks like an OSM reference.
fn is_osm_reference(handle: &str) -> bool {
    let mut chars = handle.chars();
    matches!(chars.next(), Some('N' | 'W' | 'R'))
        && !chars.as_str().is_empty()
        && chars.all(|c| c.is_ascii_digit())
}

/// Nominatim place search provider.
///
/// # Example
///
/// ```ignore
/// use pathfinder::provider::{NominatimProvider, ReqwestClient};
///
/// let provider = NominatimProvider::new(ReqwestClient::new()?, "https://nominatim.openstreetmap.org");
/// ```
pub struct NominatimProvider<C: HttpClient> {
    http_client: C,
    endpoint: String,
    limit: usize,
}

impl<C: HttpClient> NominatimProvider<C> {
    /// Creates a provider against the given base URL.
    pub fn new(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            limit: DEFAULT_NOMINATIM_LIMIT,
        }
    }

    /// Sets the number of hits requested per search.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    fn search_url(&self, text: &str) -> Result<Url, ProviderError> {
        let limit = self.limit.to_string();
        Url::parse_with_params(
            &format!("{}/search", self.endpoint),
            [("q", text), ("format", "jsonv2"), ("limit", limit.as_str())],
        )
        .map_err(|e| ProviderError::Configuration(format!("invalid endpoint: {}", e)))
    }

    fn lookup_url(&self, handle: &PlaceHandle) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &format!("{}/lookup", self.endpoint),
            [("osm_ids", handle.as_str()), ("format", "jsonv2")],
        )
        .map_err(|e| ProviderError::Configuration(format!("invalid endpoint: {}", e)))
    }

    async fn fetch(&self, url: Url) -> Result<Vec<NominatimPlace>, ProviderError> {
        let body = self.http_client.get(url.as_str()).await?;
        parse_places(&body)
    }
}

impl<C: HttpClient> PlaceSearchProvider for NominatimProvider<C> {
    fn name(&self) -> &str {
        "nominatim"
    }

    fn complete(&self, text: String) -> BoxFuture<'_, Result<Vec<PlaceSuggestion>, SearchError>> {
        Box::pin(async move {
            let url = self.search_url(&text)?;
            let places = self.fetch(url).await?;
            Ok(places.iter().filter_map(NominatimPlace::suggestion).collect())
        })
    }

    fn resolve(&self, suggestion: PlaceSuggestion) -> BoxFuture<'_, Result<Destination, SearchError>> {
        Box::pin(async move {
            if !is_osm_reference(suggestion.handle.as_str()) {
                return Err(SearchError::NotFound(suggestion.title));
            }

            let url = self.lookup_url(&suggestion.handle)?;
            let places = self.fetch(url).await?;
            let place = places
                .first()
                .ok_or_else(|| SearchError::NotFound(suggestion.title.clone()))?;

            Ok(Destination::new(suggestion.title, place.coordinate()?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockHttpClient;

    const SEARCH_BODY: &str = r#"[
        {
            "place_id": 1,
            "osm_type": "way",
            "osm_id": 43956347,
            "lat": "30.6166",
            "lon": "-96.3389",
            "category": "amenity",
            "type": "library",
            "name": "Sterling C. Evans Library",
            "display_name": "Sterling C. Evans Library, Spence Street, College Station, Texas"
        },
        {
            "place_id": 2,
            "osm_type": "node",
            "osm_id": 240109189,
            "lat": "30.6180",
            "lon": "-96.3370",
            "name": "",
            "display_name": "Cushing Library, College Station, Texas"
        },
        {
            "place_id": 3,
            "osm_type": "unknown",
            "osm_id": 5,
            "lat": "0",
            "lon": "0",
            "display_name": "Nowhere"
        }
    ]"#;

    fn provider(mock: MockHttpClient) -> NominatimProvider<MockHttpClient> {
        NominatimProvider::new(mock, "https://nominatim.example.org/")
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(provider(MockHttpClient::ok("[]")).name(), "nominatim");
    }

    #[test]
    fn test_search_url_construction() {
        let p = provider(MockHttpClient::ok("[]")).with_limit(5);
        let url = p.search_url("Evans Library & Annex").unwrap();

        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".into(), "Evans Library & Annex".into())));
        assert!(pairs.contains(&("format".into(), "jsonv2".into())));
        assert!(pairs.contains(&("limit".into(), "5".into())));
    }

    #[test]
    fn test_lookup_url_construction() {
        let p = provider(MockHttpClient::ok("[]"));
        let url = p.lookup_url(&PlaceHandle::new("W43956347")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://nominatim.example.org/lookup?osm_ids=W43956347&format=jsonv2"
        );
    }

    #[test]
    fn test_osm_reference_validation() {
        assert!(is_osm_reference("N1"));
        assert!(is_osm_reference("R2709"));
        assert!(!is_osm_reference("W"));
        assert!(!is_osm_reference("X12"));
        assert!(!is_osm_reference("W12a"));
        assert!(!is_osm_reference("EVAN"));
    }

    #[tokio::test]
    async fn test_complete_maps_hits_to_suggestions() {
        let p = provider(MockHttpClient::ok(SEARCH_BODY));
        let suggestions = p.complete("library".into()).await.unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].title, "Sterling C. Evans Library");
        assert_eq!(suggestions[0].handle.as_str(), "W43956347");
        assert!(suggestions[0]
            .subtitle
            .as_deref()
            .unwrap()
            .contains("College Station"));
        // Blank name falls back to the first address component
        assert_eq!(suggestions[1].title, "Cushing Library");
        assert_eq!(suggestions[1].handle.as_str(), "N240109189");
    }

    #[tokio::test]
    async fn test_resolve_uses_lookup() {
        let mock = MockHttpClient::ok(SEARCH_BODY);
        let p = provider(mock);
        let suggestion = PlaceSuggestion::new("Evans Library", PlaceHandle::new("W43956347"));

        let destination = p.resolve(suggestion).await.unwrap();

        assert_eq!(destination.title, "Evans Library");
        assert_eq!(destination.coordinate, Coordinate::new(30.6166, -96.3389));
        assert!(p.http_client.last_url().unwrap().contains("/lookup?osm_ids=W43956347"));
    }

    #[tokio::test]
    async fn test_empty_lookup_is_not_found() {
        let p = provider(MockHttpClient::ok("[]"));
        let result = p
            .resolve(PlaceSuggestion::new("Gone", PlaceHandle::new("N1")))
            .await;
        assert_eq!(result, Err(SearchError::NotFound("Gone".into())));
    }

    #[tokio::test]
    async fn test_foreign_handle_is_not_found_without_request() {
        let p = provider(MockHttpClient::ok(SEARCH_BODY));
        let result = p
            .resolve(PlaceSuggestion::new("Evans", PlaceHandle::new("EVAN")))
            .await;

        assert!(matches!(result, Err(SearchError::NotFound(_))));
        assert!(p.http_client.last_url().is_none());
    }

    #[tokio::test]
    async fn test_http_error_maps_to_provider_error() {
        let p = provider(MockHttpClient::err(ProviderError::HttpStatus {
            status: 503,
            body: String::new(),
        }));
        let result = p.complete("library".into()).await;
        assert!(matches!(result, Err(SearchError::Provider(msg)) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_provider_error() {
        let p = provider(MockHttpClient::ok("{\"error\": \"bad\"}"));
        let result = p.complete("library".into()).await;
        assert!(matches!(result, Err(SearchError::Provider(_))));
    }
}
