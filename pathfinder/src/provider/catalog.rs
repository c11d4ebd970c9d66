//! Campus building catalogue.
//!
//! An offline place search over a fixed list of buildings, loaded from JSON:
//!
//! ```json
//! [
//!   {"code": "EVAN", "name": "Sterling C. Evans Library",
//!    "latitude": 30.6166, "longitude": -96.3389, "aliases": ["Evans"]}
//! ]
//! ```
//!
//! Matching is case-insensitive over the name, the code and every alias.
//! Exact matches rank first, then prefix matches (of the whole string or of
//! any word), then plain substring matches. Suggestions carry the building
//! code as their handle, so resolution is a table lookup.

use std::path::Path;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use super::types::ProviderError;
use crate::geo::Coordinate;
use crate::search::{Destination, PlaceHandle, PlaceSearchProvider, PlaceSuggestion, SearchError};

/// A campus building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Short building code, unique within the catalogue.
    pub code: String,
    /// Official name.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Other names people search for.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Building {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Match rank for a lowercase needle; lower is better.
    fn rank(&self, needle: &str) -> Option<u8> {
        std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.code.as_str()))
            .chain(self.aliases.iter().map(String::as_str))
            .filter_map(|candidate| match_rank(&candidate.to_lowercase(), needle))
            .min()
    }

    fn suggestion(&self) -> PlaceSuggestion {
        PlaceSuggestion::new(self.name.clone(), PlaceHandle::new(self.code.clone()))
            .with_subtitle(self.code.clone())
    }
}

fn match_rank(haystack: &str, needle: &str) -> Option<u8> {
    if haystack == needle {
        Some(0)
    } else if haystack.starts_with(needle)
        || haystack
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word.starts_with(needle))
    {
        Some(1)
    } else if haystack.contains(needle) {
        Some(2)
    } else {
        None
    }
}

/// In-memory building catalogue.
#[derive(Debug, Clone, Default)]
pub struct CampusCatalog {
    buildings: Vec<Building>,
}

impl CampusCatalog {
    /// Create a catalogue, rejecting duplicate codes and invalid coordinates.
    pub fn new(buildings: Vec<Building>) -> Result<Self, ProviderError> {
        let mut seen = std::collections::HashSet::new();
        for building in &buildings {
            if !seen.insert(building.code.to_lowercase()) {
                return Err(ProviderError::ParseError(format!(
                    "duplicate building code '{}'",
                    building.code
                )));
            }
            if !building.coordinate().is_valid() {
                return Err(ProviderError::ParseError(format!(
                    "building '{}' has invalid coordinates",
                    building.code
                )));
            }
        }
        Ok(Self { buildings })
    }

    /// Parse a JSON array of buildings.
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a catalogue file.
    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::Io(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            buildings = catalog.len(),
            "Loaded building catalogue"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Building with the given code (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&Building> {
        self.buildings
            .iter()
            .find(|b| b.code.eq_ignore_ascii_case(code))
    }

    /// Buildings matching `text`, best first. Blank text matches nothing.
    pub fn search(&self, text: &str) -> Vec<&Building> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(u8, &Building)> = self
            .buildings
            .iter()
            .filter_map(|b| b.rank(&needle).map(|rank| (rank, b)))
            .collect();
        hits.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| a.name.cmp(&b.name)));
        hits.into_iter().map(|(_, b)| b).collect()
    }
}

impl PlaceSearchProvider for CampusCatalog {
    fn name(&self) -> &str {
        "catalog"
    }

    fn complete(&self, text: String) -> BoxFuture<'_, Result<Vec<PlaceSuggestion>, SearchError>> {
        Box::pin(async move {
            Ok(self
                .search(&text)
                .into_iter()
                .map(Building::suggestion)
                .collect())
        })
    }

    fn resolve(&self, suggestion: PlaceSuggestion) -> BoxFuture<'_, Result<Destination, SearchError>> {
        Box::pin(async move {
            let building = self
                .get(suggestion.handle.as_str())
                .ok_or_else(|| SearchError::NotFound(suggestion.title.clone()))?;
            Ok(Destination::new(suggestion.title, building.coordinate()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CAMPUS: &str = r#"[
        {"code": "EVAN", "name": "Sterling C. Evans Library", "latitude": 30.6166, "longitude": -96.3389, "aliases": ["Evans"]},
        {"code": "ZACH", "name": "Zachry Engineering Education Complex", "latitude": 30.6212, "longitude": -96.3404},
        {"code": "KYLE", "name": "Kyle Field", "latitude": 30.6100, "longitude": -96.3403, "aliases": ["Stadium"]},
        {"code": "ENGL", "name": "Engineering Library Annex", "latitude": 30.6190, "longitude": -96.3390}
    ]"#;

    fn catalog() -> CampusCatalog {
        CampusCatalog::from_json(CAMPUS).unwrap()
    }

    fn names(hits: Vec<&Building>) -> Vec<&str> {
        hits.into_iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_prefix_matches_rank_before_substring() {
        let c = catalog();
        // "Engineering Library Annex" starts with "eng"; Zachry has it as a word prefix
        assert_eq!(
            names(c.search("eng")),
            vec![
                "Engineering Library Annex",
                "Zachry Engineering Education Complex"
            ]
        );
        // "library" is a word prefix in both library names
        assert_eq!(
            names(c.search("LIBRARY")),
            vec!["Engineering Library Annex", "Sterling C. Evans Library"]
        );
        // Substring only
        assert_eq!(names(c.search("achr")), vec!["Zachry Engineering Education Complex"]);
    }

    #[test]
    fn test_code_and_alias_match() {
        let c = catalog();
        assert_eq!(names(c.search("kyle")), vec!["Kyle Field"]);
        assert_eq!(names(c.search("stadium")), vec!["Kyle Field"]);
        assert_eq!(names(c.search("zach")), vec!["Zachry Engineering Education Complex"]);
    }

    #[test]
    fn test_exact_code_ranks_first() {
        let c = catalog();
        assert_eq!(c.search("engl")[0].code, "ENGL");
    }

    #[test]
    fn test_blank_and_unknown() {
        let c = catalog();
        assert!(c.search("   ").is_empty());
        assert!(c.search("observatory").is_empty());
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let json = r#"[
            {"code": "EVAN", "name": "A", "latitude": 30.0, "longitude": -96.0},
            {"code": "evan", "name": "B", "latitude": 30.0, "longitude": -96.0}
        ]"#;
        assert!(matches!(
            CampusCatalog::from_json(json),
            Err(ProviderError::ParseError(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        let json = r#"[{"code": "X", "name": "X", "latitude": 95.0, "longitude": 0.0}]"#;
        assert!(CampusCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CAMPUS.as_bytes()).unwrap();

        let c = CampusCatalog::load(file.path()).unwrap();
        assert_eq!(c.len(), 4);
        assert!(c.get("kyle").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let result = CampusCatalog::load(Path::new("/nonexistent/buildings.json"));
        assert!(matches!(result, Err(ProviderError::Io(_))));
    }

    #[tokio::test]
    async fn test_complete_and_resolve() {
        let c = catalog();
        let suggestions = c.complete("evans".into()).await.unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].handle.as_str(), "EVAN");
        assert_eq!(suggestions[0].subtitle.as_deref(), Some("EVAN"));

        let destination = c.resolve(suggestions[0].clone()).await.unwrap();
        assert_eq!(destination.coordinate, Coordinate::new(30.6166, -96.3389));
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let c = catalog();
        let result = c
            .resolve(PlaceSuggestion::new("Old Main", PlaceHandle::new("MAIN")))
            .await;
        assert_eq!(result, Err(SearchError::NotFound("Old Main".into())));
    }
}
