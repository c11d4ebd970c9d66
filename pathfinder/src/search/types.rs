//! Place search data types.

use thiserror::Error;

use crate::geo::Coordinate;

/// A user query tagged with a monotonically increasing sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery {
    /// Sequence number assigned by the coordinator.
    pub seq: u64,
    /// Raw text as typed.
    pub text: String,
}

impl PlaceQuery {
    /// Create a query.
    pub fn new(seq: u64, text: impl Into<String>) -> Self {
        Self {
            seq,
            text: text.into(),
        }
    }

    /// Whether the query should clear suggestions instead of searching.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Provider-specific opaque handle for a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceHandle(String);

impl PlaceHandle {
    /// Wrap a provider reference.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The provider reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One autocomplete entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSuggestion {
    /// Human-readable title shown in the list.
    pub title: String,
    /// Secondary line (address, building code), if any.
    pub subtitle: Option<String>,
    /// Handle used to resolve the suggestion.
    pub handle: PlaceHandle,
}

impl PlaceSuggestion {
    /// Create a suggestion without a subtitle.
    pub fn new(title: impl Into<String>, handle: PlaceHandle) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            handle,
        }
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// A resolved place the user wants to go to.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    /// Title of the suggestion that produced it.
    pub title: String,
    /// Where it is.
    pub coordinate: Coordinate,
}

impl Destination {
    /// Create a destination.
    pub fn new(title: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            title: title.into(),
            coordinate,
        }
    }
}

/// Place search failures. All are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Provider transport or protocol error.
    #[error("Place search provider error: {0}")]
    Provider(String),

    /// The suggestion could not be resolved.
    #[error("Place not found: {0}")]
    NotFound(String),

    /// The provider did not answer within the timeout (milliseconds).
    #[error("Place search timed out after {0} ms")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query() {
        assert!(PlaceQuery::new(1, "").is_blank());
        assert!(PlaceQuery::new(1, "   ").is_blank());
        assert!(!PlaceQuery::new(1, "Eng").is_blank());
    }

    #[test]
    fn test_suggestion_builder() {
        let s = PlaceSuggestion::new("Library", PlaceHandle::new("EVANS"))
            .with_subtitle("Sterling C. Evans Library");
        assert_eq!(s.handle.as_str(), "EVANS");
        assert_eq!(s.subtitle.as_deref(), Some("Sterling C. Evans Library"));
    }
}
