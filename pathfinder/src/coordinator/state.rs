//! The single immutable value exposed to the presentation layer.

use crate::camera::CameraState;
use crate::error::NavigationError;
use crate::geo::Position;
use crate::route::Route;
use crate::search::{Destination, PlaceSuggestion};

/// Progress of one asynchronous sub-feature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Ready,
    /// The last request failed; the sub-feature shows no data.
    Failed(NavigationError),
}

impl OperationStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, OperationStatus::Loading)
    }

    pub fn error(&self) -> Option<&NavigationError> {
        match self {
            OperationStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Short label for status output.
    pub fn label(&self) -> &'static str {
        match self {
            OperationStatus::Idle => "idle",
            OperationStatus::Loading => "loading",
            OperationStatus::Ready => "ready",
            OperationStatus::Failed(_) => "failed",
        }
    }
}

/// Everything the map screen renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Latest location fix, `None` when location is unavailable.
    pub position: Option<Position>,
    /// First fix of the session.
    pub initial_fix: Option<Position>,
    /// Map camera.
    pub camera: CameraState,
    /// Text shown in the search field.
    pub search_text: String,
    /// Autocomplete list.
    pub suggestions: Vec<PlaceSuggestion>,
    /// Active destination marker.
    pub destination: Option<Destination>,
    /// Route overlay for the active destination.
    pub route: Option<Route>,
    pub location_status: OperationStatus,
    pub search_status: OperationStatus,
    pub route_status: OperationStatus,
}

impl ViewState {
    /// Every failure currently displayed.
    pub fn errors(&self) -> Vec<&NavigationError> {
        [
            &self.location_status,
            &self.search_status,
            &self.route_status,
        ]
        .into_iter()
        .filter_map(OperationStatus::error)
        .collect()
    }

    /// Suggestion titles in display order.
    pub fn suggestion_titles(&self) -> Vec<&str> {
        self.suggestions.iter().map(|s| s.title.as_str()).collect()
    }
}
