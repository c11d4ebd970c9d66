//! Intents folded by the coordinator and the effects it asks for.

use crate::geo::{Position, Region};
use crate::location::LocationError;
use crate::route::{Route, RouteError, RouteKey, RouteRequest};
use crate::search::{Destination, PlaceQuery, PlaceSuggestion, SearchError};

/// Everything that can change the view state.
///
/// User intents come from the presentation layer; the rest are results of
/// asynchronous work, tagged with the key they were issued under so stale
/// ones can be recognised on arrival.
#[derive(Debug, Clone)]
pub enum Intent {
    /// The user asked to show their location (permission prompt + tracking).
    RequestPermission,
    /// A location fix arrived, with the first fix of its tracking session.
    PositionUpdated {
        position: Position,
        initial_fix: Position,
    },
    /// Location permission was denied or the hardware failed.
    LocationUnavailable(LocationError),
    /// The search field changed.
    QueryChanged(String),
    /// Suggestions for the query with sequence number `seq`.
    SuggestionsReceived {
        seq: u64,
        result: Result<Vec<PlaceSuggestion>, SearchError>,
    },
    /// The user tapped a suggestion.
    SuggestionChosen(PlaceSuggestion),
    /// Resolution of the suggestion chosen under `choice`.
    DestinationResolved {
        choice: u64,
        result: Result<Destination, SearchError>,
    },
    /// Route for the request identified by `key`.
    RouteReceived {
        key: RouteKey,
        result: Result<Route, RouteError>,
    },
    /// The user panned or zoomed the map.
    MapPanned(Option<Region>),
}

impl Intent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::RequestPermission => "request_permission",
            Intent::PositionUpdated { .. } => "position_updated",
            Intent::LocationUnavailable(_) => "location_unavailable",
            Intent::QueryChanged(_) => "query_changed",
            Intent::SuggestionsReceived { .. } => "suggestions_received",
            Intent::SuggestionChosen(_) => "suggestion_chosen",
            Intent::DestinationResolved { .. } => "destination_resolved",
            Intent::RouteReceived { .. } => "route_received",
            Intent::MapPanned(_) => "map_panned",
        }
    }
}

/// Work the coordinator asks its collaborators to perform.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Start the location tracker.
    StartLocation,
    /// Submit a query to the place search client (blank queries only
    /// supersede pending ones).
    Search(PlaceQuery),
    /// Supersede any pending search up to this sequence number.
    InvalidateSearch(u64),
    /// Resolve a chosen suggestion.
    Resolve {
        choice: u64,
        suggestion: PlaceSuggestion,
    },
    /// Request a route.
    RequestRoute(RouteRequest),
}

/// Why an intent did not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The result belongs to a superseded query, choice or destination.
    StaleResult,
    /// The chosen suggestion is not in the current list.
    UnknownSuggestion,
    /// Location tracking is already starting or running.
    AlreadyStarted,
    /// The fix has a coordinate outside the valid range.
    InvalidFix,
}

/// Result of folding one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Applied,
    Ignored(IgnoreReason),
}

/// Outcome plus the effects to execute.
#[derive(Debug, Clone)]
pub struct Transition {
    pub outcome: IntentOutcome,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub(crate) fn applied(effects: Vec<Effect>) -> Self {
        Self {
            outcome: IntentOutcome::Applied,
            effects,
        }
    }

    pub(crate) fn ignored(reason: IgnoreReason) -> Self {
        Self {
            outcome: IntentOutcome::Ignored(reason),
            effects: Vec::new(),
        }
    }

    /// Whether the intent changed the view state.
    pub fn is_applied(&self) -> bool {
        self.outcome == IntentOutcome::Applied
    }
}
