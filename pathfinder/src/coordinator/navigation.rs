//! Navigation coordinator.
//!
//! Folds every [`Intent`] into the single [`ViewState`], one at a time. The
//! fold is synchronous and performs no I/O: whatever asynchronous work an
//! intent needs is returned as [`Effect`]s for the service loop to execute.
//!
//! # Staleness keys
//!
//! ```text
//! query_seq        bumped on every query change and on suggestion choice
//! choice_seq       bumped on every suggestion choice
//! destination_gen  bumped whenever a resolved destination is applied
//! route_seq        bumped on every route request
//! ```
//!
//! A result is applied only if the key it carries matches the current value
//! when it arrives. Anything older is dropped; nothing is queued or cancelled.

use crate::camera::{CameraEvent, MapFollowPolicy};
use crate::geo::{Position, Region};
use crate::location::LocationError;
use crate::route::{Route, RouteError, RouteKey, RouteRequest};
use crate::search::{Destination, PlaceQuery, PlaceSuggestion, SearchError};

use super::intent::{Effect, IgnoreReason, Intent, Transition};
use super::state::{OperationStatus, ViewState};

/// Default drift from the last route source that triggers a route refresh.
pub const DEFAULT_REROUTE_DISTANCE_M: f64 = 50.0;

// ─────────────────────────────────────────────────────────────────────────────
// Coordinator
// ─────────────────────────────────────────────────────────────────────────────

/// Single owner of the navigation view state.
#[derive(Debug, Clone)]
pub struct NavigationCoordinator {
    policy: MapFollowPolicy,
    reroute_distance_m: f64,
    state: ViewState,

    query_seq: u64,
    choice_seq: u64,
    destination_gen: u64,
    route_seq: u64,

    /// Source of the most recently issued route request.
    last_route_source: Option<Position>,
}

impl Default for NavigationCoordinator {
    fn default() -> Self {
        Self::new(MapFollowPolicy::default(), DEFAULT_REROUTE_DISTANCE_M)
    }
}

impl NavigationCoordinator {
    /// Create a coordinator for a fresh session.
    pub fn new(policy: MapFollowPolicy, reroute_distance_m: f64) -> Self {
        Self {
            policy,
            reroute_distance_m,
            state: ViewState::default(),
            query_seq: 0,
            choice_seq: 0,
            destination_gen: 0,
            route_seq: 0,
            last_route_source: None,
        }
    }

    /// Current view state.
    pub fn view(&self) -> &ViewState {
        &self.state
    }

    /// Sequence number of the latest query.
    pub fn query_seq(&self) -> u64 {
        self.query_seq
    }

    /// Generation of the active destination (0 before the first one).
    pub fn destination_generation(&self) -> u64 {
        self.destination_gen
    }

    /// Fold one intent into the view state.
    pub fn handle(&mut self, intent: Intent) -> Transition {
        match intent {
            Intent::RequestPermission => self.on_request_permission(),
            Intent::PositionUpdated {
                position,
                initial_fix,
            } => self.on_position(position, initial_fix),
            Intent::LocationUnavailable(e) => self.on_location_unavailable(e),
            Intent::QueryChanged(text) => self.on_query_changed(text),
            Intent::SuggestionsReceived { seq, result } => self.on_suggestions(seq, result),
            Intent::SuggestionChosen(suggestion) => self.on_suggestion_chosen(suggestion),
            Intent::DestinationResolved { choice, result } => {
                self.on_destination_resolved(choice, result)
            }
            Intent::RouteReceived { key, result } => self.on_route(key, result),
            Intent::MapPanned(region) => self.on_map_panned(region),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Location
    // ─────────────────────────────────────────────────────────────────────────

    fn on_request_permission(&mut self) -> Transition {
        match self.state.location_status {
            OperationStatus::Loading | OperationStatus::Ready => {
                Transition::ignored(IgnoreReason::AlreadyStarted)
            }
            OperationStatus::Idle | OperationStatus::Failed(_) => {
                self.state.location_status = OperationStatus::Loading;
                Transition::applied(vec![Effect::StartLocation])
            }
        }
    }

    fn on_position(&mut self, position: Position, initial_fix: Position) -> Transition {
        if !position.coordinate.is_valid() || !initial_fix.coordinate.is_valid() {
            tracing::warn!(
                position = %position.coordinate,
                initial_fix = %initial_fix.coordinate,
                "Ignoring invalid location fix"
            );
            return Transition::ignored(IgnoreReason::InvalidFix);
        }

        let initial_fix = *self.state.initial_fix.get_or_insert(initial_fix);

        self.state.camera = self.policy.next_camera(
            &self.state.camera,
            &CameraEvent::Position {
                position,
                initial_fix,
            },
        );
        self.state.position = Some(position);
        self.state.location_status = OperationStatus::Ready;

        let mut effects = Vec::new();
        if self.needs_reroute(&position) {
            if let Some(effect) = self.request_route() {
                effects.push(effect);
            }
        }

        Transition::applied(effects)
    }

    fn on_location_unavailable(&mut self, error: LocationError) -> Transition {
        tracing::warn!(error = %error, "Location unavailable");
        self.state.position = None;
        self.state.location_status = OperationStatus::Failed(error.into());
        Transition::applied(Vec::new())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    fn on_query_changed(&mut self, text: String) -> Transition {
        self.query_seq += 1;
        let query = PlaceQuery::new(self.query_seq, text.clone());
        self.state.search_text = text;

        if query.is_blank() {
            self.state.suggestions.clear();
            self.state.search_status = OperationStatus::Idle;
        } else {
            self.state.search_status = OperationStatus::Loading;
        }

        Transition::applied(vec![Effect::Search(query)])
    }

    fn on_suggestions(
        &mut self,
        seq: u64,
        result: Result<Vec<PlaceSuggestion>, SearchError>,
    ) -> Transition {
        if seq != self.query_seq {
            tracing::debug!(seq, latest = self.query_seq, "Dropping stale suggestions");
            return Transition::ignored(IgnoreReason::StaleResult);
        }

        match result {
            Ok(suggestions) => {
                self.state.suggestions = suggestions;
                self.state.search_status = OperationStatus::Ready;
            }
            Err(e) => {
                self.state.suggestions.clear();
                self.state.search_status = OperationStatus::Failed(e.into());
            }
        }

        Transition::applied(Vec::new())
    }

    fn on_suggestion_chosen(&mut self, suggestion: PlaceSuggestion) -> Transition {
        if !self.state.suggestions.contains(&suggestion) {
            tracing::debug!(title = %suggestion.title, "Chosen suggestion not in current list");
            return Transition::ignored(IgnoreReason::UnknownSuggestion);
        }

        // Late results for the typed query must not refill the list.
        self.query_seq += 1;
        self.choice_seq += 1;

        self.state.suggestions.clear();
        self.state.search_text = suggestion.title.clone();
        self.state.search_status = OperationStatus::Loading;

        Transition::applied(vec![
            Effect::InvalidateSearch(self.query_seq),
            Effect::Resolve {
                choice: self.choice_seq,
                suggestion,
            },
        ])
    }

    fn on_destination_resolved(
        &mut self,
        choice: u64,
        result: Result<Destination, SearchError>,
    ) -> Transition {
        if choice != self.choice_seq {
            tracing::debug!(choice, latest = self.choice_seq, "Dropping stale resolution");
            return Transition::ignored(IgnoreReason::StaleResult);
        }

        let destination = match result {
            Ok(destination) => destination,
            Err(e) => {
                self.state.search_status = OperationStatus::Failed(e.into());
                return Transition::applied(Vec::new());
            }
        };

        tracing::info!(
            title = %destination.title,
            coordinate = %destination.coordinate,
            "Destination set"
        );

        self.destination_gen += 1;
        self.state.destination = Some(destination);
        self.state.search_status = OperationStatus::Ready;
        self.state.route = None;
        self.state.route_status = OperationStatus::Idle;
        self.last_route_source = None;

        let effects = self.request_route().into_iter().collect();
        Transition::applied(effects)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Route
    // ─────────────────────────────────────────────────────────────────────────

    fn needs_reroute(&self, position: &Position) -> bool {
        if self.state.destination.is_none() {
            return false;
        }
        match &self.last_route_source {
            None => true,
            Some(source) => source.distance_m(position) > self.reroute_distance_m,
        }
    }

    /// Issue a route request from the current position to the current
    /// destination, if both are known.
    fn request_route(&mut self) -> Option<Effect> {
        let from = self.state.position?;
        let to = self.state.destination.clone()?;

        self.route_seq += 1;
        self.last_route_source = Some(from);
        self.state.route_status = OperationStatus::Loading;

        Some(Effect::RequestRoute(RouteRequest {
            key: RouteKey {
                destination: self.destination_gen,
                seq: self.route_seq,
            },
            from,
            to,
        }))
    }

    fn on_route(&mut self, key: RouteKey, result: Result<Route, RouteError>) -> Transition {
        let current = RouteKey {
            destination: self.destination_gen,
            seq: self.route_seq,
        };
        if self.state.destination.is_none() || key != current {
            tracing::debug!(
                destination = key.destination,
                seq = key.seq,
                current_destination = current.destination,
                current_seq = current.seq,
                "Dropping stale route"
            );
            return Transition::ignored(IgnoreReason::StaleResult);
        }

        match result {
            Ok(route) => {
                self.state.route = Some(route);
                self.state.route_status = OperationStatus::Ready;
            }
            Err(e) => {
                self.state.route = None;
                self.state.route_status = OperationStatus::Failed(e.into());
            }
        }

        Transition::applied(Vec::new())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Map
    // ─────────────────────────────────────────────────────────────────────────

    fn on_map_panned(&mut self, region: Option<Region>) -> Transition {
        self.state.camera = self
            .policy
            .next_camera(&self.state.camera, &CameraEvent::UserPanned { region });
        Transition::applied(Vec::new())
    }
}
