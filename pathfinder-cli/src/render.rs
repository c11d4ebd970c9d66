//! Terminal rendering of view-state changes.
//!
//! The CLI stands in for a map screen: instead of drawing, it prints one
//! line per sub-feature that changed between two view states.

use console::style;

use pathfinder::camera::CameraState;
use pathfinder::coordinator::{OperationStatus, ViewState};
use pathfinder::geo::Position;
use pathfinder::route::Route;

/// One changed sub-feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub label: &'static str,
    pub text: String,
    pub failed: bool,
}

impl Change {
    fn new(label: &'static str, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
            failed: false,
        }
    }

    fn failure(label: &'static str, status: &OperationStatus) -> Option<Self> {
        status.error().map(|e| Self {
            label,
            text: e.to_string(),
            failed: true,
        })
    }
}

/// Everything that differs between `prev` and `next`, in screen order.
pub fn describe_changes(prev: &ViewState, next: &ViewState) -> Vec<Change> {
    let mut changes = Vec::new();

    if prev.position != next.position {
        if let Some(position) = &next.position {
            changes.push(Change::new("fix", describe_position(position)));
        }
    }
    if prev.location_status != next.location_status {
        changes.extend(Change::failure("location", &next.location_status));
    }

    if prev.camera != next.camera {
        changes.push(Change::new("camera", describe_camera(&next.camera)));
    }

    if prev.search_text != next.search_text {
        changes.push(Change::new("query", format!("\"{}\"", next.search_text)));
    }
    if prev.suggestions != next.suggestions {
        let text = if next.suggestions.is_empty() {
            "(none)".to_string()
        } else {
            next.suggestion_titles().join(" | ")
        };
        changes.push(Change::new("results", text));
    }
    if prev.search_status != next.search_status {
        changes.extend(Change::failure("search", &next.search_status));
    }

    if prev.destination != next.destination {
        if let Some(destination) = &next.destination {
            changes.push(Change::new(
                "dest",
                format!("{} @ {}", destination.title, destination.coordinate),
            ));
        }
    }
    if prev.route != next.route {
        let text = match &next.route {
            Some(route) => route_summary(route),
            None => "cleared".to_string(),
        };
        changes.push(Change::new("route", text));
    } else if prev.route_status != next.route_status && next.route_status.is_loading() {
        changes.push(Change::new("route", "requesting..."));
    }
    if prev.route_status != next.route_status {
        changes.extend(Change::failure("route", &next.route_status));
    }

    changes
}

/// Print changes to stdout, one per line.
pub fn print_changes(changes: &[Change]) {
    for change in changes {
        let label = format!("{:<8}", change.label);
        if change.failed {
            println!("  {} {}", style(label).red().bold(), style(&change.text).red());
        } else {
            println!("  {} {}", style(label).cyan(), change.text);
        }
    }
}

pub fn describe_position(position: &Position) -> String {
    match position.accuracy_m {
        Some(accuracy) => format!("{} (±{:.0} m)", position.coordinate, accuracy),
        None => position.coordinate.to_string(),
    }
}

pub fn describe_camera(camera: &CameraState) -> String {
    match camera.region {
        Some(region) => format!(
            "{} @ {} ({:.0} m)",
            camera.mode.label(),
            region.center,
            region.width_m
        ),
        None => camera.mode.label().to_string(),
    }
}

/// One-line route summary: points, distance and duration when known.
pub fn route_summary(route: &Route) -> String {
    let distance_m = route.distance_m.unwrap_or_else(|| route.polyline_length_m());
    let mut summary = format!(
        "{} points, {:.2} km",
        route.coordinates.len(),
        distance_m / 1000.0
    );
    if let Some(duration_s) = route.duration_s {
        summary.push_str(&format!(", {:.0} min", (duration_s / 60.0).ceil()));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder::error::NavigationError;
    use pathfinder::geo::Coordinate;
    use pathfinder::search::{Destination, PlaceHandle, PlaceSuggestion};

    fn labels(changes: &[Change]) -> Vec<&str> {
        changes.iter().map(|c| c.label).collect()
    }

    #[test]
    fn test_no_changes() {
        let view = ViewState::default();
        assert!(describe_changes(&view, &view.clone()).is_empty());
    }

    #[test]
    fn test_suggestions_listed_in_order() {
        let prev = ViewState::default();
        let next = ViewState {
            search_text: "Lib".into(),
            suggestions: vec![
                PlaceSuggestion::new("Library", PlaceHandle::new("EVAN")),
                PlaceSuggestion::new("Law Library", PlaceHandle::new("LAW")),
            ],
            search_status: OperationStatus::Ready,
            ..Default::default()
        };

        let changes = describe_changes(&prev, &next);
        assert_eq!(labels(&changes), vec!["query", "results"]);
        assert_eq!(changes[1].text, "Library | Law Library");
    }

    #[test]
    fn test_failure_is_flagged() {
        let prev = ViewState::default();
        let next = ViewState {
            location_status: OperationStatus::Failed(NavigationError::LocationUnavailable(
                "permission denied".into(),
            )),
            ..Default::default()
        };

        let changes = describe_changes(&prev, &next);
        assert_eq!(changes.len(), 1);
        assert!(changes[0].failed);
        assert!(changes[0].text.contains("permission denied"));
    }

    #[test]
    fn test_destination_and_route() {
        let prev = ViewState::default();
        let to = Coordinate::new(30.6166, -96.3389);
        let from = Coordinate::new(30.6100, -96.3400);
        let next = ViewState {
            destination: Some(Destination::new("Library", to)),
            route: Some(Route::new(vec![from, to], from, to).with_summary(1500.0, 200.0)),
            route_status: OperationStatus::Ready,
            ..Default::default()
        };

        let changes = describe_changes(&prev, &next);
        assert_eq!(labels(&changes), vec!["dest", "route"]);
        assert!(changes[0].text.starts_with("Library @ "));
        assert_eq!(changes[1].text, "2 points, 1.50 km, 4 min");
    }

    #[test]
    fn test_route_loading_shown_once() {
        let prev = ViewState::default();
        let next = ViewState {
            route_status: OperationStatus::Loading,
            ..Default::default()
        };

        let changes = describe_changes(&prev, &next);
        assert_eq!(changes, vec![Change::new("route", "requesting...")]);
    }

    #[test]
    fn test_route_summary_without_provider_distance() {
        let from = Coordinate::new(30.0, -96.0);
        let to = Coordinate::new(30.0, -96.0);
        let route = Route::new(vec![from, to], from, to);
        assert_eq!(route_summary(&route), "2 points, 0.00 km");
    }
}
