//! Navigation coordinator.
//!
//! Reconciles the location stream, typed search text, suggestion results
//! and route results into one [`ViewState`]. [`NavigationCoordinator`] is
//! the pure fold; [`CoordinatorService`] runs it as a single tokio task and
//! executes the effects it returns.

mod intent;
mod navigation;
mod service;
mod state;

pub use intent::{Effect, IgnoreReason, Intent, IntentOutcome, Transition};
pub use navigation::{NavigationCoordinator, DEFAULT_REROUTE_DISTANCE_M};
pub use service::{CoordinatorHandle, CoordinatorService, Providers, ServiceStopped};
pub use state::{OperationStatus, ViewState};
