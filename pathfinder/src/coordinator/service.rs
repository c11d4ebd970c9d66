//! Coordinator service - the single task that owns the view state.
//!
//! All intents, whether typed by the user or produced by a provider task,
//! travel through one unbounded channel and are folded in arrival order.
//! The resulting view state is published through a `watch` channel so any
//! number of renderers can observe it.
//!
//! # Example
//!
//! ```ignore
//! let (handle, task) = CoordinatorService::new(config, providers).start();
//!
//! handle.request_permission()?;
//! handle.query_changed("Library")?;
//!
//! let mut view = handle.subscribe();
//! while view.changed().await.is_ok() {
//!     render(&view.borrow());
//! }
//!
//! handle.shutdown();
//! task.await?;
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::camera::MapFollowPolicy;
use crate::config::CoordinatorConfig;
use crate::geo::Region;
use crate::location::{LocationProvider, LocationTracker};
use crate::route::{RouteClient, RouteProvider};
use crate::search::{PlaceSearchClient, PlaceSearchProvider, PlaceSuggestion};

use super::intent::{Effect, Intent, IntentOutcome};
use super::navigation::NavigationCoordinator;
use super::state::ViewState;

/// The intent channel is closed because the service stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Coordinator service has stopped")]
pub struct ServiceStopped;

/// External capabilities the coordinator talks to.
#[derive(Clone)]
pub struct Providers {
    pub location: Arc<dyn LocationProvider>,
    pub search: Arc<dyn PlaceSearchProvider>,
    pub route: Arc<dyn RouteProvider>,
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers")
            .field("search", &self.search.name())
            .field("route", &self.route.name())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Service
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the coordinator and its collaborators.
pub struct CoordinatorService {
    coordinator: NavigationCoordinator,
    tracker: LocationTracker,
    search: PlaceSearchClient,
    route: RouteClient,
    intents_tx: mpsc::UnboundedSender<Intent>,
    intents_rx: mpsc::UnboundedReceiver<Intent>,
    view_tx: watch::Sender<ViewState>,
    cancel: CancellationToken,
}

impl CoordinatorService {
    /// Wire a coordinator to its providers.
    pub fn new(config: CoordinatorConfig, providers: Providers) -> Self {
        let (intents_tx, intents_rx) = mpsc::unbounded_channel();
        let (view_tx, _) = watch::channel(ViewState::default());

        Self {
            coordinator: NavigationCoordinator::new(
                MapFollowPolicy::new(config.viewport_m),
                config.reroute_distance_m,
            ),
            tracker: LocationTracker::new(providers.location),
            search: PlaceSearchClient::new(providers.search, config.search, intents_tx.clone()),
            route: RouteClient::new(providers.route, config.route, intents_tx.clone()),
            intents_tx,
            intents_rx,
            view_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Handle for sending intents and observing the view state.
    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle {
            intents: self.intents_tx.clone(),
            view: self.view_tx.subscribe(),
            cancel: self.cancel.clone(),
        }
    }

    /// Spawn the service loop on the current runtime.
    pub fn start(self) -> (CoordinatorHandle, JoinHandle<()>) {
        let handle = self.handle();
        let task = tokio::spawn(self.run());
        (handle, task)
    }

    /// Run until [`CoordinatorHandle::shutdown`] is called.
    pub async fn run(mut self) {
        tracing::info!("Navigation coordinator started");
        let cancel = self.cancel.clone();
        let mut processed: u64 = 0;

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    tracing::info!(processed, "Navigation coordinator shutting down");
                    break;
                }

                intent = self.intents_rx.recv() => {
                    let Some(intent) = intent else {
                        break;
                    };
                    self.process(intent);
                    processed += 1;
                }
            }
        }
    }

    fn process(&mut self, intent: Intent) {
        let name = intent.name();
        let transition = self.coordinator.handle(intent);

        match transition.outcome {
            IntentOutcome::Applied => {
                tracing::trace!(intent = name, effects = transition.effects.len(), "Intent applied");
            }
            IntentOutcome::Ignored(reason) => {
                tracing::debug!(intent = name, ?reason, "Intent ignored");
                return;
            }
        }

        for effect in transition.effects {
            self.execute(effect);
        }

        let next = self.coordinator.view();
        self.view_tx.send_if_modified(|view| {
            if *view == *next {
                false
            } else {
                *view = next.clone();
                true
            }
        });
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::StartLocation => {
                self.tracker.start(self.intents_tx.clone());
            }
            Effect::Search(query) => {
                self.search.search(query);
            }
            Effect::InvalidateSearch(seq) => self.search.invalidate(seq),
            Effect::Resolve { choice, suggestion } => self.search.resolve(choice, suggestion),
            Effect::RequestRoute(request) => self.route.request(request),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handle
// ─────────────────────────────────────────────────────────────────────────────

/// Cloneable front end used by the presentation layer.
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    intents: mpsc::UnboundedSender<Intent>,
    view: watch::Receiver<ViewState>,
    cancel: CancellationToken,
}

impl CoordinatorHandle {
    /// Send any intent.
    pub fn dispatch(&self, intent: Intent) -> Result<(), ServiceStopped> {
        if self.cancel.is_cancelled() {
            return Err(ServiceStopped);
        }
        self.intents.send(intent).map_err(|_| ServiceStopped)
    }

    /// Ask for location permission and start tracking.
    pub fn request_permission(&self) -> Result<(), ServiceStopped> {
        self.dispatch(Intent::RequestPermission)
    }

    /// The search field changed.
    pub fn query_changed(&self, text: impl Into<String>) -> Result<(), ServiceStopped> {
        self.dispatch(Intent::QueryChanged(text.into()))
    }

    /// The user picked a suggestion from the list.
    pub fn choose_suggestion(&self, suggestion: PlaceSuggestion) -> Result<(), ServiceStopped> {
        self.dispatch(Intent::SuggestionChosen(suggestion))
    }

    /// The user panned or zoomed the map.
    pub fn map_panned(&self, region: Option<Region>) -> Result<(), ServiceStopped> {
        self.dispatch(Intent::MapPanned(region))
    }

    /// A receiver that is notified on every view-state change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// Snapshot of the current view state.
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Wait until the view state satisfies `predicate`.
    ///
    /// Returns `None` if the service stops first.
    pub async fn wait_for(&self, predicate: impl FnMut(&ViewState) -> bool) -> Option<ViewState> {
        let mut rx = self.view.clone();
        let view = rx.wait_for(predicate).await.ok()?.clone();
        Some(view)
    }

    /// Stop the service loop. In-flight provider calls finish on their own
    /// and their results are discarded.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
