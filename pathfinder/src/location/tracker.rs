//! Location tracker - starts a provider once and forwards its fixes.
//!
//! Follows the adapter pattern used for the other asynchronous sources:
//! `start()` spawns a task that drains the provider and sends each result to
//! the coordinator as an [`Intent`]. The tracker never mutates view state
//! itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc;

use super::provider::{LocationError, LocationProvider};
use crate::coordinator::Intent;
use crate::geo::Position;

/// Location tracker for one screen session.
///
/// Starting while already running is a no-op. When the provider fails or its
/// updates end the coordinator is told the location is unavailable, and the
/// tracker is idle again so `start()` may be called to retry. Every forwarded
/// fix carries the session's initial fix.
pub struct LocationTracker {
    provider: Arc<dyn LocationProvider>,
    running: Arc<AtomicBool>,
    /// First fix of the session; set at most once.
    initial_fix: Arc<OnceLock<Position>>,
}

impl std::fmt::Debug for LocationTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationTracker")
            .field("running", &self.is_running())
            .field("initial_fix", &self.initial_fix())
            .finish_non_exhaustive()
    }
}

impl LocationTracker {
    /// Create a tracker over the given provider.
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self {
            provider,
            running: Arc::new(AtomicBool::new(false)),
            initial_fix: Arc::new(OnceLock::new()),
        }
    }

    /// Request permission and start forwarding fixes to `intents`.
    ///
    /// Returns `false` without side effects if tracking is already running.
    pub fn start(&self, intents: mpsc::UnboundedSender<Intent>) -> bool {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Location tracker already running, ignoring start");
            return false;
        }

        let provider = Arc::clone(&self.provider);
        let running = Arc::clone(&self.running);
        let initial_fix = Arc::clone(&self.initial_fix);

        tokio::spawn(async move {
            run_session(provider, running, initial_fix, intents).await;
        });

        true
    }

    /// Whether a provider session is active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// The first fix observed in this session, if any.
    pub fn initial_fix(&self) -> Option<Position> {
        self.initial_fix.get().copied()
    }
}

async fn run_session(
    provider: Arc<dyn LocationProvider>,
    running: Arc<AtomicBool>,
    initial_fix: Arc<OnceLock<Position>>,
    intents: mpsc::UnboundedSender<Intent>,
) {
    tracing::info!("Requesting location permission");

    let mut stream = match provider.start_updates().await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!(error = %e, "Location updates could not start");
            running.store(false, Ordering::Release);
            let _ = intents.send(Intent::LocationUnavailable(e));
            return;
        }
    };

    tracing::info!("Location updates started");
    let mut fixes: u64 = 0;

    while let Some(item) = stream.recv().await {
        match item {
            Ok(position) => {
                if !position.coordinate.is_valid() {
                    tracing::warn!(position = %position.coordinate, "Dropping invalid location fix");
                    continue;
                }
                if initial_fix.set(position).is_ok() {
                    tracing::info!(
                        position = %position.coordinate,
                        accuracy_m = ?position.accuracy_m,
                        "Initial location fix"
                    );
                }
                fixes += 1;

                let intent = Intent::PositionUpdated {
                    position,
                    initial_fix: *initial_fix.get_or_init(|| position),
                };
                if intents.send(intent).is_err() {
                    tracing::debug!("Coordinator channel closed, stopping location tracker");
                    running.store(false, Ordering::Release);
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, fixes, "Location updates failed");
                running.store(false, Ordering::Release);
                let _ = intents.send(Intent::LocationUnavailable(e));
                return;
            }
        }
    }

    running.store(false, Ordering::Release);
    tracing::info!(fixes, "Location updates ended");
    let _ = intents.send(Intent::LocationUnavailable(LocationError::Ended));
}
