//! Debouncing, sequence-tagging place search client.
//!
//! Each `search()` call records its sequence number as the latest and spawns
//! a short-lived task that waits out the debounce window. When the window
//! elapses the task only proceeds if no newer query arrived meanwhile, so a
//! burst of keystrokes produces a single provider request. Results go back
//! to the coordinator tagged with the sequence number that produced them.
//!
//! There is no cancellation of in-flight provider calls: a request that has
//! already been sent runs to completion (or timeout) and its result is
//! filtered on arrival by the coordinator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::provider::PlaceSearchProvider;
use super::types::{Destination, PlaceQuery, PlaceSuggestion, SearchError};
use crate::coordinator::Intent;

/// Default quiet window before a query is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Default provider timeout.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on suggestions shown.
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// Place search client configuration.
#[derive(Debug, Clone)]
pub struct PlaceSearchConfig {
    /// Quiet window before a query is sent.
    pub debounce: Duration,
    /// Provider timeout for both completion and resolution.
    pub timeout: Duration,
    /// Maximum suggestions forwarded per result.
    pub max_results: usize,
}

impl Default for PlaceSearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            timeout: DEFAULT_SEARCH_TIMEOUT,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Place search client.
pub struct PlaceSearchClient {
    provider: Arc<dyn PlaceSearchProvider>,
    config: PlaceSearchConfig,
    /// Highest sequence number seen; pending debounces compare against it.
    latest_seq: Arc<AtomicU64>,
    intents: mpsc::UnboundedSender<Intent>,
}

impl std::fmt::Debug for PlaceSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceSearchClient")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .field("latest_seq", &self.latest_seq())
            .finish()
    }
}

impl PlaceSearchClient {
    /// Create a client that reports results on `intents`.
    pub fn new(
        provider: Arc<dyn PlaceSearchProvider>,
        config: PlaceSearchConfig,
        intents: mpsc::UnboundedSender<Intent>,
    ) -> Self {
        Self {
            provider,
            config,
            latest_seq: Arc::new(AtomicU64::new(0)),
            intents,
        }
    }

    /// Submit a query.
    ///
    /// Safe to call on every keystroke. A blank query only supersedes pending
    /// debounces; it never reaches the provider. Returns `true` if a request
    /// was scheduled.
    pub fn search(&self, query: PlaceQuery) -> bool {
        self.latest_seq.fetch_max(query.seq, Ordering::AcqRel);

        if query.is_blank() {
            tracing::debug!(seq = query.seq, "Blank query, no provider request");
            return false;
        }

        let provider = Arc::clone(&self.provider);
        let latest = Arc::clone(&self.latest_seq);
        let intents = self.intents.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            tokio::time::sleep(config.debounce).await;

            if latest.load(Ordering::Acquire) != query.seq {
                tracing::trace!(seq = query.seq, "Query superseded during debounce");
                return;
            }

            tracing::debug!(
                seq = query.seq,
                text = %query.text,
                provider = provider.name(),
                "Sending place search"
            );

            let result = match tokio::time::timeout(
                config.timeout,
                provider.complete(query.text.clone()),
            )
            .await
            {
                Ok(Ok(mut suggestions)) => {
                    suggestions.truncate(config.max_results);
                    Ok(suggestions)
                }
                Ok(Err(e)) => {
                    tracing::warn!(seq = query.seq, error = %e, "Place search failed");
                    Err(e)
                }
                Err(_) => {
                    tracing::warn!(
                        seq = query.seq,
                        timeout_ms = config.timeout.as_millis() as u64,
                        "Place search timed out"
                    );
                    Err(SearchError::Timeout(config.timeout.as_millis() as u64))
                }
            };

            let _ = intents.send(Intent::SuggestionsReceived {
                seq: query.seq,
                result,
            });
        });

        true
    }

    /// Supersede every pending debounce up to and including `seq`.
    pub fn invalidate(&self, seq: u64) {
        self.latest_seq.fetch_max(seq, Ordering::AcqRel);
    }

    /// Resolve a chosen suggestion; the result is tagged with `choice`.
    pub fn resolve(&self, choice: u64, suggestion: PlaceSuggestion) {
        let provider = Arc::clone(&self.provider);
        let intents = self.intents.clone();
        let timeout = self.config.timeout;

        tokio::spawn(async move {
            let title = suggestion.title.clone();
            tracing::debug!(choice, title = %title, "Resolving suggestion");

            let result: Result<Destination, SearchError> =
                match tokio::time::timeout(timeout, provider.resolve(suggestion)).await {
                    Ok(result) => result,
                    Err(_) => Err(SearchError::Timeout(timeout.as_millis() as u64)),
                };

            if let Err(ref e) = result {
                tracing::warn!(choice, title = %title, error = %e, "Suggestion resolution failed");
            }

            let _ = intents.send(Intent::DestinationResolved { choice, result });
        });
    }

    /// Highest sequence number submitted so far.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq.load(Ordering::Acquire)
    }
}
