//! Route client - one-shot keyed route requests with a timeout.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::provider::RouteProvider;
use super::types::{RouteError, RouteRequest};
use crate::coordinator::Intent;

/// Default provider timeout.
pub const DEFAULT_ROUTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Route client configuration.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Provider timeout.
    pub timeout: Duration,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_ROUTE_TIMEOUT,
        }
    }
}

/// Route client.
pub struct RouteClient {
    provider: Arc<dyn RouteProvider>,
    config: RouteConfig,
    intents: mpsc::UnboundedSender<Intent>,
}

impl std::fmt::Debug for RouteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteClient")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

impl RouteClient {
    /// Create a client that reports results on `intents`.
    pub fn new(
        provider: Arc<dyn RouteProvider>,
        config: RouteConfig,
        intents: mpsc::UnboundedSender<Intent>,
    ) -> Self {
        Self {
            provider,
            config,
            intents,
        }
    }

    /// Issue a route request. The result arrives as [`Intent::RouteReceived`].
    pub fn request(&self, request: RouteRequest) {
        let provider = Arc::clone(&self.provider);
        let intents = self.intents.clone();
        let timeout = self.config.timeout;

        tokio::spawn(async move {
            let RouteRequest { key, from, to } = request;

            tracing::debug!(
                destination = key.destination,
                seq = key.seq,
                from = %from.coordinate,
                to = %to.coordinate,
                provider = provider.name(),
                "Requesting route"
            );

            let result =
                match tokio::time::timeout(timeout, provider.route(from.coordinate, to.coordinate))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(RouteError::Timeout(timeout.as_millis() as u64)),
                };

            match &result {
                Ok(route) => tracing::debug!(
                    destination = key.destination,
                    seq = key.seq,
                    points = route.coordinates.len(),
                    "Route received"
                ),
                Err(e) => tracing::warn!(
                    destination = key.destination,
                    seq = key.seq,
                    error = %e,
                    "Route request failed"
                ),
            }

            let _ = intents.send(Intent::RouteReceived { key, result });
        });
    }
}
