//! Pathfinder - campus navigation coordinator
//!
//! This library reconciles a live location stream, typed search text,
//! place suggestions and driving routes into one consistent map view.
//!
//! # Architecture
//!
//! ```text
//!   LocationTracker     PlaceSearchClient      RouteClient
//!         │                    │                    │
//!         └──────── Intent ────┴──── Intent ────────┘
//!                              │
//!                              ▼
//!                  ┌───────────────────────┐
//!  user intents ──▶│ NavigationCoordinator │──▶ ViewState (watch)
//!                  │  + MapFollowPolicy    │
//!                  └───────────┬───────────┘
//!                              │ Effects
//!                              ▼
//!                  start tracking / search / resolve / route
//! ```
//!
//! Every asynchronous result is tagged with the key it was issued under and
//! dropped on arrival if that key is no longer current.

pub mod camera;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod geo;
pub mod location;
pub mod logging;
pub mod provider;
pub mod route;
pub mod search;

pub use coordinator::{CoordinatorHandle, CoordinatorService, Intent, Providers, ViewState};
pub use error::NavigationError;
