//! Device location tracking.
//!
//! Wraps a platform location capability into a stream of [`Position`] values
//! folded into the coordinator, plus a stable "initial fix": the first
//! position seen in the tracking session, used to place the camera the very
//! first time.
//!
//! # Components
//!
//! - [`LocationProvider`] - platform capability: permission prompt + position stream
//! - [`LocationTracker`] - idempotent start, initial fix, forwards fixes as intents
//! - [`ReplayLocationProvider`] - scripted provider for simulations and tests
//!
//! [`Position`]: crate::geo::Position

mod provider;
mod replay;
mod tracker;

pub use provider::{LocationError, LocationProvider, PositionStream};
pub use replay::{
    parse_track, ReplayConfig, ReplayError, ReplayLocationProvider, DEFAULT_REPLAY_INTERVAL,
};
pub use tracker::LocationTracker;
