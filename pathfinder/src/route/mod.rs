//! Driving route requests.
//!
//! [`RouteClient`] issues one-shot requests to a [`RouteProvider`] and reports
//! each result to the coordinator tagged with the [`RouteKey`] it was issued
//! under. Stale results are filtered on arrival by the coordinator; nothing
//! here cancels a request once sent.

mod client;
mod provider;
mod types;

pub use client::{RouteClient, RouteConfig, DEFAULT_ROUTE_TIMEOUT};
pub use provider::RouteProvider;
pub use types::{Route, RouteError, RouteKey, RouteRequest};
