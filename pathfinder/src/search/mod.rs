//! Place search: free-text autocomplete and suggestion resolution.
//!
//! The [`PlaceSearchClient`] is called on every keystroke. It debounces input
//! so that only the last query within the quiet window reaches the provider,
//! tags each result with the query's sequence number, and resolves chosen
//! suggestions into a [`Destination`]. Discarding out-of-order results is the
//! coordinator's job; the client only guarantees every result is tagged.
//!
//! # Example
//!
//! ```ignore
//! use pathfinder::search::{PlaceSearchClient, PlaceSearchConfig, PlaceQuery};
//!
//! let client = PlaceSearchClient::new(provider, PlaceSearchConfig::default(), intents_tx);
//! client.search(PlaceQuery::new(1, "Eng"));
//! client.search(PlaceQuery::new(2, "Engineering")); // only this one is sent
//! ```

mod client;
mod provider;
mod types;

pub use client::{
    PlaceSearchClient, PlaceSearchConfig, DEFAULT_DEBOUNCE, DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_TIMEOUT,
};
pub use provider::PlaceSearchProvider;
pub use types::{Destination, PlaceHandle, PlaceQuery, PlaceSuggestion, SearchError};
