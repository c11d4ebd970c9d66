//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (init, show, path)
//! - [`route`] - One-shot driving route
//! - [`search`] - One-shot place search
//! - [`simulate`] - Full coordinator run against a replayed track

pub mod config;
pub mod route;
pub mod search;
pub mod simulate;
