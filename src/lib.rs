//! Colorgorical - palette scoring server and CLI
//!
//! Wraps the `colorgorical-scores` engine with configuration, a palette
//! scoring service, an HTTP API and command-line tools.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
