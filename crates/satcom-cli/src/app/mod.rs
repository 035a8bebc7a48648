//! Application-level utilities for the satcli CLI.
//!
//! This module provides:
//! - Path resolution for config and datastore files
//! - The terminal passphrase provider
//! - Opening and loading the datastore for a command

mod context;
mod passphrase;
mod resolver;

// Re-export public API
pub use context::AppContext;
