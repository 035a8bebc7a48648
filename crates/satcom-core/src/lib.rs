//! # Satcom Core
//!
//! Core library for satcli - a passphrase-protected, encrypted-at-rest local
//! catalogue of satellite records.
//!
//! This crate provides the record store, its cryptography and the satellite
//! data model independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: Argon2id key derivation and AES-256-GCM framing
//! - **store**: Session state plus the load and save protocols
//! - **fs**: Atomic file replacement
//! - **passphrase**: The passphrase provider seam
//! - **record** / **satellite**: Stored payloads and query filters

pub mod crypto;
pub mod error;
pub mod fs;
pub mod passphrase;
pub mod record;
pub mod satellite;
pub mod store;

pub use error::{Result, SatcomError};
pub use passphrase::PassphraseProvider;
pub use record::Record;
pub use satellite::{Satellite, SatelliteFilter};
pub use store::{LoadStatus, Store, StoreConfig};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
