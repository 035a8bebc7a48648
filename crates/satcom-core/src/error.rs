//! Error types for satcom core operations.
//!
//! Every failure the store can produce has its own variant, so callers decide
//! how to react by matching on the kind rather than inspecting messages. The
//! CLI layer maps these to exit codes and user-facing hints.

use thiserror::Error;

/// Result type alias for satcom operations.
pub type Result<T> = std::result::Result<T, SatcomError>;

/// Core error type for satcom operations.
#[derive(Debug, Error)]
pub enum SatcomError {
    /// The passphrase provider could not produce a secret
    #[error("Passphrase unavailable: {0}")]
    PassphraseUnavailable(String),

    /// Authentication failed: wrong passphrase or tampered file
    #[error("Decryption failed: incorrect passphrase or corrupted datastore")]
    Decryption,

    /// Structurally invalid datastore file
    #[error("Corrupt datastore: {0}")]
    CorruptFile(String),

    /// Operation attempted while the store is locked
    #[error("Datastore is locked")]
    Locked,

    /// Record not found by name
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Writing or atomically replacing the datastore failed
    #[error("Failed to persist datastore: {0}")]
    Persist(String),

    /// Key derivation or cipher misconfiguration
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl SatcomError {
    /// Whether a failure during the initial load should leave the process
    /// running with a locked store instead of aborting.
    ///
    /// Wrong passphrases and damaged files only affect commands that need the
    /// data; everything else (I/O, a missing passphrase for an existing file)
    /// propagates.
    pub fn is_recoverable_at_startup(&self) -> bool {
        matches!(self, SatcomError::Decryption | SatcomError::CorruptFile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(SatcomError::Decryption.is_recoverable_at_startup());
        assert!(SatcomError::CorruptFile("short".into()).is_recoverable_at_startup());
        assert!(!SatcomError::Locked.is_recoverable_at_startup());
        assert!(!SatcomError::PassphraseUnavailable("no tty".into()).is_recoverable_at_startup());
        assert!(!SatcomError::Persist("rename".into()).is_recoverable_at_startup());
    }

    #[test]
    fn test_io_error_converts() {
        let err: SatcomError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, SatcomError::Io { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
