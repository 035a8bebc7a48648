//! Constants used throughout the CLI.

/// Environment variable holding the datastore passphrase.
pub const PASSPHRASE_ENV: &str = "SATCLI_PASSPHRASE";

/// Environment variable holding the replacement passphrase for `passwd`.
pub const NEW_PASSPHRASE_ENV: &str = "SATCLI_NEW_PASSPHRASE";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SATCLI_CONFIG";

/// File name used when the datastore lives beside the binary.
pub const DEFAULT_STORE_FILE: &str = "satellites.enc";

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Record or topic not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase, no passphrase available).
    pub const AUTH_FAILED: i32 = 5;

    /// The datastore is locked and the command needs its records.
    pub const LOCKED: i32 = 6;

    /// Writing the datastore failed; the previous file is untouched.
    pub const PERSIST_FAILED: i32 = 7;
}
