//! User-facing errors with exit codes.

use std::fmt;

use satcom_core::SatcomError;

use crate::constants::{exit_codes, PASSPHRASE_ENV};

/// An error reported to the user, carrying the process exit code.
#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn new(code: i32, message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint,
        }
    }

    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(exit_codes::NOT_FOUND, message, Some(hint.into()))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(exit_codes::INVALID_INPUT, message, None)
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::new(exit_codes::AUTH_FAILED, message, None)
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(exit_codes::AUTH_FAILED, message, Some(hint.into()))
    }

    pub fn locked(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(exit_codes::LOCKED, message, Some(hint.into()))
    }

    pub fn persist_failed(message: impl Into<String>) -> Self {
        Self::new(
            exit_codes::PERSIST_FAILED,
            message,
            Some("The previous datastore file was left untouched.".to_string()),
        )
    }

    /// Map a core error onto a user-facing error and exit code.
    pub fn from_core(err: &SatcomError) -> Self {
        match err {
            SatcomError::Decryption => Self::auth_failed_with_hint(
                "Incorrect passphrase or damaged datastore.",
                "Hint: If you forgot your passphrase, the datastore cannot be recovered.",
            ),
            SatcomError::PassphraseUnavailable(message) => Self::auth_failed_with_hint(
                message.clone(),
                format!("Hint: Set {} or run from a terminal.", PASSPHRASE_ENV),
            ),
            SatcomError::Locked => Self::locked(
                "The datastore is locked.",
                "Hint: Provide the correct passphrase to unlock it.",
            ),
            SatcomError::NotFound(name) => Self::not_found(
                format!("Satellite \"{}\" not found", name),
                "Hint: Run `satcli list` to see stored satellites.",
            ),
            SatcomError::InvalidInput(message) => Self::invalid_input(message.clone()),
            SatcomError::Persist(message) => {
                Self::persist_failed(format!("Failed to save datastore: {}", message))
            }
            other => Self::new(exit_codes::FAILURE, other.to_string(), None),
        }
    }

    /// Resolve the user-facing error for any command failure.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let err = match err.downcast::<CliError>() {
            Ok(cli) => return cli,
            Err(err) => err,
        };
        match err.downcast_ref::<SatcomError>() {
            Some(core) => Self::from_core(core),
            None => Self::new(exit_codes::FAILURE, format!("{:#}", err), None),
        }
    }

    /// Print the error to stderr and exit with its code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("{}", hint);
        }
        std::process::exit(self.code)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}
