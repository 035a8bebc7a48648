//! Terminal and environment passphrase provider.

use std::sync::atomic::{AtomicBool, Ordering};

use dialoguer::Password;
use secrecy::{ExposeSecret, SecretString};

use satcom_core::{PassphraseProvider, Result, SatcomError};

/// Reads the passphrase from an environment variable, falling back to a
/// hidden prompt when stdin is a terminal.
pub struct TerminalPassphrase {
    env_var: String,
    interactive: bool,
    /// Env var consulted once the current passphrase has been handed out.
    rotate_env: Option<String>,
    handed_out: AtomicBool,
}

impl TerminalPassphrase {
    pub fn new(env_var: impl Into<String>, interactive: bool) -> Self {
        Self {
            env_var: env_var.into(),
            interactive,
            rotate_env: None,
            handed_out: AtomicBool::new(false),
        }
    }

    /// After the first passphrase, answer from `env_var` and prompt for a new one.
    pub fn with_rotation(mut self, env_var: impl Into<String>) -> Self {
        self.rotate_env = Some(env_var.into());
        self
    }

    fn rotating(&self) -> bool {
        self.rotate_env.is_some() && self.handed_out.load(Ordering::SeqCst)
    }

    fn prompt(&self, confirm: bool, label: &str) -> Result<SecretString> {
        if !self.interactive {
            return Err(SatcomError::PassphraseUnavailable(format!(
                "No passphrase provided and no TTY available. Set {}.",
                self.active_env()
            )));
        }

        let first = read_hidden(label)?;
        if confirm && !first.is_empty() {
            let second = read_hidden(&format!("Confirm {}", label.to_lowercase()))?;
            if first != second {
                return Err(SatcomError::PassphraseUnavailable(
                    "Passphrases do not match".to_string(),
                ));
            }
        }
        Ok(SecretString::from(first))
    }

    fn active_env(&self) -> &str {
        match (&self.rotate_env, self.rotating()) {
            (Some(env), true) => env,
            _ => &self.env_var,
        }
    }
}

impl PassphraseProvider for TerminalPassphrase {
    fn acquire(&self, confirm: bool) -> Result<SecretString> {
        let label = if self.rotating() {
            "New passphrase"
        } else {
            "Passphrase"
        };

        let secret = match env_passphrase(self.active_env()) {
            Some(value) => SecretString::from(value),
            None => self.prompt(confirm, label)?,
        };

        if !secret.expose_secret().is_empty() {
            self.handed_out.store(true, Ordering::SeqCst);
        }
        Ok(secret)
    }
}

fn env_passphrase(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn read_hidden(label: &str) -> Result<String> {
    Password::new()
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| SatcomError::PassphraseUnavailable(format!("Failed to read passphrase: {}", e)))
}
