//! Passphrase acquisition seam.
//!
//! The store never reads the environment or a terminal itself; it asks a
//! [`PassphraseProvider`] for a secret when loading or saving.

use secrecy::SecretString;

use crate::error::Result;

/// Source of the datastore passphrase.
pub trait PassphraseProvider: Send + Sync {
    /// Obtain a passphrase.
    ///
    /// `confirm` is set when a new passphrase is being established (new
    /// store, locked save, passphrase change); interactive providers should
    /// ask twice and fail on mismatch.
    ///
    /// An empty secret means "no passphrase provided".
    ///
    /// # Errors
    ///
    /// Returns `SatcomError::PassphraseUnavailable` if no secret can be obtained.
    fn acquire(&self, confirm: bool) -> Result<SecretString>;
}

impl<P: PassphraseProvider + ?Sized> PassphraseProvider for Box<P> {
    fn acquire(&self, confirm: bool) -> Result<SecretString> {
        (**self).acquire(confirm)
    }
}

impl<P: PassphraseProvider + ?Sized> PassphraseProvider for std::sync::Arc<P> {
    fn acquire(&self, confirm: bool) -> Result<SecretString> {
        (**self).acquire(confirm)
    }
}
