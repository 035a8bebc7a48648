//! Key derivation using Argon2id.
//!
//! This module derives the datastore key from a passphrase and a per-save
//! random salt using the Argon2id algorithm, which is memory-hard and
//! resistant to GPU-based attacks.

use argon2::Argon2;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, SatcomError};

/// Length of the random salt stored in front of every datastore file.
pub const SALT_LEN: usize = 16;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LEN: usize = 32;

/// Argon2id cost parameters.
///
/// A file can only be opened with the parameters it was written with, so a
/// store keeps one set for its whole lifetime. The defaults balance security
/// and usability:
/// - Memory: 64 MB (64 * 1024 KB)
/// - Iterations: 3
/// - Parallelism: 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl KdfParams {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::new(64 * 1024, 3, 1)
    }
}

/// A cryptographic key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh random salt from the operating system RNG.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive an encryption key from a passphrase using Argon2id.
///
/// Same passphrase + salt + params always produces the same key. The salt is
/// not secret; it is stored in the clear at the start of the datastore file.
///
/// # Errors
///
/// Returns `SatcomError::InvalidInput` for an empty passphrase and
/// `SatcomError::Crypto` if the parameters are rejected by Argon2.
///
/// # Examples
///
/// ```
/// use satcom_core::crypto::{derive_key, KdfParams, SALT_LEN};
///
/// let salt = [7u8; SALT_LEN];
/// let key = derive_key("my-passphrase", &salt, &KdfParams::new(8 * 1024, 1, 1)).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN], params: &KdfParams) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(SatcomError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    let argon_params = argon2::Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| SatcomError::Crypto(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon_params,
    );

    let mut key_bytes = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut key_bytes)
        .map_err(|e| SatcomError::Crypto(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey::from_bytes(key_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: KdfParams = KdfParams::new(8 * 1024, 1, 1);

    #[test]
    fn test_key_derivation_deterministic() {
        let salt = [1u8; SALT_LEN];

        let key1 = derive_key("test-passphrase", &salt, &FAST).unwrap();
        let key2 = derive_key("test-passphrase", &salt, &FAST).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("test-passphrase", &[1u8; SALT_LEN], &FAST).unwrap();
        let key2 = derive_key("test-passphrase", &[2u8; SALT_LEN], &FAST).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = [9u8; SALT_LEN];

        let key1 = derive_key("passphrase-one", &salt, &FAST).unwrap();
        let key2 = derive_key("passphrase-two", &salt, &FAST).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_params_change_key() {
        let salt = [3u8; SALT_LEN];

        let key1 = derive_key("test-passphrase", &salt, &FAST).unwrap();
        let key2 = derive_key("test-passphrase", &salt, &KdfParams::new(8 * 1024, 2, 1)).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_default_params_derive() {
        let key = derive_key("test-passphrase", &[4u8; SALT_LEN], &KdfParams::default()).unwrap();
        assert_eq!(key.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = derive_key("", &[1u8; SALT_LEN], &FAST);
        assert!(matches!(result, Err(SatcomError::InvalidInput(_))));
    }

    #[test]
    fn test_misconfigured_params_rejected() {
        // Argon2 requires at least 8 KiB per lane.
        let result = derive_key("test-passphrase", &[1u8; SALT_LEN], &KdfParams::new(1, 1, 1));
        assert!(matches!(result, Err(SatcomError::Crypto(_))));
    }

    #[test]
    fn test_generated_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("test-passphrase", &[5u8; SALT_LEN], &FAST).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
