//! AES-256-GCM encryption/decryption of the serialized collection.
//!
//! Ciphertext layout:
//!   [ nonce (12 bytes) | ciphertext | tag (16 bytes) ]
//!
//! A fresh random nonce is drawn for every call to [`encrypt`]. Any
//! authentication failure in [`decrypt`] is reported as
//! `SatcomError::Decryption`: a wrong passphrase and a tampered file cannot be
//! told apart without the plaintext.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use super::key::DerivedKey;
use crate::error::{Result, SatcomError};

/// Length of the AES-GCM nonce.
pub const NONCE_LEN: usize = 12;

/// Length of the AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`, returning `nonce || ciphertext || tag`.
///
/// # Examples
///
/// ```
/// use satcom_core::crypto::{decrypt, derive_key, encrypt, KdfParams, SALT_LEN};
///
/// let key = derive_key("my-passphrase", &[0u8; SALT_LEN], &KdfParams::new(8 * 1024, 1, 1)).unwrap();
/// let sealed = encrypt(b"secret data", &key).unwrap();
/// let opened = decrypt(&sealed, &key).unwrap();
/// assert_eq!(opened.as_slice(), b"secret data");
/// ```
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SatcomError::Crypto(format!("Invalid key length: {}", e)))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| SatcomError::Crypto("Encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt `nonce || ciphertext || tag` produced by [`encrypt`].
///
/// The tag is verified before any plaintext is released.
///
/// # Errors
///
/// - `SatcomError::CorruptFile` if the input cannot even hold a nonce and tag
/// - `SatcomError::Decryption` if authentication fails
pub fn decrypt(nonce_and_ciphertext: &[u8], key: &DerivedKey) -> Result<Zeroizing<Vec<u8>>> {
    if nonce_and_ciphertext.len() < NONCE_LEN + TAG_LEN {
        return Err(SatcomError::CorruptFile(format!(
            "ciphertext is {} bytes, expected at least {}",
            nonce_and_ciphertext.len(),
            NONCE_LEN + TAG_LEN
        )));
    }

    let (nonce_bytes, ciphertext) = nonce_and_ciphertext.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SatcomError::Crypto(format!("Invalid key length: {}", e)))?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| SatcomError::Decryption)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key::{derive_key, KdfParams, SALT_LEN};

    fn key_for(passphrase: &str) -> DerivedKey {
        derive_key(passphrase, &[0x11; SALT_LEN], &KdfParams::new(8 * 1024, 1, 1)).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = key_for("test-passphrase-secure-123");
        let plaintext = b"Hello, World! This is secret data.";

        let encrypted = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&encrypted, &key).unwrap();

        assert_eq!(decrypted.as_slice(), plaintext);
    }

    #[test]
    fn test_layout_is_nonce_ciphertext_tag() {
        let key = key_for("test-passphrase-secure-123");
        let plaintext = b"secret data";

        let encrypted = encrypt(plaintext, &key).unwrap();

        assert_eq!(encrypted.len(), NONCE_LEN + plaintext.len() + TAG_LEN);
        assert!(!encrypted
            .windows(plaintext.len())
            .any(|window| window == plaintext));
    }

    #[test]
    fn test_wrong_key_fails_decryption() {
        let encrypted = encrypt(b"secret data", &key_for("correct-passphrase")).unwrap();

        let result = decrypt(&encrypted, &key_for("wrong-passphrase"));
        assert!(matches!(result, Err(SatcomError::Decryption)));
    }

    #[test]
    fn test_tampered_data_fails_decryption() {
        let key = key_for("test-passphrase-secure-123");
        let mut encrypted = encrypt(b"secret data", &key).unwrap();

        let len = encrypted.len();
        encrypted[len / 2] ^= 0xFF;

        let result = decrypt(&encrypted, &key);
        assert!(matches!(result, Err(SatcomError::Decryption)));
    }

    #[test]
    fn test_tampered_nonce_fails_decryption() {
        let key = key_for("test-passphrase-secure-123");
        let mut encrypted = encrypt(b"secret data", &key).unwrap();

        encrypted[0] ^= 0x01;

        assert!(matches!(decrypt(&encrypted, &key), Err(SatcomError::Decryption)));
    }

    #[test]
    fn test_too_short_input_is_corrupt() {
        let key = key_for("test-passphrase-secure-123");
        let result = decrypt(&[0u8; NONCE_LEN + TAG_LEN - 1], &key);
        assert!(matches!(result, Err(SatcomError::CorruptFile(_))));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = key_for("test-passphrase-secure-123");

        let encrypted = encrypt(b"", &key).unwrap();
        assert_eq!(encrypted.len(), NONCE_LEN + TAG_LEN);

        let decrypted = decrypt(&encrypted, &key).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_nonce_is_fresh_per_call() {
        let key = key_for("test-passphrase-secure-123");
        let plaintext = b"same plaintext";

        let encrypted1 = encrypt(plaintext, &key).unwrap();
        let encrypted2 = encrypt(plaintext, &key).unwrap();

        assert_ne!(encrypted1[..NONCE_LEN], encrypted2[..NONCE_LEN]);
        assert_ne!(encrypted1, encrypted2);
    }
}
