//! Cryptographic operations for the satcom datastore.
//!
//! Two well-audited primitives are used:
//! - **Argon2id**: memory-hard key derivation from the passphrase
//! - **AES-256-GCM**: authenticated encryption of the serialized collection
//!
//! ## Security Model
//!
//! - A fresh random salt on every save, so each file version has its own key
//! - A fresh random nonce on every encryption
//! - Key material zeroized from memory on drop
//! - No plaintext passphrases or keys written to disk
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted datastore file
//! - Offline brute-force attacks on the passphrase
//! - Undetected tampering with the file
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked process / memory

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt, NONCE_LEN, TAG_LEN};
pub use key::{derive_key, generate_salt, DerivedKey, KdfParams, KEY_LEN, SALT_LEN};
