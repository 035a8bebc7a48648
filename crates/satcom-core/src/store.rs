//! Encrypted record store.
//!
//! The [`Store`] owns the in-memory collection and the unlock state for the
//! lifetime of a process. It is loaded once from a single encrypted file and
//! written back as a unit:
//!
//! ```text
//! [ salt (16) | nonce (12) | ciphertext | tag (16) ]
//! ```
//!
//! The key for each file version is derived from the passphrase and that
//! version's salt; a new salt is generated on every save. All access to the
//! collection goes through one mutex; load and save hold it for their whole
//! pass, so a save in flight blocks readers and writers.
//!
//! Concurrent access to the same file from several processes is not
//! supported.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::{
    decrypt, derive_key, encrypt, generate_salt, DerivedKey, KdfParams, NONCE_LEN, SALT_LEN,
    TAG_LEN,
};
use crate::error::{Result, SatcomError};
use crate::fs::write_atomic_with;
use crate::passphrase::PassphraseProvider;
use crate::record::Record;

/// Version of the serialized collection document.
pub const FORMAT_VERSION: u32 = 1;

/// Smallest possible datastore file: salt, nonce and tag around an empty ciphertext.
pub const MIN_FILE_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// Where the store lives and how its keys are derived.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub kdf: KdfParams,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kdf: KdfParams::default(),
        }
    }

    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }
}

/// Outcome of a successful [`Store::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Existing file decrypted; the store is unlocked.
    Unlocked { records: usize },
    /// No file yet; a passphrase was supplied and the store is unlocked and empty.
    Created,
    /// No file yet and no passphrase; the store stays locked until the first save.
    Deferred,
}

#[derive(Serialize)]
struct DocumentRef<'a, R> {
    format_version: u32,
    records: &'a HashMap<String, R>,
}

#[derive(Deserialize)]
struct DocumentHeader {
    format_version: u32,
}

#[derive(Deserialize)]
struct Document<R> {
    records: HashMap<String, R>,
}

struct Session<R> {
    records: HashMap<String, R>,
    unlocked: bool,
    key: Option<DerivedKey>,
    // Retained so saves can re-derive under a fresh salt without re-prompting.
    passphrase: Option<SecretString>,
}

impl<R> Session<R> {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            unlocked: false,
            key: None,
            passphrase: None,
        }
    }

    fn reset(&mut self) {
        self.records = HashMap::new();
        self.unlocked = false;
        self.key = None;
        self.passphrase = None;
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.unlocked {
            Ok(())
        } else {
            Err(SatcomError::Locked)
        }
    }
}

/// Passphrase-protected record store backed by a single encrypted file.
pub struct Store<R: Record> {
    config: StoreConfig,
    provider: Box<dyn PassphraseProvider>,
    session: Mutex<Session<R>>,
}

impl<R: Record> Store<R> {
    /// Create a locked, empty store. Nothing is read until [`Store::load`].
    pub fn new(config: StoreConfig, provider: impl PassphraseProvider + 'static) -> Self {
        Self {
            config,
            provider: Box::new(provider),
            session: Mutex::new(Session::new()),
        }
    }

    /// Path of the encrypted datastore file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Lock the session, returning an error if the mutex is poisoned.
    fn lock_session(&self) -> Result<MutexGuard<'_, Session<R>>> {
        self.session
            .lock()
            .map_err(|_| SatcomError::Other("Datastore session lock poisoned".to_string()))
    }

    /// Whether the collection is accessible.
    pub fn is_unlocked(&self) -> bool {
        self.session
            .lock()
            .map(|session| session.unlocked)
            .unwrap_or(false)
    }

    /// Whether a session key is currently held.
    ///
    /// A freshly created store is unlocked without a key until its first save.
    pub fn has_session_key(&self) -> bool {
        self.session
            .lock()
            .map(|session| session.key.is_some())
            .unwrap_or(false)
    }

    /// Snapshot of every record. Mutating the result does not affect the store.
    pub fn get_all(&self) -> Result<HashMap<String, R>> {
        let session = self.lock_session()?;
        session.ensure_unlocked()?;
        Ok(session.records.clone())
    }

    /// Copy of a single record, if present.
    pub fn get(&self, name: &str) -> Result<Option<R>> {
        let session = self.lock_session()?;
        session.ensure_unlocked()?;
        Ok(session.records.get(name).cloned())
    }

    /// Number of records held.
    pub fn len(&self) -> Result<usize> {
        let session = self.lock_session()?;
        session.ensure_unlocked()?;
        Ok(session.records.len())
    }

    /// Whether the unlocked collection holds no records.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Insert or replace a record, returning the one it displaced.
    ///
    /// In-memory only; call [`Store::save`] to persist.
    pub fn put(&self, record: R) -> Result<Option<R>> {
        let mut session = self.lock_session()?;
        session.ensure_unlocked()?;
        let name = record.name().to_string();
        Ok(session.records.insert(name, record))
    }

    /// Remove a record by name.
    ///
    /// In-memory only; call [`Store::save`] to persist.
    ///
    /// # Errors
    ///
    /// `SatcomError::NotFound` if no record has that name; the collection is
    /// left unchanged.
    pub fn delete(&self, name: &str) -> Result<R> {
        let mut session = self.lock_session()?;
        session.ensure_unlocked()?;
        session
            .records
            .remove(name)
            .ok_or_else(|| SatcomError::NotFound(name.to_string()))
    }

    /// Drop the collection, session key and passphrase and return to locked.
    pub fn lock(&self) {
        if let Ok(mut session) = self.session.lock() {
            session.reset();
        }
    }

    /// Load and decrypt the datastore.
    ///
    /// A missing file is not an error: with a passphrase the store becomes
    /// unlocked and empty ([`LoadStatus::Created`]); without one it stays
    /// locked ([`LoadStatus::Deferred`]) and the first save asks again.
    ///
    /// # Errors
    ///
    /// - `PassphraseUnavailable` if the file exists but no passphrase was obtained
    /// - `CorruptFile` if the file is truncated or its payload is malformed
    /// - `Decryption` on a wrong passphrase or tampered file
    /// - `Io` if the file cannot be read
    ///
    /// The store is locked after any error.
    pub fn load(&self) -> Result<LoadStatus> {
        let mut session = self.lock_session()?;
        session.reset();

        let path = &self.config.path;
        let exists = path.try_exists()?;
        debug!(path = %path.display(), exists, "loading datastore");

        let passphrase = match self.provider.acquire(!exists) {
            Ok(secret) if !secret.expose_secret().is_empty() => secret,
            Ok(_) if exists => {
                return Err(SatcomError::PassphraseUnavailable(format!(
                    "passphrase not provided for existing datastore '{}'",
                    path.display()
                )));
            }
            Err(err) if exists => return Err(err),
            outcome => {
                if let Err(err) = outcome {
                    debug!(error = %err, "passphrase acquisition skipped");
                }
                warn!(
                    path = %path.display(),
                    "datastore not found and no passphrase provided; first save will require one"
                );
                return Ok(LoadStatus::Deferred);
            }
        };

        if !exists {
            warn!(
                path = %path.display(),
                "datastore not found; it will be created and encrypted on first save"
            );
            session.unlocked = true;
            session.passphrase = Some(passphrase);
            return Ok(LoadStatus::Created);
        }

        let bytes = Zeroizing::new(fs::read(path)?);
        let (key, records) = self.unseal(&bytes, passphrase.expose_secret())?;

        let count = records.len();
        session.records = records;
        session.key = Some(key);
        session.passphrase = Some(passphrase);
        session.unlocked = true;
        debug!(records = count, "datastore unlocked");
        Ok(LoadStatus::Unlocked { records: count })
    }

    /// Encrypt the collection under a fresh salt and atomically replace the file.
    ///
    /// A locked store with no file yet first asks the provider for a new
    /// passphrase, as [`Store::establish_passphrase`] does.
    ///
    /// # Errors
    ///
    /// - `Locked` if the store is locked and a datastore file already exists
    /// - `PassphraseUnavailable` if a passphrase was needed and not obtained
    /// - `Persist` if writing or renaming failed; the previous file is untouched
    pub fn save(&self) -> Result<()> {
        self.save_with(|from, to| fs::rename(from, to))
    }

    pub(crate) fn save_with<F>(&self, rename: F) -> Result<()>
    where
        F: FnOnce(&Path, &Path) -> io::Result<()>,
    {
        let mut session = self.lock_session()?;
        self.establish(&mut session)?;

        let passphrase = session.passphrase.as_ref().ok_or_else(|| {
            SatcomError::Other("Unlocked session has no passphrase".to_string())
        })?;
        let key = self.seal_and_write(&session.records, passphrase.expose_secret(), rename)?;
        session.key = Some(key);
        Ok(())
    }

    /// Unlock a store whose file does not exist yet by asking for a new
    /// passphrase (with confirmation). Nothing is written until [`Store::save`].
    ///
    /// Does nothing if the store is already unlocked.
    ///
    /// # Errors
    ///
    /// - `Locked` if a datastore file exists; only [`Store::load`] can unlock it
    /// - `PassphraseUnavailable` if no passphrase was obtained
    pub fn establish_passphrase(&self) -> Result<()> {
        let mut session = self.lock_session()?;
        self.establish(&mut session)
    }

    fn establish(&self, session: &mut Session<R>) -> Result<()> {
        if session.unlocked {
            return Ok(());
        }
        if self.config.path.try_exists()? {
            warn!(
                path = %self.config.path.display(),
                "refusing to replace a datastore that was never unlocked"
            );
            return Err(SatcomError::Locked);
        }

        info!("passphrase required to create datastore");
        let secret = self.provider.acquire(true)?;
        if secret.expose_secret().is_empty() {
            return Err(SatcomError::PassphraseUnavailable(
                "a passphrase is required to save the encrypted datastore".to_string(),
            ));
        }
        session.passphrase = Some(secret);
        session.unlocked = true;
        Ok(())
    }

    /// Re-encrypt the datastore under a new passphrase.
    ///
    /// The old passphrase stays in effect if anything fails.
    pub fn change_passphrase(&self) -> Result<()> {
        let mut session = self.lock_session()?;
        session.ensure_unlocked()?;

        let secret = self.provider.acquire(true)?;
        if secret.expose_secret().is_empty() {
            return Err(SatcomError::PassphraseUnavailable(
                "new passphrase cannot be empty".to_string(),
            ));
        }

        let key = self.seal_and_write(&session.records, secret.expose_secret(), |from, to| {
            fs::rename(from, to)
        })?;
        session.key = Some(key);
        session.passphrase = Some(secret);
        info!(path = %self.config.path.display(), "datastore passphrase changed");
        Ok(())
    }

    fn unseal(&self, bytes: &[u8], passphrase: &str) -> Result<(DerivedKey, HashMap<String, R>)> {
        if bytes.len() < MIN_FILE_LEN {
            return Err(SatcomError::CorruptFile(format!(
                "encrypted datastore is {} bytes, too short to hold salt and nonce ({} bytes minimum)",
                bytes.len(),
                MIN_FILE_LEN
            )));
        }

        let (salt_bytes, sealed) = bytes.split_at(SALT_LEN);
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(salt_bytes);

        let key = derive_key(passphrase, &salt, &self.config.kdf)?;
        let plaintext = decrypt(sealed, &key)?;
        let records = decode_collection(&plaintext)?;
        Ok((key, records))
    }

    fn seal_and_write<F>(
        &self,
        records: &HashMap<String, R>,
        passphrase: &str,
        rename: F,
    ) -> Result<DerivedKey>
    where
        F: FnOnce(&Path, &Path) -> io::Result<()>,
    {
        let plaintext = encode_collection(records)?;

        let salt = generate_salt();
        let key = derive_key(passphrase, &salt, &self.config.kdf)?;
        let sealed = encrypt(&plaintext, &key)?;

        let mut file_bytes = Vec::with_capacity(SALT_LEN + sealed.len());
        file_bytes.extend_from_slice(&salt);
        file_bytes.extend_from_slice(&sealed);

        let path = &self.config.path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SatcomError::Persist(format!(
                    "failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        write_atomic_with(path, &file_bytes, rename).map_err(|e| {
            warn!(path = %path.display(), error = %e, "datastore save failed");
            SatcomError::Persist(e.to_string())
        })?;

        debug!(path = %path.display(), records = records.len(), "datastore saved");
        Ok(key)
    }
}

fn encode_collection<R: Record>(records: &HashMap<String, R>) -> Result<Zeroizing<Vec<u8>>> {
    let document = DocumentRef {
        format_version: FORMAT_VERSION,
        records,
    };
    Ok(Zeroizing::new(serde_json::to_vec_pretty(&document)?))
}

fn decode_collection<R: Record>(plaintext: &[u8]) -> Result<HashMap<String, R>> {
    let header: DocumentHeader = serde_json::from_slice(plaintext).map_err(|e| {
        SatcomError::CorruptFile(format!("failed to parse decrypted datastore: {}", e))
    })?;
    if header.format_version != FORMAT_VERSION {
        return Err(SatcomError::CorruptFile(format!(
            "unsupported datastore format version {} (expected {})",
            header.format_version, FORMAT_VERSION
        )));
    }

    let document: Document<R> = serde_json::from_slice(plaintext).map_err(|e| {
        SatcomError::CorruptFile(format!("failed to parse decrypted records: {}", e))
    })?;

    if let Some((key, record)) = document
        .records
        .iter()
        .find(|(key, record)| key.as_str() != record.name())
    {
        return Err(SatcomError::CorruptFile(format!(
            "record '{}' stored under mismatched key '{}'",
            record.name(),
            key
        )));
    }

    Ok(document.records)
}
