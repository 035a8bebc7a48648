//! Per-invocation state shared by the data commands.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::PathBuf;

use tracing::{debug, warn};

use satcom_core::{LoadStatus, Satellite, Store, StoreConfig};

use crate::cli::Cli;
use crate::config::{load_config, SatcliConfig};
use crate::errors::CliError;

use super::passphrase::TerminalPassphrase;
use super::resolver::{resolve_config_path, resolve_store_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: SatcliConfig,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path()?;
        let config = load_config(&config_path)?;
        debug!(config = %config_path.display(), "configuration loaded");
        Ok(Self { cli, config })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, &self.config)
    }

    pub fn passphrase_provider(&self) -> TerminalPassphrase {
        TerminalPassphrase::new(
            self.config.security.passphrase_env.clone(),
            std::io::stdin().is_terminal(),
        )
    }

    /// Open and load the datastore with the default passphrase provider.
    pub fn open_store(&self) -> anyhow::Result<Session> {
        self.open_store_with(self.passphrase_provider())
    }

    /// Open and load the datastore.
    ///
    /// A wrong passphrase or damaged file leaves the session locked with a
    /// warning instead of failing; commands that need records then fail.
    pub fn open_store_with(&self, provider: TerminalPassphrase) -> anyhow::Result<Session> {
        let path = self.store_path()?;
        let config = StoreConfig::new(&path);
        let store = Store::new(config, provider);

        let status = match store.load() {
            Ok(status) => Some(status),
            Err(err) if err.is_recoverable_at_startup() => {
                warn!(path = %path.display(), error = %err, "datastore left locked");
                None
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Session { store, status })
    }
}

/// A loaded datastore and how its load went.
pub struct Session {
    pub store: Store<Satellite>,
    /// `None` when loading failed recoverably and the store stayed locked.
    pub status: Option<LoadStatus>,
}

impl Session {
    /// Snapshot of all satellites; a store with no file yet is empty.
    pub fn records(&self) -> anyhow::Result<HashMap<String, Satellite>> {
        if self.status == Some(LoadStatus::Deferred) {
            return Ok(HashMap::new());
        }
        Ok(self.store.get_all()?)
    }

    /// Make a store that has no file yet writable by establishing its passphrase.
    pub fn ensure_writable(&self) -> anyhow::Result<()> {
        match self.status {
            Some(LoadStatus::Deferred) => Ok(self.store.establish_passphrase()?),
            Some(_) => Ok(()),
            None => Err(CliError::locked(
                "The datastore could not be unlocked.",
                "Hint: Check the passphrase; the file was not modified.",
            )
            .into()),
        }
    }
}
