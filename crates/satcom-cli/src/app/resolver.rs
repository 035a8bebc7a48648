//! Path resolution for config and datastore files.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, SatcliConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking SATCLI_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the datastore path: `--store`/SATCLI_STORE, then config, then beside the binary.
pub fn resolve_store_path(cli: &Cli, config: &SatcliConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.store.path.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_store_path()
}
