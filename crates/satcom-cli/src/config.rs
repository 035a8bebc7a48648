use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STORE_FILE, PASSPHRASE_ENV};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SatcliConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub security: SecuritySection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SecuritySection {
    pub passphrase_env: String,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            passphrase_env: PASSPHRASE_ENV.to_string(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// `satellites.enc` in the directory holding the running binary.
pub fn default_store_path() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| anyhow::anyhow!("Failed to locate the running binary: {}", e))?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Binary path {} has no parent", exe.display()))?;
    Ok(dir.join(DEFAULT_STORE_FILE))
}

pub fn read_config(path: &Path) -> anyhow::Result<SatcliConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config file, or defaults if it does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<SatcliConfig> {
    if path.exists() {
        read_config(path)
    } else {
        Ok(SatcliConfig::default())
    }
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("satcli"));
        }
    }
    Ok(home_dir()?.join(".config").join("satcli"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
