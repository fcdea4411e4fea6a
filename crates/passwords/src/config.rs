//! Password manager configuration
//!
//! Configuration file:
//! - ~/.config/daedalos/passwords.yaml - key and record file locations
//!
//! Every field is optional. Relative paths resolve against the working
//! directory, so by default the tool reads `encryption.key` and
//! `passwords.json` from wherever it is started.

use crate::clipboard::Clipboard;
use crate::keystore::KeyStore;
use anyhow::{Context, Result};
use daedalos_core::Paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default key file name
pub const DEFAULT_KEY_FILE: &str = "encryption.key";

/// Default record file name
pub const DEFAULT_STORE_FILE: &str = "passwords.json";

/// Locations and switches for a password manager session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raw symmetric key file
    pub key_path: PathBuf,

    /// JSON record file
    pub store_path: PathBuf,

    /// Copy retrieved passwords to the system clipboard
    pub clipboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from(DEFAULT_KEY_FILE),
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            clipboard: true,
        }
    }
}

impl Config {
    /// Location of the global config file
    pub fn default_path() -> PathBuf {
        Paths::new().config_file("passwords")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from a specific path, falling back to defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        Ok(config)
    }

    pub fn key_store(&self) -> KeyStore {
        KeyStore::new(&self.key_path)
    }

    /// Clipboard backend for this session
    pub fn clipboard_backend(&self) -> Clipboard {
        if self.clipboard {
            Clipboard::detect()
        } else {
            Clipboard::None
        }
    }
}
