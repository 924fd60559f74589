//! Hashing configuration.
//!
//! Values are signed on purpose: a file or flag may carry an invalid value such as
//! `-1`, and that is reported as a derivation error when hashing, not when loading.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::SafeguardError;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: i64 = 10_000;
/// Default derived key length in bytes.
pub const DEFAULT_KEY_LENGTH: i64 = 128;
/// Default salt length in hex characters.
pub const DEFAULT_SALT_LENGTH: i64 = 64;

const CONFIG_FILE_NAME: &str = "safeguard.json";

/// Top-level configuration document: `{ "crypto": { ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crypto: CryptoConfig,
}

/// Parameters used for every new hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CryptoConfig {
    pub iterations: i64,
    /// Derived key length in bytes.
    pub key_length: i64,
    /// Salt length in hex characters.
    pub salt_length: i64,
    /// When set and positive, missing text is replaced by this many random bytes.
    pub default_plain_text_length: Option<i64>,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length: DEFAULT_KEY_LENGTH,
            salt_length: DEFAULT_SALT_LENGTH,
            default_plain_text_length: None,
        }
    }
}

/// A partial [`CryptoConfig`]; fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CryptoOverrides {
    pub iterations: Option<i64>,
    pub key_length: Option<i64>,
    pub salt_length: Option<i64>,
    pub default_plain_text_length: Option<i64>,
}

impl CryptoConfig {
    pub fn merge(&mut self, overrides: &CryptoOverrides) {
        if let Some(iterations) = overrides.iterations {
            self.iterations = iterations;
        }
        if let Some(key_length) = overrides.key_length {
            self.key_length = key_length;
        }
        if let Some(salt_length) = overrides.salt_length {
            self.salt_length = salt_length;
        }
        if let Some(len) = overrides.default_plain_text_length {
            self.default_plain_text_length = Some(len);
        }
    }

    /// Copy of `self` with `overrides` applied.
    pub fn merged(&self, overrides: &CryptoOverrides) -> Self {
        let mut config = self.clone();
        config.merge(overrides);
        config
    }
}

impl Config {
    /// Load a JSON configuration file. Absent fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SafeguardError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| SafeguardError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
            .map_err(|e| SafeguardError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Platform location of `safeguard.json`, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "safeguard")?;
    Some(project_dirs.config_dir().join(CONFIG_FILE_NAME))
}
