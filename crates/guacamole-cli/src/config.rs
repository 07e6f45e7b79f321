//! Runtime configuration for the `guacamole` binary.
//!
//! The configuration file is optional JSON. Every field has a default
//! matching the stock device, so `{}` and a missing `--config` flag behave
//! the same.

use anyhow::{Context, Result};
use guacamole_fod::FodConfig;
use guacamole_hardware::SysfsIo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the persisted device settings.
pub const DEFAULT_PREFERENCES_PATH: &str = "/data/vendor/guacamole/preferences.json";

/// HAL configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalConfig {
    /// Directory standing in for `/` when resolving node paths.
    ///
    /// Unset on the device itself.
    pub sysfs_root: Option<PathBuf>,

    pub fod: FodConfig,

    pub preferences_path: PathBuf,
}

impl Default for HalConfig {
    fn default() -> Self {
        Self {
            sysfs_root: None,
            fod: FodConfig::default(),
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_PATH),
        }
    }
}

impl HalConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Override the sysfs root.
    pub fn sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = Some(root.into());
        self
    }

    /// Override the preferences file.
    pub fn preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = path.into();
        self
    }

    /// Node accessor honouring [`sysfs_root`](Self::sysfs_root).
    pub fn nodes(&self) -> SysfsIo {
        match &self.sysfs_root {
            Some(root) => SysfsIo::with_root(root),
            None => SysfsIo::new(),
        }
    }
}
