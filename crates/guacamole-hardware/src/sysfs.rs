//! Sysfs node access.
//!
//! [`SysfsIo`] reads and writes kernel nodes directly. Each operation opens
//! its own file handle scoped to the call, so the descriptor is closed on
//! every exit path, including early returns through `?`.
//!
//! # Root Remapping
//!
//! By default absolute paths are used as-is. [`SysfsIo::with_root`] prefixes
//! every path with a directory, which lets the services run against a copy
//! of the node tree off-device.
//!
//! ```no_run
//! use guacamole_hardware::sysfs::SysfsIo;
//! use guacamole_hardware::traits::NodeIo;
//!
//! let nodes = SysfsIo::with_root("/tmp/fake-sysfs");
//! let brightness = nodes.read_int_or("/sys/class/backlight/panel0-backlight/brightness", 0);
//! ```

use crate::error::{HardwareError, Result};
use crate::traits::NodeIo;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Direct sysfs node access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SysfsIo {
    root: Option<PathBuf>,
}

impl SysfsIo {
    /// Access nodes at their real device paths.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Access nodes under `root` instead of `/`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Root prefix, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Resolve a device path to the file actually accessed.
    pub fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path.trim_start_matches('/')),
            None => PathBuf::from(path),
        }
    }
}

impl NodeIo for SysfsIo {
    fn read_string(&self, path: &str) -> Result<String> {
        let resolved = self.resolve(path);
        let mut file = File::open(&resolved).map_err(|e| HardwareError::node_io(path, e))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| HardwareError::node_io(path, e))?;

        trace!("Read {:?} from {}", contents.trim_end(), path);
        Ok(contents)
    }

    fn write_str(&self, path: &str, value: &str) -> Result<()> {
        let resolved = self.resolve(path);
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&resolved)
            .map_err(|e| HardwareError::node_io(path, e))?;

        file.write_all(value.as_bytes())
            .map_err(|e| HardwareError::node_io(path, e))?;

        debug!("Wrote {:?} to {}", value, path);
        Ok(())
    }
}
