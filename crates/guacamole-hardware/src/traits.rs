//! Hardware trait definitions.
//!
//! This module defines the seams between the HAL services and the outside
//! world: kernel sysfs nodes ([`NodeIo`]) and the two proprietary vendor
//! services the fingerprint and settings code talk to ([`DisplayService`],
//! [`FingerprintExtensions`]). Services are generic over these traits so the
//! mock implementations in [`mock`](crate::mock) can stand in for the device.
//!
//! Node access is synchronous. Sysfs reads and writes complete immediately
//! and the vendor services are blocking binder calls on the device.

use crate::error::{HardwareError, Result};
use tracing::debug;

/// Parse the leading integer of a node's contents.
///
/// Leading whitespace is skipped and parsing stops at the first character
/// that cannot continue the number, so `"255\n"` and `"5 hbm"` both parse.
///
/// # Examples
///
/// ```
/// use guacamole_hardware::traits::parse_node_int;
///
/// assert_eq!(parse_node_int("1023\n"), Some(1023));
/// assert_eq!(parse_node_int("  -7 trailing"), Some(-7));
/// assert_eq!(parse_node_int("off"), None);
/// ```
pub fn parse_node_int(contents: &str) -> Option<i32> {
    let trimmed = contents.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}

/// Access to kernel sysfs nodes.
///
/// Paths are absolute device paths as listed in
/// [`guacamole_core::constants`]. Implementations decide where those paths
/// actually live.
///
/// # Examples
///
/// ```
/// use guacamole_hardware::mock::MockNodes;
/// use guacamole_hardware::traits::NodeIo;
///
/// let (nodes, handle) = MockNodes::new();
/// handle.set("/sys/class/backlight/panel0-backlight/brightness", "512\n");
///
/// let level = nodes.read_int("/sys/class/backlight/panel0-backlight/brightness").unwrap();
/// assert_eq!(level, 512);
/// ```
pub trait NodeIo: Send + Sync {
    /// Read the full contents of a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not exist or cannot be read.
    fn read_string(&self, path: &str) -> Result<String>;

    /// Write `value` to a node, replacing its contents.
    ///
    /// Nodes are never created; writing to a missing node is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not exist or rejects the write.
    fn write_str(&self, path: &str, value: &str) -> Result<()>;

    /// Read a node holding an integer.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::InvalidData`] if the node does not start
    /// with an integer, or any error from [`read_string`](Self::read_string).
    fn read_int(&self, path: &str) -> Result<i32> {
        let contents = self.read_string(path)?;
        parse_node_int(&contents).ok_or_else(|| {
            HardwareError::invalid_data(format!("{path}: expected integer, got {:?}", contents.trim()))
        })
    }

    /// Read a node holding an integer, falling back to `default` on any
    /// failure.
    fn read_int_or(&self, path: &str, default: i32) -> i32 {
        match self.read_int(path) {
            Ok(value) => value,
            Err(e) => {
                debug!("Falling back to {} for {}: {}", default, path, e);
                default
            }
        }
    }

    /// Write an integer (or any displayable value) to a node.
    ///
    /// # Errors
    ///
    /// Same as [`write_str`](Self::write_str).
    fn write_value<T: std::fmt::Display>(&self, path: &str, value: T) -> Result<()>
    where
        Self: Sized,
    {
        self.write_str(path, &value.to_string())
    }
}

/// Vendor display service.
///
/// Panel modes (AOD, dim layer, press notification, colour profiles) are
/// switched through this service rather than through sysfs.
pub trait DisplayService: Send + Sync {
    /// Set display `mode` to `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or rejects the call.
    fn set_mode(&self, mode: i32, value: i32) -> Result<()>;
}

/// Vendor fingerprint extension service.
///
/// Receives opaque status codes (long press, enroll progress) that the
/// fingerprint daemon acts on.
pub trait FingerprintExtensions: Send + Sync {
    /// Forward a status operation code to the fingerprint daemon.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or rejects the call.
    fn update_status(&self, op: i32) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("255\n", Some(255))]
    #[case("  2000  ", Some(2000))]
    #[case("5 hbm", Some(5))]
    #[case("-3", Some(-3))]
    #[case("+12", Some(12))]
    #[case("", None)]
    #[case("\n", None)]
    #[case("-", None)]
    #[case("abc", None)]
    #[case("99999999999", None)]
    fn test_parse_node_int(#[case] input: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_node_int(input), expected);
    }
}
