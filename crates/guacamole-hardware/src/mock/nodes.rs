//! Mock sysfs node tree.
//!
//! [`MockNodes`] keeps node contents in memory and records every write in
//! order, which is what HAL tests usually assert on: the exact sequence of
//! values poked into the kernel.

use super::lock;
use crate::{HardwareError, Result, traits::NodeIo};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

/// A single recorded node write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeWrite {
    /// Device path written to.
    pub path: String,

    /// Value written.
    pub value: String,
}

impl NodeWrite {
    /// Create a new write record.
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Default)]
struct NodeState {
    values: HashMap<String, String>,
    writes: Vec<NodeWrite>,
    read_only: HashSet<String>,
}

/// In-memory sysfs node tree.
///
/// Like the kernel, the tree only holds the nodes it was given: reading or
/// writing a node that was never created fails with
/// [`HardwareError::NodeMissing`]. Create nodes with
/// [`with_nodes`](MockNodes::with_nodes) or [`MockNodesHandle::set`].
///
/// # Examples
///
/// ```
/// use guacamole_hardware::mock::{MockNodes, NodeWrite};
/// use guacamole_hardware::traits::NodeIo;
///
/// let (nodes, handle) = MockNodes::with_nodes(["/sys/class/leds/vibrator/activate"]);
/// nodes.write_str("/sys/class/leds/vibrator/activate", "1").unwrap();
/// assert!(nodes.write_str("/sys/class/leds/vibrator/actvate", "1").is_err());
///
/// assert_eq!(
///     handle.writes(),
///     vec![NodeWrite::new("/sys/class/leds/vibrator/activate", "1")]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockNodes {
    state: Arc<Mutex<NodeState>>,
}

impl MockNodes {
    /// Create an empty node tree and its control handle.
    pub fn new() -> (Self, MockNodesHandle) {
        let state = Arc::new(Mutex::new(NodeState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            MockNodesHandle { state },
        )
    }

    /// Create a tree holding `paths`, each initialised to `"0"`.
    pub fn with_nodes<I, S>(paths: I) -> (Self, MockNodesHandle)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (nodes, handle) = Self::new();
        for path in paths {
            handle.set(path, "0");
        }
        (nodes, handle)
    }
}

impl NodeIo for MockNodes {
    fn read_string(&self, path: &str) -> Result<String> {
        let state = lock(&self.state);
        state
            .values
            .get(path)
            .cloned()
            .ok_or_else(|| HardwareError::node_missing(path))
    }

    fn write_str(&self, path: &str, value: &str) -> Result<()> {
        let mut state = lock(&self.state);

        if !state.values.contains_key(path) {
            return Err(HardwareError::node_missing(path));
        }
        if state.read_only.contains(path) {
            return Err(HardwareError::node_io(
                path,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }

        state.values.insert(path.to_string(), value.to_string());
        state.writes.push(NodeWrite::new(path, value));
        Ok(())
    }
}

/// Handle for controlling and inspecting a [`MockNodes`] tree.
#[derive(Debug, Clone)]
pub struct MockNodesHandle {
    state: Arc<Mutex<NodeState>>,
}

impl MockNodesHandle {
    /// Create a node or replace its contents, without recording a write.
    pub fn set(&self, path: impl Into<String>, value: impl Into<String>) {
        lock(&self.state).values.insert(path.into(), value.into());
    }

    /// Current contents of a node.
    pub fn value(&self, path: &str) -> Option<String> {
        lock(&self.state).values.get(path).cloned()
    }

    /// Make writes to `path` fail with a permission error.
    pub fn set_read_only(&self, path: impl Into<String>) {
        lock(&self.state).read_only.insert(path.into());
    }

    /// Delete a node from the tree.
    pub fn remove(&self, path: &str) {
        lock(&self.state).values.remove(path);
    }

    /// All writes recorded so far, in order.
    pub fn writes(&self) -> Vec<NodeWrite> {
        lock(&self.state).writes.clone()
    }

    /// Values written to `path`, in order.
    pub fn writes_to(&self, path: &str) -> Vec<String> {
        lock(&self.state)
            .writes
            .iter()
            .filter(|w| w.path == path)
            .map(|w| w.value.clone())
            .collect()
    }

    /// Forget recorded writes, keeping node contents.
    pub fn clear_writes(&self) {
        lock(&self.state).writes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE: &str = "/sys/class/drm/card0-DSI-1/hbm";

    #[test]
    fn test_read_unset_node_is_missing() {
        let (nodes, _handle) = MockNodes::new();
        assert!(matches!(
            nodes.read_string(NODE),
            Err(HardwareError::NodeMissing { .. })
        ));
        assert_eq!(nodes.read_int_or(NODE, 0), 0);
    }

    #[test]
    fn test_set_then_read() {
        let (nodes, handle) = MockNodes::new();
        handle.set(NODE, "5\n");
        assert_eq!(nodes.read_int(NODE).unwrap(), 5);
        assert!(handle.writes().is_empty());
    }

    #[test]
    fn test_writes_are_recorded_in_order() {
        let (nodes, handle) = MockNodes::with_nodes([NODE, "/other"]);
        nodes.write_value(NODE, 1).unwrap();
        nodes.write_str("/other", "x").unwrap();
        nodes.write_value(NODE, 0).unwrap();

        assert_eq!(handle.writes_to(NODE), vec!["1", "0"]);
        assert_eq!(handle.writes().len(), 3);
        assert_eq!(handle.value(NODE).as_deref(), Some("0"));

        handle.clear_writes();
        assert!(handle.writes().is_empty());
        assert_eq!(handle.value(NODE).as_deref(), Some("0"));
    }

    #[test]
    fn test_read_only_node_rejects_writes() {
        let (nodes, handle) = MockNodes::new();
        handle.set(NODE, "0");
        handle.set_read_only(NODE);

        let err = nodes.write_str(NODE, "1").unwrap_err();
        assert!(matches!(err, HardwareError::NodeIo { .. }));
        assert_eq!(handle.value(NODE).as_deref(), Some("0"));
        assert!(handle.writes().is_empty());
    }

    #[test]
    fn test_write_unset_node_is_missing() {
        let (nodes, handle) = MockNodes::new();

        assert!(matches!(
            nodes.write_str(NODE, "1"),
            Err(HardwareError::NodeMissing { .. })
        ));
        assert_eq!(handle.value(NODE), None);
        assert!(handle.writes().is_empty());
    }

    #[test]
    fn test_with_nodes_seeds_zero() {
        let (nodes, handle) = MockNodes::with_nodes([NODE]);
        assert_eq!(nodes.read_int(NODE).unwrap(), 0);
        assert!(handle.writes().is_empty());
    }

    #[test]
    fn test_removed_node_rejects_writes() {
        let (nodes, handle) = MockNodes::new();
        handle.set(NODE, "0");
        handle.remove(NODE);

        assert!(matches!(
            nodes.write_str(NODE, "1"),
            Err(HardwareError::NodeMissing { .. })
        ));

        handle.set(NODE, "2");
        assert!(nodes.write_str(NODE, "1").is_ok());
    }
}
