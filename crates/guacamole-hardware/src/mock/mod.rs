//! Mock device implementations for testing and development.
//!
//! This module provides recording implementations of the hardware traits
//! that can be controlled programmatically without a device. Each mock is
//! created together with a handle sharing its state, so a test can hand the
//! mock to a service and keep the handle to inspect what the service did.

pub mod display;
pub mod fingerprint;
pub mod nodes;

// Re-export commonly used types
pub use display::{MockDisplayHandle, MockDisplayService};
pub use fingerprint::{MockFingerprintExtensions, MockFingerprintHandle};
pub use nodes::{MockNodes, MockNodesHandle, NodeWrite};

use std::sync::{Mutex, MutexGuard};

/// Lock shared mock state, recovering it if a panicking test poisoned it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
