//! Mock vendor fingerprint extension service.

use super::lock;
use crate::{HardwareError, Result, traits::FingerprintExtensions};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FingerprintState {
    statuses: Vec<i32>,
    fail: bool,
}

/// Fingerprint extension service that records every status update.
///
/// # Examples
///
/// ```
/// use guacamole_hardware::mock::MockFingerprintExtensions;
/// use guacamole_hardware::traits::FingerprintExtensions;
///
/// let (service, handle) = MockFingerprintExtensions::new();
/// service.update_status(3).unwrap();
///
/// assert_eq!(handle.statuses(), vec![3]);
/// ```
#[derive(Debug, Clone)]
pub struct MockFingerprintExtensions {
    state: Arc<Mutex<FingerprintState>>,
}

impl MockFingerprintExtensions {
    /// Create a new mock service and its control handle.
    pub fn new() -> (Self, MockFingerprintHandle) {
        let state = Arc::new(Mutex::new(FingerprintState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            MockFingerprintHandle { state },
        )
    }
}

impl FingerprintExtensions for MockFingerprintExtensions {
    fn update_status(&self, op: i32) -> Result<()> {
        let mut state = lock(&self.state);
        if state.fail {
            return Err(HardwareError::service("mock fingerprint service rejected updateStatus"));
        }
        state.statuses.push(op);
        Ok(())
    }
}

/// Handle for inspecting a [`MockFingerprintExtensions`].
#[derive(Debug, Clone)]
pub struct MockFingerprintHandle {
    state: Arc<Mutex<FingerprintState>>,
}

impl MockFingerprintHandle {
    /// Recorded status codes, in order.
    pub fn statuses(&self) -> Vec<i32> {
        lock(&self.state).statuses.clone()
    }

    /// Make subsequent calls fail.
    pub fn set_failing(&self, fail: bool) {
        lock(&self.state).fail = fail;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_statuses() {
        let (service, handle) = MockFingerprintExtensions::new();
        service.update_status(4).unwrap();
        service.update_status(8).unwrap();
        assert_eq!(handle.statuses(), vec![4, 8]);
    }

    #[test]
    fn test_failing_service() {
        let (service, handle) = MockFingerprintExtensions::new();
        handle.set_failing(true);
        assert!(matches!(
            service.update_status(10),
            Err(HardwareError::ServiceError { .. })
        ));
        assert!(handle.statuses().is_empty());
    }
}
