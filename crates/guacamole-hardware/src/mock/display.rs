//! Mock vendor display service.

use super::lock;
use crate::{HardwareError, Result, traits::DisplayService};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct DisplayState {
    calls: Vec<(i32, i32)>,
    fail: bool,
}

/// Display service that records every `set_mode` call.
///
/// # Examples
///
/// ```
/// use guacamole_hardware::mock::MockDisplayService;
/// use guacamole_hardware::traits::DisplayService;
///
/// let (display, handle) = MockDisplayService::new();
/// display.set_mode(10, 1).unwrap();
///
/// assert_eq!(handle.calls(), vec![(10, 1)]);
/// ```
#[derive(Debug, Clone)]
pub struct MockDisplayService {
    state: Arc<Mutex<DisplayState>>,
}

impl MockDisplayService {
    /// Create a new mock display service and its control handle.
    pub fn new() -> (Self, MockDisplayHandle) {
        let state = Arc::new(Mutex::new(DisplayState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            MockDisplayHandle { state },
        )
    }
}

impl DisplayService for MockDisplayService {
    fn set_mode(&self, mode: i32, value: i32) -> Result<()> {
        let mut state = lock(&self.state);
        if state.fail {
            return Err(HardwareError::service("mock display rejected setMode"));
        }
        state.calls.push((mode, value));
        Ok(())
    }
}

/// Handle for inspecting a [`MockDisplayService`].
#[derive(Debug, Clone)]
pub struct MockDisplayHandle {
    state: Arc<Mutex<DisplayState>>,
}

impl MockDisplayHandle {
    /// Recorded `(mode, value)` calls, in order.
    pub fn calls(&self) -> Vec<(i32, i32)> {
        lock(&self.state).calls.clone()
    }

    /// Make subsequent calls fail.
    pub fn set_failing(&self, fail: bool) {
        lock(&self.state).fail = fail;
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        lock(&self.state).calls.clear();
    }
}
