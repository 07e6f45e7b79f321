//! Vendor service stand-ins for processes without binder access.
//!
//! The real display and fingerprint services live in the vendor partition
//! and are only reachable from a HAL process. Tools that run elsewhere use
//! these implementations: every call is logged and reported as
//! [`HardwareError::ServiceUnavailable`], letting best-effort callers carry on.

use crate::error::{HardwareError, Result};
use crate::traits::{DisplayService, FingerprintExtensions};
use tracing::warn;

/// Display service that is not reachable from this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableDisplayService;

impl DisplayService for UnavailableDisplayService {
    fn set_mode(&self, mode: i32, value: i32) -> Result<()> {
        warn!("Display service unavailable, dropping setMode({}, {})", mode, value);
        Err(HardwareError::service_unavailable("IOneplusDisplay"))
    }
}

/// Fingerprint extension service that is not reachable from this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableFingerprintExtensions;

impl FingerprintExtensions for UnavailableFingerprintExtensions {
    fn update_status(&self, op: i32) -> Result<()> {
        warn!("Fingerprint extensions unavailable, dropping updateStatus({})", op);
        Err(HardwareError::service_unavailable("IVendorFingerprintExtensions"))
    }
}
