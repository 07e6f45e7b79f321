//! Hardware abstraction for the guacamole vendor HAL.
//!
//! This crate provides the seams between the HAL services and the device:
//! kernel sysfs nodes and the proprietary vendor services. Services in the
//! other crates are generic over these traits, which allows substituting
//! the in-memory mocks for the real device in tests and off-device tools.
//!
//! # Node Access
//!
//! The [`NodeIo`] trait reads and writes sysfs nodes by their absolute
//! device path. [`SysfsIo`] is the real implementation; every operation
//! opens a file handle scoped to the call.
//!
//! ```no_run
//! use guacamole_core::constants::BACKLIGHT_BRIGHTNESS_PATH;
//! use guacamole_hardware::{NodeIo, SysfsIo};
//!
//! let nodes = SysfsIo::new();
//! let level = nodes.read_int_or(BACKLIGHT_BRIGHTNESS_PATH, 0);
//! println!("backlight at {level}");
//! ```
//!
//! # Vendor Services
//!
//! [`DisplayService`] and [`FingerprintExtensions`] model the vendor
//! binder interfaces. They are black boxes; this crate only defines the
//! calls the HAL makes, plus stand-ins in [`vendor`] for processes that
//! cannot reach them.
//!
//! # Error Handling
//!
//! All operations return [`Result<T>`][error::Result] which uses the
//! [`HardwareError`] error type.
//!
//! # Mock Implementations
//!
//! The [`mock`] module provides recording implementations of every trait,
//! each paired with a handle for inspecting and steering it from tests.

pub mod error;
pub mod mock;
pub mod sysfs;
pub mod traits;
pub mod vendor;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use sysfs::SysfsIo;
pub use traits::{DisplayService, FingerprintExtensions, NodeIo, parse_node_int};
pub use vendor::{UnavailableDisplayService, UnavailableFingerprintExtensions};
