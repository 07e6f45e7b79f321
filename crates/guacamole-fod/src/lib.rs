//! In-display fingerprint (FOD) support for the guacamole vendor HAL.
//!
//! Two pieces live here:
//!
//! - [`alpha`]: the panel calibration that maps raw backlight levels to the
//!   alpha of the dimming overlay drawn around the sensor.
//! - [`inscreen`]: the service the framework calls during fingerprint
//!   authentication, which uses that mapping for its dim amount.

pub mod alpha;
pub mod config;
pub mod inscreen;

pub use alpha::{CALIBRATION_TABLE, CalibrationEntry, brightness_to_alpha};
pub use config::FodConfig;
pub use inscreen::{FingerCallback, FingerEvent, FingerprintInscreen};
