//! # Guacamole Settings
//!
//! Persisted device settings and their restoration at boot.
//!
//! [`Preferences`] is the JSON-backed key/value store the settings screen
//! writes to. [`Startup`] reads it back after a reboot and reapplies the
//! enabled panel modes and the vibrator strength.

pub mod preferences;
pub mod startup;

pub use preferences::Preferences;
pub use startup::{BootReport, RestoreStep, StepFailure, Startup};
