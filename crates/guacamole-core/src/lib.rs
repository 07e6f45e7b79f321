//! # Guacamole Core
//!
//! Definitions shared by every guacamole HAL crate: the device constants
//! ([`constants`]), the framework-facing vibrator types ([`Effect`],
//! [`EffectStrength`], [`Status`]) and the [`Error`] raised while parsing
//! values and configuration.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Effect, EffectStrength, Status};

/// Version of the guacamole HAL crates, reported by the `guacamole` binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
