//! Vibrator HAL for the guacamole device.
//!
//! [`Vibrator`] implements the framework's vibrator operations (on/off,
//! amplitude, predefined effects) as writes to the haptic driver's sysfs
//! nodes. [`effects`] holds the waveform library programs behind the
//! predefined effects.

pub mod effects;
pub mod vibrator;

pub use effects::{EffectProgram, program_for};
pub use vibrator::{Vibrator, rtp_input, strength_scale};
