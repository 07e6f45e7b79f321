use crate::{Result, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Haptic effect requested by the framework.
///
/// Codes follow the vibrator HAL 1.2 numbering. Only the first six effects
/// are backed by the waveform library of this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Click,
    DoubleClick,
    Tick,
    Thud,
    Pop,
    HeavyClick,
    /// Ringtone pattern, numbered 1 to [`Effect::MAX_RINGTONE`].
    ///
    /// Build it with [`Effect::ringtone`], [`Effect::from_i32`] or
    /// `FromStr`, which reject other numbers. [`Effect::to_i32`] of an
    /// out-of-range ringtone is not a valid HAL code.
    Ringtone(u8),
}

impl Effect {
    /// Highest ringtone pattern number.
    pub const MAX_RINGTONE: u8 = 15;

    /// Create a ringtone effect.
    ///
    /// # Errors
    /// Returns `Error::UnknownEffect` unless `n` is in 1-15.
    pub fn ringtone(n: u8) -> Result<Self> {
        if (1..=Self::MAX_RINGTONE).contains(&n) {
            Ok(Effect::Ringtone(n))
        } else {
            Err(Error::UnknownEffect(format!("ringtone_{n}")))
        }
    }

    /// Create an effect from its HAL code.
    ///
    /// # Errors
    /// Returns `Error::UnknownEffect` if the code is outside 0-20.
    pub fn from_i32(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Effect::Click),
            1 => Ok(Effect::DoubleClick),
            2 => Ok(Effect::Tick),
            3 => Ok(Effect::Thud),
            4 => Ok(Effect::Pop),
            5 => Ok(Effect::HeavyClick),
            _ => code
                .checked_sub(5)
                .and_then(|n| u8::try_from(n).ok())
                .and_then(|n| Self::ringtone(n).ok())
                .ok_or_else(|| Error::UnknownEffect(code.to_string())),
        }
    }

    /// HAL code of the effect.
    #[must_use]
    pub fn to_i32(self) -> i32 {
        match self {
            Effect::Click => 0,
            Effect::DoubleClick => 1,
            Effect::Tick => 2,
            Effect::Thud => 3,
            Effect::Pop => 4,
            Effect::HeavyClick => 5,
            Effect::Ringtone(n) => i32::from(n) + 5,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Effect::Click => write!(f, "click"),
            Effect::DoubleClick => write!(f, "double_click"),
            Effect::Tick => write!(f, "tick"),
            Effect::Thud => write!(f, "thud"),
            Effect::Pop => write!(f, "pop"),
            Effect::HeavyClick => write!(f, "heavy_click"),
            Effect::Ringtone(n) => write!(f, "ringtone_{n}"),
        }
    }
}

/// Accepts snake_case names (`heavy_click`, `ringtone_3`, dashes allowed)
/// and numeric HAL codes (`5`).
impl std::str::FromStr for Effect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase().replace('-', "_");
        if let Ok(code) = name.parse::<i32>() {
            return Self::from_i32(code);
        }
        match name.as_str() {
            "click" => Ok(Effect::Click),
            "double_click" => Ok(Effect::DoubleClick),
            "tick" => Ok(Effect::Tick),
            "thud" => Ok(Effect::Thud),
            "pop" => Ok(Effect::Pop),
            "heavy_click" => Ok(Effect::HeavyClick),
            other => other
                .strip_prefix("ringtone_")
                .and_then(|n| n.parse::<u8>().ok())
                .and_then(|n| Self::ringtone(n).ok())
                .ok_or_else(|| Error::UnknownEffect(s.to_string())),
        }
    }
}

/// Effect strength requested by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EffectStrength {
    Light = 0,
    #[default]
    Medium = 1,
    Strong = 2,
}

impl fmt::Display for EffectStrength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EffectStrength::Light => write!(f, "light"),
            EffectStrength::Medium => write!(f, "medium"),
            EffectStrength::Strong => write!(f, "strong"),
        }
    }
}

impl std::str::FromStr for EffectStrength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(EffectStrength::Light),
            "medium" => Ok(EffectStrength::Medium),
            "strong" => Ok(EffectStrength::Strong),
            _ => Err(Error::UnknownStrength(s.to_string())),
        }
    }
}

/// Result status returned by vibrator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum Status {
    Ok = 0,
    UnsupportedOperation = 1,
    BadValue = 2,
    UnknownError = 3,
}

impl Status {
    /// Returns `true` if the status is `Ok`.
    #[inline]
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::UnsupportedOperation => write!(f, "UNSUPPORTED_OPERATION"),
            Status::BadValue => write!(f, "BAD_VALUE"),
            Status::UnknownError => write!(f, "UNKNOWN_ERROR"),
        }
    }
}
