//! Boot-time restoration of panel and vibrator settings.
//!
//! The kernel forgets every panel mode on reboot. [`Startup::restore`]
//! replays the persisted [`Preferences`] onto the sysfs nodes and the vendor
//! display service. Each step is independent: a failing node is logged,
//! recorded in the [`BootReport`] and the remaining steps still run.

use crate::preferences::{
    KEY_DC_SWITCH, KEY_DCI_SWITCH, KEY_FPS_INFO, KEY_HBM_SWITCH, KEY_NIGHT_SWITCH,
    KEY_SRGB_SWITCH, KEY_VIBSTRENGTH, KEY_WIDECOLOR_SWITCH, Preferences,
};
use guacamole_core::constants::{
    DC_DIM_PATH, DISPLAY_COLOR_MODES, DISPLAY_MODE_DCI_P3, DISPLAY_MODE_SRGB, HBM_PATH,
    MAX_VIBRATOR_STRENGTH, NIGHT_MODE_PATH, SWITCH_VALUE_HBM, SWITCH_VALUE_ON, VIBRATOR_VMAX_PATH,
    VMAX, WIDE_COLOR_PATH,
};
use guacamole_hardware::{DisplayService, HardwareError, NodeIo};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// A single restore step, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreStep {
    VibratorStrength,
    Srgb,
    Hbm,
    Dc,
    DciP3,
    Night,
    WideColor,
    FpsInfo,
}

impl RestoreStep {
    /// Preference key the step reads.
    pub fn key(self) -> &'static str {
        match self {
            Self::VibratorStrength => KEY_VIBSTRENGTH,
            Self::Srgb => KEY_SRGB_SWITCH,
            Self::Hbm => KEY_HBM_SWITCH,
            Self::Dc => KEY_DC_SWITCH,
            Self::DciP3 => KEY_DCI_SWITCH,
            Self::Night => KEY_NIGHT_SWITCH,
            Self::WideColor => KEY_WIDECOLOR_SWITCH,
            Self::FpsInfo => KEY_FPS_INFO,
        }
    }
}

impl fmt::Display for RestoreStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::VibratorStrength => "vibrator strength",
            Self::Srgb => "sRGB mode",
            Self::Hbm => "HBM",
            Self::Dc => "DC dimming",
            Self::DciP3 => "DCI-P3 mode",
            Self::Night => "night mode",
            Self::WideColor => "wide colour mode",
            Self::FpsInfo => "FPS info",
        };
        f.write_str(name)
    }
}

/// A step that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub step: RestoreStep,
    pub message: String,
}

/// Outcome of a boot restore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootReport {
    /// Steps that ran and completed.
    pub applied: Vec<RestoreStep>,

    /// Steps skipped because the hardware lacks the node.
    pub skipped: Vec<RestoreStep>,

    pub failures: Vec<StepFailure>,

    /// Whether the caller should start the refresh rate overlay.
    pub start_fps_info_service: bool,
}

impl BootReport {
    /// True if no step failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, step: RestoreStep, result: Result<(), HardwareError>) {
        match result {
            Ok(()) => {
                info!("Restored {step}");
                self.applied.push(step);
            }
            Err(e) => {
                warn!("Failed to restore {step}: {e}");
                self.failures.push(StepFailure {
                    step,
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Replays persisted settings at boot.
///
/// # Examples
///
/// ```
/// use guacamole_hardware::mock::{MockDisplayService, MockNodes};
/// use guacamole_settings::preferences::{KEY_HBM_SWITCH, Preferences};
/// use guacamole_settings::startup::{RestoreStep, Startup};
///
/// let (nodes, node_handle) = MockNodes::with_nodes(["/sys/class/drm/card0-DSI-1/hbm"]);
/// let (display, _) = MockDisplayService::new();
///
/// let mut prefs = Preferences::default();
/// prefs.set_bool(KEY_HBM_SWITCH, true);
///
/// let report = Startup::new(nodes, display).restore(&prefs);
/// assert!(report.applied.contains(&RestoreStep::Hbm));
/// assert_eq!(node_handle.value("/sys/class/drm/card0-DSI-1/hbm").as_deref(), Some("5"));
/// ```
pub struct Startup<N, D> {
    nodes: N,
    display: D,
}

impl<N: NodeIo, D: DisplayService> Startup<N, D> {
    pub fn new(nodes: N, display: D) -> Self {
        Self { nodes, display }
    }

    /// Restore every enabled setting from `prefs`.
    pub fn restore(&self, prefs: &Preferences) -> BootReport {
        let mut report = BootReport::default();

        match self.restore_vibrator_strength(prefs) {
            Ok(true) => report.record(RestoreStep::VibratorStrength, Ok(())),
            Ok(false) => {
                debug!("Vibrator strength node absent, skipping");
                report.skipped.push(RestoreStep::VibratorStrength);
            }
            Err(e) => report.record(RestoreStep::VibratorStrength, Err(e)),
        }

        // The last enabled switch decides the value written to switch nodes.
        let mut hbm = false;
        for step in [
            RestoreStep::Srgb,
            RestoreStep::Hbm,
            RestoreStep::Dc,
            RestoreStep::DciP3,
            RestoreStep::Night,
            RestoreStep::WideColor,
        ] {
            if !prefs.bool(step.key(), false) {
                continue;
            }
            hbm = step == RestoreStep::Hbm;

            let result = match step {
                RestoreStep::Srgb => self.select_color_mode(DISPLAY_MODE_SRGB),
                RestoreStep::DciP3 => self.select_color_mode(DISPLAY_MODE_DCI_P3),
                RestoreStep::Hbm => self.write_switch(HBM_PATH, hbm),
                RestoreStep::Dc => self.write_switch(DC_DIM_PATH, hbm),
                RestoreStep::Night => self.write_switch(NIGHT_MODE_PATH, hbm),
                RestoreStep::WideColor => self.write_switch(WIDE_COLOR_PATH, hbm),
                RestoreStep::VibratorStrength | RestoreStep::FpsInfo => Ok(()),
            };
            report.record(step, result);
        }

        if prefs.bool(KEY_FPS_INFO, false) {
            report.start_fps_info_service = true;
            report.record(RestoreStep::FpsInfo, Ok(()));
        }

        report
    }

    /// Returns `Ok(false)` when the device has no vmax node.
    fn restore_vibrator_strength(&self, prefs: &Preferences) -> Result<bool, HardwareError> {
        let strength = prefs.int(KEY_VIBSTRENGTH, i64::from(VMAX));
        if !(0..=i64::from(MAX_VIBRATOR_STRENGTH)).contains(&strength) {
            return Err(HardwareError::invalid_data(format!(
                "vibrator strength {strength} outside 0..={MAX_VIBRATOR_STRENGTH}"
            )));
        }

        match self.nodes.write_value(VIBRATOR_VMAX_PATH, strength) {
            Ok(()) => Ok(true),
            Err(HardwareError::NodeMissing { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn select_color_mode(&self, mode: i32) -> Result<(), HardwareError> {
        for &other in DISPLAY_COLOR_MODES {
            self.display.set_mode(other, 0)?;
        }
        self.display.set_mode(mode, 1)
    }

    fn write_switch(&self, path: &str, hbm: bool) -> Result<(), HardwareError> {
        let value = if hbm { SWITCH_VALUE_HBM } else { SWITCH_VALUE_ON };
        self.nodes.write_str(path, value)
    }
}
