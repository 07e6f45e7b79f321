//! Device constants for the guacamole hardware abstraction layer.
//!
//! This module collects every hardcoded value of the device ABI: kernel
//! sysfs node paths, vendor service operation codes, panel mode
//! identifiers and vibrator tuning values. They are fixed by the kernel
//! driver and the vendor blobs shipped with the device.
//!
//! # Node Paths
//!
//! All paths are absolute device paths. Node I/O implementations may remap
//! them under a different root (see `guacamole_hardware::SysfsIo`), so code
//! should always pass these constants rather than building paths by hand.
//!
//! ```
//! use guacamole_core::constants::*;
//!
//! assert!(BACKLIGHT_BRIGHTNESS_PATH.starts_with("/sys/"));
//! assert_eq!(HBM_MODE_FOD, 5);
//! ```
//!
//! # ABI Compliance
//!
//! Modifying these values breaks compatibility with the shipped kernel and
//! vendor services.

// ============================================================================
// Display Nodes
// ============================================================================

/// Raw panel backlight level.
pub const BACKLIGHT_BRIGHTNESS_PATH: &str = "/sys/class/backlight/panel0-backlight/brightness";

/// Fingerprint high brightness mode enable switch.
///
/// The node name is misspelled by the kernel driver and must stay that way.
pub const HBM_ENABLE_PATH: &str = "/sys/class/drm/card0-DSI-1/op_friginer_print_hbm";

/// Panel high brightness mode.
///
/// Reads back [`HBM_MODE_FOD`] while the panel is forced into HBM by the
/// device settings switch.
pub const HBM_PATH: &str = "/sys/class/drm/card0-DSI-1/hbm";

/// DC dimming (dim layer backlight) switch.
pub const DC_DIM_PATH: &str = "/sys/class/drm/card0-DSI-1/dimlayer_bl_en";

/// Night mode switch.
pub const NIGHT_MODE_PATH: &str = "/sys/class/drm/card0-DSI-1/night_mode";

/// Native wide colour gamut switch.
pub const WIDE_COLOR_PATH: &str = "/sys/class/drm/card0-DSI-1/native_display_wide_color_mode";

// ============================================================================
// Vibrator Nodes
// ============================================================================

pub const VIBRATOR_ACTIVATE_PATH: &str = "/sys/class/leds/vibrator/activate";
pub const VIBRATOR_BRIGHTNESS_PATH: &str = "/sys/class/leds/vibrator/brightness";
pub const VIBRATOR_CTRL_LOOP_PATH: &str = "/sys/class/leds/vibrator/loop";
pub const VIBRATOR_DURATION_PATH: &str = "/sys/class/leds/vibrator/duration";
pub const VIBRATOR_GAIN_PATH: &str = "/sys/class/leds/vibrator/gain";
pub const VIBRATOR_IGNORE_STORE_PATH: &str = "/sys/class/leds/vibrator/ignore_store";
pub const VIBRATOR_LP_TRIGGER_PATH: &str = "/sys/class/leds/vibrator/haptic_audio";
pub const VIBRATOR_LRA_WAVE_SHAPE_PATH: &str = "/sys/class/leds/vibrator/lra_resistance";
pub const VIBRATOR_MODE_PATH: &str = "/sys/class/leds/vibrator/activate_mode";
pub const VIBRATOR_RTP_INPUT_PATH: &str = "/sys/class/leds/vibrator/rtp";
pub const VIBRATOR_SCALE_PATH: &str = "/sys/class/leds/vibrator/gain";
pub const VIBRATOR_SEQ_PATH: &str = "/sys/class/leds/vibrator/seq";
pub const VIBRATOR_VMAX_PATH: &str = "/sys/class/leds/vibrator/vmax";

// ============================================================================
// Fingerprint Vendor Codes
// ============================================================================

/// `acquiredInfo` value carrying a vendor-specific code.
pub const FINGERPRINT_ACQUIRED_VENDOR: i32 = 6;

/// `error` value carrying a vendor-specific code.
pub const FINGERPRINT_ERROR_VENDOR: i32 = 8;

/// Vendor error code that the framework must swallow.
pub const FINGERPRINT_ERROR_VENDOR_IGNORED: i32 = 6;

pub const OP_ENABLE_FP_LONGPRESS: i32 = 3;
pub const OP_DISABLE_FP_LONGPRESS: i32 = 4;
pub const OP_RESUME_FP_ENROLL: i32 = 8;
pub const OP_FINISH_FP_ENROLL: i32 = 10;

// ============================================================================
// Display Service Modes
// ============================================================================

pub const OP_DISPLAY_AOD_MODE: i32 = 8;
pub const OP_DISPLAY_NOTIFY_PRESS: i32 = 9;
pub const OP_DISPLAY_SET_DIM: i32 = 10;

/// AOD mode value used while a finger is on the sensor.
pub const AOD_MODE_FINGER_PRESSED: i32 = 2;

/// DCI-P3 panel colour mode.
pub const DISPLAY_MODE_DCI_P3: i32 = 16;

/// sRGB panel colour mode.
pub const DISPLAY_MODE_SRGB: i32 = 18;

/// Panel colour modes that are mutually exclusive and must be cleared
/// before one of them is enabled.
pub const DISPLAY_COLOR_MODES: &[i32] = &[16, 17, 18, 20, 21];

/// Value of [`HBM_PATH`] when HBM is forced on.
pub const HBM_MODE_FOD: i32 = 5;

/// Dim alpha reported while the panel is in forced HBM.
pub const HBM_DIM_ALPHA: i32 = 42;

/// Switch value written when a panel switch is restored while HBM is active.
pub const SWITCH_VALUE_HBM: &str = "5";

/// Switch value written for every other enabled panel switch.
pub const SWITCH_VALUE_ON: &str = "1";

// ============================================================================
// Fingerprint Sensor Geometry
// ============================================================================

pub const DEFAULT_FOD_POS_X: i32 = 444;
pub const DEFAULT_FOD_POS_Y: i32 = 1966;
pub const DEFAULT_FOD_SIZE: i32 = 190;

// ============================================================================
// Vibrator Tuning
// ============================================================================

pub const RTP_MODE: &str = "rtp";
pub const WAVEFORM_MODE: &str = "waveform";

pub const MAX_RTP_INPUT: u8 = 127;
pub const MIN_RTP_INPUT: u8 = 0;

pub const SQUARE_WAVE: u8 = 0;
pub const SINE_WAVE: u8 = 1;

pub const GAIN: u8 = 128;
pub const LOOP_MODE_OPEN: u8 = 1;
pub const VMAX: u8 = 9;

/// Scale written for [`EffectStrength::Light`](crate::EffectStrength::Light) (50%).
pub const SCALE_LIGHT: u8 = 54;

/// Scale written for medium and strong effects (100%).
pub const SCALE_FULL: u8 = 107;

/// Largest vibrator strength accepted by the vmax node.
pub const MAX_VIBRATOR_STRENGTH: u8 = 9;
