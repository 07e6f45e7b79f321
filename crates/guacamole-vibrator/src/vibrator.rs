//! Vibrator HAL.
//!
//! The haptic driver is controlled entirely through nodes under
//! `/sys/class/leds/vibrator`. Plain vibrations run in RTP (real time
//! playback) mode with a square wave; effects load a program from the
//! driver's waveform library and play it with a sine wave.

use crate::effects::{EffectProgram, program_for};
use guacamole_core::constants::{
    GAIN, LOOP_MODE_OPEN, MAX_RTP_INPUT, MIN_RTP_INPUT, RTP_MODE, SCALE_FULL, SCALE_LIGHT,
    SINE_WAVE, SQUARE_WAVE, VIBRATOR_ACTIVATE_PATH, VIBRATOR_BRIGHTNESS_PATH,
    VIBRATOR_CTRL_LOOP_PATH, VIBRATOR_DURATION_PATH, VIBRATOR_GAIN_PATH,
    VIBRATOR_IGNORE_STORE_PATH, VIBRATOR_LP_TRIGGER_PATH, VIBRATOR_LRA_WAVE_SHAPE_PATH,
    VIBRATOR_MODE_PATH, VIBRATOR_RTP_INPUT_PATH, VIBRATOR_SCALE_PATH, VIBRATOR_SEQ_PATH,
    VIBRATOR_VMAX_PATH, VMAX, WAVEFORM_MODE,
};
use guacamole_core::{Effect, EffectStrength, Status};
use guacamole_hardware::NodeIo;
use std::fmt::Display;
use tracing::{debug, error};

/// Scale written to the driver for an effect strength.
pub fn strength_scale(strength: EffectStrength) -> u8 {
    match strength {
        EffectStrength::Light => SCALE_LIGHT,
        EffectStrength::Medium | EffectStrength::Strong => SCALE_FULL,
    }
}

/// Map a framework amplitude (1-255) onto the RTP input range.
///
/// Returns `None` for `0`, which the framework must never send.
pub fn rtp_input(amplitude: u8) -> Option<i32> {
    if amplitude == 0 {
        return None;
    }
    let span = f64::from(MAX_RTP_INPUT - MIN_RTP_INPUT);
    let value = (f64::from(amplitude - 1) / 254.0 * span + f64::from(MIN_RTP_INPUT)).round();
    Some(value as i32)
}

/// Vibrator HAL over a set of driver nodes.
///
/// Node writes are best effort. A node the kernel lacks or rejects is
/// logged and skipped; the remaining writes still run and the operation
/// reports [`Status::Ok`].
///
/// # Examples
///
/// ```
/// use guacamole_core::{Effect, EffectStrength, Status};
/// use guacamole_hardware::mock::MockNodes;
/// use guacamole_vibrator::Vibrator;
///
/// let (nodes, handle) = MockNodes::with_nodes(["/sys/class/leds/vibrator/activate_mode"]);
/// let mut vibrator = Vibrator::new(nodes);
///
/// let (status, time_ms) = vibrator.perform(Effect::DoubleClick, EffectStrength::Light);
/// assert_eq!((status, time_ms), (Status::Ok, 10));
/// assert_eq!(handle.value("/sys/class/leds/vibrator/activate_mode").as_deref(), Some("waveform"));
/// ```
#[derive(Debug)]
pub struct Vibrator<N> {
    nodes: N,
    should_set_brightness: bool,
}

impl<N: NodeIo> Vibrator<N> {
    /// Create the HAL.
    ///
    /// Arms the low-power trigger so the sensor hub can fire the click
    /// effect while the application processor is suspended.
    pub fn new(nodes: N) -> Self {
        let vibrator = Self {
            nodes,
            should_set_brightness: false,
        };
        vibrator.set(VIBRATOR_LP_TRIGGER_PATH, 1);
        vibrator
    }

    /// Node access used by this HAL.
    pub fn nodes(&self) -> &N {
        &self.nodes
    }

    /// Vibrate for `timeout_ms` in RTP mode.
    pub fn on(&mut self, timeout_ms: u32) -> Status {
        self.should_set_brightness = false;
        self.activate(timeout_ms, false)
    }

    pub fn off(&mut self) -> Status {
        self.set(VIBRATOR_BRIGHTNESS_PATH, 0);
        self.set(VIBRATOR_ACTIVATE_PATH, 0);
        Status::Ok
    }

    pub fn supports_amplitude_control(&self) -> bool {
        true
    }

    pub fn set_amplitude(&mut self, amplitude: u8) -> Status {
        let Some(value) = rtp_input(amplitude) else {
            return Status::BadValue;
        };
        self.set(VIBRATOR_RTP_INPUT_PATH, value);
        Status::Ok
    }

    /// Play `effect` and report how long it lasts.
    ///
    /// Effects missing from the waveform library yield
    /// `(Status::UnsupportedOperation, 0)` without touching the driver.
    pub fn perform(&mut self, effect: Effect, strength: EffectStrength) -> (Status, u32) {
        let Some(program) = program_for(effect) else {
            debug!("Effect {} (id {}) not in waveform library", effect, effect.to_i32());
            self.should_set_brightness = false;
            return (Status::UnsupportedOperation, 0);
        };

        self.load_program(&program);
        self.should_set_brightness = true;

        self.set(VIBRATOR_SCALE_PATH, strength_scale(strength));
        self.activate(program.time_ms, true);

        debug!("Performed {} ({}) for {}ms", effect, strength, program.time_ms);
        (Status::Ok, program.time_ms)
    }

    fn load_program(&self, program: &EffectProgram) {
        self.set(VIBRATOR_ACTIVATE_PATH, 0);
        self.set(VIBRATOR_IGNORE_STORE_PATH, 0);

        if let Some(duration) = program.duration {
            self.set(VIBRATOR_DURATION_PATH, duration);
        }
        self.set(VIBRATOR_VMAX_PATH, VMAX);
        self.set(VIBRATOR_GAIN_PATH, GAIN);

        for sequence in program.sequences {
            self.set(VIBRATOR_SEQ_PATH, sequence);
        }
        for ctrl_loop in program.ctrl_loops {
            self.set(VIBRATOR_CTRL_LOOP_PATH, ctrl_loop);
        }
    }

    fn activate(&self, timeout_ms: u32, is_waveform: bool) -> Status {
        self.set(VIBRATOR_CTRL_LOOP_PATH, LOOP_MODE_OPEN);
        self.set(VIBRATOR_DURATION_PATH, timeout_ms);

        if is_waveform {
            self.set(VIBRATOR_MODE_PATH, WAVEFORM_MODE);
            self.set(VIBRATOR_LRA_WAVE_SHAPE_PATH, SINE_WAVE);
        } else {
            self.set(VIBRATOR_MODE_PATH, RTP_MODE);
            self.set(VIBRATOR_LRA_WAVE_SHAPE_PATH, SQUARE_WAVE);
        }

        if self.should_set_brightness {
            self.set(VIBRATOR_BRIGHTNESS_PATH, 1);
        } else {
            self.set(VIBRATOR_BRIGHTNESS_PATH, 0);
            self.set(VIBRATOR_ACTIVATE_PATH, 1);
        }

        Status::Ok
    }

    fn set<T: Display>(&self, path: &str, value: T) {
        if let Err(e) = self.nodes.write_value(path, value) {
            error!("Unable to write {}: {}", path, e);
        }
    }
}
