//! Waveform library effect programs.
//!
//! Each supported effect maps to a program for the haptic driver: the
//! waveform sequence slots to load, the per-slot loop counts, an optional
//! explicit duration and how long the effect plays.

use guacamole_core::Effect;

/// Driver program for one effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectProgram {
    /// Entries written to the sequence node, `"<slot> <waveform>"`.
    pub sequences: &'static [&'static str],

    /// Entries written to the loop node, `"<slot> <count>"`.
    pub ctrl_loops: &'static [&'static str],

    /// Duration written before the program, if any.
    pub duration: Option<u32>,

    /// Time the effect plays, reported back to the framework.
    pub time_ms: u32,
}

// Effect #1 of the waveform library
const CLICK: EffectProgram = EffectProgram {
    sequences: &["0 1", "1 0"],
    ctrl_loops: &["0 0x0"],
    duration: None,
    time_ms: 0,
};

// Effect #2
const TICK: EffectProgram = EffectProgram {
    sequences: &["0 1", "1 0"],
    ctrl_loops: &["1 0x0"],
    duration: None,
    time_ms: 0,
};

// Effect #3
const DOUBLE_CLICK: EffectProgram = EffectProgram {
    sequences: &["0 1"],
    ctrl_loops: &["0 0x0", "1 0x0"],
    duration: None,
    time_ms: 10,
};

// Effect #4
const HEAVY_CLICK: EffectProgram = EffectProgram {
    sequences: &["0 0", "1 0"],
    ctrl_loops: &["1 0x1"],
    duration: None,
    time_ms: 10,
};

// Effect #5
const POP: EffectProgram = EffectProgram {
    sequences: &[],
    ctrl_loops: &[],
    duration: Some(0),
    time_ms: 5,
};

// Effect #6
const THUD: EffectProgram = EffectProgram {
    sequences: &[],
    ctrl_loops: &[],
    duration: Some(0),
    time_ms: 10,
};

/// Program for `effect`, or `None` if the waveform library lacks it.
pub fn program_for(effect: Effect) -> Option<EffectProgram> {
    match effect {
        Effect::Click => Some(CLICK),
        Effect::DoubleClick => Some(DOUBLE_CLICK),
        Effect::Tick => Some(TICK),
        Effect::HeavyClick => Some(HEAVY_CLICK),
        Effect::Pop => Some(POP),
        Effect::Thud => Some(THUD),
        Effect::Ringtone(_) => None,
    }
}
