//! Integration tests running the vibrator against a real node tree.
//!
//! A temporary directory mirrors the driver's sysfs layout so the HAL goes
//! through `SysfsIo` and actual file handles.
//!
//! Run with: cargo test --package guacamole-vibrator --test sysfs_vibrator

use guacamole_core::constants::*;
use guacamole_core::{Effect, EffectStrength, Status};
use guacamole_hardware::SysfsIo;
use guacamole_vibrator::Vibrator;
use std::fs;
use tempfile::TempDir;

const DRIVER_NODES: &[&str] = &[
    VIBRATOR_ACTIVATE_PATH,
    VIBRATOR_BRIGHTNESS_PATH,
    VIBRATOR_CTRL_LOOP_PATH,
    VIBRATOR_DURATION_PATH,
    VIBRATOR_GAIN_PATH,
    VIBRATOR_IGNORE_STORE_PATH,
    VIBRATOR_LP_TRIGGER_PATH,
    VIBRATOR_LRA_WAVE_SHAPE_PATH,
    VIBRATOR_MODE_PATH,
    VIBRATOR_RTP_INPUT_PATH,
    VIBRATOR_SEQ_PATH,
    VIBRATOR_VMAX_PATH,
];

fn driver_tree() -> (TempDir, SysfsIo) {
    let dir = TempDir::new().unwrap();
    let io = SysfsIo::with_root(dir.path());
    for node in DRIVER_NODES {
        let file = io.resolve(node);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, "0").unwrap();
    }
    (dir, io)
}

fn node(io: &SysfsIo, path: &str) -> String {
    fs::read_to_string(io.resolve(path)).unwrap()
}

#[test]
fn test_construction_arms_trigger() {
    let (_dir, io) = driver_tree();
    let _vibrator = Vibrator::new(io.clone());
    assert_eq!(node(&io, VIBRATOR_LP_TRIGGER_PATH), "1");
}

#[test]
fn test_on_then_off() {
    let (_dir, io) = driver_tree();
    let mut vibrator = Vibrator::new(io.clone());

    assert_eq!(vibrator.on(300), Status::Ok);
    assert_eq!(node(&io, VIBRATOR_DURATION_PATH), "300");
    assert_eq!(node(&io, VIBRATOR_MODE_PATH), "rtp");
    assert_eq!(node(&io, VIBRATOR_ACTIVATE_PATH), "1");

    assert_eq!(vibrator.off(), Status::Ok);
    assert_eq!(node(&io, VIBRATOR_ACTIVATE_PATH), "0");
}

#[test]
fn test_heavy_click_leaves_last_program_entries() {
    let (_dir, io) = driver_tree();
    let mut vibrator = Vibrator::new(io.clone());

    let result = vibrator.perform(Effect::HeavyClick, EffectStrength::Light);
    assert_eq!(result, (Status::Ok, 10));

    // Each write replaces the node contents, so only the last entry remains.
    assert_eq!(node(&io, VIBRATOR_SEQ_PATH), "1 0");
    assert_eq!(node(&io, VIBRATOR_CTRL_LOOP_PATH), "1");
    assert_eq!(node(&io, VIBRATOR_SCALE_PATH), "54");
    assert_eq!(node(&io, VIBRATOR_VMAX_PATH), "9");
    assert_eq!(node(&io, VIBRATOR_MODE_PATH), "waveform");
    assert_eq!(node(&io, VIBRATOR_BRIGHTNESS_PATH), "1");
}

#[test]
fn test_missing_driver_node_is_skipped() {
    let (_dir, io) = driver_tree();
    fs::remove_file(io.resolve(VIBRATOR_IGNORE_STORE_PATH)).unwrap();
    let mut vibrator = Vibrator::new(io.clone());

    let result = vibrator.perform(Effect::Click, EffectStrength::Medium);

    assert_eq!(result, (Status::Ok, 0));
    assert!(!io.resolve(VIBRATOR_IGNORE_STORE_PATH).exists());
    assert_eq!(node(&io, VIBRATOR_BRIGHTNESS_PATH), "1");
}
