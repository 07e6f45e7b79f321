//! In-display fingerprint service.
//!
//! [`FingerprintInscreen`] is what the framework calls around an in-display
//! fingerprint authentication: when the sensor circle is shown or hidden,
//! when a finger presses or lifts, and to ask how dark the overlay should
//! be. It drives the vendor display service (AOD, dim layer, press
//! notification), the vendor fingerprint daemon (long press, enroll
//! progress) and, when configured, the fingerprint HBM node.
//!
//! The framework registers a callback channel with
//! [`set_callback`](FingerprintInscreen::set_callback). Finger down/up
//! events reported by the fingerprint daemon as vendor acquired codes are
//! forwarded there while the sensor circle is visible.
//!
//! # Examples
//!
//! ```
//! use guacamole_fod::{FingerEvent, FingerprintInscreen, FodConfig};
//! use guacamole_hardware::mock::{MockDisplayService, MockFingerprintExtensions, MockNodes};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (nodes, _) = MockNodes::new();
//! let (display, _) = MockDisplayService::new();
//! let (fingerprint, _) = MockFingerprintExtensions::new();
//! let fod = FingerprintInscreen::new(nodes, display, fingerprint, FodConfig::default());
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! fod.set_callback(tx);
//! fod.on_show_fod_view();
//!
//! assert!(fod.handle_acquired(6, 0));
//! assert_eq!(rx.recv().await, Some(FingerEvent::FingerDown));
//! # }
//! ```

use crate::alpha::brightness_to_alpha;
use crate::config::FodConfig;
use guacamole_core::constants::{
    AOD_MODE_FINGER_PRESSED, BACKLIGHT_BRIGHTNESS_PATH, FINGERPRINT_ACQUIRED_VENDOR,
    FINGERPRINT_ERROR_VENDOR, FINGERPRINT_ERROR_VENDOR_IGNORED, HBM_DIM_ALPHA, HBM_ENABLE_PATH,
    HBM_MODE_FOD, HBM_PATH, OP_DISABLE_FP_LONGPRESS, OP_DISPLAY_AOD_MODE, OP_DISPLAY_NOTIFY_PRESS,
    OP_DISPLAY_SET_DIM, OP_ENABLE_FP_LONGPRESS, OP_FINISH_FP_ENROLL, OP_RESUME_FP_ENROLL,
};
use guacamole_hardware::{DisplayService, FingerprintExtensions, NodeIo};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Finger event delivered to the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerEvent {
    /// Finger touched the sensor.
    FingerDown,

    /// Finger left the sensor.
    FingerUp,
}

/// Channel the framework receives finger events on.
pub type FingerCallback = mpsc::UnboundedSender<FingerEvent>;

/// In-display fingerprint service.
///
/// All methods take `&self`: the framework calls in from several binder
/// threads. The callback slot is the only state shared with the acquired
/// handler and is guarded by a mutex.
///
/// Vendor service calls and node writes are best effort. A failing call is
/// logged and the rest of the sequence still runs, so a press always ends
/// with the press notification.
#[derive(Debug)]
pub struct FingerprintInscreen<N, D, F> {
    nodes: N,
    display: D,
    fingerprint: F,
    config: FodConfig,
    circle_visible: AtomicBool,
    callback: Mutex<Option<FingerCallback>>,
}

impl<N, D, F> FingerprintInscreen<N, D, F>
where
    N: NodeIo,
    D: DisplayService,
    F: FingerprintExtensions,
{
    /// Create the service. The sensor circle starts hidden and no callback
    /// is registered.
    pub fn new(nodes: N, display: D, fingerprint: F, config: FodConfig) -> Self {
        Self {
            nodes,
            display,
            fingerprint,
            config,
            circle_visible: AtomicBool::new(false),
            callback: Mutex::new(None),
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &FodConfig {
        &self.config
    }

    /// Whether the sensor circle is currently shown.
    pub fn is_circle_visible(&self) -> bool {
        self.circle_visible.load(Ordering::SeqCst)
    }

    pub fn on_start_enroll(&self) {
        self.update_status(OP_DISABLE_FP_LONGPRESS);
        self.update_status(OP_RESUME_FP_ENROLL);
    }

    pub fn on_finish_enroll(&self) {
        self.update_status(OP_FINISH_FP_ENROLL);
    }

    /// Finger pressed on the sensor: put the panel into its fingerprint
    /// state before telling the display the press happened.
    pub fn on_press(&self) {
        self.set_mode(OP_DISPLAY_AOD_MODE, AOD_MODE_FINGER_PRESSED);
        self.set_mode(OP_DISPLAY_SET_DIM, 1);
        if self.config.hbm {
            self.set_hbm(1);
        }
        self.set_mode(OP_DISPLAY_NOTIFY_PRESS, 1);
    }

    pub fn on_release(&self) {
        self.restore_panel();
    }

    pub fn on_show_fod_view(&self) {
        self.circle_visible.store(true, Ordering::SeqCst);
    }

    pub fn on_hide_fod_view(&self) {
        self.circle_visible.store(false, Ordering::SeqCst);
        self.restore_panel();
    }

    fn restore_panel(&self) {
        self.set_mode(OP_DISPLAY_AOD_MODE, 0);
        self.set_mode(OP_DISPLAY_SET_DIM, 0);
        if self.config.hbm {
            self.set_hbm(0);
        }
        self.set_mode(OP_DISPLAY_NOTIFY_PRESS, 0);
    }

    fn set_mode(&self, mode: i32, value: i32) {
        if let Err(e) = self.display.set_mode(mode, value) {
            error!("setMode({}, {}) failed: {}", mode, value, e);
        }
    }

    fn update_status(&self, op: i32) {
        if let Err(e) = self.fingerprint.update_status(op) {
            error!("updateStatus({}) failed: {}", op, e);
        }
    }

    fn set_hbm(&self, value: i32) {
        if let Err(e) = self.nodes.write_value(HBM_ENABLE_PATH, value) {
            error!("Unable to write {}: {}", HBM_ENABLE_PATH, e);
        }
    }

    /// Translate a vendor acquired message into a finger event.
    ///
    /// Returns `true` when the message was consumed here and must not
    /// reach the framework. A callback that can no longer receive events
    /// is logged; the message still counts as consumed.
    pub fn handle_acquired(&self, acquired_info: i32, vendor_code: i32) -> bool {
        let callback = match self.callback.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(callback) = callback.as_ref() else {
            return false;
        };

        if acquired_info != FINGERPRINT_ACQUIRED_VENDOR || !self.is_circle_visible() {
            return false;
        }

        let event = match vendor_code {
            0 => FingerEvent::FingerDown,
            1 => FingerEvent::FingerUp,
            _ => return false,
        };

        debug!("Forwarding {:?}", event);
        if let Err(e) = callback.send(event) {
            error!("{:?} error: {}", event, e);
        }
        true
    }

    /// Whether a fingerprint error should be swallowed.
    pub fn handle_error(&self, error: i32, vendor_code: i32) -> bool {
        error == FINGERPRINT_ERROR_VENDOR && vendor_code == FINGERPRINT_ERROR_VENDOR_IGNORED
    }

    pub fn set_long_press_enabled(&self, enabled: bool) {
        self.update_status(if enabled {
            OP_ENABLE_FP_LONGPRESS
        } else {
            OP_DISABLE_FP_LONGPRESS
        });
    }

    /// Overlay alpha for the current panel state.
    ///
    /// Unreadable nodes count as `0`. A panel forced into HBM always gets
    /// [`HBM_DIM_ALPHA`].
    pub fn dim_amount(&self) -> i32 {
        let brightness = self.nodes.read_int_or(BACKLIGHT_BRIGHTNESS_PATH, 0);
        let mut dim_amount = brightness_to_alpha(brightness);

        if self.nodes.read_int_or(HBM_PATH, 0) == HBM_MODE_FOD {
            dim_amount = HBM_DIM_ALPHA;
        }

        info!("dimAmount = {}", dim_amount);
        dim_amount
    }

    pub fn should_boost_brightness(&self) -> bool {
        !self.config.hbm
    }

    /// Register the framework callback, replacing any previous one.
    pub fn set_callback(&self, callback: FingerCallback) {
        let mut slot = match self.callback.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(callback);
    }

    pub fn position_x(&self) -> i32 {
        self.config.position_x
    }

    pub fn position_y(&self) -> i32 {
        self.config.position_y
    }

    pub fn size(&self) -> i32 {
        self.config.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guacamole_hardware::mock::{
        MockDisplayHandle, MockDisplayService, MockFingerprintExtensions, MockFingerprintHandle,
        MockNodes, MockNodesHandle,
    };
    use rstest::rstest;

    type MockInscreen = FingerprintInscreen<MockNodes, MockDisplayService, MockFingerprintExtensions>;

    struct Fixture {
        fod: MockInscreen,
        nodes: MockNodesHandle,
        display: MockDisplayHandle,
        fingerprint: MockFingerprintHandle,
    }

    fn fixture(config: FodConfig) -> Fixture {
        let (nodes, nodes_handle) = MockNodes::with_nodes([HBM_ENABLE_PATH]);
        let (display, display_handle) = MockDisplayService::new();
        let (fingerprint, fingerprint_handle) = MockFingerprintExtensions::new();
        Fixture {
            fod: FingerprintInscreen::new(nodes, display, fingerprint, config),
            nodes: nodes_handle,
            display: display_handle,
            fingerprint: fingerprint_handle,
        }
    }

    #[test]
    fn test_enroll_statuses() {
        let f = fixture(FodConfig::default());
        f.fod.on_start_enroll();
        f.fod.on_finish_enroll();
        assert_eq!(
            f.fingerprint.statuses(),
            vec![OP_DISABLE_FP_LONGPRESS, OP_RESUME_FP_ENROLL, OP_FINISH_FP_ENROLL]
        );
    }

    #[rstest]
    #[case(true, OP_ENABLE_FP_LONGPRESS)]
    #[case(false, OP_DISABLE_FP_LONGPRESS)]
    fn test_long_press(#[case] enabled: bool, #[case] expected: i32) {
        let f = fixture(FodConfig::default());
        f.fod.set_long_press_enabled(enabled);
        assert_eq!(f.fingerprint.statuses(), vec![expected]);
    }

    #[test]
    fn test_press_and_release_without_hbm() {
        let f = fixture(FodConfig::default());
        f.fod.on_press();
        f.fod.on_release();

        assert_eq!(
            f.display.calls(),
            vec![(8, 2), (10, 1), (9, 1), (8, 0), (10, 0), (9, 0)]
        );
        assert!(f.nodes.writes().is_empty());
        assert!(f.fod.should_boost_brightness());
    }

    #[test]
    fn test_press_and_release_with_hbm() {
        let f = fixture(FodConfig::default().hbm(true));
        f.fod.on_press();
        assert_eq!(f.nodes.writes_to(HBM_ENABLE_PATH), vec!["1"]);

        f.fod.on_release();
        assert_eq!(f.nodes.writes_to(HBM_ENABLE_PATH), vec!["1", "0"]);
        assert!(!f.fod.should_boost_brightness());
    }

    #[test]
    fn test_press_continues_past_display_failure() {
        let f = fixture(FodConfig::default().hbm(true));
        f.display.set_failing(true);

        f.fod.on_press();
        assert_eq!(f.nodes.writes_to(HBM_ENABLE_PATH), vec!["1"]);

        f.display.set_failing(false);
        f.fod.on_release();
        assert_eq!(f.nodes.writes_to(HBM_ENABLE_PATH), vec!["1", "0"]);
        assert_eq!(f.display.calls(), vec![(8, 0), (10, 0), (9, 0)]);
    }

    #[test]
    fn test_press_notifies_without_hbm_node() {
        let f = fixture(FodConfig::default().hbm(true));
        f.nodes.remove(HBM_ENABLE_PATH);

        f.fod.on_press();
        f.fod.on_hide_fod_view();

        assert!(f.nodes.writes().is_empty());
        assert_eq!(
            f.display.calls(),
            vec![(8, 2), (10, 1), (9, 1), (8, 0), (10, 0), (9, 0)]
        );
    }

    #[test]
    fn test_enroll_continues_past_vendor_failure() {
        let f = fixture(FodConfig::default());
        f.fingerprint.set_failing(true);

        f.fod.on_start_enroll();
        f.fod.set_long_press_enabled(true);
        assert!(f.fingerprint.statuses().is_empty());

        f.fingerprint.set_failing(false);
        f.fod.on_finish_enroll();
        assert_eq!(f.fingerprint.statuses(), vec![OP_FINISH_FP_ENROLL]);
    }

    #[test]
    fn test_hide_view_restores_panel() {
        let f = fixture(FodConfig::default());
        f.fod.on_show_fod_view();
        assert!(f.fod.is_circle_visible());

        f.fod.on_hide_fod_view();
        assert!(!f.fod.is_circle_visible());
        assert_eq!(f.display.calls(), vec![(8, 0), (10, 0), (9, 0)]);
    }

    #[test]
    fn test_acquired_without_callback() {
        let f = fixture(FodConfig::default());
        f.fod.on_show_fod_view();
        assert!(!f.fod.handle_acquired(FINGERPRINT_ACQUIRED_VENDOR, 0));
    }

    #[tokio::test]
    async fn test_acquired_forwards_finger_events() {
        let f = fixture(FodConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        f.fod.set_callback(tx);
        f.fod.on_show_fod_view();

        assert!(f.fod.handle_acquired(FINGERPRINT_ACQUIRED_VENDOR, 0));
        assert!(f.fod.handle_acquired(FINGERPRINT_ACQUIRED_VENDOR, 1));

        assert_eq!(rx.recv().await, Some(FingerEvent::FingerDown));
        assert_eq!(rx.recv().await, Some(FingerEvent::FingerUp));
    }

    #[rstest]
    #[case(FINGERPRINT_ACQUIRED_VENDOR, 2)]
    #[case(0, 0)]
    #[case(1, 1)]
    fn test_acquired_ignores_other_codes(#[case] info: i32, #[case] vendor_code: i32) {
        let f = fixture(FodConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        f.fod.set_callback(tx);
        f.fod.on_show_fod_view();

        assert!(!f.fod.handle_acquired(info, vendor_code));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_acquired_ignored_while_circle_hidden() {
        let f = fixture(FodConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        f.fod.set_callback(tx);

        assert!(!f.fod.handle_acquired(FINGERPRINT_ACQUIRED_VENDOR, 0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_acquired_with_closed_callback_is_still_consumed() {
        let f = fixture(FodConfig::default());
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        f.fod.set_callback(tx);
        f.fod.on_show_fod_view();

        assert!(f.fod.handle_acquired(FINGERPRINT_ACQUIRED_VENDOR, 1));
    }

    #[tokio::test]
    async fn test_set_callback_replaces_previous() {
        let f = fixture(FodConfig::default());
        let (old_tx, mut old_rx) = mpsc::unbounded_channel();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel();
        f.fod.set_callback(old_tx);
        f.fod.set_callback(new_tx);
        f.fod.on_show_fod_view();

        assert!(f.fod.handle_acquired(FINGERPRINT_ACQUIRED_VENDOR, 0));
        assert_eq!(new_rx.recv().await, Some(FingerEvent::FingerDown));
        assert!(old_rx.recv().await.is_none());
    }

    #[rstest]
    #[case(FINGERPRINT_ERROR_VENDOR, 6, true)]
    #[case(FINGERPRINT_ERROR_VENDOR, 5, false)]
    #[case(1, 6, false)]
    fn test_handle_error(#[case] error: i32, #[case] vendor_code: i32, #[case] expected: bool) {
        let f = fixture(FodConfig::default());
        assert_eq!(f.fod.handle_error(error, vendor_code), expected);
    }

    #[rstest]
    #[case("100\n", "0", 0xb9)]
    #[case("50", "0", 206)]
    #[case("1023", "1", 0x2a)]
    #[case("100", "5", HBM_DIM_ALPHA)]
    fn test_dim_amount(#[case] brightness: &str, #[case] hbm: &str, #[case] expected: i32) {
        let f = fixture(FodConfig::default());
        f.nodes.set(BACKLIGHT_BRIGHTNESS_PATH, brightness);
        f.nodes.set(HBM_PATH, hbm);
        assert_eq!(f.fod.dim_amount(), expected);
    }

    #[test]
    fn test_dim_amount_with_missing_nodes() {
        let f = fixture(FodConfig::default());
        assert_eq!(f.fod.dim_amount(), 0xff);
    }

    #[test]
    fn test_geometry_from_config() {
        let f = fixture(FodConfig::default().position(1, 2).size(3));
        assert_eq!((f.fod.position_x(), f.fod.position_y(), f.fod.size()), (1, 2, 3));
        assert_eq!(f.fod.config().size, 3);
    }
}
