//! Brightness to dim alpha mapping.
//!
//! While a finger is on the in-display sensor the framework draws a black
//! overlay over the screen so only the sensor area stays lit. The overlay's
//! alpha must compensate for the current panel brightness: a dim panel
//! needs an almost opaque overlay, a bright one a lighter overlay.
//!
//! The mapping is a fixed calibration table of `(brightness, alpha)` points
//! plus an interpolation step between neighbouring points. The
//! interpolation is *not* plain linear interpolation: it carries a second
//! order correction term and truncating integer division at each step. Both
//! are part of the panel tuning and must be reproduced bit for bit, even
//! though they make the curve slightly non-monotonic.
//!
//! # Examples
//!
//! ```
//! use guacamole_fod::alpha::brightness_to_alpha;
//!
//! assert_eq!(brightness_to_alpha(0), 0xff);
//! assert_eq!(brightness_to_alpha(100), 0xb9);
//! assert_eq!(brightness_to_alpha(50), 206);
//! assert_eq!(brightness_to_alpha(5000), 0x83);
//! ```

use serde::Serialize;

/// One calibration point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalibrationEntry {
    /// Raw backlight level.
    pub brightness: i32,

    /// Overlay alpha at that level.
    pub alpha: i32,
}

const fn entry(brightness: i32, alpha: i32) -> CalibrationEntry {
    CalibrationEntry { brightness, alpha }
}

/// Panel calibration, sorted by strictly increasing brightness.
pub const CALIBRATION_TABLE: [CalibrationEntry; 21] = [
    entry(0, 0xff),
    entry(1, 0xf1),
    entry(2, 0xf0),
    entry(3, 0xee),
    entry(4, 0xec),
    entry(6, 0xeb),
    entry(10, 0xe7),
    entry(20, 0xdf),
    entry(30, 0xd8),
    entry(45, 0xd0),
    entry(70, 0xc5),
    entry(100, 0xb9),
    entry(150, 0xaf),
    entry(227, 0x99),
    entry(300, 0x88),
    entry(400, 0x76),
    entry(500, 0x66),
    entry(600, 0x59),
    entry(800, 0x42),
    entry(1023, 0x2a),
    entry(2000, 0x83),
];

/// Map a raw backlight level to the fingerprint overlay alpha.
///
/// Levels at or below the first calibration point return its alpha, levels
/// above the last point return the last alpha. Everything in between is
/// interpolated from the two surrounding points. The function is total:
/// every `i32` maps to a value and nothing can overflow, since arithmetic
/// only happens strictly inside the table's range.
#[must_use]
pub fn brightness_to_alpha(brightness: i32) -> i32 {
    let table = &CALIBRATION_TABLE;

    match table.iter().position(|e| e.brightness >= brightness) {
        Some(0) => table[0].alpha,
        None => table[table.len() - 1].alpha,
        Some(i) => {
            let (a, b) = (table[i - 1], table[i]);
            interpolate(brightness, a.brightness, b.brightness, a.alpha, b.alpha)
        }
    }
}

/// Interpolate `x` between `(xa, ya)` and `(xb, yb)`.
///
/// The linear term is computed at double precision so its halving remainder
/// (`plus`) can be added back, then a quadratic correction (`sub`) is added.
/// Rust's `/` and `%` truncate toward zero, matching the panel tuning.
fn interpolate(x: i32, xa: i32, xb: i32, ya: i32, yb: i32) -> i32 {
    let bf = 2 * (yb - ya) * (x - xa) / (xb - xa);
    let factor = bf / 2;
    let plus = bf % 2;

    let sub = if xa != xb && yb != ya {
        2 * (x - xa) * (x - xb) / (yb - ya) / (xa - xb)
    } else {
        0
    };

    ya + factor + plus + sub
}
