use guacamole_core::constants::{DEFAULT_FOD_POS_X, DEFAULT_FOD_POS_Y, DEFAULT_FOD_SIZE};
use serde::{Deserialize, Serialize};

/// In-display fingerprint sensor configuration.
///
/// Sensor geometry is in panel pixels. `hbm` selects whether the panel
/// driver raises brightness itself while a finger is down (written through
/// the HBM enable node) or leaves brightness boosting to the framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FodConfig {
    /// Horizontal position of the sensor's top-left corner.
    pub position_x: i32,

    /// Vertical position of the sensor's top-left corner.
    pub position_y: i32,

    /// Edge length of the sensor area.
    pub size: i32,

    /// Drive fingerprint HBM from the HAL.
    pub hbm: bool,
}

impl Default for FodConfig {
    fn default() -> Self {
        Self {
            position_x: DEFAULT_FOD_POS_X,
            position_y: DEFAULT_FOD_POS_Y,
            size: DEFAULT_FOD_SIZE,
            hbm: false,
        }
    }
}

impl FodConfig {
    /// Set the sensor position
    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position_x = x;
        self.position_y = y;
        self
    }

    /// Set the sensor size
    pub fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    /// Enable or disable HAL-driven HBM
    pub fn hbm(mut self, enabled: bool) -> Self {
        self.hbm = enabled;
        self
    }
}
