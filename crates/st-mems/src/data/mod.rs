//! Axis sample types shared by both drivers.

#[cfg(feature = "fixed")]
pub(crate) mod fixed;
pub(crate) mod scale;

pub use scale::{ScaleFactor, accel_mg_per_lsb, gyro_mdps_per_lsb, mag_mgauss_per_lsb};

/// Raw three-axis reading in LSB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxesRaw {
    /// X-axis raw count.
    pub x: i16,
    /// Y-axis raw count.
    pub y: i16,
    /// Z-axis raw count.
    pub z: i16,
}

impl AxesRaw {
    /// Decodes the X/Y/Z little-endian output block.
    pub const fn from_le_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([bytes[0], bytes[1]]),
            y: i16::from_le_bytes([bytes[2], bytes[3]]),
            z: i16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Applies a sensitivity to every axis.
    pub const fn scale(self, sensitivity: ScaleFactor) -> Axes {
        Axes {
            x: sensitivity.apply(self.x),
            y: sensitivity.apply(self.y),
            z: sensitivity.apply(self.z),
        }
    }
}

/// Calibrated three-axis reading in milli-units (mg, mdps or mgauss).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    /// X-axis value.
    pub x: i32,
    /// Y-axis value.
    pub y: i32,
    /// Z-axis value.
    pub z: i32,
}
