//! Integer sensitivity helpers.

use crate::lsm6dso::{AccelFullScale, GyroFullScale};

/// Ratio representing a sensitivity without floating-point math.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleFactor {
    /// Scale numerator.
    pub numerator: i32,
    /// Scale denominator.
    pub denominator: i32,
}

impl ScaleFactor {
    /// Creates a new scale ratio.
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Returns `raw * numerator / denominator`, truncated toward zero.
    pub const fn apply(self, raw: i16) -> i32 {
        ((raw as i64 * self.numerator as i64) / self.denominator as i64) as i32
    }
}

/// Accelerometer sensitivity in mg/LSB (0.061 at 2 g).
pub const fn accel_mg_per_lsb(full_scale: AccelFullScale) -> ScaleFactor {
    match full_scale {
        AccelFullScale::G2 => ScaleFactor::new(61, 1000),
        AccelFullScale::G4 => ScaleFactor::new(122, 1000),
        AccelFullScale::G8 => ScaleFactor::new(244, 1000),
        AccelFullScale::G16 => ScaleFactor::new(488, 1000),
    }
}

/// Gyroscope sensitivity in mdps/LSB (4.375 at 125 dps).
pub const fn gyro_mdps_per_lsb(full_scale: GyroFullScale) -> ScaleFactor {
    match full_scale {
        GyroFullScale::Dps125 => ScaleFactor::new(4_375, 1000),
        GyroFullScale::Dps250 => ScaleFactor::new(8_750, 1000),
        GyroFullScale::Dps500 => ScaleFactor::new(17_500, 1000),
        GyroFullScale::Dps1000 => ScaleFactor::new(35_000, 1000),
        GyroFullScale::Dps2000 => ScaleFactor::new(70_000, 1000),
    }
}

/// Magnetometer sensitivity in mgauss/LSB (1.5, single range).
pub const fn mag_mgauss_per_lsb() -> ScaleFactor {
    ScaleFactor::new(3, 2)
}
