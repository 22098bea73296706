//! Fixed-point conversion helpers.

use super::AxesRaw;
use super::scale::{ScaleFactor, accel_mg_per_lsb, gyro_mdps_per_lsb, mag_mgauss_per_lsb};
use crate::lsm6dso::{AccelFullScale, GyroFullScale};

/// Fixed-point number type used for sensor conversions (I32F32).
pub type Fixed = crate::fixed_crate::types::I32F32;

/// Fixed-point three-axis reading in whole units (g, dps or gauss).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxesFixed {
    /// X-axis value.
    pub x: Fixed,
    /// Y-axis value.
    pub y: Fixed,
    /// Z-axis value.
    pub z: Fixed,
}

// Split into quotient and remainder so full-range gyro counts stay inside I32F32.
fn to_units(raw: i16, milli_per_lsb: ScaleFactor) -> Fixed {
    let milli = raw as i64 * milli_per_lsb.numerator as i64;
    let per_unit = milli_per_lsb.denominator as i64 * 1000;
    Fixed::from_num(milli / per_unit) + Fixed::from_num(milli % per_unit) / Fixed::from_num(per_unit)
}

fn axes_to_units(raw: AxesRaw, milli_per_lsb: ScaleFactor) -> AxesFixed {
    AxesFixed {
        x: to_units(raw.x, milli_per_lsb),
        y: to_units(raw.y, milli_per_lsb),
        z: to_units(raw.z, milli_per_lsb),
    }
}

/// Converts accelerometer raw counts to g.
pub fn accel_to_g(raw: AxesRaw, full_scale: AccelFullScale) -> AxesFixed {
    axes_to_units(raw, accel_mg_per_lsb(full_scale))
}

/// Converts gyroscope raw counts to dps.
pub fn gyro_to_dps(raw: AxesRaw, full_scale: GyroFullScale) -> AxesFixed {
    axes_to_units(raw, gyro_mdps_per_lsb(full_scale))
}

/// Converts magnetometer raw counts to gauss.
pub fn mag_to_gauss(raw: AxesRaw) -> AxesFixed {
    axes_to_units(raw, mag_mgauss_per_lsb())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gyro_conversion_is_exact_for_whole_dps() {
        let raw = AxesRaw {
            x: 1_000,
            y: -1_000,
            z: 0,
        };
        let dps = gyro_to_dps(raw, GyroFullScale::Dps2000);
        assert_eq!(dps.x, Fixed::from_num(70));
        assert_eq!(dps.y, Fixed::from_num(-70));
        assert_eq!(dps.z, Fixed::from_num(0));
    }

    #[test]
    fn gyro_full_range_fits() {
        let raw = AxesRaw {
            x: i16::MAX,
            y: i16::MIN,
            z: 0,
        };
        let dps = gyro_to_dps(raw, GyroFullScale::Dps2000);
        assert!(dps.x > Fixed::from_num(2_293) && dps.x < Fixed::from_num(2_294));
        assert!(dps.y < Fixed::from_num(-2_293));
    }

    #[test]
    fn mag_conversion_matches_sensitivity() {
        let raw = AxesRaw {
            x: 2_000,
            y: -2_000,
            z: 0,
        };
        let gauss = mag_to_gauss(raw);
        assert_eq!(gauss.x, Fixed::from_num(3));
        assert_eq!(gauss.y, Fixed::from_num(-3));
    }

    #[test]
    fn accel_conversion_is_close_to_one_g() {
        let raw = AxesRaw {
            x: 16_393,
            y: 0,
            z: 0,
        };
        let g = accel_to_g(raw, AccelFullScale::G2);
        assert!(g.x > Fixed::from_num(0.999) && g.x <= Fixed::from_num(1));
    }
}
