//! Static sensor capability descriptors.

/// What a sensor measures and its limits.
///
/// Rates are in mHz; ranges are g, dps and gauss respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// Has an accelerometer.
    pub acc: bool,
    /// Has a gyroscope.
    pub gyro: bool,
    /// Has a magnetometer.
    pub magneto: bool,
    /// Supports a dedicated low-power mode through this driver.
    pub low_power: bool,
    /// Largest gyroscope range in dps.
    pub gyro_max_fs: u16,
    /// Largest accelerometer range in g.
    pub acc_max_fs: u16,
    /// Largest magnetometer range in gauss.
    pub mag_max_fs: u16,
    /// Highest gyroscope ODR in mHz.
    pub gyro_max_odr_hz_milli: u32,
    /// Highest accelerometer ODR in mHz.
    pub acc_max_odr_hz_milli: u32,
    /// Highest magnetometer ODR in mHz.
    pub mag_max_odr_hz_milli: u32,
}

impl Capabilities {
    /// LSM6DSO accelerometer + gyroscope.
    pub const LSM6DSO: Self = Self {
        acc: true,
        gyro: true,
        magneto: false,
        low_power: false,
        gyro_max_fs: 2000,
        acc_max_fs: 16,
        mag_max_fs: 0,
        gyro_max_odr_hz_milli: 6_660_000,
        acc_max_odr_hz_milli: 6_660_000,
        mag_max_odr_hz_milli: 0,
    };

    /// LIS2MDL magnetometer.
    pub const LIS2MDL: Self = Self {
        acc: false,
        gyro: false,
        magneto: true,
        low_power: false,
        gyro_max_fs: 0,
        acc_max_fs: 0,
        mag_max_fs: 50,
        gyro_max_odr_hz_milli: 0,
        acc_max_odr_hz_milli: 0,
        mag_max_odr_hz_milli: 100_000,
    };
}
