//! LSM6DSO configuration types and unit-to-code lookups.

/// Rates shared by CTRL1_XL, CTRL2_G and FIFO_CTRL3, in mHz, indexed by code - 1.
const RATE_TABLE_HZ_MILLI: [u32; 10] = [
    12_500, 26_000, 52_000, 104_000, 208_000, 417_000, 833_000, 1_667_000, 3_333_000, 6_667_000,
];

/// Returns the smallest rate code whose rate is `>= hz_milli`, saturating at 6667 Hz.
pub(crate) const fn rate_code(hz_milli: u32) -> u8 {
    let mut index = 0;
    while index < RATE_TABLE_HZ_MILLI.len() - 1 {
        if hz_milli <= RATE_TABLE_HZ_MILLI[index] {
            break;
        }
        index += 1;
    }
    index as u8 + 1
}

pub(crate) const fn rate_hz_milli(code: u8) -> u32 {
    match code {
        1..=10 => RATE_TABLE_HZ_MILLI[code as usize - 1],
        _ => 0,
    }
}

/// Accelerometer output data rate (CTRL1_XL.ODR_XL).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelOutputDataRate {
    /// Power-down.
    Off,
    /// 12.5 Hz.
    Hz12_5,
    /// 26 Hz.
    Hz26,
    /// 52 Hz.
    Hz52,
    /// 104 Hz.
    Hz104,
    /// 208 Hz.
    Hz208,
    /// 417 Hz.
    Hz417,
    /// 833 Hz.
    Hz833,
    /// 1667 Hz.
    Hz1667,
    /// 3333 Hz.
    Hz3333,
    /// 6667 Hz.
    Hz6667,
    /// Low-power code 11, reported as 6.5 Hz.
    Hz6_5,
}

impl AccelOutputDataRate {
    /// Picks the lowest rate at or above `hz_milli`; anything past 3333 Hz maps to 6667 Hz.
    pub const fn from_hz_milli(hz_milli: u32) -> Self {
        match rate_code(hz_milli) {
            1 => Self::Hz12_5,
            2 => Self::Hz26,
            3 => Self::Hz52,
            4 => Self::Hz104,
            5 => Self::Hz208,
            6 => Self::Hz417,
            7 => Self::Hz833,
            8 => Self::Hz1667,
            9 => Self::Hz3333,
            _ => Self::Hz6667,
        }
    }

    /// Returns the nominal rate in mHz (0 when off).
    pub const fn hz_milli(self) -> u32 {
        match self {
            Self::Hz6_5 => 6_500,
            other => rate_hz_milli(other.bits()),
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Hz12_5 => 1,
            Self::Hz26 => 2,
            Self::Hz52 => 3,
            Self::Hz104 => 4,
            Self::Hz208 => 5,
            Self::Hz417 => 6,
            Self::Hz833 => 7,
            Self::Hz1667 => 8,
            Self::Hz3333 => 9,
            Self::Hz6667 => 10,
            Self::Hz6_5 => 11,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::Off,
            1 => Self::Hz12_5,
            2 => Self::Hz26,
            3 => Self::Hz52,
            4 => Self::Hz104,
            5 => Self::Hz208,
            6 => Self::Hz417,
            7 => Self::Hz833,
            8 => Self::Hz1667,
            9 => Self::Hz3333,
            10 => Self::Hz6667,
            11 => Self::Hz6_5,
            _ => return None,
        })
    }
}

/// Gyroscope output data rate (CTRL2_G.ODR_G).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroOutputDataRate {
    /// Power-down.
    Off,
    /// 12.5 Hz.
    Hz12_5,
    /// 26 Hz.
    Hz26,
    /// 52 Hz.
    Hz52,
    /// 104 Hz.
    Hz104,
    /// 208 Hz.
    Hz208,
    /// 417 Hz.
    Hz417,
    /// 833 Hz.
    Hz833,
    /// 1667 Hz.
    Hz1667,
    /// 3333 Hz.
    Hz3333,
    /// 6667 Hz.
    Hz6667,
}

impl GyroOutputDataRate {
    /// Picks the lowest rate at or above `hz_milli`; anything past 3333 Hz maps to 6667 Hz.
    pub const fn from_hz_milli(hz_milli: u32) -> Self {
        match rate_code(hz_milli) {
            1 => Self::Hz12_5,
            2 => Self::Hz26,
            3 => Self::Hz52,
            4 => Self::Hz104,
            5 => Self::Hz208,
            6 => Self::Hz417,
            7 => Self::Hz833,
            8 => Self::Hz1667,
            9 => Self::Hz3333,
            _ => Self::Hz6667,
        }
    }

    /// Returns the nominal rate in mHz (0 when off).
    pub const fn hz_milli(self) -> u32 {
        rate_hz_milli(self.bits())
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Hz12_5 => 1,
            Self::Hz26 => 2,
            Self::Hz52 => 3,
            Self::Hz104 => 4,
            Self::Hz208 => 5,
            Self::Hz417 => 6,
            Self::Hz833 => 7,
            Self::Hz1667 => 8,
            Self::Hz3333 => 9,
            Self::Hz6667 => 10,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::Off,
            1 => Self::Hz12_5,
            2 => Self::Hz26,
            3 => Self::Hz52,
            4 => Self::Hz104,
            5 => Self::Hz208,
            6 => Self::Hz417,
            7 => Self::Hz833,
            8 => Self::Hz1667,
            9 => Self::Hz3333,
            10 => Self::Hz6667,
            _ => return None,
        })
    }
}

/// Accelerometer full-scale range (CTRL1_XL.FS_XL).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// +/-2 g.
    G2,
    /// +/-4 g.
    G4,
    /// +/-8 g.
    G8,
    /// +/-16 g.
    G16,
}

impl AccelFullScale {
    /// Picks the smallest range covering `g`, saturating at 16 g.
    pub const fn from_g(g: u16) -> Self {
        if g <= 2 {
            Self::G2
        } else if g <= 4 {
            Self::G4
        } else if g <= 8 {
            Self::G8
        } else {
            Self::G16
        }
    }

    /// Returns the range in g.
    pub const fn g(self) -> u16 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::G2 => 0,
            Self::G16 => 1,
            Self::G4 => 2,
            Self::G8 => 3,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::G2,
            1 => Self::G16,
            2 => Self::G4,
            _ => Self::G8,
        }
    }
}

/// Gyroscope full-scale range (CTRL2_G.FS_G with FS_125).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// +/-125 dps.
    Dps125,
    /// +/-250 dps.
    Dps250,
    /// +/-500 dps.
    Dps500,
    /// +/-1000 dps.
    Dps1000,
    /// +/-2000 dps.
    Dps2000,
}

impl GyroFullScale {
    /// Picks the smallest range covering `dps`, saturating at 2000 dps.
    pub const fn from_dps(dps: u16) -> Self {
        if dps <= 125 {
            Self::Dps125
        } else if dps <= 250 {
            Self::Dps250
        } else if dps <= 500 {
            Self::Dps500
        } else if dps <= 1000 {
            Self::Dps1000
        } else {
            Self::Dps2000
        }
    }

    /// Returns the range in dps.
    pub const fn dps(self) -> u16 {
        match self {
            Self::Dps125 => 125,
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Dps250 => 0,
            Self::Dps125 => 1,
            Self::Dps500 => 2,
            Self::Dps1000 => 4,
            Self::Dps2000 => 6,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Dps250),
            1 => Some(Self::Dps125),
            2 => Some(Self::Dps500),
            4 => Some(Self::Dps1000),
            6 => Some(Self::Dps2000),
            _ => None,
        }
    }
}

/// Accelerometer power mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelPowerMode {
    /// High-performance.
    HighPerformance,
    /// Low-power / normal (CTRL6_C.XL_HM_MODE).
    LowNormal,
    /// Ultra-low-power (CTRL5_C.XL_ULP_EN).
    UltraLow,
}

impl AccelPowerMode {
    pub(crate) const fn hm_mode(self) -> bool {
        matches!(self, Self::LowNormal)
    }

    pub(crate) const fn ultra_low(self) -> bool {
        matches!(self, Self::UltraLow)
    }
}

/// Gyroscope power mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroPowerMode {
    /// High-performance.
    HighPerformance,
    /// Low-power / normal (CTRL7_G.G_HM_MODE).
    Normal,
}

/// Accelerometer output filter chain.
///
/// `path` uses the vendor encoding: bits 2:0 are HPCF_XL, bit 4 selects the
/// slope/high-pass path and bit 5 enables reference mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFilter {
    /// Enable LPF2 and program the output path.
    LowPass(u8),
    /// Program the output path only.
    HighPass(u8),
}

/// Gyroscope high-pass cutoff (CTRL7_G.HP_EN_G + HPM_G).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroHighPassCutoff {
    /// High-pass disabled.
    Disabled,
    /// 16 mHz.
    Mhz16,
    /// 65 mHz.
    Mhz65,
    /// 260 mHz.
    Mhz260,
    /// 1.04 Hz.
    Hz1_04,
}

impl GyroHighPassCutoff {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Disabled => 0x00,
            Self::Mhz16 => 0x80,
            Self::Mhz65 => 0x81,
            Self::Mhz260 => 0x82,
            Self::Hz1_04 => 0x83,
        }
    }
}

/// Gyroscope filter chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFilter {
    /// Enable LPF1 with the given CTRL6_C.FTYPE bandwidth code (0..=7).
    LowPass(u8),
    /// Program the internal high-pass filter.
    HighPass(GyroHighPassCutoff),
}

/// Self-test excitation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfTestMode {
    /// Normal operation.
    Off,
    /// Positive sign self-test.
    Positive,
    /// Negative sign self-test.
    Negative,
}

impl SelfTestMode {
    pub(crate) const fn accel_bits(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Positive => 1,
            Self::Negative => 2,
        }
    }

    pub(crate) const fn gyro_bits(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Positive => 1,
            Self::Negative => 3,
        }
    }
}

/// Data-ready signal shape (COUNTER_BDR_REG1.dataready_pulsed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataReadyMode {
    /// Latched until the output is read.
    Latched,
    /// 75 us pulse.
    Pulsed,
}

/// Rates and ranges cached by `init` and applied when a sensor is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lsm6dsoConfig {
    /// Accelerometer ODR used on enable.
    pub accel_odr: AccelOutputDataRate,
    /// Accelerometer range written by `init`.
    pub accel_full_scale: AccelFullScale,
    /// Gyroscope ODR used on enable.
    pub gyro_odr: GyroOutputDataRate,
    /// Gyroscope range written by `init`.
    pub gyro_full_scale: GyroFullScale,
}

impl Lsm6dsoConfig {
    /// 104 Hz at 2 g and 2000 dps.
    pub const DEFAULT: Self = Self {
        accel_odr: AccelOutputDataRate::Hz104,
        accel_full_scale: AccelFullScale::G2,
        gyro_odr: GyroOutputDataRate::Hz104,
        gyro_full_scale: GyroFullScale::Dps2000,
    };

    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the accelerometer ODR applied on enable.
    #[must_use]
    pub const fn with_accel_odr(self, accel_odr: AccelOutputDataRate) -> Self {
        Self { accel_odr, ..self }
    }

    /// Sets the accelerometer range.
    #[must_use]
    pub const fn with_accel_full_scale(self, accel_full_scale: AccelFullScale) -> Self {
        Self {
            accel_full_scale,
            ..self
        }
    }

    /// Sets the gyroscope ODR applied on enable.
    #[must_use]
    pub const fn with_gyro_odr(self, gyro_odr: GyroOutputDataRate) -> Self {
        Self { gyro_odr, ..self }
    }

    /// Sets the gyroscope range.
    #[must_use]
    pub const fn with_gyro_full_scale(self, gyro_full_scale: GyroFullScale) -> Self {
        Self {
            gyro_full_scale,
            ..self
        }
    }

    /// An enable ODR of `Off` would leave the sensor powered down.
    pub(crate) const fn validate(self) -> Result<(), crate::Error> {
        if matches!(self.accel_odr, AccelOutputDataRate::Off)
            || matches!(self.gyro_odr, GyroOutputDataRate::Off)
        {
            return Err(crate::Error::InvalidData);
        }
        Ok(())
    }
}

impl Default for Lsm6dsoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
