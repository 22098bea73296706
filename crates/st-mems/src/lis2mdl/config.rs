//! LIS2MDL rate, power and filter selections.

/// Magnetometer output data rate (CFG_REG_A.ODR).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagOutputDataRate {
    /// 10 Hz.
    Hz10,
    /// 20 Hz.
    Hz20,
    /// 50 Hz.
    Hz50,
    /// 100 Hz.
    Hz100,
}

impl MagOutputDataRate {
    /// Picks the smallest rate at or above `hz_milli`, saturating at 100 Hz.
    pub const fn from_hz_milli(hz_milli: u32) -> Self {
        if hz_milli <= 10_000 {
            Self::Hz10
        } else if hz_milli <= 20_000 {
            Self::Hz20
        } else if hz_milli <= 50_000 {
            Self::Hz50
        } else {
            Self::Hz100
        }
    }

    /// Rate in mHz.
    pub const fn hz_milli(self) -> u32 {
        match self {
            Self::Hz10 => 10_000,
            Self::Hz20 => 20_000,
            Self::Hz50 => 50_000,
            Self::Hz100 => 100_000,
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Hz10 => 0b00,
            Self::Hz20 => 0b01,
            Self::Hz50 => 0b10,
            Self::Hz100 => 0b11,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Hz10,
            0b01 => Self::Hz20,
            0b10 => Self::Hz50,
            _ => Self::Hz100,
        }
    }
}

/// Magnetometer power mode (CFG_REG_A.LP).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagPowerMode {
    /// High resolution.
    HighResolution,
    /// Low power.
    LowPower,
}

/// Magnetometer digital low-pass filter (CFG_REG_B.LPF).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagFilter {
    /// Bandwidth ODR/2.
    OdrDiv2,
    /// Bandwidth ODR/4.
    OdrDiv4,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_thresholds_are_inclusive() {
        assert_eq!(MagOutputDataRate::from_hz_milli(0), MagOutputDataRate::Hz10);
        assert_eq!(MagOutputDataRate::from_hz_milli(10_000), MagOutputDataRate::Hz10);
        assert_eq!(MagOutputDataRate::from_hz_milli(10_001), MagOutputDataRate::Hz20);
        assert_eq!(MagOutputDataRate::from_hz_milli(50_000), MagOutputDataRate::Hz50);
        assert_eq!(MagOutputDataRate::from_hz_milli(50_001), MagOutputDataRate::Hz100);
        assert_eq!(MagOutputDataRate::from_hz_milli(1_000_000), MagOutputDataRate::Hz100);
    }

    #[test]
    fn rate_codes_decode() {
        assert_eq!(MagOutputDataRate::from_bits(0b10), MagOutputDataRate::Hz50);
        assert_eq!(MagOutputDataRate::Hz20.bits(), 0b01);
        assert_eq!(MagOutputDataRate::Hz100.hz_milli(), 100_000);
    }
}
