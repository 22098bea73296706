//! LIS2MDL register definitions.

/// LIS2MDL register addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Hard-iron offset X, low byte.
    OffsetXRegL = 0x45,
    /// Device identifier.
    WhoAmI = 0x4F,
    /// Mode, ODR, low-power and reset.
    CfgRegA = 0x60,
    /// Filter and offset cancellation.
    CfgRegB = 0x61,
    /// Interface and data-ready control.
    CfgRegC = 0x62,
    /// Interrupt control.
    IntCtrlReg = 0x63,
    /// Interrupt source.
    IntSourceReg = 0x64,
    /// Interrupt threshold, low byte.
    IntThsLReg = 0x65,
    /// Data status.
    StatusReg = 0x67,
    /// X output, low byte.
    OutxLReg = 0x68,
    /// Temperature output, low byte.
    TempOutLReg = 0x6E,
}

impl Register {
    /// Returns the register address.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Expected WHO_AM_I value.
pub const WHO_AM_I_VALUE: u8 = 0x40;

/// CFG_REG_A register bits.
pub mod cfg_reg_a {
    /// Temperature compensation.
    pub const COMP_TEMP_EN: u8 = 0b1000_0000;
    /// Reboot memory content.
    pub const REBOOT: u8 = 0b0100_0000;
    /// Software reset.
    pub const SOFT_RST: u8 = 0b0010_0000;
    /// Low-power mode.
    pub const LP: u8 = 0b0001_0000;
    /// Output data rate.
    pub const ODR_MASK: u8 = 0b0000_1100;
    /// Output data rate shift.
    pub const ODR_SHIFT: u8 = 2;
    /// Operating mode.
    pub const MD_MASK: u8 = 0b0000_0011;
    /// Continuous conversion.
    pub const MD_CONTINUOUS: u8 = 0b00;
    /// Single conversion.
    pub const MD_SINGLE: u8 = 0b01;
    /// Idle.
    pub const MD_POWER_DOWN: u8 = 0b10;
}

/// CFG_REG_B register bits.
pub mod cfg_reg_b {
    /// Offset cancellation in single mode.
    pub const OFF_CANC_ONE_SHOT: u8 = 0b0001_0000;
    /// Offset cancellation.
    pub const OFF_CANC: u8 = 0b0000_0010;
    /// Digital low-pass filter (bandwidth ODR/4).
    pub const LPF: u8 = 0b0000_0001;
}

/// CFG_REG_C register bits.
pub mod cfg_reg_c {
    /// Interrupt on the INT/DRDY pin.
    pub const INT_ON_PIN: u8 = 0b0100_0000;
    /// Disable I2C.
    pub const I2C_DIS: u8 = 0b0010_0000;
    /// Block data update.
    pub const BDU: u8 = 0b0001_0000;
    /// Big-endian output.
    pub const BLE: u8 = 0b0000_1000;
    /// 4-wire SPI.
    pub const SPI_4WIRE: u8 = 0b0000_0100;
    /// Self-test.
    pub const SELF_TEST: u8 = 0b0000_0010;
    /// Data-ready on the pin.
    pub const DRDY_ON_PIN: u8 = 0b0000_0001;
}

/// STATUS_REG register bits.
pub mod status_reg {
    /// Overrun on any axis.
    pub const ZYXOR: u8 = 0b1000_0000;
    /// New data on all axes.
    pub const ZYXDA: u8 = 0b0000_1000;
}

/// Address flag added to every register on I2C.
pub const I2C_ADDRESS_FLAG: u8 = 0x80;
/// Address flag added to every register on SPI.
pub const SPI_ADDRESS_FLAG: u8 = 0x40;
