//! Interface abstraction for register I/O.

pub(crate) mod address;
pub(crate) mod i2c;
pub(crate) mod spi;

pub use address::{LIS2MDL_I2C_ADDRESS, Lsm6dsoAddress};
pub use i2c::{I2cConfig, I2cInterface};
pub use spi::{SpiConfig, SpiInterface};

use crate::error::Error;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Minimal async register I/O for the device cores.
#[allow(async_fn_in_trait)]
pub trait Interface: sealed::Sealed {
    /// Reads a single register.
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error>;
    /// Reads a contiguous block of registers into `buffer`.
    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error>;
    /// Writes a single register.
    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error>;
}

/// Physical bus a sensor is wired to.
///
/// The drivers use this on their first `init` to put the sensor's serial
/// interface into the matching mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusKind {
    /// I2C bus.
    I2c,
    /// 4-wire SPI.
    Spi4Wire,
    /// 3-wire SPI (shared SDI/SDO line).
    Spi3Wire,
}
