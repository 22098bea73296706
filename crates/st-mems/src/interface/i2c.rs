//! I2C transport for the ST MEMS sensors.

use embedded_hal_async::i2c::I2c;

use super::{BusKind, Interface, Lsm6dsoAddress, sealed};
use crate::error::Error;

/// I2C interface configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    pub(crate) address: u8,
}

impl I2cConfig {
    /// Creates a configuration for the given 7-bit address.
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    /// Sets the I2C address.
    #[must_use]
    pub const fn with_address(self, address: u8) -> Self {
        Self { address }
    }

    /// Returns the configured 7-bit address.
    pub const fn address(self) -> u8 {
        self.address
    }

    pub(crate) const fn bus_kind(self) -> BusKind {
        BusKind::I2c
    }
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::new(Lsm6dsoAddress::Primary.addr())
    }
}

/// I2C register interface.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new I2C interface with the given bus and 7-bit address.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit address in use.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Changes the 7-bit I2C address.
    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Releases the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let mut value = [0u8];
        self.read_regs(reg, &mut value).await?;
        Ok(value[0])
    }

    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        if buffer.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(self.address, &[reg], buffer)
            .await
            .map_err(|_| Error::Bus)
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(|_| Error::Bus)
    }
}

impl<I2C> sealed::Sealed for I2cInterface<I2C> {}
