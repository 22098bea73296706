//! SPI transport for the ST MEMS sensors.
//!
//! Both sensors flag reads with address bit 7; writes leave it clear.

use embedded_hal_async::spi::{Operation, SpiDevice};

use super::{BusKind, Interface, sealed};
use crate::error::Error;

/// SPI interface configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    pub(crate) three_wire: bool,
}

impl SpiConfig {
    /// Creates a 4-wire SPI configuration.
    pub const fn new() -> Self {
        Self { three_wire: false }
    }

    /// Selects 3-wire SPI (shared data line).
    #[must_use]
    pub const fn with_three_wire(self, three_wire: bool) -> Self {
        Self { three_wire }
    }

    pub(crate) const fn bus_kind(self) -> BusKind {
        if self.three_wire {
            BusKind::Spi3Wire
        } else {
            BusKind::Spi4Wire
        }
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// SPI register interface.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new SPI interface over a chip-select managed device.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

const SPI_READ: u8 = 0x80;

const fn read_address(reg: u8) -> u8 {
    reg | SPI_READ
}

const fn write_address(reg: u8) -> u8 {
    reg & !SPI_READ
}

impl<SPI> Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
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
        let header = [read_address(reg)];
        let mut ops = [Operation::Write(&header), Operation::Read(buffer)];
        self.spi.transaction(&mut ops).await.map_err(|_| Error::Bus)
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.spi
            .write(&[write_address(reg), value])
            .await
            .map_err(|_| Error::Bus)
    }
}

impl<SPI> sealed::Sealed for SpiInterface<SPI> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_flag_is_bit_seven() {
        assert_eq!(read_address(0x0F), 0x8F);
        assert_eq!(write_address(0x8F), 0x0F);
    }

    #[test]
    fn three_wire_selects_bus_kind() {
        assert_eq!(SpiConfig::new().bus_kind(), BusKind::Spi4Wire);
        assert_eq!(
            SpiConfig::new().with_three_wire(true).bus_kind(),
            BusKind::Spi3Wire
        );
    }
}
