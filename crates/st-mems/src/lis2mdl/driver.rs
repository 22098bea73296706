//! LIS2MDL driver implementation.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use super::config::{MagFilter, MagOutputDataRate, MagPowerMode};
use super::device::{DeviceCore, FULL_SCALE_GAUSS};
use crate::capabilities::Capabilities;
use crate::data::{Axes, AxesRaw, ScaleFactor};
use crate::error::Error;
use crate::interface::{
    BusKind, I2cConfig, I2cInterface, Interface, LIS2MDL_I2C_ADDRESS, SpiConfig, SpiInterface,
};

/// LIS2MDL 3-axis magnetometer driver.
pub struct Lis2mdl<I> {
    core: DeviceCore<I>,
}

/// I2C type alias for the LIS2MDL driver.
pub type Lis2mdlI2c<I2C> = Lis2mdl<I2cInterface<I2C>>;
/// SPI type alias for the LIS2MDL driver.
pub type Lis2mdlSpi<SPI> = Lis2mdl<SpiInterface<SPI>>;

impl<I2C> Lis2mdl<I2cInterface<I2C>>
where
    I2C: I2c,
{
    /// Creates a new I2C-based driver at the fixed LIS2MDL address.
    pub fn new_i2c(i2c: I2C) -> Self {
        Self::with_i2c_config(i2c, I2cConfig::new(LIS2MDL_I2C_ADDRESS))
    }

    /// Creates a new I2C-based driver with an explicit address.
    pub fn with_i2c_config(i2c: I2C, i2c_config: I2cConfig) -> Self {
        let interface = I2cInterface::new(i2c, i2c_config.address);
        Self::from_interface(interface, i2c_config.bus_kind())
    }

    /// Updates the I2C address used by the interface.
    pub fn set_i2c_address(&mut self, address: u8) {
        self.core.set_i2c_address(address);
    }

    /// Releases the I2C bus, consuming the driver.
    pub fn release(self) -> I2C {
        self.core.release().release()
    }
}

impl<SPI> Lis2mdl<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    /// Creates a new 4-wire SPI driver.
    pub fn new_spi(spi: SPI) -> Self {
        Self::with_spi_config(spi, SpiConfig::default())
    }

    /// Creates a new SPI driver; `spi_config` selects 3- or 4-wire setup on first `init`.
    pub fn with_spi_config(spi: SPI, spi_config: SpiConfig) -> Self {
        Self::from_interface(SpiInterface::new(spi), spi_config.bus_kind())
    }

    /// Releases the SPI bus, consuming the driver.
    pub fn release(self) -> SPI {
        self.core.release().release()
    }
}

impl<I> Lis2mdl<I>
where
    I: Interface,
{
    pub(crate) fn from_interface(interface: I, bus: BusKind) -> Self {
        Self {
            core: DeviceCore::new(interface, bus),
        }
    }

    /// Static capabilities of the part.
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities::LIS2MDL
    }

    /// Returns `true` once `init` has completed.
    pub const fn is_initialized(&self) -> bool {
        self.core.is_initialized()
    }

    /// Returns `true` while in continuous mode.
    pub const fn is_enabled(&self) -> bool {
        self.core.is_enabled()
    }

    /// Configures the bus, block data update and 100 Hz, leaving the sensor idle.
    pub async fn init(&mut self) -> Result<(), Error> {
        self.core.init().await
    }

    /// Idles the sensor and clears the initialized flag.
    pub async fn deinit(&mut self) -> Result<(), Error> {
        self.core.deinit().await
    }

    /// Performs a software reset and waits for it to complete.
    pub async fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.core.soft_reset(delay).await
    }

    /// Reads WHO_AM_I.
    pub async fn read_id(&mut self) -> Result<u8, Error> {
        self.core.read_id().await
    }

    /// Checks WHO_AM_I against the LIS2MDL identity.
    pub async fn verify_device(&mut self) -> Result<(), Error> {
        self.core.verify_device().await
    }

    /// Starts continuous conversion.
    pub async fn enable(&mut self) -> Result<(), Error> {
        self.core.enable().await
    }

    /// Idles the sensor.
    pub async fn disable(&mut self) -> Result<(), Error> {
        self.core.disable().await
    }

    /// Reads the output data rate.
    pub async fn output_data_rate(&mut self) -> Result<MagOutputDataRate, Error> {
        self.core.output_data_rate().await
    }

    /// Sets the output data rate.
    pub async fn set_output_data_rate(&mut self, odr: MagOutputDataRate) -> Result<(), Error> {
        self.core.set_output_data_rate(odr).await
    }

    /// Sets the output data rate from mHz, rounding up.
    pub async fn set_odr_hz_milli(&mut self, hz_milli: u32) -> Result<(), Error> {
        self.core
            .set_output_data_rate(MagOutputDataRate::from_hz_milli(hz_milli))
            .await
    }

    /// Range in gauss (always 50).
    pub const fn full_scale_gauss(&self) -> u16 {
        FULL_SCALE_GAUSS
    }

    /// The range is fixed, so only 50 gauss is accepted; nothing is written.
    pub async fn set_full_scale_gauss(&mut self, gauss: u16) -> Result<(), Error> {
        if gauss == FULL_SCALE_GAUSS {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("lis2mdl: full scale {} gauss unsupported", gauss);
            Err(Error::Unsupported)
        }
    }

    /// mgauss per LSB.
    pub const fn sensitivity(&self) -> ScaleFactor {
        self.core.sensitivity()
    }

    /// Reads raw counts.
    pub async fn read_raw(&mut self) -> Result<AxesRaw, Error> {
        self.core.read_raw().await
    }

    /// Reads the magnetic field in mgauss.
    pub async fn read(&mut self) -> Result<Axes, Error> {
        self.core.read().await
    }

    /// Returns STATUS_REG.ZYXDA.
    pub async fn data_ready(&mut self) -> Result<bool, Error> {
        self.core.data_ready().await
    }

    /// Enables or disables self-test.
    pub async fn set_self_test(&mut self, enable: bool) -> Result<(), Error> {
        self.core.set_self_test(enable).await
    }

    /// Selects the low-pass bandwidth.
    pub async fn set_filter(&mut self, filter: MagFilter) -> Result<(), Error> {
        self.core.set_filter(filter).await
    }

    /// Selects high-resolution or low-power mode.
    pub async fn set_power_mode(&mut self, mode: MagPowerMode) -> Result<(), Error> {
        self.core.set_power_mode(mode).await
    }

    /// Enables or disables temperature compensation.
    pub async fn set_temperature_compensation(&mut self, enable: bool) -> Result<(), Error> {
        self.core.set_temperature_compensation(enable).await
    }

    /// Reads a register by its datasheet address.
    pub async fn read_register(&mut self, reg: u8) -> Result<u8, Error> {
        self.core.read_register(reg).await
    }

    /// Writes a register by its datasheet address.
    pub async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.core.write_register(reg, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockInterface;
    use futures::executor::block_on;

    #[test]
    fn full_scale_accepts_only_fixed_range() {
        let mut mag = Lis2mdl::from_interface(MockInterface::default(), BusKind::I2c);

        assert_eq!(block_on(mag.set_full_scale_gauss(50)), Ok(()));
        assert_eq!(block_on(mag.set_full_scale_gauss(16)), Err(Error::Unsupported));
        assert_eq!(mag.full_scale_gauss(), 50);
        assert!(mag.core.interface.writes().is_empty());
    }
}
