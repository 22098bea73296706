//! LSM6DSO driver implementation.
//!
//! Accelerometer and gyroscope share one core; each can be enabled on its own
//! and remembers its ODR while powered down.

use embedded_hal::digital::ErrorType;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use super::config::{
    AccelFilter, AccelFullScale, AccelOutputDataRate, AccelPowerMode, DataReadyMode, GyroFilter,
    GyroFullScale, GyroOutputDataRate, GyroPowerMode, Lsm6dsoConfig, SelfTestMode,
};
use super::device::DeviceCore;
use super::events::{
    EventStatus, FreeFallThreshold, InactivityMode, SixDDirection, SixDOrientation,
    SixDThreshold,
};
use super::fifo::{BatchDataRate, FifoMode, FifoStatus, FifoTag, FifoWord};
use crate::capabilities::Capabilities;
use crate::data::{Axes, AxesRaw, ScaleFactor};
use crate::error::Error;
use crate::interface::{BusKind, I2cConfig, I2cInterface, Interface, SpiConfig, SpiInterface};
use crate::interrupt::{EventWaitError, InterruptPin, InterruptWaitError};

/// LSM6DSO 6-axis IMU driver.
pub struct Lsm6dso<I, INT1 = (), INT2 = ()> {
    core: DeviceCore<I>,
    int1: Option<INT1>,
    int2: Option<INT2>,
}

/// I2C type alias for the LSM6DSO driver.
pub type Lsm6dsoI2c<I2C, INT1 = (), INT2 = ()> = Lsm6dso<I2cInterface<I2C>, INT1, INT2>;
/// SPI type alias for the LSM6DSO driver.
pub type Lsm6dsoSpi<SPI, INT1 = (), INT2 = ()> = Lsm6dso<SpiInterface<SPI>, INT1, INT2>;

impl<I2C, INT1, INT2> Lsm6dso<I2cInterface<I2C>, INT1, INT2>
where
    I2C: I2c,
{
    /// Creates a new I2C-based driver at the primary address.
    pub fn new_i2c(i2c: I2C, int1: Option<INT1>, int2: Option<INT2>) -> Self {
        Self::with_i2c_config(i2c, int1, int2, Lsm6dsoConfig::default(), I2cConfig::default())
    }

    /// Creates a new I2C-based driver with a custom configuration.
    pub fn with_i2c_config(
        i2c: I2C,
        int1: Option<INT1>,
        int2: Option<INT2>,
        config: Lsm6dsoConfig,
        i2c_config: I2cConfig,
    ) -> Self {
        let interface = I2cInterface::new(i2c, i2c_config.address);
        Self::from_interface(interface, int1, int2, config, i2c_config.bus_kind())
    }

    /// Updates the I2C address used by the interface.
    pub fn set_i2c_address(&mut self, address: u8) {
        self.core.set_i2c_address(address);
    }

    /// Tries each address (WHO_AM_I, then `init`) and keeps the first that answers.
    ///
    /// A device that answers with the wrong identity ends the search.
    pub async fn init_with_addresses(&mut self, addresses: &[u8]) -> Result<u8, Error> {
        let mut last_err = None;
        for &address in addresses {
            self.set_i2c_address(address);
            let attempt = match self.verify_device().await {
                Ok(()) => self.init().await,
                Err(err) => Err(err),
            };
            match attempt {
                Ok(()) => return Ok(address),
                Err(Error::WrongDevice) => return Err(Error::WrongDevice),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or(Error::NotPresent))
    }

    /// Releases the I2C bus, consuming the driver.
    pub fn release(self) -> I2C {
        self.core.release().release()
    }

    /// Releases the I2C bus and interrupt pins, consuming the driver.
    pub fn release_with_ints(self) -> (I2C, Option<INT1>, Option<INT2>) {
        let interface = self.core.release();
        (interface.release(), self.int1, self.int2)
    }
}

impl<SPI, INT1, INT2> Lsm6dso<SpiInterface<SPI>, INT1, INT2>
where
    SPI: SpiDevice,
{
    /// Creates a new 4-wire SPI driver.
    pub fn new_spi(spi: SPI, int1: Option<INT1>, int2: Option<INT2>) -> Self {
        Self::with_spi_config(spi, int1, int2, Lsm6dsoConfig::default(), SpiConfig::default())
    }

    /// Creates a new SPI driver with a custom configuration.
    pub fn with_spi_config(
        spi: SPI,
        int1: Option<INT1>,
        int2: Option<INT2>,
        config: Lsm6dsoConfig,
        spi_config: SpiConfig,
    ) -> Self {
        let interface = SpiInterface::new(spi);
        Self::from_interface(interface, int1, int2, config, spi_config.bus_kind())
    }

    /// Releases the SPI bus, consuming the driver.
    pub fn release(self) -> SPI {
        self.core.release().release()
    }

    /// Releases the SPI bus and interrupt pins, consuming the driver.
    pub fn release_with_ints(self) -> (SPI, Option<INT1>, Option<INT2>) {
        let interface = self.core.release();
        (interface.release(), self.int1, self.int2)
    }
}

impl<I, INT1, INT2> Lsm6dso<I, INT1, INT2>
where
    I: Interface,
{
    pub(crate) fn from_interface(
        interface: I,
        int1: Option<INT1>,
        int2: Option<INT2>,
        config: Lsm6dsoConfig,
        bus: BusKind,
    ) -> Self {
        Self {
            core: DeviceCore::new(interface, config, bus),
            int1,
            int2,
        }
    }

    /// Returns the configuration applied by `init`.
    pub const fn config(&self) -> Lsm6dsoConfig {
        self.core.config()
    }

    /// Replaces the configuration; takes effect on the next `init`.
    pub fn set_config(&mut self, config: Lsm6dsoConfig) {
        self.core.set_config(config);
    }

    /// Static capabilities of the part.
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities::LSM6DSO
    }

    /// Returns `true` once `init` has completed.
    pub const fn is_initialized(&self) -> bool {
        self.core.is_initialized()
    }

    /// Configures the bus, block data update and FIFO bypass, and powers both sensors down.
    ///
    /// Does not check WHO_AM_I; call [`Self::verify_device`] first if needed.
    pub async fn init(&mut self) -> Result<(), Error> {
        self.core.init().await
    }

    /// Powers both sensors down and forgets the cached rates.
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

    /// Checks WHO_AM_I against the LSM6DSO identity.
    pub async fn verify_device(&mut self) -> Result<(), Error> {
        self.core.verify_device().await
    }

    /// Reads a raw register.
    pub async fn read_register(&mut self, addr: u8) -> Result<u8, Error> {
        self.core.read_register(addr).await
    }

    /// Writes a raw register.
    pub async fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Error> {
        self.core.write_register(addr, value).await
    }

    /// Returns `true` while the accelerometer is enabled.
    pub const fn accel_enabled(&self) -> bool {
        self.core.accel_enabled()
    }

    /// Rate cached for the next `enable_accel`; stale while the accelerometer runs.
    pub const fn pending_accel_odr(&self) -> AccelOutputDataRate {
        self.core.cached_accel_odr()
    }

    /// Applies the cached accelerometer ODR.
    pub async fn enable_accel(&mut self) -> Result<(), Error> {
        self.core.enable_accel().await
    }

    /// Remembers the running ODR and powers the accelerometer down.
    pub async fn disable_accel(&mut self) -> Result<(), Error> {
        self.core.disable_accel().await
    }

    /// Reads the accelerometer ODR from CTRL1_XL.
    pub async fn accel_output_data_rate(&mut self) -> Result<AccelOutputDataRate, Error> {
        self.core.accel_output_data_rate().await
    }

    /// Sets the accelerometer ODR; cached until enable when the sensor is off.
    pub async fn set_accel_output_data_rate(
        &mut self,
        odr: AccelOutputDataRate,
    ) -> Result<(), Error> {
        self.core.set_accel_output_data_rate(odr).await
    }

    /// Sets the accelerometer ODR from a rate in mHz, rounding up to the next supported rate.
    pub async fn set_accel_odr_hz_milli(&mut self, hz_milli: u32) -> Result<(), Error> {
        self.core
            .set_accel_output_data_rate(AccelOutputDataRate::from_hz_milli(hz_milli))
            .await
    }

    /// Reads the accelerometer range.
    pub async fn accel_full_scale(&mut self) -> Result<AccelFullScale, Error> {
        self.core.accel_full_scale().await
    }

    /// Sets the accelerometer range.
    pub async fn set_accel_full_scale(&mut self, full_scale: AccelFullScale) -> Result<(), Error> {
        self.core.set_accel_full_scale(full_scale).await
    }

    /// Sets the accelerometer range from g, rounding up.
    pub async fn set_accel_full_scale_g(&mut self, g: u16) -> Result<(), Error> {
        self.core
            .set_accel_full_scale(AccelFullScale::from_g(g))
            .await
    }

    /// mg per LSB for the current range.
    pub async fn accel_sensitivity(&mut self) -> Result<ScaleFactor, Error> {
        self.core.accel_sensitivity().await
    }

    /// Reads raw accelerometer counts.
    pub async fn read_accel_raw(&mut self) -> Result<AxesRaw, Error> {
        self.core.read_accel_raw().await
    }

    /// Reads acceleration in mg.
    pub async fn read_accel(&mut self) -> Result<Axes, Error> {
        self.core.read_accel().await
    }

    /// Returns STATUS_REG.XLDA.
    pub async fn accel_data_ready(&mut self) -> Result<bool, Error> {
        self.core.accel_data_ready().await
    }

    /// Sets the accelerometer self-test excitation.
    pub async fn set_accel_self_test(&mut self, mode: SelfTestMode) -> Result<(), Error> {
        self.core.set_accel_self_test(mode).await
    }

    /// Sets the accelerometer power mode.
    pub async fn set_accel_power_mode(&mut self, mode: AccelPowerMode) -> Result<(), Error> {
        self.core.set_accel_power_mode(mode).await
    }

    /// Programs the accelerometer filter chain.
    pub async fn set_accel_filter(&mut self, filter: AccelFilter) -> Result<(), Error> {
        self.core.set_accel_filter(filter).await
    }

    /// Routes accelerometer data-ready to INT1 (and clears gyro data-ready there).
    pub async fn set_accel_data_ready_on_int1(&mut self, enable: bool) -> Result<(), Error> {
        self.core.set_accel_data_ready_on_int1(enable).await
    }

    /// Returns `true` while the gyroscope is enabled.
    pub const fn gyro_enabled(&self) -> bool {
        self.core.gyro_enabled()
    }

    /// Rate cached for the next `enable_gyro`; stale while the gyroscope runs.
    pub const fn pending_gyro_odr(&self) -> GyroOutputDataRate {
        self.core.cached_gyro_odr()
    }

    /// Applies the cached gyroscope ODR.
    pub async fn enable_gyro(&mut self) -> Result<(), Error> {
        self.core.enable_gyro().await
    }

    /// Remembers the running ODR and powers the gyroscope down.
    pub async fn disable_gyro(&mut self) -> Result<(), Error> {
        self.core.disable_gyro().await
    }

    /// Reads the gyroscope ODR from CTRL2_G.
    pub async fn gyro_output_data_rate(&mut self) -> Result<GyroOutputDataRate, Error> {
        self.core.gyro_output_data_rate().await
    }

    /// Sets the gyroscope ODR; cached until enable when the sensor is off.
    pub async fn set_gyro_output_data_rate(&mut self, odr: GyroOutputDataRate) -> Result<(), Error> {
        self.core.set_gyro_output_data_rate(odr).await
    }

    /// Sets the gyroscope ODR from a rate in mHz, rounding up.
    pub async fn set_gyro_odr_hz_milli(&mut self, hz_milli: u32) -> Result<(), Error> {
        self.core
            .set_gyro_output_data_rate(GyroOutputDataRate::from_hz_milli(hz_milli))
            .await
    }

    /// Reads the gyroscope range.
    pub async fn gyro_full_scale(&mut self) -> Result<GyroFullScale, Error> {
        self.core.gyro_full_scale().await
    }

    /// Sets the gyroscope range.
    pub async fn set_gyro_full_scale(&mut self, full_scale: GyroFullScale) -> Result<(), Error> {
        self.core.set_gyro_full_scale(full_scale).await
    }

    /// Sets the gyroscope range from dps, rounding up.
    pub async fn set_gyro_full_scale_dps(&mut self, dps: u16) -> Result<(), Error> {
        self.core
            .set_gyro_full_scale(GyroFullScale::from_dps(dps))
            .await
    }

    /// mdps per LSB for the current range.
    pub async fn gyro_sensitivity(&mut self) -> Result<ScaleFactor, Error> {
        self.core.gyro_sensitivity().await
    }

    /// Reads raw gyroscope counts.
    pub async fn read_gyro_raw(&mut self) -> Result<AxesRaw, Error> {
        self.core.read_gyro_raw().await
    }

    /// Reads angular rate in mdps.
    pub async fn read_gyro(&mut self) -> Result<Axes, Error> {
        self.core.read_gyro().await
    }

    /// Returns STATUS_REG.GDA.
    pub async fn gyro_data_ready(&mut self) -> Result<bool, Error> {
        self.core.gyro_data_ready().await
    }

    /// Sets the gyroscope self-test excitation.
    pub async fn set_gyro_self_test(&mut self, mode: SelfTestMode) -> Result<(), Error> {
        self.core.set_gyro_self_test(mode).await
    }

    /// Sets the gyroscope power mode.
    pub async fn set_gyro_power_mode(&mut self, mode: GyroPowerMode) -> Result<(), Error> {
        self.core.set_gyro_power_mode(mode).await
    }

    /// Programs the gyroscope filter chain.
    pub async fn set_gyro_filter(&mut self, filter: GyroFilter) -> Result<(), Error> {
        self.core.set_gyro_filter(filter).await
    }

    /// Routes gyroscope data-ready to INT2 (and clears accel data-ready there).
    pub async fn set_gyro_data_ready_on_int2(&mut self, enable: bool) -> Result<(), Error> {
        self.core.set_gyro_data_ready_on_int2(enable).await
    }

    /// Selects latched or pulsed data-ready.
    pub async fn set_data_ready_mode(&mut self, mode: DataReadyMode) -> Result<(), Error> {
        self.core.set_data_ready_mode(mode).await
    }

    /// Selects latched (`true`) or pulsed event interrupts.
    pub async fn set_interrupt_latch(&mut self, latched: bool) -> Result<(), Error> {
        self.core.set_interrupt_latch(latched).await
    }

    // FIFO

    /// Reads the FIFO status registers.
    pub async fn fifo_status(&mut self) -> Result<FifoStatus, Error> {
        self.core.fifo_status().await
    }

    /// Number of unread FIFO words.
    pub async fn fifo_sample_count(&mut self) -> Result<u16, Error> {
        self.core.fifo_sample_count().await
    }

    /// Returns FIFO_STATUS2.FIFO_FULL_IA.
    pub async fn fifo_full(&mut self) -> Result<bool, Error> {
        self.core.fifo_full().await
    }

    /// Routes FIFO-full to INT1.
    pub async fn set_fifo_full_on_int1(&mut self, enable: bool) -> Result<(), Error> {
        self.core.set_fifo_full_on_int1(enable).await
    }

    /// Sets the FIFO watermark (0..=511 words).
    pub async fn set_fifo_watermark(&mut self, watermark: u16) -> Result<(), Error> {
        self.core.set_fifo_watermark(watermark).await
    }

    /// Stops batching once the watermark is reached.
    pub async fn set_fifo_stop_on_watermark(&mut self, enable: bool) -> Result<(), Error> {
        self.core.set_fifo_stop_on_watermark(enable).await
    }

    /// Sets the FIFO mode.
    pub async fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Error> {
        self.core.set_fifo_mode(mode).await
    }

    /// Reads the FIFO mode.
    pub async fn fifo_mode(&mut self) -> Result<FifoMode, Error> {
        self.core.fifo_mode().await
    }

    /// Reads the tag of the next FIFO word.
    pub async fn fifo_tag(&mut self) -> Result<FifoTag, Error> {
        self.core.fifo_tag().await
    }

    /// Reads the payload of the next FIFO word.
    pub async fn fifo_data(&mut self) -> Result<[u8; 6], Error> {
        self.core.fifo_data().await
    }

    /// Reads tag and payload of the next FIFO word in one burst.
    pub async fn read_fifo_word(&mut self) -> Result<FifoWord, Error> {
        self.core.read_fifo_word().await
    }

    /// Reads the next FIFO payload as acceleration in mg.
    pub async fn fifo_accel_axes(&mut self) -> Result<Axes, Error> {
        self.core.fifo_accel_axes().await
    }

    /// Reads the next FIFO payload as angular rate in mdps.
    pub async fn fifo_gyro_axes(&mut self) -> Result<Axes, Error> {
        self.core.fifo_gyro_axes().await
    }

    /// Sets the accelerometer batch rate.
    pub async fn set_accel_batch_rate(&mut self, rate: BatchDataRate) -> Result<(), Error> {
        self.core.set_accel_batch_rate(rate).await
    }

    /// Sets the gyroscope batch rate.
    pub async fn set_gyro_batch_rate(&mut self, rate: BatchDataRate) -> Result<(), Error> {
        self.core.set_gyro_batch_rate(rate).await
    }

    // Events

    /// Enables free-fall detection at 312 mg on `pin`.
    pub async fn enable_free_fall(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.core.enable_free_fall(pin).await
    }

    /// Disables free-fall detection.
    pub async fn disable_free_fall(&mut self) -> Result<(), Error> {
        self.core.disable_free_fall().await
    }

    /// Sets the free-fall threshold.
    pub async fn set_free_fall_threshold(
        &mut self,
        threshold: FreeFallThreshold,
    ) -> Result<(), Error> {
        self.core.set_free_fall_threshold(threshold).await
    }

    /// Sets the free-fall duration (0..=63 ODR cycles).
    pub async fn set_free_fall_duration(&mut self, duration: u8) -> Result<(), Error> {
        self.core.set_free_fall_duration(duration).await
    }

    /// Enables base-mode step detection on INT1.
    pub async fn enable_pedometer(&mut self) -> Result<(), Error> {
        self.core.enable_pedometer().await
    }

    /// Disables step detection.
    pub async fn disable_pedometer(&mut self) -> Result<(), Error> {
        self.core.disable_pedometer().await
    }

    /// Reads the step counter.
    pub async fn step_count(&mut self) -> Result<u16, Error> {
        self.core.step_count().await
    }

    /// Resets the step counter.
    pub async fn reset_step_counter(&mut self) -> Result<(), Error> {
        self.core.reset_step_counter().await
    }

    /// Enables tilt detection on `pin`.
    pub async fn enable_tilt(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.core.enable_tilt(pin).await
    }

    /// Disables tilt detection.
    pub async fn disable_tilt(&mut self) -> Result<(), Error> {
        self.core.disable_tilt().await
    }

    /// Enables wake-up detection on `pin`.
    pub async fn enable_wake_up(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.core.enable_wake_up(pin).await
    }

    /// Disables wake-up detection.
    pub async fn disable_wake_up(&mut self) -> Result<(), Error> {
        self.core.disable_wake_up().await
    }

    /// Sets the wake-up threshold (0..=63).
    pub async fn set_wake_up_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        self.core.set_wake_up_threshold(threshold).await
    }

    /// Sets the wake-up duration (0..=3).
    pub async fn set_wake_up_duration(&mut self, duration: u8) -> Result<(), Error> {
        self.core.set_wake_up_duration(duration).await
    }

    /// Enables inactivity detection with `mode` on `pin`.
    pub async fn enable_inactivity(
        &mut self,
        mode: InactivityMode,
        pin: InterruptPin,
    ) -> Result<(), Error> {
        self.core.enable_inactivity(mode, pin).await
    }

    /// Disables inactivity detection.
    pub async fn disable_inactivity(&mut self) -> Result<(), Error> {
        self.core.disable_inactivity().await
    }

    /// Sets the sleep duration (0..=15).
    pub async fn set_sleep_duration(&mut self, duration: u8) -> Result<(), Error> {
        self.core.set_sleep_duration(duration).await
    }

    /// Enables single-tap detection on `pin`.
    pub async fn enable_single_tap(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.core.enable_single_tap(pin).await
    }

    /// Disables single-tap detection.
    pub async fn disable_single_tap(&mut self) -> Result<(), Error> {
        self.core.disable_single_tap().await
    }

    /// Enables double-tap detection on `pin`.
    pub async fn enable_double_tap(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.core.enable_double_tap(pin).await
    }

    /// Disables double-tap detection.
    pub async fn disable_double_tap(&mut self) -> Result<(), Error> {
        self.core.disable_double_tap().await
    }

    /// Sets the tap threshold (0..=31).
    pub async fn set_tap_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        self.core.set_tap_threshold(threshold).await
    }

    /// Sets the tap shock window (0..=3).
    pub async fn set_tap_shock_time(&mut self, shock: u8) -> Result<(), Error> {
        self.core.set_tap_shock_time(shock).await
    }

    /// Sets the tap quiet window (0..=3).
    pub async fn set_tap_quiet_time(&mut self, quiet: u8) -> Result<(), Error> {
        self.core.set_tap_quiet_time(quiet).await
    }

    /// Sets the double-tap duration window (0..=15).
    pub async fn set_tap_duration(&mut self, duration: u8) -> Result<(), Error> {
        self.core.set_tap_duration(duration).await
    }

    /// Enables 6D orientation detection on `pin`.
    pub async fn enable_six_d_orientation(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.core.enable_six_d_orientation(pin).await
    }

    /// Disables 6D orientation detection.
    pub async fn disable_six_d_orientation(&mut self) -> Result<(), Error> {
        self.core.disable_six_d_orientation().await
    }

    /// Sets the 6D threshold.
    pub async fn set_six_d_threshold(&mut self, threshold: SixDThreshold) -> Result<(), Error> {
        self.core.set_six_d_threshold(threshold).await
    }

    /// Reads all 6D direction flags.
    pub async fn six_d_orientation(&mut self) -> Result<SixDOrientation, Error> {
        self.core.six_d_orientation().await
    }

    /// Reads one 6D direction flag.
    pub async fn six_d_direction(&mut self, direction: SixDDirection) -> Result<bool, Error> {
        self.core.six_d_direction(direction).await
    }

    /// Reads which routed events are currently flagged.
    pub async fn event_status(&mut self) -> Result<EventStatus, Error> {
        self.core.event_status().await
    }

    // Interrupt pins

    /// Returns a shared reference to the INT1 pin, if configured.
    pub fn int1(&self) -> Option<&INT1> {
        self.int1.as_ref()
    }

    /// Returns a mutable reference to the INT1 pin, if configured.
    pub fn int1_mut(&mut self) -> Option<&mut INT1> {
        self.int1.as_mut()
    }

    /// Takes ownership of the INT1 pin, leaving `None` in the driver.
    pub fn take_int1(&mut self) -> Option<INT1> {
        self.int1.take()
    }

    /// Returns a shared reference to the INT2 pin, if configured.
    pub fn int2(&self) -> Option<&INT2> {
        self.int2.as_ref()
    }

    /// Returns a mutable reference to the INT2 pin, if configured.
    pub fn int2_mut(&mut self) -> Option<&mut INT2> {
        self.int2.as_mut()
    }

    /// Takes ownership of the INT2 pin, leaving `None` in the driver.
    pub fn take_int2(&mut self) -> Option<INT2> {
        self.int2.take()
    }

    /// Waits until INT1 is high.
    pub async fn wait_int1_high(&mut self) -> Result<(), InterruptWaitError<INT1::Error>>
    where
        INT1: Wait,
    {
        match self.int1.as_mut() {
            Some(pin) => pin.wait_for_high().await.map_err(InterruptWaitError::Pin),
            None => Err(InterruptWaitError::Missing),
        }
    }

    /// Waits for a rising edge on INT1.
    pub async fn wait_int1_rising_edge(&mut self) -> Result<(), InterruptWaitError<INT1::Error>>
    where
        INT1: Wait,
    {
        match self.int1.as_mut() {
            Some(pin) => pin
                .wait_for_rising_edge()
                .await
                .map_err(InterruptWaitError::Pin),
            None => Err(InterruptWaitError::Missing),
        }
    }

    /// Waits until INT2 is high.
    pub async fn wait_int2_high(&mut self) -> Result<(), InterruptWaitError<INT2::Error>>
    where
        INT2: Wait,
    {
        match self.int2.as_mut() {
            Some(pin) => pin.wait_for_high().await.map_err(InterruptWaitError::Pin),
            None => Err(InterruptWaitError::Missing),
        }
    }

    /// Waits for a rising edge on INT2.
    pub async fn wait_int2_rising_edge(&mut self) -> Result<(), InterruptWaitError<INT2::Error>>
    where
        INT2: Wait,
    {
        match self.int2.as_mut() {
            Some(pin) => pin
                .wait_for_rising_edge()
                .await
                .map_err(InterruptWaitError::Pin),
            None => Err(InterruptWaitError::Missing),
        }
    }

    /// Waits for INT1 to assert, then reads the event status.
    pub async fn wait_int1_event(&mut self) -> Result<EventStatus, EventWaitError<INT1::Error>>
    where
        INT1: Wait,
    {
        self.wait_int1_high().await?;
        Ok(self.event_status().await?)
    }

    /// Waits for INT2 to assert, then reads the event status.
    pub async fn wait_int2_event(&mut self) -> Result<EventStatus, EventWaitError<INT2::Error>>
    where
        INT2: Wait,
    {
        self.wait_int2_high().await?;
        Ok(self.event_status().await?)
    }

    /// Waits for `pin` to assert, then reads the event status.
    ///
    /// Both pins must share an error type; use [`Self::wait_int1_event`] or
    /// [`Self::wait_int2_event`] when only one pin is wired.
    pub async fn wait_for_event(
        &mut self,
        pin: InterruptPin,
    ) -> Result<EventStatus, EventWaitError<INT1::Error>>
    where
        INT1: Wait,
        INT2: Wait + ErrorType<Error = INT1::Error>,
    {
        match pin {
            InterruptPin::Int1 => self.wait_int1_high().await?,
            InterruptPin::Int2 => self.wait_int2_high().await?,
        }
        Ok(self.event_status().await?)
    }
}
