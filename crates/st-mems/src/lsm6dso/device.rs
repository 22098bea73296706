//! Device core operations for the LSM6DSO.

use embedded_hal_async::delay::DelayNs;

use super::config::{
    AccelFilter, AccelFullScale, AccelOutputDataRate, AccelPowerMode, DataReadyMode, GyroFilter,
    GyroFullScale, GyroOutputDataRate, GyroPowerMode, Lsm6dsoConfig, SelfTestMode,
};
use super::fifo::FifoMode;
use super::register::{
    EmbeddedRegister, Register, WHO_AM_I_VALUE, counter_bdr_reg1, ctrl1_xl, ctrl2_g, ctrl3_c,
    ctrl4_c, ctrl5_c, ctrl6_c, ctrl7_g, ctrl8_xl, ctrl9_xl, fifo_ctrl4, func_cfg_access,
    i3c_bus_avb, int_ctrl, status_reg,
};
use crate::data::{Axes, AxesRaw, ScaleFactor, accel_mg_per_lsb, gyro_mdps_per_lsb};
use crate::error::Error;
use crate::interface::{BusKind, I2cInterface, Interface};

const RESET_POLL_NS: u32 = 1_000_000;
const RESET_POLL_ATTEMPTS: u8 = 50;

pub(crate) struct DeviceCore<I> {
    pub(super) interface: I,
    config: Lsm6dsoConfig,
    bus: BusKind,
    initialized: bool,
    accel_enabled: bool,
    gyro_enabled: bool,
    accel_odr: AccelOutputDataRate,
    gyro_odr: GyroOutputDataRate,
}

impl<I> DeviceCore<I>
where
    I: Interface,
{
    pub(crate) fn new(interface: I, config: Lsm6dsoConfig, bus: BusKind) -> Self {
        Self {
            interface,
            config,
            bus,
            initialized: false,
            accel_enabled: false,
            gyro_enabled: false,
            accel_odr: AccelOutputDataRate::Off,
            gyro_odr: GyroOutputDataRate::Off,
        }
    }

    pub(crate) const fn config(&self) -> Lsm6dsoConfig {
        self.config
    }

    pub(crate) fn set_config(&mut self, config: Lsm6dsoConfig) {
        self.config = config;
    }

    pub(crate) const fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) const fn accel_enabled(&self) -> bool {
        self.accel_enabled
    }

    pub(crate) const fn gyro_enabled(&self) -> bool {
        self.gyro_enabled
    }

    pub(crate) const fn cached_accel_odr(&self) -> AccelOutputDataRate {
        self.accel_odr
    }

    pub(crate) const fn cached_gyro_odr(&self) -> GyroOutputDataRate {
        self.gyro_odr
    }

    pub(crate) async fn init(&mut self) -> Result<(), Error> {
        self.config.validate()?;
        if !self.initialized && self.bus == BusKind::Spi3Wire {
            self.write_reg(Register::Ctrl3C, ctrl3_c::IF_INC | ctrl3_c::SIM)
                .await?;
        }

        self.set_flag(Register::Ctrl9Xl, ctrl9_xl::I3C_DISABLE, true)
            .await?;
        self.modify_reg(Register::I3cBusAvb, i3c_bus_avb::I3C_BUS_AVB_SEL_MASK, 0)
            .await?;
        self.set_flag(Register::Ctrl3C, ctrl3_c::IF_INC | ctrl3_c::BDU, true)
            .await?;
        self.modify_reg(
            Register::FifoCtrl4,
            fifo_ctrl4::FIFO_MODE_MASK,
            FifoMode::Bypass.bits(),
        )
        .await?;

        self.accel_odr = self.config.accel_odr;
        self.write_accel_odr(AccelOutputDataRate::Off).await?;
        self.write_accel_full_scale(self.config.accel_full_scale)
            .await?;

        self.gyro_odr = self.config.gyro_odr;
        self.write_gyro_odr(GyroOutputDataRate::Off).await?;
        self.write_gyro_full_scale(self.config.gyro_full_scale)
            .await?;

        self.accel_enabled = false;
        self.gyro_enabled = false;
        self.initialized = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("lsm6dso: initialized");
        Ok(())
    }

    pub(crate) async fn deinit(&mut self) -> Result<(), Error> {
        self.disable_accel().await?;
        self.disable_gyro().await?;
        self.accel_odr = AccelOutputDataRate::Off;
        self.gyro_odr = GyroOutputDataRate::Off;
        self.initialized = false;
        Ok(())
    }

    pub(crate) async fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.set_flag(Register::Ctrl3C, ctrl3_c::SW_RESET, true)
            .await?;
        for _ in 0..RESET_POLL_ATTEMPTS {
            delay.delay_ns(RESET_POLL_NS).await;
            if self.read_reg(Register::Ctrl3C).await? & ctrl3_c::SW_RESET == 0 {
                self.initialized = false;
                self.accel_enabled = false;
                self.gyro_enabled = false;
                self.accel_odr = AccelOutputDataRate::Off;
                self.gyro_odr = GyroOutputDataRate::Off;
                return Ok(());
            }
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("lsm6dso: software reset did not complete");
        Err(Error::NotReady)
    }

    pub(crate) async fn read_id(&mut self) -> Result<u8, Error> {
        self.read_reg(Register::WhoAmI).await
    }

    pub(crate) async fn verify_device(&mut self) -> Result<(), Error> {
        let id = self.read_id().await?;
        if id != WHO_AM_I_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("lsm6dso: unexpected WHO_AM_I {=u8:#x}", id);
            return Err(Error::WrongDevice);
        }
        Ok(())
    }

    // Accelerometer

    pub(crate) async fn enable_accel(&mut self) -> Result<(), Error> {
        if self.accel_enabled {
            return Ok(());
        }
        self.write_accel_odr(self.accel_odr).await?;
        self.accel_enabled = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("lsm6dso: accel enabled at {=u32} mHz", self.accel_odr.hz_milli());
        Ok(())
    }

    pub(crate) async fn disable_accel(&mut self) -> Result<(), Error> {
        if !self.accel_enabled {
            return Ok(());
        }
        self.accel_odr = self.accel_output_data_rate().await?;
        self.write_accel_odr(AccelOutputDataRate::Off).await?;
        self.accel_enabled = false;
        #[cfg(feature = "defmt")]
        defmt::debug!("lsm6dso: accel disabled");
        Ok(())
    }

    pub(crate) async fn accel_output_data_rate(&mut self) -> Result<AccelOutputDataRate, Error> {
        let value = self.read_reg(Register::Ctrl1Xl).await?;
        AccelOutputDataRate::from_bits((value & ctrl1_xl::ODR_MASK) >> ctrl1_xl::ODR_SHIFT)
            .ok_or(Error::InvalidData)
    }

    pub(crate) async fn set_accel_output_data_rate(
        &mut self,
        odr: AccelOutputDataRate,
    ) -> Result<(), Error> {
        if odr == AccelOutputDataRate::Off {
            return Err(Error::InvalidData);
        }
        if self.accel_enabled {
            self.write_accel_odr(odr).await
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("lsm6dso: accel disabled, caching ODR {=u32} mHz", odr.hz_milli());
            self.accel_odr = odr;
            Ok(())
        }
    }

    pub(crate) async fn accel_full_scale(&mut self) -> Result<AccelFullScale, Error> {
        let value = self.read_reg(Register::Ctrl1Xl).await?;
        Ok(AccelFullScale::from_bits(
            (value & ctrl1_xl::FS_MASK) >> ctrl1_xl::FS_SHIFT,
        ))
    }

    pub(crate) async fn set_accel_full_scale(
        &mut self,
        full_scale: AccelFullScale,
    ) -> Result<(), Error> {
        self.write_accel_full_scale(full_scale).await
    }

    pub(crate) async fn accel_sensitivity(&mut self) -> Result<ScaleFactor, Error> {
        Ok(accel_mg_per_lsb(self.accel_full_scale().await?))
    }

    pub(crate) async fn read_accel_raw(&mut self) -> Result<AxesRaw, Error> {
        let mut buffer = [0u8; 6];
        self.read_regs(Register::OutxLA, &mut buffer).await?;
        Ok(AxesRaw::from_le_bytes(buffer))
    }

    pub(crate) async fn read_accel(&mut self) -> Result<Axes, Error> {
        let raw = self.read_accel_raw().await?;
        let sensitivity = self.accel_sensitivity().await?;
        Ok(raw.scale(sensitivity))
    }

    pub(crate) async fn accel_data_ready(&mut self) -> Result<bool, Error> {
        Ok(self.read_reg(Register::StatusReg).await? & status_reg::XLDA != 0)
    }

    pub(crate) async fn set_accel_self_test(&mut self, mode: SelfTestMode) -> Result<(), Error> {
        self.modify_reg(
            Register::Ctrl5C,
            ctrl5_c::ST_XL_MASK,
            mode.accel_bits() << ctrl5_c::ST_XL_SHIFT,
        )
        .await
    }

    pub(crate) async fn set_accel_power_mode(&mut self, mode: AccelPowerMode) -> Result<(), Error> {
        self.set_flag(Register::Ctrl5C, ctrl5_c::XL_ULP_EN, mode.ultra_low())
            .await?;
        self.set_flag(Register::Ctrl6C, ctrl6_c::XL_HM_MODE, mode.hm_mode())
            .await
    }

    pub(crate) async fn set_accel_filter(&mut self, filter: AccelFilter) -> Result<(), Error> {
        let path = match filter {
            AccelFilter::LowPass(path) => {
                self.set_flag(Register::Ctrl1Xl, ctrl1_xl::LPF2_XL_EN, true)
                    .await?;
                path
            }
            AccelFilter::HighPass(path) => path,
        };
        let mut bits = (path & 0x07) << ctrl8_xl::HPCF_XL_SHIFT;
        if path & 0x10 != 0 {
            bits |= ctrl8_xl::HP_SLOPE_XL_EN;
        }
        if path & 0x20 != 0 {
            bits |= ctrl8_xl::HP_REF_MODE_XL;
        }
        self.modify_reg(
            Register::Ctrl8Xl,
            ctrl8_xl::HPCF_XL_MASK | ctrl8_xl::HP_REF_MODE_XL | ctrl8_xl::HP_SLOPE_XL_EN,
            bits,
        )
        .await
    }

    pub(crate) async fn set_accel_data_ready_on_int1(&mut self, enable: bool) -> Result<(), Error> {
        let bits = if enable { int_ctrl::DRDY_XL } else { 0 };
        let mask = if enable {
            int_ctrl::DRDY_XL | int_ctrl::DRDY_G
        } else {
            int_ctrl::DRDY_XL
        };
        self.modify_reg(Register::Int1Ctrl, mask, bits).await
    }

    // Gyroscope

    pub(crate) async fn enable_gyro(&mut self) -> Result<(), Error> {
        if self.gyro_enabled {
            return Ok(());
        }
        self.write_gyro_odr(self.gyro_odr).await?;
        self.gyro_enabled = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("lsm6dso: gyro enabled at {=u32} mHz", self.gyro_odr.hz_milli());
        Ok(())
    }

    pub(crate) async fn disable_gyro(&mut self) -> Result<(), Error> {
        if !self.gyro_enabled {
            return Ok(());
        }
        self.gyro_odr = self.gyro_output_data_rate().await?;
        self.write_gyro_odr(GyroOutputDataRate::Off).await?;
        self.gyro_enabled = false;
        #[cfg(feature = "defmt")]
        defmt::debug!("lsm6dso: gyro disabled");
        Ok(())
    }

    pub(crate) async fn gyro_output_data_rate(&mut self) -> Result<GyroOutputDataRate, Error> {
        let value = self.read_reg(Register::Ctrl2G).await?;
        GyroOutputDataRate::from_bits((value & ctrl2_g::ODR_MASK) >> ctrl2_g::ODR_SHIFT)
            .ok_or(Error::InvalidData)
    }

    pub(crate) async fn set_gyro_output_data_rate(
        &mut self,
        odr: GyroOutputDataRate,
    ) -> Result<(), Error> {
        if odr == GyroOutputDataRate::Off {
            return Err(Error::InvalidData);
        }
        if self.gyro_enabled {
            self.write_gyro_odr(odr).await
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("lsm6dso: gyro disabled, caching ODR {=u32} mHz", odr.hz_milli());
            self.gyro_odr = odr;
            Ok(())
        }
    }

    pub(crate) async fn gyro_full_scale(&mut self) -> Result<GyroFullScale, Error> {
        let value = self.read_reg(Register::Ctrl2G).await?;
        GyroFullScale::from_bits((value & ctrl2_g::FS_MASK) >> ctrl2_g::FS_SHIFT)
            .ok_or(Error::InvalidData)
    }

    pub(crate) async fn set_gyro_full_scale(
        &mut self,
        full_scale: GyroFullScale,
    ) -> Result<(), Error> {
        self.write_gyro_full_scale(full_scale).await
    }

    pub(crate) async fn gyro_sensitivity(&mut self) -> Result<ScaleFactor, Error> {
        Ok(gyro_mdps_per_lsb(self.gyro_full_scale().await?))
    }

    pub(crate) async fn read_gyro_raw(&mut self) -> Result<AxesRaw, Error> {
        let mut buffer = [0u8; 6];
        self.read_regs(Register::OutxLG, &mut buffer).await?;
        Ok(AxesRaw::from_le_bytes(buffer))
    }

    pub(crate) async fn read_gyro(&mut self) -> Result<Axes, Error> {
        let raw = self.read_gyro_raw().await?;
        let sensitivity = self.gyro_sensitivity().await?;
        Ok(raw.scale(sensitivity))
    }

    pub(crate) async fn gyro_data_ready(&mut self) -> Result<bool, Error> {
        Ok(self.read_reg(Register::StatusReg).await? & status_reg::GDA != 0)
    }

    pub(crate) async fn set_gyro_self_test(&mut self, mode: SelfTestMode) -> Result<(), Error> {
        self.modify_reg(
            Register::Ctrl5C,
            ctrl5_c::ST_G_MASK,
            mode.gyro_bits() << ctrl5_c::ST_G_SHIFT,
        )
        .await
    }

    pub(crate) async fn set_gyro_power_mode(&mut self, mode: GyroPowerMode) -> Result<(), Error> {
        self.set_flag(
            Register::Ctrl7G,
            ctrl7_g::G_HM_MODE,
            mode == GyroPowerMode::Normal,
        )
        .await
    }

    pub(crate) async fn set_gyro_filter(&mut self, filter: GyroFilter) -> Result<(), Error> {
        match filter {
            GyroFilter::LowPass(ftype) => {
                if ftype > ctrl6_c::FTYPE_MASK {
                    return Err(Error::InvalidData);
                }
                self.set_flag(Register::Ctrl4C, ctrl4_c::LPF1_SEL_G, true)
                    .await?;
                self.modify_reg(Register::Ctrl6C, ctrl6_c::FTYPE_MASK, ftype)
                    .await
            }
            GyroFilter::HighPass(cutoff) => {
                let code = cutoff.bits();
                let mut bits = (code & 0x03) << ctrl7_g::HPM_G_SHIFT;
                if code & 0x80 != 0 {
                    bits |= ctrl7_g::HP_EN_G;
                }
                self.modify_reg(
                    Register::Ctrl7G,
                    ctrl7_g::HP_EN_G | ctrl7_g::HPM_G_MASK,
                    bits,
                )
                .await
            }
        }
    }

    pub(crate) async fn set_gyro_data_ready_on_int2(&mut self, enable: bool) -> Result<(), Error> {
        let bits = if enable { int_ctrl::DRDY_G } else { 0 };
        let mask = if enable {
            int_ctrl::DRDY_XL | int_ctrl::DRDY_G
        } else {
            int_ctrl::DRDY_G
        };
        self.modify_reg(Register::Int2Ctrl, mask, bits).await
    }

    pub(crate) async fn set_data_ready_mode(&mut self, mode: DataReadyMode) -> Result<(), Error> {
        self.set_flag(
            Register::CounterBdrReg1,
            counter_bdr_reg1::DATAREADY_PULSED,
            mode == DataReadyMode::Pulsed,
        )
        .await
    }

    pub(crate) fn release(self) -> I {
        self.interface
    }

    async fn write_accel_odr(&mut self, odr: AccelOutputDataRate) -> Result<(), Error> {
        self.modify_reg(
            Register::Ctrl1Xl,
            ctrl1_xl::ODR_MASK,
            odr.bits() << ctrl1_xl::ODR_SHIFT,
        )
        .await
    }

    async fn write_accel_full_scale(&mut self, full_scale: AccelFullScale) -> Result<(), Error> {
        self.modify_reg(
            Register::Ctrl1Xl,
            ctrl1_xl::FS_MASK,
            full_scale.bits() << ctrl1_xl::FS_SHIFT,
        )
        .await
    }

    async fn write_gyro_odr(&mut self, odr: GyroOutputDataRate) -> Result<(), Error> {
        self.modify_reg(
            Register::Ctrl2G,
            ctrl2_g::ODR_MASK,
            odr.bits() << ctrl2_g::ODR_SHIFT,
        )
        .await
    }

    async fn write_gyro_full_scale(&mut self, full_scale: GyroFullScale) -> Result<(), Error> {
        self.modify_reg(
            Register::Ctrl2G,
            ctrl2_g::FS_MASK,
            full_scale.bits() << ctrl2_g::FS_SHIFT,
        )
        .await
    }

    // Register access

    pub(crate) async fn read_reg(&mut self, reg: Register) -> Result<u8, Error> {
        self.interface.read_reg(reg.addr()).await
    }

    pub(crate) async fn read_regs(&mut self, reg: Register, buffer: &mut [u8]) -> Result<(), Error> {
        self.interface.read_regs(reg.addr(), buffer).await
    }

    pub(crate) async fn write_reg(&mut self, reg: Register, value: u8) -> Result<(), Error> {
        self.interface.write_reg(reg.addr(), value).await
    }

    /// Read-modify-write of the bits in `mask`.
    pub(crate) async fn modify_reg(&mut self, reg: Register, mask: u8, bits: u8) -> Result<(), Error> {
        let current = self.read_reg(reg).await?;
        self.write_reg(reg, (current & !mask) | (bits & mask)).await
    }

    pub(crate) async fn set_flag(
        &mut self,
        reg: Register,
        flag: u8,
        enable: bool,
    ) -> Result<(), Error> {
        self.modify_reg(reg, flag, if enable { flag } else { 0 })
            .await
    }

    pub(crate) async fn read_register(&mut self, addr: u8) -> Result<u8, Error> {
        self.interface.read_reg(addr).await
    }

    pub(crate) async fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Error> {
        self.interface.write_reg(addr, value).await
    }

    // Embedded-function page

    async fn select_embedded_bank(&mut self, embedded: bool) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("lsm6dso: embedded bank {=bool}", embedded);
        let value = if embedded {
            func_cfg_access::EMBEDDED_BANK
        } else {
            func_cfg_access::USER_BANK
        };
        self.write_reg(Register::FuncCfgAccess, value).await
    }

    /// Reads several embedded-page registers in one bank session.
    ///
    /// The user bank is restored even on error; the first error is the one returned.
    pub(crate) async fn read_embedded_regs<const N: usize>(
        &mut self,
        regs: [EmbeddedRegister; N],
    ) -> Result<[u8; N], Error> {
        self.select_embedded_bank(true).await?;
        let result = self.read_embedded_in_bank(regs).await;
        let restore = self.select_embedded_bank(false).await;
        let values = result?;
        restore?;
        Ok(values)
    }

    async fn read_embedded_in_bank<const N: usize>(
        &mut self,
        regs: [EmbeddedRegister; N],
    ) -> Result<[u8; N], Error> {
        let mut values = [0u8; N];
        for (value, reg) in values.iter_mut().zip(regs) {
            *value = self.interface.read_reg(reg.addr()).await?;
        }
        Ok(values)
    }

    /// Read-modify-write inside the embedded page, with the same restore rule as reads.
    pub(crate) async fn modify_embedded_reg(
        &mut self,
        reg: EmbeddedRegister,
        mask: u8,
        bits: u8,
    ) -> Result<u8, Error> {
        self.select_embedded_bank(true).await?;
        let result = self.modify_embedded_in_bank(reg.addr(), mask, bits).await;
        let restore = self.select_embedded_bank(false).await;
        let value = result?;
        restore?;
        Ok(value)
    }

    async fn modify_embedded_in_bank(&mut self, addr: u8, mask: u8, bits: u8) -> Result<u8, Error> {
        let current = self.interface.read_reg(addr).await?;
        let value = (current & !mask) | (bits & mask);
        self.interface.write_reg(addr, value).await?;
        Ok(value)
    }
}

impl<I2C> DeviceCore<I2cInterface<I2C>> {
    pub(crate) fn set_i2c_address(&mut self, address: u8) {
        self.interface.set_address(address);
    }
}
