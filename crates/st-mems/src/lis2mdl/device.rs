//! Device core operations for the LIS2MDL.

use embedded_hal_async::delay::DelayNs;

use super::config::{MagFilter, MagOutputDataRate, MagPowerMode};
use super::register::{
    I2C_ADDRESS_FLAG, Register, SPI_ADDRESS_FLAG, WHO_AM_I_VALUE, cfg_reg_a, cfg_reg_b, cfg_reg_c,
    status_reg,
};
use crate::data::{Axes, AxesRaw, ScaleFactor, mag_mgauss_per_lsb};
use crate::error::Error;
use crate::interface::{BusKind, I2cInterface, Interface};

const RESET_POLL_NS: u32 = 1_000_000;
const RESET_POLL_ATTEMPTS: u8 = 50;

/// Range of the LIS2MDL in gauss; the part has no range selection.
pub(crate) const FULL_SCALE_GAUSS: u16 = 50;

pub(crate) struct DeviceCore<I> {
    pub(super) interface: I,
    bus: BusKind,
    initialized: bool,
    enabled: bool,
}

impl<I> DeviceCore<I>
where
    I: Interface,
{
    pub(crate) fn new(interface: I, bus: BusKind) -> Self {
        Self {
            interface,
            bus,
            initialized: false,
            enabled: false,
        }
    }

    pub(crate) const fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) async fn init(&mut self) -> Result<(), Error> {
        if !self.initialized {
            match self.bus {
                BusKind::I2c => {}
                BusKind::Spi4Wire => {
                    self.write_reg(
                        Register::CfgRegC,
                        cfg_reg_c::I2C_DIS | cfg_reg_c::BDU | cfg_reg_c::SPI_4WIRE,
                    )
                    .await?;
                }
                BusKind::Spi3Wire => {
                    self.set_flag(Register::CfgRegC, cfg_reg_c::I2C_DIS, true)
                        .await?;
                }
            }
        }

        self.set_flag(Register::CfgRegC, cfg_reg_c::BDU, true)
            .await?;
        self.write_mode(cfg_reg_a::MD_POWER_DOWN).await?;
        self.set_output_data_rate(MagOutputDataRate::Hz100).await?;
        self.set_self_test(false).await?;

        self.enabled = false;
        self.initialized = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("lis2mdl: initialized");
        Ok(())
    }

    pub(crate) async fn deinit(&mut self) -> Result<(), Error> {
        self.disable().await?;
        self.initialized = false;
        Ok(())
    }

    pub(crate) async fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.set_flag(Register::CfgRegA, cfg_reg_a::SOFT_RST, true)
            .await?;
        for _ in 0..RESET_POLL_ATTEMPTS {
            delay.delay_ns(RESET_POLL_NS).await;
            if self.read_reg(Register::CfgRegA).await? & cfg_reg_a::SOFT_RST == 0 {
                self.initialized = false;
                self.enabled = false;
                return Ok(());
            }
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("lis2mdl: software reset did not complete");
        Err(Error::NotReady)
    }

    pub(crate) async fn read_id(&mut self) -> Result<u8, Error> {
        self.read_reg(Register::WhoAmI).await
    }

    pub(crate) async fn verify_device(&mut self) -> Result<(), Error> {
        let id = self.read_id().await?;
        if id != WHO_AM_I_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("lis2mdl: unexpected WHO_AM_I {=u8:#x}", id);
            return Err(Error::WrongDevice);
        }
        Ok(())
    }

    pub(crate) async fn enable(&mut self) -> Result<(), Error> {
        if self.enabled {
            return Ok(());
        }
        self.write_mode(cfg_reg_a::MD_CONTINUOUS).await?;
        self.enabled = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("lis2mdl: enabled");
        Ok(())
    }

    pub(crate) async fn disable(&mut self) -> Result<(), Error> {
        if !self.enabled {
            return Ok(());
        }
        self.write_mode(cfg_reg_a::MD_POWER_DOWN).await?;
        self.enabled = false;
        #[cfg(feature = "defmt")]
        defmt::debug!("lis2mdl: disabled");
        Ok(())
    }

    pub(crate) async fn output_data_rate(&mut self) -> Result<MagOutputDataRate, Error> {
        let value = self.read_reg(Register::CfgRegA).await?;
        Ok(MagOutputDataRate::from_bits(
            (value & cfg_reg_a::ODR_MASK) >> cfg_reg_a::ODR_SHIFT,
        ))
    }

    pub(crate) async fn set_output_data_rate(&mut self, odr: MagOutputDataRate) -> Result<(), Error> {
        self.modify_reg(
            Register::CfgRegA,
            cfg_reg_a::ODR_MASK,
            odr.bits() << cfg_reg_a::ODR_SHIFT,
        )
        .await
    }

    pub(crate) const fn sensitivity(&self) -> ScaleFactor {
        mag_mgauss_per_lsb()
    }

    pub(crate) async fn read_raw(&mut self) -> Result<AxesRaw, Error> {
        let mut buffer = [0u8; 6];
        let addr = self.address(Register::OutxLReg);
        self.interface.read_regs(addr, &mut buffer).await?;
        Ok(AxesRaw::from_le_bytes(buffer))
    }

    pub(crate) async fn read(&mut self) -> Result<Axes, Error> {
        let raw = self.read_raw().await?;
        Ok(raw.scale(self.sensitivity()))
    }

    pub(crate) async fn data_ready(&mut self) -> Result<bool, Error> {
        Ok(self.read_reg(Register::StatusReg).await? & status_reg::ZYXDA != 0)
    }

    pub(crate) async fn set_self_test(&mut self, enable: bool) -> Result<(), Error> {
        self.set_flag(Register::CfgRegC, cfg_reg_c::SELF_TEST, enable)
            .await
    }

    pub(crate) async fn set_filter(&mut self, filter: MagFilter) -> Result<(), Error> {
        self.set_flag(Register::CfgRegB, cfg_reg_b::LPF, filter == MagFilter::OdrDiv4)
            .await
    }

    pub(crate) async fn set_power_mode(&mut self, mode: MagPowerMode) -> Result<(), Error> {
        self.set_flag(Register::CfgRegA, cfg_reg_a::LP, mode == MagPowerMode::LowPower)
            .await
    }

    pub(crate) async fn set_temperature_compensation(&mut self, enable: bool) -> Result<(), Error> {
        self.set_flag(Register::CfgRegA, cfg_reg_a::COMP_TEMP_EN, enable)
            .await
    }

    /// Reads a register by its datasheet address; the bus flag is added here.
    pub(crate) async fn read_register(&mut self, reg: u8) -> Result<u8, Error> {
        let addr = self.flagged(reg);
        self.interface.read_reg(addr).await
    }

    pub(crate) async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        let addr = self.flagged(reg);
        self.interface.write_reg(addr, value).await
    }

    pub(crate) fn release(self) -> I {
        self.interface
    }

    async fn write_mode(&mut self, mode: u8) -> Result<(), Error> {
        self.modify_reg(Register::CfgRegA, cfg_reg_a::MD_MASK, mode)
            .await
    }

    const fn flagged(&self, reg: u8) -> u8 {
        match self.bus {
            BusKind::I2c => reg | I2C_ADDRESS_FLAG,
            BusKind::Spi4Wire | BusKind::Spi3Wire => reg | SPI_ADDRESS_FLAG,
        }
    }

    const fn address(&self, reg: Register) -> u8 {
        self.flagged(reg.addr())
    }

    async fn read_reg(&mut self, reg: Register) -> Result<u8, Error> {
        let addr = self.address(reg);
        self.interface.read_reg(addr).await
    }

    async fn write_reg(&mut self, reg: Register, value: u8) -> Result<(), Error> {
        let addr = self.address(reg);
        self.interface.write_reg(addr, value).await
    }

    async fn modify_reg(&mut self, reg: Register, mask: u8, bits: u8) -> Result<(), Error> {
        let current = self.read_reg(reg).await?;
        self.write_reg(reg, (current & !mask) | (bits & mask)).await
    }

    async fn set_flag(&mut self, reg: Register, flag: u8, enable: bool) -> Result<(), Error> {
        self.modify_reg(reg, flag, if enable { flag } else { 0 })
            .await
    }
}

impl<I2C> DeviceCore<I2cInterface<I2C>> {
    pub(crate) fn set_i2c_address(&mut self, address: u8) {
        self.interface.set_address(address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDelay, MockInterface};
    use futures::executor::block_on;

    fn i2c(reg: Register) -> u8 {
        reg.addr() | I2C_ADDRESS_FLAG
    }

    fn spi(reg: Register) -> u8 {
        reg.addr() | SPI_ADDRESS_FLAG
    }

    fn device(interface: MockInterface, bus: BusKind) -> DeviceCore<MockInterface> {
        DeviceCore::new(interface, bus)
    }

    #[test]
    fn init_on_i2c_sets_bdu_idle_and_100hz() {
        let mut core = device(
            MockInterface::default().with_reg(i2c(Register::CfgRegC), cfg_reg_c::SELF_TEST),
            BusKind::I2c,
        );

        block_on(core.init()).expect("init");

        assert_eq!(core.interface.reg(i2c(Register::CfgRegC)), cfg_reg_c::BDU);
        assert_eq!(
            core.interface.reg(i2c(Register::CfgRegA)),
            (0b11 << cfg_reg_a::ODR_SHIFT) | cfg_reg_a::MD_POWER_DOWN
        );
        assert!(core.is_initialized());
        assert!(!core.is_enabled());
    }

    #[test]
    fn four_wire_spi_setup_runs_on_first_init_only() {
        let mut core = device(MockInterface::default(), BusKind::Spi4Wire);

        block_on(core.init()).expect("init");
        assert_eq!(core.interface.writes()[0], (spi(Register::CfgRegC), 0x34));
        assert_eq!(core.interface.writes().len(), 5);

        core.interface.clear_writes();
        block_on(core.init()).expect("init again");
        assert_eq!(core.interface.writes().len(), 4);
    }

    #[test]
    fn three_wire_spi_disables_i2c() {
        let mut core = device(MockInterface::default(), BusKind::Spi3Wire);

        block_on(core.init()).expect("init");

        assert_eq!(
            core.interface.reg(spi(Register::CfgRegC)),
            cfg_reg_c::I2C_DIS | cfg_reg_c::BDU
        );
    }

    #[test]
    fn enable_and_disable_switch_mode_once() {
        let mut core = device(MockInterface::default(), BusKind::I2c);
        block_on(core.init()).expect("init");
        core.interface.clear_writes();

        block_on(core.enable()).expect("enable");
        block_on(core.enable()).expect("enable again");
        assert_eq!(core.interface.writes().len(), 1);
        assert_eq!(
            core.interface.reg(i2c(Register::CfgRegA)) & cfg_reg_a::MD_MASK,
            cfg_reg_a::MD_CONTINUOUS
        );

        block_on(core.deinit()).expect("deinit");
        assert_eq!(
            core.interface.reg(i2c(Register::CfgRegA)) & cfg_reg_a::MD_MASK,
            cfg_reg_a::MD_POWER_DOWN
        );
        assert!(!core.is_initialized());
    }

    #[test]
    fn odr_writes_immediately_and_reads_back() {
        let mut core = device(MockInterface::default(), BusKind::I2c);

        block_on(core.set_output_data_rate(MagOutputDataRate::from_hz_milli(15_000))).expect("odr");

        assert_eq!(block_on(core.output_data_rate()), Ok(MagOutputDataRate::Hz20));
        assert_eq!(core.interface.writes().len(), 1);
    }

    #[test]
    fn axes_scale_by_one_and_a_half() {
        let base = i2c(Register::OutxLReg);
        let interface = MockInterface::default()
            .with_reg(base, 0x03)
            .with_reg(base + 2, 0xFD)
            .with_reg(base + 3, 0xFF)
            .with_reg(base + 4, 0xE8)
            .with_reg(base + 5, 0x03);
        let mut core = device(interface, BusKind::I2c);

        let axes = block_on(core.read()).expect("axes");

        assert_eq!(axes, Axes { x: 4, y: -4, z: 1500 });
    }

    #[test]
    fn wrong_id_is_rejected() {
        let mut core = device(
            MockInterface::default().with_reg(spi(Register::WhoAmI), 0x6C),
            BusKind::Spi4Wire,
        );
        assert_eq!(block_on(core.verify_device()), Err(Error::WrongDevice));

        core.interface.set_reg(spi(Register::WhoAmI), WHO_AM_I_VALUE);
        assert_eq!(block_on(core.verify_device()), Ok(()));
    }

    #[test]
    fn flags_map_to_cfg_registers() {
        let mut core = device(MockInterface::default(), BusKind::I2c);

        block_on(core.set_filter(MagFilter::OdrDiv4)).expect("filter");
        block_on(core.set_power_mode(MagPowerMode::LowPower)).expect("power");
        block_on(core.set_temperature_compensation(true)).expect("comp");
        block_on(core.set_self_test(true)).expect("self-test");

        let regs = &core.interface;
        assert_eq!(regs.reg(i2c(Register::CfgRegB)), cfg_reg_b::LPF);
        assert_eq!(
            regs.reg(i2c(Register::CfgRegA)),
            cfg_reg_a::LP | cfg_reg_a::COMP_TEMP_EN
        );
        assert_eq!(regs.reg(i2c(Register::CfgRegC)), cfg_reg_c::SELF_TEST);
    }

    #[test]
    fn data_ready_reads_zyxda() {
        let mut core = device(
            MockInterface::default().with_reg(i2c(Register::StatusReg), status_reg::ZYXDA),
            BusKind::I2c,
        );
        assert_eq!(block_on(core.data_ready()), Ok(true));
    }

    #[test]
    fn raw_register_access_adds_bus_flag() {
        let mut core = device(MockInterface::default(), BusKind::Spi3Wire);

        block_on(core.write_register(0x63, 0xE1)).expect("write");

        assert_eq!(core.interface.writes(), [(0x63 | SPI_ADDRESS_FLAG, 0xE1)]);
        assert_eq!(block_on(core.read_register(0x63)), Ok(0xE1));
    }

    #[test]
    fn stuck_reset_times_out() {
        let mut core = device(MockInterface::default(), BusKind::I2c);
        let mut delay = MockDelay::default();

        assert_eq!(block_on(core.soft_reset(&mut delay)), Err(Error::NotReady));
        assert_eq!(delay.calls, u32::from(RESET_POLL_ATTEMPTS));
    }

    #[test]
    fn completed_reset_clears_init_and_enable() {
        let interface = MockInterface::default().with_self_clearing(
            i2c(Register::CfgRegA),
            cfg_reg_a::SOFT_RST,
            2,
        );
        let mut core = device(interface, BusKind::I2c);
        block_on(core.init()).expect("init");
        block_on(core.enable()).expect("enable");
        let mut delay = MockDelay::default();

        assert_eq!(block_on(core.soft_reset(&mut delay)), Ok(()));

        assert_eq!(delay.calls, 2);
        assert!(!core.is_initialized());
        assert!(!core.is_enabled());
    }
}
