//! Embedded event detection: free fall, wake-up, inactivity, taps, 6D, tilt and pedometer.
//!
//! Every event is routed through MD1_CFG/MD2_CFG (or EMB_FUNC_INT1/2 for the
//! embedded-function engine). TAP_CFG2.INTERRUPTS_ENABLE follows whether any
//! MDx bit is set.

use super::config::{AccelFullScale, AccelOutputDataRate, GyroFullScale};
use super::device::DeviceCore;
use super::register::{
    EmbeddedRegister, Register, d6d_src, emb_func_en_a, emb_func_int, emb_func_src,
    emb_func_status_mainpage, free_fall, int_dur2, md_cfg, tap_cfg0, tap_cfg1, tap_cfg2,
    tap_ths_6d, tap_src, wake_up_dur, wake_up_src, wake_up_ths,
};
use crate::error::Error;
use crate::interface::Interface;
use crate::interrupt::InterruptPin;

const FREE_FALL_DURATION_MAX: u8 = 63;
const WAKE_UP_THRESHOLD_MAX: u8 = 63;
const WAKE_UP_DURATION_MAX: u8 = 3;
const SLEEP_DURATION_MAX: u8 = 15;
const TAP_THRESHOLD_MAX: u8 = 31;
const TAP_SHOCK_MAX: u8 = 3;
const TAP_QUIET_MAX: u8 = 3;
const TAP_DURATION_MAX: u8 = 15;

/// Free-fall threshold (FREE_FALL.FF_THS).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FreeFallThreshold {
    /// 156 mg.
    Mg156,
    /// 219 mg.
    Mg219,
    /// 250 mg.
    Mg250,
    /// 312 mg.
    Mg312,
    /// 344 mg.
    Mg344,
    /// 406 mg.
    Mg406,
    /// 469 mg.
    Mg469,
    /// 500 mg.
    Mg500,
}

impl FreeFallThreshold {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Mg156 => 0,
            Self::Mg219 => 1,
            Self::Mg250 => 2,
            Self::Mg312 => 3,
            Self::Mg344 => 4,
            Self::Mg406 => 5,
            Self::Mg469 => 6,
            Self::Mg500 => 7,
        }
    }
}

/// 6D/4D angle threshold (TAP_THS_6D.SIXD_THS).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SixDThreshold {
    /// 80 degrees.
    Deg80,
    /// 70 degrees.
    Deg70,
    /// 60 degrees.
    Deg60,
    /// 50 degrees.
    Deg50,
}

impl SixDThreshold {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Deg80 => 0,
            Self::Deg70 => 1,
            Self::Deg60 => 2,
            Self::Deg50 => 3,
        }
    }
}

/// What happens to the sensors while inactive (TAP_CFG2.INACT_EN).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InactivityMode {
    /// Sensors keep their configuration.
    NotAffected,
    /// Accelerometer drops to 12.5 Hz; gyroscope unchanged.
    AccelLowPower,
    /// Accelerometer at 12.5 Hz, gyroscope sleeps.
    AccelLowPowerGyroSleep,
    /// Accelerometer at 12.5 Hz, gyroscope powered down.
    AccelLowPowerGyroPowerDown,
}

impl InactivityMode {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::NotAffected => 0,
            Self::AccelLowPower => 1,
            Self::AccelLowPowerGyroSleep => 2,
            Self::AccelLowPowerGyroPowerDown => 3,
        }
    }
}

/// One D6D_SRC direction flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SixDDirection {
    /// X axis below threshold.
    XLow,
    /// X axis above threshold.
    XHigh,
    /// Y axis below threshold.
    YLow,
    /// Y axis above threshold.
    YHigh,
    /// Z axis below threshold.
    ZLow,
    /// Z axis above threshold.
    ZHigh,
}

impl SixDDirection {
    const fn mask(self) -> u8 {
        match self {
            Self::XLow => d6d_src::XL,
            Self::XHigh => d6d_src::XH,
            Self::YLow => d6d_src::YL,
            Self::YHigh => d6d_src::YH,
            Self::ZLow => d6d_src::ZL,
            Self::ZHigh => d6d_src::ZH,
        }
    }
}

/// Decoded D6D_SRC direction flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SixDOrientation {
    /// X low.
    pub xl: bool,
    /// X high.
    pub xh: bool,
    /// Y low.
    pub yl: bool,
    /// Y high.
    pub yh: bool,
    /// Z low.
    pub zl: bool,
    /// Z high.
    pub zh: bool,
}

impl SixDOrientation {
    pub(crate) const fn from_bits(value: u8) -> Self {
        Self {
            xl: value & d6d_src::XL != 0,
            xh: value & d6d_src::XH != 0,
            yl: value & d6d_src::YL != 0,
            yh: value & d6d_src::YH != 0,
            zl: value & d6d_src::ZL != 0,
            zh: value & d6d_src::ZH != 0,
        }
    }
}

/// Events that are both routed to a pin and currently flagged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventStatus {
    /// Free fall.
    pub free_fall: bool,
    /// Wake-up.
    pub wake_up: bool,
    /// Single tap.
    pub single_tap: bool,
    /// Double tap.
    pub double_tap: bool,
    /// 6D orientation change.
    pub six_d: bool,
    /// Step detected.
    pub step: bool,
    /// Tilt.
    pub tilt: bool,
    /// Activity/inactivity change.
    pub sleep_change: bool,
}

impl EventStatus {
    /// Returns `true` when no event is pending.
    pub const fn is_empty(&self) -> bool {
        !(self.free_fall
            || self.wake_up
            || self.single_tap
            || self.double_tap
            || self.six_d
            || self.step
            || self.tilt
            || self.sleep_change)
    }
}

struct EventSources {
    wake_up: u8,
    tap: u8,
    d6d: u8,
    emb_src: u8,
    emb_int1: u8,
    emb_int2: u8,
    md1: u8,
    md2: u8,
    emb_status: u8,
}

impl EventSources {
    fn decode(&self) -> EventStatus {
        let routed = |flag: u8| (self.md1 | self.md2) & flag != 0;
        EventStatus {
            free_fall: routed(md_cfg::FF) && self.wake_up & wake_up_src::FF_IA != 0,
            wake_up: routed(md_cfg::WU) && self.wake_up & wake_up_src::WU_IA != 0,
            single_tap: routed(md_cfg::SINGLE_TAP) && self.tap & tap_src::SINGLE_TAP != 0,
            double_tap: routed(md_cfg::DOUBLE_TAP) && self.tap & tap_src::DOUBLE_TAP != 0,
            six_d: routed(md_cfg::D6D) && self.d6d & d6d_src::D6D_IA != 0,
            step: self.emb_int1 & emb_func_int::STEP_DETECTOR != 0
                && self.emb_src & emb_func_src::STEP_DETECTED != 0,
            tilt: (self.emb_int1 | self.emb_int2) & emb_func_int::TILT != 0
                && self.emb_status & emb_func_status_mainpage::IS_TILT != 0,
            sleep_change: routed(md_cfg::SLEEP_CHANGE)
                && self.wake_up & wake_up_src::SLEEP_CHANGE_IA != 0,
        }
    }
}

const fn md_register(pin: InterruptPin) -> Register {
    match pin {
        InterruptPin::Int1 => Register::Md1Cfg,
        InterruptPin::Int2 => Register::Md2Cfg,
    }
}

const fn emb_func_int_register(pin: InterruptPin) -> EmbeddedRegister {
    match pin {
        InterruptPin::Int1 => EmbeddedRegister::EmbFuncInt1,
        InterruptPin::Int2 => EmbeddedRegister::EmbFuncInt2,
    }
}

fn check_max(value: u8, max: u8) -> Result<(), Error> {
    if value > max {
        #[cfg(feature = "defmt")]
        defmt::warn!("lsm6dso: {=u8} exceeds {=u8}", value, max);
        Err(Error::InvalidData)
    } else {
        Ok(())
    }
}

impl<I> DeviceCore<I>
where
    I: Interface,
{
    /// Latched (`true`) or pulsed embedded-event interrupts.
    pub(crate) async fn set_interrupt_latch(&mut self, latched: bool) -> Result<(), Error> {
        self.set_flag(Register::TapCfg0, tap_cfg0::LIR, latched)
            .await
    }

    // Routing

    async fn refresh_interrupts_enable(&mut self) -> Result<(), Error> {
        let md1 = self.read_reg(Register::Md1Cfg).await?;
        let md2 = self.read_reg(Register::Md2Cfg).await?;
        self.set_flag(
            Register::TapCfg2,
            tap_cfg2::INTERRUPTS_ENABLE,
            (md1 | md2) != 0,
        )
        .await
    }

    pub(crate) async fn route_event(
        &mut self,
        pin: InterruptPin,
        flag: u8,
        enable: bool,
    ) -> Result<(), Error> {
        self.set_flag(md_register(pin), flag, enable).await?;
        self.refresh_interrupts_enable().await
    }

    async fn unroute_event(&mut self, flag: u8) -> Result<(), Error> {
        self.set_flag(Register::Md1Cfg, flag, false).await?;
        self.set_flag(Register::Md2Cfg, flag, false).await?;
        self.refresh_interrupts_enable().await
    }

    pub(crate) async fn route_embedded_event(
        &mut self,
        pin: InterruptPin,
        flag: u8,
        enable: bool,
    ) -> Result<(), Error> {
        let routed = self
            .modify_embedded_reg(
                emb_func_int_register(pin),
                flag,
                if enable { flag } else { 0 },
            )
            .await?;
        self.set_flag(md_register(pin), md_cfg::EMB_FUNC, routed != 0)
            .await?;
        self.refresh_interrupts_enable().await
    }

    async fn prepare_accel_event(&mut self, odr: AccelOutputDataRate) -> Result<(), Error> {
        self.set_accel_output_data_rate(odr).await?;
        self.set_accel_full_scale(AccelFullScale::G2).await
    }

    // Free fall

    pub(crate) async fn enable_free_fall(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.prepare_accel_event(AccelOutputDataRate::Hz417).await?;
        self.set_free_fall_duration(6).await?;
        self.set_wake_up_duration(0).await?;
        self.set_sleep_duration(0).await?;
        self.set_free_fall_threshold(FreeFallThreshold::Mg312)
            .await?;
        self.route_event(pin, md_cfg::FF, true).await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("lsm6dso: free fall routed to {}", pin);
        Ok(())
    }

    pub(crate) async fn disable_free_fall(&mut self) -> Result<(), Error> {
        self.unroute_event(md_cfg::FF).await?;
        self.set_free_fall_duration(0).await?;
        self.set_free_fall_threshold(FreeFallThreshold::Mg156)
            .await
    }

    pub(crate) async fn set_free_fall_threshold(
        &mut self,
        threshold: FreeFallThreshold,
    ) -> Result<(), Error> {
        self.modify_reg(Register::FreeFall, free_fall::FF_THS_MASK, threshold.bits())
            .await
    }

    /// 6-bit duration split across WAKE_UP_DUR.FF_DUR5 and FREE_FALL.FF_DUR.
    pub(crate) async fn set_free_fall_duration(&mut self, duration: u8) -> Result<(), Error> {
        check_max(duration, FREE_FALL_DURATION_MAX)?;
        self.set_flag(
            Register::WakeUpDur,
            wake_up_dur::FF_DUR5,
            duration & 0x20 != 0,
        )
        .await?;
        self.modify_reg(
            Register::FreeFall,
            free_fall::FF_DUR_MASK,
            (duration & 0x1F) << free_fall::FF_DUR_SHIFT,
        )
        .await
    }

    // Wake-up

    pub(crate) async fn enable_wake_up(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.prepare_accel_event(AccelOutputDataRate::Hz417).await?;
        self.set_wake_up_duration(0).await?;
        self.set_wake_up_threshold(2).await?;
        self.route_event(pin, md_cfg::WU, true).await
    }

    pub(crate) async fn disable_wake_up(&mut self) -> Result<(), Error> {
        self.unroute_event(md_cfg::WU).await?;
        self.set_wake_up_threshold(0).await?;
        self.set_wake_up_duration(0).await
    }

    pub(crate) async fn set_wake_up_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        check_max(threshold, WAKE_UP_THRESHOLD_MAX)?;
        self.modify_reg(Register::WakeUpThs, wake_up_ths::WK_THS_MASK, threshold)
            .await
    }

    pub(crate) async fn set_wake_up_duration(&mut self, duration: u8) -> Result<(), Error> {
        check_max(duration, WAKE_UP_DURATION_MAX)?;
        self.modify_reg(
            Register::WakeUpDur,
            wake_up_dur::WAKE_DUR_MASK,
            duration << wake_up_dur::WAKE_DUR_SHIFT,
        )
        .await
    }

    // Inactivity

    pub(crate) async fn enable_inactivity(
        &mut self,
        mode: InactivityMode,
        pin: InterruptPin,
    ) -> Result<(), Error> {
        self.set_accel_full_scale(AccelFullScale::G2).await?;
        self.set_gyro_full_scale(GyroFullScale::Dps250).await?;
        self.set_sleep_duration(1).await?;
        self.set_inactivity_mode(mode).await?;
        self.route_event(pin, md_cfg::SLEEP_CHANGE, true).await
    }

    pub(crate) async fn disable_inactivity(&mut self) -> Result<(), Error> {
        self.unroute_event(md_cfg::SLEEP_CHANGE).await?;
        self.set_inactivity_mode(InactivityMode::NotAffected)
            .await?;
        self.set_sleep_duration(0).await
    }

    async fn set_inactivity_mode(&mut self, mode: InactivityMode) -> Result<(), Error> {
        self.modify_reg(
            Register::TapCfg2,
            tap_cfg2::INACT_EN_MASK,
            mode.bits() << tap_cfg2::INACT_EN_SHIFT,
        )
        .await
    }

    pub(crate) async fn set_sleep_duration(&mut self, duration: u8) -> Result<(), Error> {
        check_max(duration, SLEEP_DURATION_MAX)?;
        self.modify_reg(Register::WakeUpDur, wake_up_dur::SLEEP_DUR_MASK, duration)
            .await
    }

    // Taps

    async fn set_tap_axes(&mut self, enable: bool) -> Result<(), Error> {
        if enable {
            for axis in [tap_cfg0::TAP_X_EN, tap_cfg0::TAP_Y_EN, tap_cfg0::TAP_Z_EN] {
                self.set_flag(Register::TapCfg0, axis, true).await?;
            }
        } else {
            for axis in [tap_cfg0::TAP_Z_EN, tap_cfg0::TAP_Y_EN, tap_cfg0::TAP_X_EN] {
                self.set_flag(Register::TapCfg0, axis, false).await?;
            }
        }
        Ok(())
    }

    pub(crate) async fn enable_single_tap(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.prepare_accel_event(AccelOutputDataRate::Hz417).await?;
        self.set_tap_axes(true).await?;
        self.set_tap_threshold(8).await?;
        self.set_tap_shock_time(2).await?;
        self.set_tap_quiet_time(1).await?;
        self.route_event(pin, md_cfg::SINGLE_TAP, true).await
    }

    pub(crate) async fn disable_single_tap(&mut self) -> Result<(), Error> {
        self.unroute_event(md_cfg::SINGLE_TAP).await?;
        self.set_tap_quiet_time(0).await?;
        self.set_tap_shock_time(0).await?;
        self.set_tap_threshold(0).await?;
        self.set_tap_axes(false).await
    }

    pub(crate) async fn enable_double_tap(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.prepare_accel_event(AccelOutputDataRate::Hz417).await?;
        self.set_tap_axes(true).await?;
        self.set_tap_threshold(8).await?;
        self.set_tap_shock_time(3).await?;
        self.set_tap_quiet_time(3).await?;
        self.set_tap_duration(8).await?;
        self.set_flag(Register::WakeUpThs, wake_up_ths::SINGLE_DOUBLE_TAP, true)
            .await?;
        self.route_event(pin, md_cfg::DOUBLE_TAP, true).await
    }

    pub(crate) async fn disable_double_tap(&mut self) -> Result<(), Error> {
        self.unroute_event(md_cfg::DOUBLE_TAP).await?;
        self.set_flag(Register::WakeUpThs, wake_up_ths::SINGLE_DOUBLE_TAP, false)
            .await?;
        self.set_tap_duration(0).await?;
        self.set_tap_quiet_time(0).await?;
        self.set_tap_shock_time(0).await?;
        self.set_tap_threshold(0).await?;
        self.set_tap_axes(false).await
    }

    /// X-axis tap threshold, 5 bits.
    pub(crate) async fn set_tap_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        check_max(threshold, TAP_THRESHOLD_MAX)?;
        self.modify_reg(Register::TapCfg1, tap_cfg1::TAP_THS_X_MASK, threshold)
            .await
    }

    pub(crate) async fn set_tap_shock_time(&mut self, shock: u8) -> Result<(), Error> {
        check_max(shock, TAP_SHOCK_MAX)?;
        self.modify_reg(Register::IntDur2, int_dur2::SHOCK_MASK, shock)
            .await
    }

    pub(crate) async fn set_tap_quiet_time(&mut self, quiet: u8) -> Result<(), Error> {
        check_max(quiet, TAP_QUIET_MAX)?;
        self.modify_reg(
            Register::IntDur2,
            int_dur2::QUIET_MASK,
            quiet << int_dur2::QUIET_SHIFT,
        )
        .await
    }

    pub(crate) async fn set_tap_duration(&mut self, duration: u8) -> Result<(), Error> {
        check_max(duration, TAP_DURATION_MAX)?;
        self.modify_reg(
            Register::IntDur2,
            int_dur2::DUR_MASK,
            duration << int_dur2::DUR_SHIFT,
        )
        .await
    }

    // 6D orientation

    pub(crate) async fn enable_six_d_orientation(
        &mut self,
        pin: InterruptPin,
    ) -> Result<(), Error> {
        self.prepare_accel_event(AccelOutputDataRate::Hz417).await?;
        self.set_six_d_threshold(SixDThreshold::Deg60).await?;
        self.route_event(pin, md_cfg::D6D, true).await
    }

    pub(crate) async fn disable_six_d_orientation(&mut self) -> Result<(), Error> {
        self.unroute_event(md_cfg::D6D).await?;
        self.set_six_d_threshold(SixDThreshold::Deg80).await
    }

    pub(crate) async fn set_six_d_threshold(
        &mut self,
        threshold: SixDThreshold,
    ) -> Result<(), Error> {
        self.modify_reg(
            Register::TapThs6d,
            tap_ths_6d::SIXD_THS_MASK,
            threshold.bits() << tap_ths_6d::SIXD_THS_SHIFT,
        )
        .await
    }

    pub(crate) async fn six_d_orientation(&mut self) -> Result<SixDOrientation, Error> {
        let value = self.read_reg(Register::D6dSrc).await?;
        Ok(SixDOrientation::from_bits(value))
    }

    pub(crate) async fn six_d_direction(&mut self, direction: SixDDirection) -> Result<bool, Error> {
        Ok(self.read_reg(Register::D6dSrc).await? & direction.mask() != 0)
    }

    // Tilt

    pub(crate) async fn enable_tilt(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.prepare_accel_event(AccelOutputDataRate::Hz26).await?;
        self.modify_embedded_reg(
            EmbeddedRegister::EmbFuncEnA,
            emb_func_en_a::TILT_EN,
            emb_func_en_a::TILT_EN,
        )
        .await?;
        self.route_embedded_event(pin, emb_func_int::TILT, true)
            .await
    }

    pub(crate) async fn disable_tilt(&mut self) -> Result<(), Error> {
        self.route_embedded_event(InterruptPin::Int1, emb_func_int::TILT, false)
            .await?;
        self.route_embedded_event(InterruptPin::Int2, emb_func_int::TILT, false)
            .await?;
        self.modify_embedded_reg(EmbeddedRegister::EmbFuncEnA, emb_func_en_a::TILT_EN, 0)
            .await
            .map(|_| ())
    }

    // Pedometer

    /// Base-mode step detection, routed to INT1.
    pub(crate) async fn enable_pedometer(&mut self) -> Result<(), Error> {
        self.prepare_accel_event(AccelOutputDataRate::Hz26).await?;
        self.modify_embedded_reg(
            EmbeddedRegister::EmbFuncEnA,
            emb_func_en_a::PEDO_EN,
            emb_func_en_a::PEDO_EN,
        )
        .await?;
        self.route_embedded_event(InterruptPin::Int1, emb_func_int::STEP_DETECTOR, true)
            .await
    }

    pub(crate) async fn disable_pedometer(&mut self) -> Result<(), Error> {
        self.route_embedded_event(InterruptPin::Int1, emb_func_int::STEP_DETECTOR, false)
            .await?;
        self.modify_embedded_reg(EmbeddedRegister::EmbFuncEnA, emb_func_en_a::PEDO_EN, 0)
            .await
            .map(|_| ())
    }

    pub(crate) async fn step_count(&mut self) -> Result<u16, Error> {
        let [low, high] = self
            .read_embedded_regs([EmbeddedRegister::StepCounterL, EmbeddedRegister::StepCounterH])
            .await?;
        Ok(u16::from_le_bytes([low, high]))
    }

    pub(crate) async fn reset_step_counter(&mut self) -> Result<(), Error> {
        self.modify_embedded_reg(
            EmbeddedRegister::EmbFuncSrc,
            emb_func_src::PEDO_RST_STEP,
            emb_func_src::PEDO_RST_STEP,
        )
        .await
        .map(|_| ())
    }

    // Status

    pub(crate) async fn event_status(&mut self) -> Result<EventStatus, Error> {
        let wake_up = self.read_reg(Register::WakeUpSrc).await?;
        let tap = self.read_reg(Register::TapSrc).await?;
        let d6d = self.read_reg(Register::D6dSrc).await?;
        let [emb_src, emb_int1, emb_int2] = self
            .read_embedded_regs([
                EmbeddedRegister::EmbFuncSrc,
                EmbeddedRegister::EmbFuncInt1,
                EmbeddedRegister::EmbFuncInt2,
            ])
            .await?;
        let md1 = self.read_reg(Register::Md1Cfg).await?;
        let md2 = self.read_reg(Register::Md2Cfg).await?;
        let emb_status = self.read_reg(Register::EmbFuncStatusMainpage).await?;

        let status = EventSources {
            wake_up,
            tap,
            d6d,
            emb_src,
            emb_int1,
            emb_int2,
            md1,
            md2,
            emb_status,
        }
        .decode();
        #[cfg(feature = "defmt")]
        defmt::trace!("lsm6dso: event status {}", status);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::BusKind;
    use crate::lsm6dso::config::Lsm6dsoConfig;
    use crate::lsm6dso::register::{ctrl1_xl, ctrl2_g, func_cfg_access};
    use crate::testing::MockInterface;
    use futures::executor::block_on;

    fn device(interface: MockInterface) -> DeviceCore<MockInterface> {
        DeviceCore::new(interface, Lsm6dsoConfig::new(), BusKind::I2c)
    }

    fn banked() -> MockInterface {
        MockInterface::default().with_bank(Register::FuncCfgAccess.addr(), func_cfg_access::EMBEDDED_BANK)
    }

    #[test]
    fn free_fall_programs_duration_threshold_and_route() {
        let mut core = device(MockInterface::default());

        block_on(core.enable_free_fall(InterruptPin::Int1)).expect("enable");

        let regs = &core.interface;
        assert_eq!(regs.reg(Register::FreeFall.addr()), (6 << free_fall::FF_DUR_SHIFT) | 3);
        assert_eq!(regs.reg(Register::WakeUpDur.addr()), 0);
        assert_eq!(regs.reg(Register::Md1Cfg.addr()), md_cfg::FF);
        assert_eq!(regs.reg(Register::TapCfg2.addr()), tap_cfg2::INTERRUPTS_ENABLE);
        assert_eq!(core.cached_accel_odr(), AccelOutputDataRate::Hz417);
        assert_eq!(regs.reg(Register::Ctrl1Xl.addr()) & ctrl1_xl::ODR_MASK, 0);

        block_on(core.disable_free_fall()).expect("disable");
        let regs = &core.interface;
        assert_eq!(regs.reg(Register::FreeFall.addr()), 0);
        assert_eq!(regs.reg(Register::Md1Cfg.addr()), 0);
        assert_eq!(regs.reg(Register::TapCfg2.addr()), 0);
    }

    #[test]
    fn event_rate_is_written_when_accel_running() {
        let mut core = device(MockInterface::default());
        block_on(core.init()).expect("init");
        block_on(core.enable_accel()).expect("enable");

        block_on(core.enable_wake_up(InterruptPin::Int2)).expect("wake-up");

        let regs = &core.interface;
        assert_eq!(regs.reg(Register::Ctrl1Xl.addr()), 6 << ctrl1_xl::ODR_SHIFT);
        assert_eq!(regs.reg(Register::WakeUpThs.addr()), 2);
        assert_eq!(regs.reg(Register::Md2Cfg.addr()), md_cfg::WU);
        assert_eq!(regs.reg(Register::Md1Cfg.addr()), 0);
    }

    #[test]
    fn free_fall_duration_splits_bit_five() {
        let mut core = device(MockInterface::default());

        block_on(core.set_free_fall_duration(0b10_0011)).expect("duration");

        assert_eq!(core.interface.reg(Register::WakeUpDur.addr()), wake_up_dur::FF_DUR5);
        assert_eq!(
            core.interface.reg(Register::FreeFall.addr()),
            0b0_0011 << free_fall::FF_DUR_SHIFT
        );
        assert_eq!(
            block_on(core.set_free_fall_duration(64)),
            Err(Error::InvalidData)
        );
    }

    #[test]
    fn out_of_range_values_are_rejected_without_writes() {
        let mut core = device(MockInterface::default());

        assert_eq!(block_on(core.set_wake_up_threshold(64)), Err(Error::InvalidData));
        assert_eq!(block_on(core.set_wake_up_duration(4)), Err(Error::InvalidData));
        assert_eq!(block_on(core.set_sleep_duration(16)), Err(Error::InvalidData));
        assert_eq!(block_on(core.set_tap_threshold(32)), Err(Error::InvalidData));
        assert_eq!(block_on(core.set_tap_shock_time(4)), Err(Error::InvalidData));
        assert_eq!(block_on(core.set_tap_quiet_time(4)), Err(Error::InvalidData));
        assert_eq!(block_on(core.set_tap_duration(16)), Err(Error::InvalidData));
        assert!(core.interface.writes().is_empty());
    }

    #[test]
    fn interrupts_enable_stays_on_while_any_route_remains() {
        let mut core = device(MockInterface::default());

        block_on(core.enable_six_d_orientation(InterruptPin::Int1)).expect("6d");
        block_on(core.enable_wake_up(InterruptPin::Int2)).expect("wu");
        block_on(core.disable_six_d_orientation()).expect("6d off");

        let regs = &core.interface;
        assert_eq!(regs.reg(Register::TapCfg2.addr()), tap_cfg2::INTERRUPTS_ENABLE);
        assert_eq!(regs.reg(Register::TapThs6d.addr()), 0);

        block_on(core.disable_wake_up()).expect("wu off");
        assert_eq!(core.interface.reg(Register::TapCfg2.addr()), 0);
    }

    #[test]
    fn six_d_enable_sets_sixty_degrees() {
        let mut core = device(MockInterface::default());

        block_on(core.enable_six_d_orientation(InterruptPin::Int2)).expect("6d");

        assert_eq!(
            core.interface.reg(Register::TapThs6d.addr()),
            2 << tap_ths_6d::SIXD_THS_SHIFT
        );
        assert_eq!(core.interface.reg(Register::Md2Cfg.addr()), md_cfg::D6D);
    }

    #[test]
    fn single_tap_sequence() {
        let mut core = device(MockInterface::default());

        block_on(core.enable_single_tap(InterruptPin::Int1)).expect("tap");

        let regs = &core.interface;
        assert_eq!(
            regs.reg(Register::TapCfg0.addr()),
            tap_cfg0::TAP_X_EN | tap_cfg0::TAP_Y_EN | tap_cfg0::TAP_Z_EN
        );
        assert_eq!(regs.reg(Register::TapCfg1.addr()), 8);
        assert_eq!(regs.reg(Register::IntDur2.addr()), (1 << int_dur2::QUIET_SHIFT) | 2);
        assert_eq!(regs.reg(Register::Md1Cfg.addr()), md_cfg::SINGLE_TAP);

        block_on(core.disable_single_tap()).expect("off");
        let regs = &core.interface;
        assert_eq!(regs.reg(Register::TapCfg0.addr()), 0);
        assert_eq!(regs.reg(Register::TapCfg1.addr()), 0);
        assert_eq!(regs.reg(Register::IntDur2.addr()), 0);
    }

    #[test]
    fn double_tap_switches_tap_mode() {
        let mut core = device(MockInterface::default());

        block_on(core.enable_double_tap(InterruptPin::Int2)).expect("double tap");

        let regs = &core.interface;
        assert_eq!(
            regs.reg(Register::IntDur2.addr()),
            (8 << int_dur2::DUR_SHIFT) | (3 << int_dur2::QUIET_SHIFT) | 3
        );
        assert_eq!(regs.reg(Register::WakeUpThs.addr()), wake_up_ths::SINGLE_DOUBLE_TAP);
        assert_eq!(regs.reg(Register::Md2Cfg.addr()), md_cfg::DOUBLE_TAP);

        block_on(core.disable_double_tap()).expect("off");
        assert_eq!(core.interface.reg(Register::WakeUpThs.addr()), 0);
        assert_eq!(core.interface.reg(Register::IntDur2.addr()), 0);
    }

    #[test]
    fn inactivity_sets_ranges_mode_and_sleep_duration() {
        let mut core = device(MockInterface::default());

        block_on(core.enable_inactivity(InactivityMode::AccelLowPowerGyroSleep, InterruptPin::Int1))
            .expect("inactivity");

        let regs = &core.interface;
        assert_eq!(regs.reg(Register::Ctrl2G.addr()) & ctrl2_g::FS_MASK, 0);
        assert_eq!(regs.reg(Register::WakeUpDur.addr()), 1);
        assert_eq!(
            regs.reg(Register::TapCfg2.addr()),
            tap_cfg2::INTERRUPTS_ENABLE | (2 << tap_cfg2::INACT_EN_SHIFT)
        );
        assert_eq!(regs.reg(Register::Md1Cfg.addr()), md_cfg::SLEEP_CHANGE);

        block_on(core.disable_inactivity()).expect("off");
        assert_eq!(core.interface.reg(Register::TapCfg2.addr()), 0);
        assert_eq!(core.interface.reg(Register::WakeUpDur.addr()), 0);
    }

    #[test]
    fn pedometer_routes_step_detector_through_embedded_page() {
        let mut core = device(banked());

        block_on(core.enable_pedometer()).expect("pedometer");

        let regs = &core.interface;
        assert_eq!(regs.bank_reg(EmbeddedRegister::EmbFuncEnA.addr()), emb_func_en_a::PEDO_EN);
        assert_eq!(
            regs.bank_reg(EmbeddedRegister::EmbFuncInt1.addr()),
            emb_func_int::STEP_DETECTOR
        );
        assert_eq!(regs.reg(Register::Md1Cfg.addr()), md_cfg::EMB_FUNC);
        assert_eq!(regs.reg(Register::TapCfg2.addr()), tap_cfg2::INTERRUPTS_ENABLE);
        assert_eq!(regs.reg(Register::FuncCfgAccess.addr()), func_cfg_access::USER_BANK);
        assert_eq!(core.cached_accel_odr(), AccelOutputDataRate::Hz26);

        block_on(core.disable_pedometer()).expect("off");
        let regs = &core.interface;
        assert_eq!(regs.bank_reg(EmbeddedRegister::EmbFuncEnA.addr()), 0);
        assert_eq!(regs.reg(Register::Md1Cfg.addr()), 0);
        assert_eq!(regs.reg(Register::TapCfg2.addr()), 0);
    }

    #[test]
    fn tilt_keeps_emb_func_route_while_steps_use_it() {
        let mut core = device(banked());

        block_on(core.enable_pedometer()).expect("pedometer");
        block_on(core.enable_tilt(InterruptPin::Int1)).expect("tilt");
        block_on(core.disable_tilt()).expect("tilt off");

        let regs = &core.interface;
        assert_eq!(regs.bank_reg(EmbeddedRegister::EmbFuncEnA.addr()), emb_func_en_a::PEDO_EN);
        assert_eq!(
            regs.bank_reg(EmbeddedRegister::EmbFuncInt1.addr()),
            emb_func_int::STEP_DETECTOR
        );
        assert_eq!(regs.reg(Register::Md1Cfg.addr()), md_cfg::EMB_FUNC);
        assert_eq!(regs.reg(Register::Md2Cfg.addr()), 0);
    }

    #[test]
    fn step_count_reads_both_bytes() {
        let interface = banked()
            .with_bank_reg(EmbeddedRegister::StepCounterL.addr(), 0x34)
            .with_bank_reg(EmbeddedRegister::StepCounterH.addr(), 0x12);
        let mut core = device(interface);

        assert_eq!(block_on(core.step_count()), Ok(0x1234));

        block_on(core.reset_step_counter()).expect("reset");
        assert_eq!(
            core.interface.bank_reg(EmbeddedRegister::EmbFuncSrc.addr()),
            emb_func_src::PEDO_RST_STEP
        );
    }

    #[test]
    fn status_reports_only_routed_events() {
        let interface = banked()
            .with_reg(Register::WakeUpSrc.addr(), wake_up_src::FF_IA | wake_up_src::WU_IA)
            .with_reg(Register::TapSrc.addr(), tap_src::SINGLE_TAP | tap_src::DOUBLE_TAP)
            .with_reg(Register::D6dSrc.addr(), d6d_src::D6D_IA | d6d_src::ZH)
            .with_reg(Register::Md1Cfg.addr(), md_cfg::FF | md_cfg::EMB_FUNC)
            .with_reg(Register::Md2Cfg.addr(), md_cfg::DOUBLE_TAP)
            .with_reg(
                Register::EmbFuncStatusMainpage.addr(),
                emb_func_status_mainpage::IS_TILT,
            )
            .with_bank_reg(EmbeddedRegister::EmbFuncSrc.addr(), emb_func_src::STEP_DETECTED)
            .with_bank_reg(EmbeddedRegister::EmbFuncInt1.addr(), emb_func_int::STEP_DETECTOR)
            .with_bank_reg(EmbeddedRegister::EmbFuncInt2.addr(), emb_func_int::TILT);
        let mut core = device(interface);

        let status = block_on(core.event_status()).expect("status");

        assert_eq!(
            status,
            EventStatus {
                free_fall: true,
                double_tap: true,
                step: true,
                tilt: true,
                ..EventStatus::default()
            }
        );
        assert!(!status.is_empty());
    }

    fn flagged_sources() -> MockInterface {
        banked()
            .with_reg(
                Register::WakeUpSrc.addr(),
                wake_up_src::WU_IA | wake_up_src::SLEEP_CHANGE_IA,
            )
            .with_reg(Register::TapSrc.addr(), tap_src::TAP_IA | tap_src::SINGLE_TAP)
            .with_reg(Register::D6dSrc.addr(), d6d_src::D6D_IA | d6d_src::YH)
    }

    #[test]
    fn status_reports_wake_tap_orientation_and_sleep() {
        let interface = flagged_sources()
            .with_reg(Register::Md1Cfg.addr(), md_cfg::WU | md_cfg::SLEEP_CHANGE)
            .with_reg(Register::Md2Cfg.addr(), md_cfg::SINGLE_TAP | md_cfg::D6D);
        let mut core = device(interface);

        let status = block_on(core.event_status()).expect("status");

        assert_eq!(
            status,
            EventStatus {
                wake_up: true,
                single_tap: true,
                six_d: true,
                sleep_change: true,
                ..EventStatus::default()
            }
        );
        assert_eq!(
            block_on(core.six_d_orientation()),
            Ok(SixDOrientation {
                yh: true,
                ..SixDOrientation::default()
            })
        );
    }

    #[test]
    fn unrouted_sources_are_ignored() {
        let mut core = device(flagged_sources());

        let status = block_on(core.event_status()).expect("status");

        assert_eq!(status, EventStatus::default());
        assert!(status.is_empty());
    }

    #[test]
    fn six_d_directions_decode() {
        let mut core = device(
            MockInterface::default().with_reg(Register::D6dSrc.addr(), d6d_src::XH | d6d_src::ZL),
        );

        let orientation = block_on(core.six_d_orientation()).expect("6d");
        assert_eq!(
            orientation,
            SixDOrientation {
                xh: true,
                zl: true,
                ..SixDOrientation::default()
            }
        );
        assert_eq!(block_on(core.six_d_direction(SixDDirection::XHigh)), Ok(true));
        assert_eq!(block_on(core.six_d_direction(SixDDirection::YLow)), Ok(false));
    }

    #[test]
    fn latch_toggles_lir_only() {
        let mut core = device(MockInterface::default().with_reg(Register::TapCfg0.addr(), tap_cfg0::TAP_X_EN));

        block_on(core.set_interrupt_latch(true)).expect("latch");
        assert_eq!(
            core.interface.reg(Register::TapCfg0.addr()),
            tap_cfg0::TAP_X_EN | tap_cfg0::LIR
        );

        block_on(core.set_interrupt_latch(false)).expect("pulse");
        assert_eq!(core.interface.reg(Register::TapCfg0.addr()), tap_cfg0::TAP_X_EN);
    }
}
