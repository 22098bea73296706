//! LSM6DSO register definitions.
//!
//! The user bank registers plus the embedded-function page reached through
//! FUNC_CFG_ACCESS, with the bit masks the driver touches.

/// LSM6DSO user-bank register addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Embedded-function bank access.
    FuncCfgAccess = 0x01,
    /// FIFO watermark threshold, low byte.
    FifoCtrl1 = 0x07,
    /// FIFO watermark bit 8 and stop-on-watermark.
    FifoCtrl2 = 0x08,
    /// FIFO batch data rates.
    FifoCtrl3 = 0x09,
    /// FIFO mode.
    FifoCtrl4 = 0x0A,
    /// Data-ready pulse mode and BDR counter.
    CounterBdrReg1 = 0x0B,
    /// INT1 pin control.
    Int1Ctrl = 0x0D,
    /// INT2 pin control.
    Int2Ctrl = 0x0E,
    /// Device identifier.
    WhoAmI = 0x0F,
    /// Accelerometer control.
    Ctrl1Xl = 0x10,
    /// Gyroscope control.
    Ctrl2G = 0x11,
    /// Control register 3.
    Ctrl3C = 0x12,
    /// Control register 4.
    Ctrl4C = 0x13,
    /// Control register 5 (self-test, ultra-low-power).
    Ctrl5C = 0x14,
    /// Control register 6 (accel power mode, gyro LPF1 bandwidth).
    Ctrl6C = 0x15,
    /// Gyroscope control 7.
    Ctrl7G = 0x16,
    /// Accelerometer filter control.
    Ctrl8Xl = 0x17,
    /// Accelerometer control 9 (I3C).
    Ctrl9Xl = 0x18,
    /// Control register 10.
    Ctrl10C = 0x19,
    /// Aggregated interrupt source.
    AllIntSrc = 0x1A,
    /// Wake-up and free-fall source.
    WakeUpSrc = 0x1B,
    /// Tap source.
    TapSrc = 0x1C,
    /// 6D orientation source.
    D6dSrc = 0x1D,
    /// Data status.
    StatusReg = 0x1E,
    /// Temperature output, low byte.
    OutTempL = 0x20,
    /// Gyroscope X output, low byte.
    OutxLG = 0x22,
    /// Accelerometer X output, low byte.
    OutxLA = 0x28,
    /// Embedded-function status mirror.
    EmbFuncStatusMainpage = 0x35,
    /// FIFO unread word count, low byte.
    FifoStatus1 = 0x3A,
    /// FIFO flags and unread word count bits 9:8.
    FifoStatus2 = 0x3B,
    /// Timestamp, byte 0.
    Timestamp0 = 0x40,
    /// Tap and activity configuration 0.
    TapCfg0 = 0x56,
    /// Tap configuration 1.
    TapCfg1 = 0x57,
    /// Tap configuration 2 and interrupt enable.
    TapCfg2 = 0x58,
    /// Z tap threshold and 6D threshold.
    TapThs6d = 0x59,
    /// Tap timing windows.
    IntDur2 = 0x5A,
    /// Wake-up threshold.
    WakeUpThs = 0x5B,
    /// Wake-up and sleep durations.
    WakeUpDur = 0x5C,
    /// Free-fall duration and threshold.
    FreeFall = 0x5D,
    /// INT1 event routing.
    Md1Cfg = 0x5E,
    /// INT2 event routing.
    Md2Cfg = 0x5F,
    /// I3C bus available time.
    I3cBusAvb = 0x62,
    /// X user offset.
    XOfsUsr = 0x73,
    /// Y user offset.
    YOfsUsr = 0x74,
    /// Z user offset.
    ZOfsUsr = 0x75,
    /// FIFO word tag.
    FifoDataOutTag = 0x78,
    /// FIFO word data, X low byte.
    FifoDataOutXL = 0x79,
}

impl Register {
    /// Returns the register address.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Registers of the embedded-function page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EmbeddedRegister {
    /// Advanced page selection.
    PageSel = 0x02,
    /// Embedded-function enable A.
    EmbFuncEnA = 0x04,
    /// Embedded-function enable B.
    EmbFuncEnB = 0x05,
    /// Embedded-function routing to INT1.
    EmbFuncInt1 = 0x0A,
    /// Embedded-function routing to INT2.
    EmbFuncInt2 = 0x0E,
    /// Embedded-function status.
    EmbFuncStatus = 0x12,
    /// Page read/write and latch.
    PageRw = 0x17,
    /// Step counter, low byte.
    StepCounterL = 0x62,
    /// Step counter, high byte.
    StepCounterH = 0x63,
    /// Embedded-function source.
    EmbFuncSrc = 0x64,
    /// Embedded-function init A.
    EmbFuncInitA = 0x66,
}

impl EmbeddedRegister {
    /// Returns the register address within the embedded page.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Expected WHO_AM_I value.
pub const WHO_AM_I_VALUE: u8 = 0x6C;

/// FUNC_CFG_ACCESS register bits.
pub mod func_cfg_access {
    /// Selects the embedded-function bank.
    pub const EMBEDDED_BANK: u8 = 0b1000_0000;
    /// User bank value.
    pub const USER_BANK: u8 = 0x00;
}

/// FIFO_CTRL2 register bits.
pub mod fifo_ctrl2 {
    /// Stop batching at the watermark.
    pub const STOP_ON_WTM: u8 = 0b1000_0000;
    /// Watermark bit 8.
    pub const WTM8: u8 = 0b0000_0001;
}

/// FIFO_CTRL3 register bits.
pub mod fifo_ctrl3 {
    /// Gyroscope batch data rate.
    pub const BDR_GY_MASK: u8 = 0b1111_0000;
    /// Gyroscope batch data rate shift.
    pub const BDR_GY_SHIFT: u8 = 4;
    /// Accelerometer batch data rate.
    pub const BDR_XL_MASK: u8 = 0b0000_1111;
    /// Accelerometer batch data rate shift.
    pub const BDR_XL_SHIFT: u8 = 0;
}

/// FIFO_CTRL4 register bits.
pub mod fifo_ctrl4 {
    /// FIFO mode selection.
    pub const FIFO_MODE_MASK: u8 = 0b0000_0111;
}

/// COUNTER_BDR_REG1 register bits.
pub mod counter_bdr_reg1 {
    /// Pulsed data-ready.
    pub const DATAREADY_PULSED: u8 = 0b1000_0000;
}

/// INT_CTRL register bits.
pub mod int_ctrl {
    /// FIFO full on the pin.
    pub const FIFO_FULL: u8 = 0b0010_0000;
    /// FIFO overrun on the pin.
    pub const FIFO_OVR: u8 = 0b0001_0000;
    /// FIFO threshold on the pin.
    pub const FIFO_TH: u8 = 0b0000_1000;
    /// Gyroscope data-ready on the pin.
    pub const DRDY_G: u8 = 0b0000_0010;
    /// Accelerometer data-ready on the pin.
    pub const DRDY_XL: u8 = 0b0000_0001;
}

/// CTRL1_XL register bits.
pub mod ctrl1_xl {
    /// Output data rate.
    pub const ODR_MASK: u8 = 0b1111_0000;
    /// Output data rate shift.
    pub const ODR_SHIFT: u8 = 4;
    /// Full scale.
    pub const FS_MASK: u8 = 0b0000_1100;
    /// Full scale shift.
    pub const FS_SHIFT: u8 = 2;
    /// LPF2 on the output path.
    pub const LPF2_XL_EN: u8 = 0b0000_0010;
}

/// CTRL2_G register bits.
pub mod ctrl2_g {
    /// Output data rate.
    pub const ODR_MASK: u8 = 0b1111_0000;
    /// Output data rate shift.
    pub const ODR_SHIFT: u8 = 4;
    /// Full scale, including the 125 dps bit.
    pub const FS_MASK: u8 = 0b0000_1110;
    /// Full scale shift.
    pub const FS_SHIFT: u8 = 1;
}

/// CTRL3_C register bits.
pub mod ctrl3_c {
    /// Reboot memory content.
    pub const BOOT: u8 = 0b1000_0000;
    /// Block data update.
    pub const BDU: u8 = 0b0100_0000;
    /// Interrupt active low.
    pub const H_LACTIVE: u8 = 0b0010_0000;
    /// Open-drain interrupt pins.
    pub const PP_OD: u8 = 0b0001_0000;
    /// 3-wire SPI.
    pub const SIM: u8 = 0b0000_1000;
    /// Register address auto-increment.
    pub const IF_INC: u8 = 0b0000_0100;
    /// Software reset.
    pub const SW_RESET: u8 = 0b0000_0001;
}

/// CTRL4_C register bits.
pub mod ctrl4_c {
    /// Gyroscope sleep.
    pub const SLEEP_G: u8 = 0b0100_0000;
    /// All interrupts on INT1.
    pub const INT2_ON_INT1: u8 = 0b0010_0000;
    /// Mask data-ready until filters settle.
    pub const DRDY_MASK: u8 = 0b0000_1000;
    /// Disable I2C.
    pub const I2C_DISABLE: u8 = 0b0000_0100;
    /// Gyroscope LPF1 enable.
    pub const LPF1_SEL_G: u8 = 0b0000_0010;
}

/// CTRL5_C register bits.
pub mod ctrl5_c {
    /// Accelerometer ultra-low-power mode.
    pub const XL_ULP_EN: u8 = 0b1000_0000;
    /// Gyroscope self-test.
    pub const ST_G_MASK: u8 = 0b0000_1100;
    /// Gyroscope self-test shift.
    pub const ST_G_SHIFT: u8 = 2;
    /// Accelerometer self-test.
    pub const ST_XL_MASK: u8 = 0b0000_0011;
    /// Accelerometer self-test shift.
    pub const ST_XL_SHIFT: u8 = 0;
}

/// CTRL6_C register bits.
pub mod ctrl6_c {
    /// Accelerometer high-performance disable.
    pub const XL_HM_MODE: u8 = 0b0001_0000;
    /// Gyroscope LPF1 bandwidth.
    pub const FTYPE_MASK: u8 = 0b0000_0111;
}

/// CTRL7_G register bits.
pub mod ctrl7_g {
    /// Gyroscope high-performance disable.
    pub const G_HM_MODE: u8 = 0b1000_0000;
    /// Gyroscope high-pass enable.
    pub const HP_EN_G: u8 = 0b0100_0000;
    /// Gyroscope high-pass cutoff.
    pub const HPM_G_MASK: u8 = 0b0011_0000;
    /// Gyroscope high-pass cutoff shift.
    pub const HPM_G_SHIFT: u8 = 4;
}

/// CTRL8_XL register bits.
pub mod ctrl8_xl {
    /// Accelerometer high-pass / LPF2 cutoff.
    pub const HPCF_XL_MASK: u8 = 0b1110_0000;
    /// Cutoff shift.
    pub const HPCF_XL_SHIFT: u8 = 5;
    /// High-pass reference mode.
    pub const HP_REF_MODE_XL: u8 = 0b0001_0000;
    /// Fast settling.
    pub const FASTSETTL_MODE_XL: u8 = 0b0000_1000;
    /// Slope / high-pass selection on the output.
    pub const HP_SLOPE_XL_EN: u8 = 0b0000_0100;
    /// LPF2 on 6D.
    pub const LOW_PASS_ON_6D: u8 = 0b0000_0001;
}

/// CTRL9_XL register bits.
pub mod ctrl9_xl {
    /// Disable the MIPI I3C interface.
    pub const I3C_DISABLE: u8 = 0b0000_0010;
}

/// WAKE_UP_SRC register bits.
pub mod wake_up_src {
    /// Sleep change detected.
    pub const SLEEP_CHANGE_IA: u8 = 0b0100_0000;
    /// Free fall detected.
    pub const FF_IA: u8 = 0b0010_0000;
    /// Sleep state.
    pub const SLEEP_STATE: u8 = 0b0001_0000;
    /// Wake-up detected.
    pub const WU_IA: u8 = 0b0000_1000;
}

/// TAP_SRC register bits.
pub mod tap_src {
    /// Any tap event.
    pub const TAP_IA: u8 = 0b0100_0000;
    /// Single tap.
    pub const SINGLE_TAP: u8 = 0b0010_0000;
    /// Double tap.
    pub const DOUBLE_TAP: u8 = 0b0001_0000;
    /// Tap sign.
    pub const TAP_SIGN: u8 = 0b0000_1000;
}

/// D6D_SRC register bits.
pub mod d6d_src {
    /// Orientation change.
    pub const D6D_IA: u8 = 0b0100_0000;
    /// Z high.
    pub const ZH: u8 = 0b0010_0000;
    /// Z low.
    pub const ZL: u8 = 0b0001_0000;
    /// Y high.
    pub const YH: u8 = 0b0000_1000;
    /// Y low.
    pub const YL: u8 = 0b0000_0100;
    /// X high.
    pub const XH: u8 = 0b0000_0010;
    /// X low.
    pub const XL: u8 = 0b0000_0001;
}

/// STATUS_REG register bits.
pub mod status_reg {
    /// Temperature data available.
    pub const TDA: u8 = 0b0000_0100;
    /// Gyroscope data available.
    pub const GDA: u8 = 0b0000_0010;
    /// Accelerometer data available.
    pub const XLDA: u8 = 0b0000_0001;
}

/// EMB_FUNC_STATUS_MAINPAGE register bits.
pub mod emb_func_status_mainpage {
    /// Tilt detected.
    pub const IS_TILT: u8 = 0b0001_0000;
    /// Step detected.
    pub const IS_STEP_DET: u8 = 0b0000_1000;
}

/// FIFO_STATUS2 register bits.
pub mod fifo_status2 {
    /// Watermark reached.
    pub const WTM_IA: u8 = 0b1000_0000;
    /// Overrun.
    pub const OVR_IA: u8 = 0b0100_0000;
    /// Full at the next ODR.
    pub const FULL_IA: u8 = 0b0010_0000;
    /// BDR counter threshold reached.
    pub const COUNTER_BDR_IA: u8 = 0b0001_0000;
    /// Latched overrun.
    pub const OVR_LATCHED: u8 = 0b0000_1000;
    /// Unread word count bits 9:8.
    pub const DIFF_FIFO_HIGH_MASK: u8 = 0b0000_0011;
}

/// TAP_CFG0 register bits.
pub mod tap_cfg0 {
    /// Clear latched interrupts on read.
    pub const INT_CLR_ON_READ: u8 = 0b0100_0000;
    /// Tap on X.
    pub const TAP_X_EN: u8 = 0b0000_1000;
    /// Tap on Y.
    pub const TAP_Y_EN: u8 = 0b0000_0100;
    /// Tap on Z.
    pub const TAP_Z_EN: u8 = 0b0000_0010;
    /// Latched interrupts.
    pub const LIR: u8 = 0b0000_0001;
}

/// TAP_CFG1 register bits.
pub mod tap_cfg1 {
    /// X tap threshold.
    pub const TAP_THS_X_MASK: u8 = 0b0001_1111;
}

/// TAP_CFG2 register bits.
pub mod tap_cfg2 {
    /// Global embedded interrupt enable.
    pub const INTERRUPTS_ENABLE: u8 = 0b1000_0000;
    /// Inactivity mode.
    pub const INACT_EN_MASK: u8 = 0b0110_0000;
    /// Inactivity mode shift.
    pub const INACT_EN_SHIFT: u8 = 5;
}

/// TAP_THS_6D register bits.
pub mod tap_ths_6d {
    /// 4D detection.
    pub const D4D_EN: u8 = 0b1000_0000;
    /// 6D threshold.
    pub const SIXD_THS_MASK: u8 = 0b0110_0000;
    /// 6D threshold shift.
    pub const SIXD_THS_SHIFT: u8 = 5;
}

/// INT_DUR2 register bits.
pub mod int_dur2 {
    /// Double-tap duration.
    pub const DUR_MASK: u8 = 0b1111_0000;
    /// Duration shift.
    pub const DUR_SHIFT: u8 = 4;
    /// Quiet time.
    pub const QUIET_MASK: u8 = 0b0000_1100;
    /// Quiet shift.
    pub const QUIET_SHIFT: u8 = 2;
    /// Shock time.
    pub const SHOCK_MASK: u8 = 0b0000_0011;
}

/// WAKE_UP_THS register bits.
pub mod wake_up_ths {
    /// Double tap enable.
    pub const SINGLE_DOUBLE_TAP: u8 = 0b1000_0000;
    /// Wake-up threshold.
    pub const WK_THS_MASK: u8 = 0b0011_1111;
}

/// WAKE_UP_DUR register bits.
pub mod wake_up_dur {
    /// Free-fall duration bit 5.
    pub const FF_DUR5: u8 = 0b1000_0000;
    /// Wake-up duration.
    pub const WAKE_DUR_MASK: u8 = 0b0110_0000;
    /// Wake-up duration shift.
    pub const WAKE_DUR_SHIFT: u8 = 5;
    /// Sleep duration.
    pub const SLEEP_DUR_MASK: u8 = 0b0000_1111;
}

/// FREE_FALL register bits.
pub mod free_fall {
    /// Free-fall duration bits 4:0.
    pub const FF_DUR_MASK: u8 = 0b1111_1000;
    /// Duration shift.
    pub const FF_DUR_SHIFT: u8 = 3;
    /// Free-fall threshold.
    pub const FF_THS_MASK: u8 = 0b0000_0111;
}

/// MD1_CFG and MD2_CFG share one layout.
pub mod md_cfg {
    /// Activity/inactivity change.
    pub const SLEEP_CHANGE: u8 = 0b1000_0000;
    /// Single tap.
    pub const SINGLE_TAP: u8 = 0b0100_0000;
    /// Wake-up.
    pub const WU: u8 = 0b0010_0000;
    /// Free fall.
    pub const FF: u8 = 0b0001_0000;
    /// Double tap.
    pub const DOUBLE_TAP: u8 = 0b0000_1000;
    /// 6D orientation.
    pub const D6D: u8 = 0b0000_0100;
    /// Embedded-function events.
    pub const EMB_FUNC: u8 = 0b0000_0010;
}

/// I3C_BUS_AVB register bits.
pub mod i3c_bus_avb {
    /// Bus available time selection.
    pub const I3C_BUS_AVB_SEL_MASK: u8 = 0b0001_1000;
}

/// FIFO_DATA_OUT_TAG register bits.
pub mod fifo_data_out_tag {
    /// Sensor tag.
    pub const TAG_SENSOR_MASK: u8 = 0b1111_1000;
    /// Tag shift.
    pub const TAG_SENSOR_SHIFT: u8 = 3;
}

/// EMB_FUNC_EN_A register bits.
pub mod emb_func_en_a {
    /// Significant motion.
    pub const SIGN_MOTION_EN: u8 = 0b0010_0000;
    /// Tilt.
    pub const TILT_EN: u8 = 0b0001_0000;
    /// Pedometer.
    pub const PEDO_EN: u8 = 0b0000_1000;
}

/// EMB_FUNC_EN_B register bits.
pub mod emb_func_en_b {
    /// Advanced pedometer (false-step rejection).
    pub const PEDO_ADV_EN: u8 = 0b0001_0000;
}

/// EMB_FUNC_INT1 and EMB_FUNC_INT2 share one layout.
pub mod emb_func_int {
    /// Finite-state machine.
    pub const FSM_LC: u8 = 0b1000_0000;
    /// Significant motion.
    pub const SIG_MOT: u8 = 0b0010_0000;
    /// Tilt.
    pub const TILT: u8 = 0b0001_0000;
    /// Step detector.
    pub const STEP_DETECTOR: u8 = 0b0000_1000;
}

/// EMB_FUNC_SRC register bits.
pub mod emb_func_src {
    /// Reset the step counter.
    pub const PEDO_RST_STEP: u8 = 0b1000_0000;
    /// Step detected.
    pub const STEP_DETECTED: u8 = 0b0010_0000;
}
