//! FIFO batching and tagged-word readout.

use super::config::rate_code;
use super::device::DeviceCore;
use super::register::{
    Register, fifo_ctrl2, fifo_ctrl3, fifo_ctrl4, fifo_data_out_tag, fifo_status2, int_ctrl,
};
use crate::data::{Axes, AxesRaw};
use crate::error::Error;
use crate::interface::Interface;

const WATERMARK_MAX: u16 = 511;

/// Bytes per FIFO word: one tag byte plus six data bytes.
pub const FIFO_WORD_BYTES: usize = 7;

/// FIFO operating mode (FIFO_CTRL4.FIFO_MODE).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// FIFO disabled, contents cleared.
    Bypass,
    /// Collect until full, then stop.
    Fifo,
    /// Continuous until a trigger, then FIFO mode.
    StreamToFifo,
    /// Bypass until a trigger, then continuous.
    BypassToStream,
    /// Continuous, oldest samples overwritten.
    Stream,
    /// Bypass until a trigger, then FIFO mode. Not accepted by `set_fifo_mode`.
    BypassToFifo,
}

impl FifoMode {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Bypass => 0b000,
            Self::Fifo => 0b001,
            Self::StreamToFifo => 0b011,
            Self::BypassToStream => 0b100,
            Self::Stream => 0b110,
            Self::BypassToFifo => 0b111,
        }
    }

    const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0b000 => Self::Bypass,
            0b001 => Self::Fifo,
            0b011 => Self::StreamToFifo,
            0b100 => Self::BypassToStream,
            0b110 => Self::Stream,
            0b111 => Self::BypassToFifo,
            _ => return None,
        })
    }
}

/// Batch data rate for one sensor (FIFO_CTRL3 nibble).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatchDataRate {
    /// Sensor not written to the FIFO.
    NotBatched,
    /// 12.5 Hz.
    Hz12_5,
    /// 26 Hz.
    Hz26,
    /// 52 Hz.
    Hz52,
    /// 104 Hz.
    Hz104,
    /// 208 Hz.
    Hz208,
    /// 417 Hz.
    Hz417,
    /// 833 Hz.
    Hz833,
    /// 1667 Hz.
    Hz1667,
    /// 3333 Hz.
    Hz3333,
    /// 6667 Hz.
    Hz6667,
    /// 6.5 Hz.
    Hz6_5,
}

impl BatchDataRate {
    /// Picks the smallest batch rate at or above `hz_milli`; zero disables batching.
    pub const fn from_hz_milli(hz_milli: u32) -> Self {
        if hz_milli == 0 {
            return Self::NotBatched;
        }
        match Self::from_bits(rate_code(hz_milli)) {
            Some(rate) => rate,
            None => Self::Hz6667,
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::NotBatched => 0,
            Self::Hz12_5 => 1,
            Self::Hz26 => 2,
            Self::Hz52 => 3,
            Self::Hz104 => 4,
            Self::Hz208 => 5,
            Self::Hz417 => 6,
            Self::Hz833 => 7,
            Self::Hz1667 => 8,
            Self::Hz3333 => 9,
            Self::Hz6667 => 10,
            Self::Hz6_5 => 11,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::NotBatched,
            1 => Self::Hz12_5,
            2 => Self::Hz26,
            3 => Self::Hz52,
            4 => Self::Hz104,
            5 => Self::Hz208,
            6 => Self::Hz417,
            7 => Self::Hz833,
            8 => Self::Hz1667,
            9 => Self::Hz3333,
            10 => Self::Hz6667,
            11 => Self::Hz6_5,
            _ => return None,
        })
    }
}

/// Sensor tag of a FIFO word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoTag {
    /// Gyroscope sample.
    Gyroscope,
    /// Accelerometer sample.
    Accelerometer,
    /// Temperature sample.
    Temperature,
    /// Timestamp.
    Timestamp,
    /// Configuration change marker.
    ConfigChange,
    /// Any other tag (compressed samples, sensor hub, step counter).
    Other(u8),
}

impl FifoTag {
    /// Decodes the sensor tag from a FIFO_DATA_OUT_TAG byte.
    pub const fn from_tag_byte(byte: u8) -> Self {
        match (byte & fifo_data_out_tag::TAG_SENSOR_MASK) >> fifo_data_out_tag::TAG_SENSOR_SHIFT {
            0x01 => Self::Gyroscope,
            0x02 => Self::Accelerometer,
            0x03 => Self::Temperature,
            0x04 => Self::Timestamp,
            0x05 => Self::ConfigChange,
            other => Self::Other(other),
        }
    }

    /// Returns the 5-bit tag value.
    pub const fn value(self) -> u8 {
        match self {
            Self::Gyroscope => 0x01,
            Self::Accelerometer => 0x02,
            Self::Temperature => 0x03,
            Self::Timestamp => 0x04,
            Self::ConfigChange => 0x05,
            Self::Other(value) => value,
        }
    }
}

/// FIFO_STATUS1/2 snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoStatus {
    /// Unread words (10 bits).
    pub unread: u16,
    /// Watermark reached.
    pub watermark: bool,
    /// Overrun.
    pub overrun: bool,
    /// FIFO full at the next ODR.
    pub full: bool,
    /// Latched overrun.
    pub overrun_latched: bool,
}

impl FifoStatus {
    pub(crate) const fn from_regs(status1: u8, status2: u8) -> Self {
        let high = (status2 & fifo_status2::DIFF_FIFO_HIGH_MASK) as u16;
        Self {
            unread: (high << 8) | status1 as u16,
            watermark: status2 & fifo_status2::WTM_IA != 0,
            overrun: status2 & fifo_status2::OVR_IA != 0,
            full: status2 & fifo_status2::FULL_IA != 0,
            overrun_latched: status2 & fifo_status2::OVR_LATCHED != 0,
        }
    }
}

/// One tagged FIFO word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoWord {
    /// Sensor tag.
    pub tag: FifoTag,
    /// Raw payload from FIFO_DATA_OUT_X_L onward.
    pub data: [u8; 6],
}

impl FifoWord {
    /// Decodes a 7-byte word (tag followed by data).
    pub const fn from_bytes(bytes: [u8; FIFO_WORD_BYTES]) -> Self {
        Self {
            tag: FifoTag::from_tag_byte(bytes[0]),
            data: [bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6]],
        }
    }

    /// Interprets the payload as three little-endian axes.
    pub const fn axes_raw(&self) -> AxesRaw {
        AxesRaw::from_le_bytes(self.data)
    }
}

/// Iterator over tagged words in a caller-provided FIFO dump.
///
/// A trailing partial word is left unparsed.
pub struct FifoWordIterator<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FifoWordIterator<'a> {
    /// Creates an iterator over `data`.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Returns the remaining unparsed bytes.
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }
}

impl Iterator for FifoWordIterator<'_> {
    type Item = FifoWord;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.offset + FIFO_WORD_BYTES;
        let chunk = self.data.get(self.offset..end)?;
        let mut bytes = [0u8; FIFO_WORD_BYTES];
        bytes.copy_from_slice(chunk);
        self.offset = end;
        Some(FifoWord::from_bytes(bytes))
    }
}

impl<I> DeviceCore<I>
where
    I: Interface,
{
    pub(crate) async fn fifo_status(&mut self) -> Result<FifoStatus, Error> {
        let mut buffer = [0u8; 2];
        self.read_regs(Register::FifoStatus1, &mut buffer).await?;
        Ok(FifoStatus::from_regs(buffer[0], buffer[1]))
    }

    pub(crate) async fn fifo_sample_count(&mut self) -> Result<u16, Error> {
        Ok(self.fifo_status().await?.unread)
    }

    pub(crate) async fn fifo_full(&mut self) -> Result<bool, Error> {
        Ok(self.read_reg(Register::FifoStatus2).await? & fifo_status2::FULL_IA != 0)
    }

    pub(crate) async fn set_fifo_full_on_int1(&mut self, enable: bool) -> Result<(), Error> {
        self.set_flag(Register::Int1Ctrl, int_ctrl::FIFO_FULL, enable)
            .await
    }

    pub(crate) async fn set_fifo_watermark(&mut self, watermark: u16) -> Result<(), Error> {
        if watermark > WATERMARK_MAX {
            #[cfg(feature = "defmt")]
            defmt::warn!("lsm6dso: FIFO watermark {=u16} out of range", watermark);
            return Err(Error::InvalidData);
        }
        self.write_reg(Register::FifoCtrl1, (watermark & 0xFF) as u8)
            .await?;
        self.set_flag(Register::FifoCtrl2, fifo_ctrl2::WTM8, watermark > 0xFF)
            .await
    }

    pub(crate) async fn set_fifo_stop_on_watermark(&mut self, enable: bool) -> Result<(), Error> {
        self.set_flag(Register::FifoCtrl2, fifo_ctrl2::STOP_ON_WTM, enable)
            .await
    }

    pub(crate) async fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Error> {
        if mode == FifoMode::BypassToFifo {
            #[cfg(feature = "defmt")]
            defmt::warn!("lsm6dso: FIFO mode {} not supported", mode);
            return Err(Error::Unsupported);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("lsm6dso: FIFO mode {}", mode);
        self.modify_reg(Register::FifoCtrl4, fifo_ctrl4::FIFO_MODE_MASK, mode.bits())
            .await
    }

    pub(crate) async fn fifo_mode(&mut self) -> Result<FifoMode, Error> {
        let value = self.read_reg(Register::FifoCtrl4).await?;
        FifoMode::from_bits(value & fifo_ctrl4::FIFO_MODE_MASK).ok_or(Error::InvalidData)
    }

    pub(crate) async fn fifo_tag(&mut self) -> Result<FifoTag, Error> {
        let byte = self.read_reg(Register::FifoDataOutTag).await?;
        Ok(FifoTag::from_tag_byte(byte))
    }

    pub(crate) async fn fifo_data(&mut self) -> Result<[u8; 6], Error> {
        let mut data = [0u8; 6];
        self.read_regs(Register::FifoDataOutXL, &mut data).await?;
        Ok(data)
    }

    /// Tag and payload in one burst.
    pub(crate) async fn read_fifo_word(&mut self) -> Result<FifoWord, Error> {
        let mut bytes = [0u8; FIFO_WORD_BYTES];
        self.read_regs(Register::FifoDataOutTag, &mut bytes).await?;
        Ok(FifoWord::from_bytes(bytes))
    }

    pub(crate) async fn fifo_accel_axes(&mut self) -> Result<Axes, Error> {
        let raw = AxesRaw::from_le_bytes(self.fifo_data().await?);
        let sensitivity = self.accel_sensitivity().await?;
        Ok(raw.scale(sensitivity))
    }

    pub(crate) async fn fifo_gyro_axes(&mut self) -> Result<Axes, Error> {
        let raw = AxesRaw::from_le_bytes(self.fifo_data().await?);
        let sensitivity = self.gyro_sensitivity().await?;
        Ok(raw.scale(sensitivity))
    }

    pub(crate) async fn set_accel_batch_rate(&mut self, rate: BatchDataRate) -> Result<(), Error> {
        self.modify_reg(
            Register::FifoCtrl3,
            fifo_ctrl3::BDR_XL_MASK,
            rate.bits() << fifo_ctrl3::BDR_XL_SHIFT,
        )
        .await
    }

    pub(crate) async fn set_gyro_batch_rate(&mut self, rate: BatchDataRate) -> Result<(), Error> {
        self.modify_reg(
            Register::FifoCtrl3,
            fifo_ctrl3::BDR_GY_MASK,
            rate.bits() << fifo_ctrl3::BDR_GY_SHIFT,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::BusKind;
    use crate::lsm6dso::config::{AccelFullScale, Lsm6dsoConfig};
    use crate::lsm6dso::register::ctrl1_xl;
    use crate::testing::MockInterface;
    use futures::executor::block_on;

    fn device(interface: MockInterface) -> DeviceCore<MockInterface> {
        DeviceCore::new(interface, Lsm6dsoConfig::new(), BusKind::I2c)
    }

    #[test]
    fn status_combines_ten_bit_count() {
        let status = FifoStatus::from_regs(0x2C, fifo_status2::WTM_IA | 0b10);
        assert_eq!(status.unread, 0x22C);
        assert!(status.watermark);
        assert!(!status.full && !status.overrun);
    }

    #[test]
    fn sample_count_reads_both_status_registers() {
        let mut core = device(
            MockInterface::default()
                .with_reg(Register::FifoStatus1.addr(), 0xFF)
                .with_reg(Register::FifoStatus2.addr(), fifo_status2::FULL_IA | 0b01),
        );

        assert_eq!(block_on(core.fifo_sample_count()), Ok(0x1FF));
        assert_eq!(block_on(core.fifo_full()), Ok(true));
    }

    #[test]
    fn watermark_splits_ninth_bit() {
        let mut core = device(MockInterface::default());

        block_on(core.set_fifo_watermark(300)).expect("watermark");

        assert_eq!(core.interface.reg(Register::FifoCtrl1.addr()), 44);
        assert_eq!(core.interface.reg(Register::FifoCtrl2.addr()), fifo_ctrl2::WTM8);

        block_on(core.set_fifo_watermark(10)).expect("watermark");
        assert_eq!(core.interface.reg(Register::FifoCtrl2.addr()), 0);

        assert_eq!(block_on(core.set_fifo_watermark(512)), Err(Error::InvalidData));
    }

    #[test]
    fn bypass_to_fifo_is_unsupported() {
        let mut core = device(MockInterface::default());

        assert_eq!(
            block_on(core.set_fifo_mode(FifoMode::BypassToFifo)),
            Err(Error::Unsupported)
        );
        assert!(core.interface.writes().is_empty());

        block_on(core.set_fifo_mode(FifoMode::Stream)).expect("stream");
        assert_eq!(block_on(core.fifo_mode()), Ok(FifoMode::Stream));
    }

    #[test]
    fn batch_rates_share_fifo_ctrl3() {
        let mut core = device(MockInterface::default());

        block_on(core.set_accel_batch_rate(BatchDataRate::from_hz_milli(100_000))).expect("xl");
        block_on(core.set_gyro_batch_rate(BatchDataRate::Hz6667)).expect("g");

        assert_eq!(core.interface.reg(Register::FifoCtrl3.addr()), 0xA4);
        assert_eq!(BatchDataRate::from_hz_milli(0), BatchDataRate::NotBatched);
    }

    #[test]
    fn fifo_full_routing_preserves_other_int1_sources() {
        let mut core = device(MockInterface::default().with_reg(Register::Int1Ctrl.addr(), int_ctrl::DRDY_XL));

        block_on(core.set_fifo_full_on_int1(true)).expect("route");

        assert_eq!(
            core.interface.reg(Register::Int1Ctrl.addr()),
            int_ctrl::DRDY_XL | int_ctrl::FIFO_FULL
        );
    }

    #[test]
    fn fifo_word_reads_tag_and_payload() {
        let mut core = device(
            MockInterface::default()
                .with_reg(Register::FifoDataOutTag.addr(), 0x02 << 3 | 0b110)
                .with_reg(Register::FifoDataOutXL.addr(), 0x10)
                .with_reg(Register::FifoDataOutXL.addr() + 5, 0x80),
        );

        let word = block_on(core.read_fifo_word()).expect("word");

        assert_eq!(word.tag, FifoTag::Accelerometer);
        assert_eq!(word.axes_raw(), AxesRaw { x: 0x10, y: 0, z: i16::MIN });
        assert_eq!(block_on(core.fifo_tag()), Ok(FifoTag::Accelerometer));
    }

    #[test]
    fn fifo_accel_axes_use_current_sensitivity() {
        let mut core = device(
            MockInterface::default()
                .with_reg(Register::Ctrl1Xl.addr(), AccelFullScale::G16.bits() << ctrl1_xl::FS_SHIFT)
                .with_reg(Register::FifoDataOutXL.addr(), 100),
        );

        let axes = block_on(core.fifo_accel_axes()).expect("axes");

        assert_eq!(axes, Axes { x: 48, y: 0, z: 0 });
    }

    #[test]
    fn iterator_skips_partial_word() {
        let buffer = [
            0x01 << 3, 1, 0, 2, 0, 3, 0, // gyro
            0x04 << 3, 0, 0, 0, 0, 0, 0, // timestamp
            0x02 << 3, 0xFF,
        ];

        let mut iter = FifoWordIterator::new(&buffer);
        let first = iter.next().expect("gyro word");
        assert_eq!(first.tag, FifoTag::Gyroscope);
        assert_eq!(first.axes_raw(), AxesRaw { x: 1, y: 2, z: 3 });
        assert_eq!(iter.next().map(|word| word.tag), Some(FifoTag::Timestamp));
        assert_eq!(iter.remaining(), 2);
        assert!(iter.next().is_none());
    }

    #[test]
    fn unknown_tags_are_preserved() {
        assert_eq!(FifoTag::from_tag_byte(0x19 << 3), FifoTag::Other(0x19));
        assert_eq!(FifoTag::Other(0x19).value(), 0x19);
    }

    #[test]
    fn stop_on_watermark_keeps_watermark_high_bit() {
        let mut core = device(MockInterface::default());
        block_on(core.set_fifo_watermark(300)).expect("watermark");

        block_on(core.set_fifo_stop_on_watermark(true)).expect("stop");
        assert_eq!(
            core.interface.reg(Register::FifoCtrl2.addr()),
            fifo_ctrl2::STOP_ON_WTM | fifo_ctrl2::WTM8
        );
        assert_eq!(core.interface.reg(Register::FifoCtrl1.addr()), 44);

        block_on(core.set_fifo_stop_on_watermark(false)).expect("run on");
        assert_eq!(core.interface.reg(Register::FifoCtrl2.addr()), fifo_ctrl2::WTM8);
    }
}
