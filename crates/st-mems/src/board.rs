//! Board-level pairing of the LSM6DSO and LIS2MDL.
//!
//! `MemsBoard` brings both parts up in a fixed order and collects one
//! calibrated sample of each into a [`SensorReport`].

use crate::data::Axes;
use crate::error::Error;
use crate::interface::Interface;
use crate::lis2mdl::Lis2mdl;
use crate::lsm6dso::Lsm6dso;

/// One accelerometer and magnetometer sample, in mg and mgauss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReport {
    /// Acceleration in mg.
    pub accelerometer: Axes,
    /// Magnetic field in mgauss.
    pub magnetometer: Axes,
}

impl SensorReport {
    /// Service identifier the report is published under.
    pub const SERVICE_ID: &'static str = "SensorService";
    /// Interval between reports.
    pub const REPORT_PERIOD_MS: u32 = 10_000;

    /// Key/value pairs, accelerometer axes first.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, i32)> {
        let Self {
            accelerometer: a,
            magnetometer: m,
        } = *self;
        [
            ("accelerometer_x", a.x),
            ("accelerometer_y", a.y),
            ("accelerometer_z", a.z),
            ("magnetometer_x", m.x),
            ("magnetometer_y", m.y),
            ("magnetometer_z", m.z),
        ]
        .into_iter()
    }
}

/// LSM6DSO accelerometer plus LIS2MDL magnetometer.
pub struct MemsBoard<A, M> {
    imu: Lsm6dso<A>,
    mag: Lis2mdl<M>,
}

impl<A, M> MemsBoard<A, M>
where
    A: Interface,
    M: Interface,
{
    /// Pairs two drivers; nothing is written until [`Self::init`].
    pub const fn new(imu: Lsm6dso<A>, mag: Lis2mdl<M>) -> Self {
        Self { imu, mag }
    }

    /// Verifies, initializes and enables the accelerometer, then the magnetometer.
    pub async fn init(&mut self) -> Result<(), Error> {
        crate::mems_init_sequence!(
            self.imu => enable_accel,
            self.mag => enable,
        )?;
        #[cfg(feature = "defmt")]
        defmt::debug!("mems board: accelerometer and magnetometer up");
        Ok(())
    }

    /// Reads one calibrated sample from each sensor.
    pub async fn read_report(&mut self) -> Result<SensorReport, Error> {
        let accelerometer = self.imu.read_accel().await?;
        let magnetometer = self.mag.read().await?;
        Ok(SensorReport {
            accelerometer,
            magnetometer,
        })
    }

    /// Accelerometer/gyroscope driver.
    pub fn imu(&mut self) -> &mut Lsm6dso<A> {
        &mut self.imu
    }

    /// Magnetometer driver.
    pub fn mag(&mut self) -> &mut Lis2mdl<M> {
        &mut self.mag
    }

    /// Splits the board back into its drivers.
    pub fn release(self) -> (Lsm6dso<A>, Lis2mdl<M>) {
        (self.imu, self.mag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::BusKind;
    use crate::lis2mdl::register::{self as mag_reg, I2C_ADDRESS_FLAG, cfg_reg_a};
    use crate::lsm6dso::Lsm6dsoConfig;
    use crate::lsm6dso::register::{self as imu_reg, ctrl1_xl};
    use crate::testing::MockInterface;
    use futures::executor::block_on;

    fn mag_addr(reg: mag_reg::Register) -> u8 {
        reg.addr() | I2C_ADDRESS_FLAG
    }

    fn board(imu: MockInterface, mag: MockInterface) -> MemsBoard<MockInterface, MockInterface> {
        MemsBoard::new(
            Lsm6dso::from_interface(imu, None, None, Lsm6dsoConfig::new(), BusKind::I2c),
            Lis2mdl::from_interface(mag, BusKind::I2c),
        )
    }

    fn present() -> (MockInterface, MockInterface) {
        (
            MockInterface::default()
                .with_reg(imu_reg::Register::WhoAmI.addr(), imu_reg::WHO_AM_I_VALUE),
            MockInterface::default()
                .with_reg(mag_addr(mag_reg::Register::WhoAmI), mag_reg::WHO_AM_I_VALUE),
        )
    }

    #[test]
    fn init_enables_accel_and_mag() {
        let (imu, mag) = present();
        let mut board = board(imu, mag);

        block_on(board.init()).expect("init");

        assert!(board.imu().accel_enabled());
        assert!(!board.imu().gyro_enabled());
        assert!(board.mag().is_enabled());
        let (mut imu, mut mag) = board.release();
        let ctrl1 = block_on(imu.read_register(imu_reg::Register::Ctrl1Xl.addr())).expect("ctrl1");
        assert_ne!(ctrl1 & ctrl1_xl::ODR_MASK, 0);
        let cfg_a = block_on(mag.read_register(mag_reg::Register::CfgRegA.addr())).expect("cfg a");
        assert_eq!(cfg_a & cfg_reg_a::MD_MASK, cfg_reg_a::MD_CONTINUOUS);
    }

    #[test]
    fn wrong_magnetometer_stops_after_accel() {
        let (imu, _) = present();
        let mut board = board(imu, MockInterface::default());

        assert_eq!(block_on(board.init()), Err(Error::WrongDevice));
        assert!(board.imu().accel_enabled());
        assert!(!board.mag().is_initialized());
    }

    #[test]
    fn missing_accel_skips_magnetometer() {
        let (_, mag) = present();
        let mut board = board(MockInterface::failing(), mag);

        assert_eq!(block_on(board.init()), Err(Error::Bus));
        assert!(!board.mag().is_initialized());
    }

    #[test]
    fn report_carries_calibrated_axes() {
        let base = mag_addr(mag_reg::Register::OutxLReg);
        let imu = MockInterface::default()
            .with_reg(imu_reg::Register::OutxLA.addr(), 0xE8)
            .with_reg(imu_reg::Register::OutxLA.addr() + 1, 0x03);
        let mag = MockInterface::default()
            .with_reg(base + 4, 0xE8)
            .with_reg(base + 5, 0x03);
        let mut board = board(imu, mag);

        let report = block_on(board.read_report()).expect("report");

        assert_eq!(report.accelerometer, Axes { x: 61, y: 0, z: 0 });
        assert_eq!(report.magnetometer, Axes { x: 0, y: 0, z: 1500 });
    }

    #[test]
    fn properties_keep_accelerometer_first() {
        let report = SensorReport {
            accelerometer: Axes { x: 1, y: 2, z: 3 },
            magnetometer: Axes { x: -4, y: -5, z: -6 },
        };

        let mut props = report.properties();
        assert_eq!(props.next(), Some(("accelerometer_x", 1)));
        assert_eq!(props.nth(2), Some(("magnetometer_x", -4)));
        assert_eq!(props.last(), Some(("magnetometer_z", -6)));
        assert_eq!(SensorReport::SERVICE_ID, "SensorService");
        assert_eq!(SensorReport::REPORT_PERIOD_MS, 10_000);
    }
}
