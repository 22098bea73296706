//! LIS2MDL 3-axis magnetometer.
//!
//! Every register address is tagged with a bus-specific flag: 0x80 on I2C,
//! 0x40 on SPI.

pub(crate) mod config;
pub(crate) mod device;
pub(crate) mod driver;
pub mod register;

pub use config::{MagFilter, MagOutputDataRate, MagPowerMode};
pub use driver::{Lis2mdl, Lis2mdlI2c, Lis2mdlSpi};
