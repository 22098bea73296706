//! LSM6DSO 3-axis accelerometer and 3-axis gyroscope.

pub(crate) mod config;
pub(crate) mod device;
pub(crate) mod driver;
pub(crate) mod events;
pub(crate) mod fifo;
pub mod register;

pub use config::{
    AccelFilter, AccelFullScale, AccelOutputDataRate, AccelPowerMode, DataReadyMode, GyroFilter,
    GyroFullScale, GyroHighPassCutoff, GyroOutputDataRate, GyroPowerMode, Lsm6dsoConfig,
    SelfTestMode,
};
pub use driver::{Lsm6dso, Lsm6dsoI2c, Lsm6dsoSpi};
pub use events::{
    EventStatus, FreeFallThreshold, InactivityMode, SixDDirection, SixDOrientation,
    SixDThreshold,
};
pub use fifo::{
    BatchDataRate, FIFO_WORD_BYTES, FifoMode, FifoStatus, FifoTag, FifoWord, FifoWordIterator,
};
