//! Async `#![no_std]` drivers for two STMicroelectronics MEMS sensors:
//! the [LSM6DSO](https://www.st.com/en/mems-and-sensors/lsm6dso.html)
//! 6-axis IMU and the
//! [LIS2MDL](https://www.st.com/en/mems-and-sensors/lis2mdl.html)
//! 3-axis magnetometer.
//!
//! Both drivers sit on `embedded-hal-async` I2C or SPI and convert raw
//! counts to mg, mdps and mgauss with integer math. Requested rates and
//! ranges are rounded up to the nearest register setting.
//!
//! # Quick start (I2C)
//!
//! ```rust,no_run
//! use ph_st_mems::{AccelOutputDataRate, Lis2mdlI2c, Lsm6dsoI2c};
//! # use embedded_hal_async::i2c::I2c;
//! #
//! # async fn example<A: I2c, M: I2c>(imu_bus: A, mag_bus: M) -> Result<(), ph_st_mems::Error> {
//! let mut imu: Lsm6dsoI2c<A> = Lsm6dsoI2c::new_i2c(imu_bus, None, None);
//! imu.verify_device().await?;
//! imu.init().await?;
//! imu.set_accel_output_data_rate(AccelOutputDataRate::Hz104).await?;
//! imu.enable_accel().await?;
//! let accel = imu.read_accel().await?;
//!
//! let mut mag = Lis2mdlI2c::new_i2c(mag_bus);
//! mag.init().await?;
//! mag.enable().await?;
//! let field = mag.read().await?;
//! # let _ = (accel, field);
//! # Ok(())
//! # }
//! ```
//!
//! # Deferred rate changes
//!
//! While the accelerometer or gyroscope is disabled, a new output data rate
//! is only remembered. `enable_accel`/`enable_gyro` write it, and disabling
//! reads the running rate back so the next enable resumes it.
//!
//! # Embedded functions
//!
//! The LSM6DSO event engine (free-fall, wake-up, inactivity, single and double
//! tap, 6D orientation, tilt and pedometer) is configured through the driver
//! and routed to INT1 or INT2. [`Lsm6dso::event_status`] collects every event
//! that is both routed and flagged.
//!
//! # FIFO
//!
//! The LSM6DSO FIFO stores 7-byte tagged words. Read them one at a time with
//! `read_fifo_word` or decode a burst with [`FifoWordIterator`].
//!
//! # Board pairing
//!
//! [`MemsBoard`] owns one of each sensor, brings them up with
//! [`mems_init_sequence!`] and collects a [`SensorReport`].
//!
//! # Fixed-point conversions
//!
//! Enable the `fixed` feature to convert raw readings into g, dps and gauss
//! using `I32F32` integer math.

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

#[cfg(feature = "fixed")]
extern crate fixed as fixed_crate;

mod board;
mod capabilities;
mod data;
mod error;
mod interface;
mod interrupt;
pub mod lis2mdl;
pub mod lsm6dso;
mod macros;

#[cfg(test)]
mod testing;

// Interface layer
pub use interface::{BusKind, Interface, LIS2MDL_I2C_ADDRESS, Lsm6dsoAddress};
pub use interface::{I2cConfig, I2cInterface};
pub use interface::{SpiConfig, SpiInterface};

// Configuration
pub use lis2mdl::{MagFilter, MagOutputDataRate, MagPowerMode};
pub use lsm6dso::{
    AccelFilter, AccelFullScale, AccelOutputDataRate, AccelPowerMode, DataReadyMode, GyroFilter,
    GyroFullScale, GyroHighPassCutoff, GyroOutputDataRate, GyroPowerMode, Lsm6dsoConfig,
    SelfTestMode,
};

// Driver
pub use board::{MemsBoard, SensorReport};
pub use lis2mdl::{Lis2mdl, Lis2mdlI2c, Lis2mdlSpi};
pub use lsm6dso::{Lsm6dso, Lsm6dsoI2c, Lsm6dsoSpi};

// Data types
pub use data::{Axes, AxesRaw, ScaleFactor, accel_mg_per_lsb, gyro_mdps_per_lsb, mag_mgauss_per_lsb};
pub use lsm6dso::{
    BatchDataRate, FIFO_WORD_BYTES, FifoMode, FifoStatus, FifoTag, FifoWord, FifoWordIterator,
};

// Features
pub use capabilities::Capabilities;
pub use error::Error;
pub use interrupt::{EventWaitError, InterruptPin, InterruptWaitError};
pub use lsm6dso::{
    EventStatus, FreeFallThreshold, InactivityMode, SixDDirection, SixDOrientation,
    SixDThreshold,
};

// Fixed-point conversions (feature-gated)
#[cfg(feature = "fixed")]
pub use data::fixed::{AxesFixed, Fixed, accel_to_g, gyro_to_dps, mag_to_gauss};
