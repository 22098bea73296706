//! Convenience macros for common driver sequences.

/// Bring up one or more sensors with the usual identity check and power-on.
///
/// For every `sensor => enable` pair, in order:
/// 1. `verify_device`
/// 2. `init`
/// 3. the named enable method (`enable_accel`, `enable_gyro`, `enable`, ...)
///
/// `init` powers every sensor of the part down, so list each device once.
/// The first failure stops the sequence. The macro expands to a
/// `Result<(), Error>` expression and must be invoked from an async context.
///
/// ```rust,no_run
/// # use ph_st_mems::{Lis2mdlI2c, Lsm6dsoI2c, mems_init_sequence};
/// # async fn example<A, M>(imu: &mut Lsm6dsoI2c<A>, mag: &mut Lis2mdlI2c<M>) -> Result<(), ph_st_mems::Error>
/// # where
/// #     A: embedded_hal_async::i2c::I2c,
/// #     M: embedded_hal_async::i2c::I2c,
/// # {
/// mems_init_sequence!(
///     imu => enable_accel,
///     mag => enable,
/// )?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! mems_init_sequence {
    ($($sensor:expr => $enable:ident),+ $(,)?) => {{
        $(
            $sensor.verify_device().await?;
            $sensor.init().await?;
            $sensor.$enable().await?;
        )+
        Ok::<(), $crate::Error>(())
    }};
}
