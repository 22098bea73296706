//! Error type shared by the ST MEMS drivers.

/// Error type for LSM6DSO and LIS2MDL operations.
///
/// The first failing register transaction aborts an operation; nothing is retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus communication error (I2C, SPI, etc.).
    Bus,
    /// Sensor not responding or not present.
    NotPresent,
    /// WHO_AM_I does not match the expected device.
    WrongDevice,
    /// The operation requires `init` to have run first.
    NotReady,
    /// Parameter out of range, or an unknown code read back from a register.
    InvalidData,
    /// Operation not supported by the device or driver.
    Unsupported,
}
