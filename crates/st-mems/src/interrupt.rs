//! Interrupt pin selection and wait errors.

/// Sensor interrupt output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPin {
    /// INT1.
    Int1,
    /// INT2.
    Int2,
}

/// Error returned when waiting on an interrupt pin.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptWaitError<E> {
    /// Interrupt pin was not provided to the driver.
    Missing,
    /// Underlying pin error.
    Pin(E),
}

/// Error returned by operations that wait on a pin and then talk to the device.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventWaitError<E> {
    /// A driver-level error occurred.
    Driver(crate::Error),
    /// The interrupt wait failed.
    Interrupt(InterruptWaitError<E>),
}

impl<E> From<crate::Error> for EventWaitError<E> {
    fn from(err: crate::Error) -> Self {
        Self::Driver(err)
    }
}

impl<E> From<InterruptWaitError<E>> for EventWaitError<E> {
    fn from(err: InterruptWaitError<E>) -> Self {
        Self::Interrupt(err)
    }
}
