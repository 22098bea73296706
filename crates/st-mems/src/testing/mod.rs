//! Testing infrastructure (mock register interfaces).

pub(crate) mod mock;

pub(crate) use mock::{MockDelay, MockI2c, MockInterface};
