extern crate std;

use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use crate::error::Error;
use crate::interface::{Interface, sealed};

/// Register-file mock with an optional second page.
///
/// When `bank_select` holds `bank_value`, every address other than the select
/// register itself is served from `bank_regs`.
#[derive(Clone, Debug)]
pub(crate) struct MockInterface {
    regs: [u8; 256],
    bank_regs: [u8; 256],
    bank: Option<(u8, u8)>,
    writes: Vec<(u8, u8)>,
    self_clearing: Option<SelfClearing>,
    failing_read: Option<(u8, Error)>,
    failing_write: Option<(u8, u8, Error)>,
    fail: bool,
}

/// A bit the device drops on its own after a number of reads.
#[derive(Clone, Copy, Debug)]
struct SelfClearing {
    reg: u8,
    mask: u8,
    reads: u32,
    pending: u32,
}

impl Default for MockInterface {
    fn default() -> Self {
        Self {
            regs: [0u8; 256],
            bank_regs: [0u8; 256],
            bank: None,
            writes: Vec::new(),
            self_clearing: None,
            failing_read: None,
            failing_write: None,
            fail: false,
        }
    }
}

impl MockInterface {
    pub(crate) fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.set_reg(reg, value);
        self
    }

    pub(crate) fn with_bank(mut self, select: u8, value: u8) -> Self {
        self.bank = Some((select, value));
        self
    }

    pub(crate) fn with_bank_reg(mut self, reg: u8, value: u8) -> Self {
        self.bank_regs[reg as usize] = value;
        self
    }

    /// Once a write sets `mask` in `reg`, the bits clear on the `reads`-th read after it.
    pub(crate) fn with_self_clearing(mut self, reg: u8, mask: u8, reads: u32) -> Self {
        self.self_clearing = Some(SelfClearing {
            reg,
            mask,
            reads,
            pending: 0,
        });
        self
    }

    /// Reads of `reg` fail with `error`.
    pub(crate) fn with_failing_read(mut self, reg: u8, error: Error) -> Self {
        self.failing_read = Some((reg, error));
        self
    }

    /// Writes of `value` to `reg` fail with `error` and leave the register untouched.
    pub(crate) fn with_failing_write(mut self, reg: u8, value: u8, error: Error) -> Self {
        self.failing_write = Some((reg, value, error));
        self
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn set_reg(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
    }

    pub(crate) fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    pub(crate) fn bank_reg(&self, reg: u8) -> u8 {
        self.bank_regs[reg as usize]
    }

    pub(crate) fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    pub(crate) fn clear_writes(&mut self) {
        self.writes.clear();
    }

    fn slot(&mut self, reg: u8) -> &mut u8 {
        match self.bank {
            Some((select, value)) if reg != select && self.regs[select as usize] == value => {
                &mut self.bank_regs[reg as usize]
            }
            _ => &mut self.regs[reg as usize],
        }
    }

    fn check(&self) -> Result<(), Error> {
        if self.fail { Err(Error::Bus) } else { Ok(()) }
    }
}

impl Interface for MockInterface {
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        self.check()?;
        if let Some((_, error)) = self.failing_read.filter(|&(failing, _)| failing == reg) {
            return Err(error);
        }
        let clearing = self.self_clearing.as_mut();
        if let Some(clear) = clearing.filter(|c| c.reg == reg && c.pending > 0) {
            clear.pending -= 1;
            if clear.pending == 0 {
                let mask = clear.mask;
                *self.slot(reg) &= !mask;
            }
        }
        Ok(*self.slot(reg))
    }

    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        self.check()?;
        for (offset, value) in buffer.iter_mut().enumerate() {
            *value = *self.slot(reg.wrapping_add(offset as u8));
        }
        Ok(())
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.check()?;
        let failing = self.failing_write.filter(|&(r, v, _)| r == reg && v == value);
        if let Some((_, _, error)) = failing {
            return Err(error);
        }
        *self.slot(reg) = value;
        self.writes.push((reg, value));
        let clearing = self.self_clearing.as_mut();
        if let Some(clear) = clearing.filter(|c| c.reg == reg && value & c.mask != 0) {
            clear.pending = clear.reads;
        }
        Ok(())
    }
}

impl sealed::Sealed for MockInterface {}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
    pub(crate) last_ns: Option<u32>,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.last_ns = Some(ns);
    }
}

/// I2C bus with one register file per responding address; others NACK.
#[derive(Debug, Default)]
pub(crate) struct MockI2c {
    devices: Vec<(u8, [u8; 256])>,
}

impl MockI2c {
    pub(crate) fn with_device(mut self, address: u8, regs: &[(u8, u8)]) -> Self {
        let mut file = [0u8; 256];
        for &(reg, value) in regs {
            file[reg as usize] = value;
        }
        self.devices.push((address, file));
        self
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let regs = self
            .devices
            .iter_mut()
            .find(|device| device.0 == address)
            .map(|device| &mut device.1)
            .ok_or(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))?;
        let mut pointer = None::<u8>;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        match pointer {
                            None => pointer = Some(byte),
                            Some(reg) => {
                                regs[reg as usize] = byte;
                                pointer = Some(reg.wrapping_add(1));
                            }
                        }
                    }
                }
                Operation::Read(buffer) => {
                    let mut reg = pointer.unwrap_or(0);
                    for value in buffer.iter_mut() {
                        *value = regs[reg as usize];
                        reg = reg.wrapping_add(1);
                    }
                    pointer = Some(reg);
                }
            }
        }
        Ok(())
    }
}
