//! Test doubles: a recording in-memory EEPROM bus, a recording delay and a
//! minimal I2C device.

use std::vec;
use std::vec::Vec;

use crate::traits::{AsyncEepromBus, EepromBus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Write { address: u32, len: usize },
    Read { address: u32, len: usize },
    Delay(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// In-memory part that rejects page-crossing writes like a real EEPROM would
/// (which would wrap within the page instead).
pub struct MockBus {
    pub memory: Vec<u8>,
    pub page_size: u32,
    pub calls: Vec<Call>,
    pub fail_on_write: Option<usize>,
    pub fail_reads: bool,
    writes: usize,
}

impl MockBus {
    pub fn new(memory_size: usize, page_size: u32) -> Self {
        Self {
            memory: vec![0xFF; memory_size],
            page_size,
            calls: Vec::new(),
            fail_on_write: None,
            fail_reads: false,
            writes: 0,
        }
    }

    /// Makes the `n`th write transaction (0-based) fail.
    pub fn failing_write(mut self, n: usize) -> Self {
        self.fail_on_write = Some(n);
        self
    }

    pub fn writes(&self) -> Vec<(u32, usize)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Write { address, len } => Some((*address, *len)),
                _ => None,
            })
            .collect()
    }
}

impl EepromBus for MockBus {
    type Error = BusFault;

    fn write(
        &mut self,
        _bus_address: u8,
        mem_address: u32,
        _address_width: u8,
        data: &[u8],
    ) -> Result<(), BusFault> {
        let n = self.writes;
        self.writes += 1;
        if self.fail_on_write == Some(n) {
            return Err(BusFault);
        }
        let end = mem_address + data.len() as u32 - 1;
        assert_eq!(
            mem_address / self.page_size,
            end / self.page_size,
            "write crosses a page boundary"
        );
        let start = mem_address as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
        self.calls.push(Call::Write {
            address: mem_address,
            len: data.len(),
        });
        Ok(())
    }

    fn read(
        &mut self,
        _bus_address: u8,
        mem_address: u32,
        _address_width: u8,
        buf: &mut [u8],
    ) -> Result<(), BusFault> {
        if self.fail_reads {
            return Err(BusFault);
        }
        let start = mem_address as usize;
        buf.copy_from_slice(&self.memory[start..start + buf.len()]);
        self.calls.push(Call::Read {
            address: mem_address,
            len: buf.len(),
        });
        Ok(())
    }
}

impl AsyncEepromBus for MockBus {
    type Error = BusFault;

    async fn write(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        data: &[u8],
    ) -> Result<(), BusFault> {
        EepromBus::write(self, bus_address, mem_address, address_width, data)
    }

    async fn read(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        buf: &mut [u8],
    ) -> Result<(), BusFault> {
        EepromBus::read(self, bus_address, mem_address, address_width, buf)
    }
}

/// Records millisecond delays.
#[derive(Default)]
pub struct MockDelay {
    pub delays: Vec<u32>,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delays.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }
}

/// Delay that logs into a call list shared with [`RecordingBus`].
pub struct RecordingDelay<'a> {
    pub calls: &'a core::cell::RefCell<Vec<Call>>,
}

impl embedded_hal::delay::DelayNs for RecordingDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.borrow_mut().push(Call::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.borrow_mut().push(Call::Delay(ms));
    }
}

/// Bus that only logs into a shared call list, so delays and transactions
/// land in a single ordered log.
pub struct RecordingBus<'a> {
    pub calls: &'a core::cell::RefCell<Vec<Call>>,
}

impl EepromBus for RecordingBus<'_> {
    type Error = BusFault;

    fn write(&mut self, _: u8, mem_address: u32, _: u8, data: &[u8]) -> Result<(), BusFault> {
        self.calls.borrow_mut().push(Call::Write {
            address: mem_address,
            len: data.len(),
        });
        Ok(())
    }

    fn read(&mut self, _: u8, mem_address: u32, _: u8, buf: &mut [u8]) -> Result<(), BusFault> {
        self.calls.borrow_mut().push(Call::Read {
            address: mem_address,
            len: buf.len(),
        });
        Ok(())
    }
}

/// Transaction seen by [`MockI2c`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cOp {
    Write(Vec<u8>),
    Read(usize),
}

/// I2C device that logs every transaction and answers reads with `response`.
#[derive(Default)]
pub struct MockI2c {
    pub transactions: Vec<(u8, Vec<I2cOp>)>,
    pub response: Vec<u8>,
}

impl embedded_hal::i2c::ErrorType for MockI2c {
    type Error = embedded_hal::i2c::ErrorKind;
}

impl embedded_hal::i2c::I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut ops = Vec::new();
        for op in operations {
            match op {
                embedded_hal::i2c::Operation::Write(bytes) => ops.push(I2cOp::Write(bytes.to_vec())),
                embedded_hal::i2c::Operation::Read(buf) => {
                    buf.copy_from_slice(&self.response[..buf.len()]);
                    ops.push(I2cOp::Read(buf.len()));
                }
            }
        }
        self.transactions.push((address, ops));
        Ok(())
    }
}

impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::transaction(self, address, operations)
    }
}
