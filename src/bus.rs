//! [`EepromBus`] over an `embedded-hal` I2C bus.
//!
//! 24-series parts take the memory address as the first bytes of a write,
//! most significant byte first. A page write is those address bytes directly
//! followed by the data; a random read is the address bytes, a repeated start
//! and then the read.

use crate::traits::{AsyncEepromBus, EepromBus};
use embedded_hal::i2c::{I2c, Operation};
use embedded_hal_async::i2c::I2c as AsyncI2c;

pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C> I2cBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Big-endian memory address, trimmed to `address_width` bytes. Widths past
/// four are clamped since the address is a `u32`.
fn address_bytes(mem_address: u32, address_width: u8) -> ([u8; 4], usize) {
    let width = usize::from(address_width).min(4);
    (mem_address.to_be_bytes(), 4 - width)
}

impl<I2C: I2c> EepromBus for I2cBus<I2C> {
    type Error = I2C::Error;

    fn write(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        data: &[u8],
    ) -> Result<(), I2C::Error> {
        let (addr, start) = address_bytes(mem_address, address_width);
        // Adjacent writes go out without a repeated start.
        self.i2c.transaction(
            bus_address,
            &mut [Operation::Write(&addr[start..]), Operation::Write(data)],
        )
    }

    fn read(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        buf: &mut [u8],
    ) -> Result<(), I2C::Error> {
        let (addr, start) = address_bytes(mem_address, address_width);
        self.i2c.write_read(bus_address, &addr[start..], buf)
    }
}

impl<I2C: AsyncI2c> AsyncEepromBus for I2cBus<I2C> {
    type Error = I2C::Error;

    async fn write(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        data: &[u8],
    ) -> Result<(), I2C::Error> {
        let (addr, start) = address_bytes(mem_address, address_width);
        self.i2c
            .transaction(
                bus_address,
                &mut [Operation::Write(&addr[start..]), Operation::Write(data)],
            )
            .await
    }

    async fn read(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        buf: &mut [u8],
    ) -> Result<(), I2C::Error> {
        let (addr, start) = address_bytes(mem_address, address_width);
        self.i2c.write_read(bus_address, &addr[start..], buf).await
    }
}
