//! Driver for paged serial EEPROMs (24-series and compatibles).
//!
//! The chip only writes atomically within a page, and needs its write-cycle
//! time after each page write before it answers again. [`Eeprom`] hides both:
//! a logical write is split into page-confined transactions, each followed by
//! a delay of [`WRITE_CYCLE_DELAY_MS`] (or the per-device override).
//!
//! The bus side is the [`EepromBus`] trait. [`I2cBus`] implements it on top of
//! any `embedded-hal` I2C bus; anything else that can move a byte range at a
//! memory address works too.
//!
//! ```ignore
//! let bus = I2cBus::new(i2c);
//! let mut eeprom = Eeprom::new(bus, delay, Geometry::at24c256(DEFAULT_BUS_ADDRESS));
//! eeprom.init()?;
//! eeprom.write(0x0100, b"settings")?;
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod async_comms;
pub mod bus;
pub mod comms;
pub mod config;
pub mod error;
pub mod paging;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod mock;

pub use async_comms::AsyncEeprom;
pub use bus::I2cBus;
pub use comms::Eeprom;
pub use config::{Geometry, DEFAULT_BUS_ADDRESS, WRITE_CYCLE_DELAY_MS};
pub use error::Error;
pub use traits::{AsyncEepromBus, EepromBus};
