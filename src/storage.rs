//! `embedded-storage` traits, so the EEPROM can back anything written against
//! them. Empty slices are no-ops here, as those traits expect.

use embedded_hal::delay::DelayNs;
use embedded_storage::{ReadStorage, Storage};

use crate::comms::Eeprom;
use crate::error::Error;
use crate::traits::EepromBus;

impl<BUS, D, const FILL_BUF: usize> ReadStorage for Eeprom<BUS, D, FILL_BUF>
where
    BUS: EepromBus,
    D: DelayNs,
{
    type Error = Error<BUS::Error>;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if bytes.is_empty() {
            return Ok(());
        }
        Eeprom::read(self, offset, bytes)
    }

    fn capacity(&self) -> usize {
        usize::try_from(self.geometry().memory_size).unwrap_or(usize::MAX)
    }
}

impl<BUS, D, const FILL_BUF: usize> Storage for Eeprom<BUS, D, FILL_BUF>
where
    BUS: EepromBus,
    D: DelayNs,
{
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.is_empty() {
            return Ok(());
        }
        Eeprom::write(self, offset, bytes)
    }
}
