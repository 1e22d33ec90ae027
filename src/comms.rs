use core::fmt::Debug;

use crate::config::{Geometry, WRITE_CYCLE_DELAY_MS};
use crate::error::Error;
use crate::paging::{PageChunks, Source, DEFAULT_FILL_BUFFER_LEN};
use crate::traits::EepromBus;
use embedded_hal::delay::DelayNs;

/// Blocking driver for a paged serial EEPROM.
///
/// Writes are split so that no transaction crosses a page boundary, and every
/// page write is followed by the write-cycle delay before the bus is touched
/// again.
///
/// `FILL_BUF` is the stack buffer [`Eeprom::fill`] serves its pattern from.
/// Keep it at least `page_size` to fill in one transaction per page.
pub struct Eeprom<BUS, D, const FILL_BUF: usize = DEFAULT_FILL_BUFFER_LEN> {
    bus: BUS,
    delay: D,
    geometry: Geometry,
    write_delay_ms: u32,
    cursor: u32,
    initialized: bool,
}

impl<BUS, D, const FILL_BUF: usize> Debug for Eeprom<BUS, D, FILL_BUF> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Eeprom")
            .field("geometry", &self.geometry)
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl<BUS, D> Eeprom<BUS, D>
where
    BUS: EepromBus,
    D: DelayNs,
{
    /// Creates an uninitialized driver. Call [`Eeprom::init`] before use.
    pub fn new(bus: BUS, delay: D, geometry: Geometry) -> Self {
        Self {
            bus,
            delay,
            geometry,
            write_delay_ms: WRITE_CYCLE_DELAY_MS,
            cursor: 0,
            initialized: false,
        }
    }
}

impl<BUS, D, const FILL_BUF: usize> Eeprom<BUS, D, FILL_BUF>
where
    BUS: EepromBus,
    D: DelayNs,
{
    /// Resizes the fill buffer, e.g. to the page size of parts with pages
    /// larger than the default.
    pub fn with_fill_buffer<const N: usize>(self) -> Eeprom<BUS, D, N> {
        const { assert!(N > 0, "fill buffer must not be empty") };
        Eeprom {
            bus: self.bus,
            delay: self.delay,
            geometry: self.geometry,
            write_delay_ms: self.write_delay_ms,
            cursor: self.cursor,
            initialized: self.initialized,
        }
    }

    /// Overrides the write-cycle delay for this device.
    pub fn with_write_delay_ms(mut self, ms: u32) -> Self {
        self.write_delay_ms = ms;
        self
    }

    /// Validates the geometry and marks the device ready. No bus traffic.
    pub fn init(&mut self) -> Result<(), Error<BUS::Error>> {
        if !self.geometry.is_valid() {
            warn!("Rejecting EEPROM geometry: {:?}", self.geometry);
            return Err(Error::InvalidArguments);
        }
        self.initialized = true;
        debug!("EEPROM ready: {:?}", self.geometry);
        Ok(())
    }

    /// Writes `data` starting at `address`, one page at a time.
    ///
    /// A failed page write aborts the call; pages before it stay written.
    pub fn write(&mut self, address: u32, data: &[u8]) -> Result<(), Error<BUS::Error>> {
        let len = self.check(address, data.len() as u64)?;
        self.program(address, len, Source::<FILL_BUF>::Data(data))
    }

    /// Reads `buf.len()` bytes starting at `address` in one transaction.
    pub fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), Error<BUS::Error>> {
        let len = self.check(address, buf.len() as u64)?;
        let g = self.geometry;
        self.bus
            .read(g.bus_address, address, g.address_width, buf)
            .map_err(Error::Bus)?;
        self.cursor = address + len;
        Ok(())
    }

    /// Writes `byte` to `len` bytes starting at `address`.
    pub fn fill(&mut self, address: u32, len: u32, byte: u8) -> Result<(), Error<BUS::Error>> {
        let len = self.check(address, u64::from(len))?;
        self.program(address, len, Source::<FILL_BUF>::fill(byte))
    }

    /// Writes `byte` to every cell of the device.
    pub fn fill_all(&mut self, byte: u8) -> Result<(), Error<BUS::Error>> {
        self.fill(0, self.geometry.memory_size, byte)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn write_delay_ms(&self) -> u32 {
        self.write_delay_ms
    }

    /// Address following the last byte read or written.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Gives back the bus and delay.
    pub fn release(self) -> (BUS, D) {
        (self.bus, self.delay)
    }

    fn check(&self, address: u32, len: u64) -> Result<u32, Error<BUS::Error>> {
        check_access(self.initialized, &self.geometry, address, len)
    }

    /// Page writes for an already checked range.
    fn program<const N: usize>(
        &mut self,
        address: u32,
        len: u32,
        source: Source<'_, N>,
    ) -> Result<(), Error<BUS::Error>> {
        let g = self.geometry;
        let chunks = PageChunks::new(address, len, g.page_size).with_max_len(source.max_chunk_len());
        for chunk in chunks {
            trace!("Page write at {=u32}, {=u32} bytes", chunk.address, chunk.len);
            if let Err(e) = self
                .bus
                .write(g.bus_address, chunk.address, g.address_width, source.bytes(&chunk))
            {
                warn!("Page write at {=u32} failed", chunk.address);
                return Err(Error::Bus(e));
            }
            self.delay.delay_ms(self.write_delay_ms);
            self.cursor = chunk.address + chunk.len;
        }
        Ok(())
    }
}

/// Checks shared by every access, in the order callers see them. Returns the
/// length, which fits in `u32` once it fits in the device.
pub(crate) fn check_access<E>(
    initialized: bool,
    geometry: &Geometry,
    address: u32,
    len: u64,
) -> Result<u32, Error<E>> {
    if !initialized {
        return Err(Error::NotInitialized);
    }
    if len == 0 {
        return Err(Error::InvalidArguments);
    }
    if !geometry.contains(address, len) {
        return Err(Error::Overflow);
    }
    Ok(len as u32)
}
