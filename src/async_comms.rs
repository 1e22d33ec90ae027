use core::fmt::Debug;

use crate::comms::check_access;
use crate::config::{Geometry, WRITE_CYCLE_DELAY_MS};
use crate::error::Error;
use crate::paging::{PageChunks, Source, DEFAULT_FILL_BUFFER_LEN};
use crate::traits::AsyncEepromBus;
use embedded_hal_async::delay::DelayNs;

/// Async twin of [`Eeprom`](crate::Eeprom). Issues the same transactions and
/// delays in the same order, awaiting each one.
pub struct AsyncEeprom<BUS, D, const FILL_BUF: usize = DEFAULT_FILL_BUFFER_LEN> {
    bus: BUS,
    delay: D,
    geometry: Geometry,
    write_delay_ms: u32,
    cursor: u32,
    initialized: bool,
}

impl<BUS, D, const FILL_BUF: usize> Debug for AsyncEeprom<BUS, D, FILL_BUF> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AsyncEeprom")
            .field("geometry", &self.geometry)
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl<BUS, D> AsyncEeprom<BUS, D>
where
    BUS: AsyncEepromBus,
    D: DelayNs,
{
    /// Creates an uninitialized driver. Call [`AsyncEeprom::init`] before use.
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

impl<BUS, D, const FILL_BUF: usize> AsyncEeprom<BUS, D, FILL_BUF>
where
    BUS: AsyncEepromBus,
    D: DelayNs,
{
    /// See [`Eeprom::with_fill_buffer`](crate::Eeprom::with_fill_buffer).
    pub fn with_fill_buffer<const N: usize>(self) -> AsyncEeprom<BUS, D, N> {
        const { assert!(N > 0, "fill buffer must not be empty") };
        AsyncEeprom {
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

    /// Validates the geometry. Synchronous since it never touches the bus.
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
    pub async fn write(&mut self, address: u32, data: &[u8]) -> Result<(), Error<BUS::Error>> {
        let len = self.check(address, data.len() as u64)?;
        self.program(address, len, Source::<FILL_BUF>::Data(data)).await
    }

    /// Reads `buf.len()` bytes starting at `address` in one transaction.
    pub async fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), Error<BUS::Error>> {
        let len = self.check(address, buf.len() as u64)?;
        let g = self.geometry;
        self.bus
            .read(g.bus_address, address, g.address_width, buf)
            .await
            .map_err(Error::Bus)?;
        self.cursor = address + len;
        Ok(())
    }

    /// Writes `byte` to `len` bytes starting at `address`.
    pub async fn fill(&mut self, address: u32, len: u32, byte: u8) -> Result<(), Error<BUS::Error>> {
        let len = self.check(address, u64::from(len))?;
        self.program(address, len, Source::<FILL_BUF>::fill(byte)).await
    }

    /// Writes `byte` to every cell of the device.
    pub async fn fill_all(&mut self, byte: u8) -> Result<(), Error<BUS::Error>> {
        self.fill(0, self.geometry.memory_size, byte).await
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

    async fn program<const N: usize>(
        &mut self,
        address: u32,
        len: u32,
        source: Source<'_, N>,
    ) -> Result<(), Error<BUS::Error>> {
        let g = self.geometry;
        let chunks = PageChunks::new(address, len, g.page_size).with_max_len(source.max_chunk_len());
        for chunk in chunks {
            trace!("Page write at {=u32}, {=u32} bytes", chunk.address, chunk.len);
            let result = self
                .bus
                .write(g.bus_address, chunk.address, g.address_width, source.bytes(&chunk))
                .await;
            if let Err(e) = result {
                warn!("Page write at {=u32} failed", chunk.address);
                return Err(Error::Bus(e));
            }
            self.delay.delay_ms(self.write_delay_ms).await;
            self.cursor = chunk.address + chunk.len;
        }
        Ok(())
    }
}
