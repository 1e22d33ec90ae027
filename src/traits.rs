/// One bus transaction against a byte-addressed memory device.
///
/// Implementations send `address_width` bytes of `mem_address` and then the
/// payload, as a single transaction addressed to `bus_address`.
pub trait EepromBus {
    type Error;

    /// Writes `data` starting at `mem_address`. The driver never passes more
    /// than one page, and never crosses a page boundary.
    fn write(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        data: &[u8],
    ) -> Result<(), Self::Error>;

    /// Reads `buf.len()` bytes starting at `mem_address`. Reads are not page
    /// bounded.
    fn read(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Async version of [`EepromBus`].
#[allow(async_fn_in_trait)]
pub trait AsyncEepromBus {
    type Error;

    /// See [`EepromBus::write`].
    async fn write(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        data: &[u8],
    ) -> Result<(), Self::Error>;

    /// See [`EepromBus::read`].
    async fn read(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<T: EepromBus + ?Sized> EepromBus for &mut T {
    type Error = T::Error;

    fn write(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        T::write(self, bus_address, mem_address, address_width, data)
    }

    fn read(
        &mut self,
        bus_address: u8,
        mem_address: u32,
        address_width: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::read(self, bus_address, mem_address, address_width, buf)
    }
}
