/// Write-cycle time (tWR) to wait after every page write, in milliseconds.
///
/// Defaults to 8, which covers the 5 ms tWR of most 24-series parts with
/// margin. Override at build time with the `EEPROM_WRITE_DELAY_MS` environment
/// variable, or per device with [`Eeprom::with_write_delay_ms`].
///
/// [`Eeprom::with_write_delay_ms`]: crate::Eeprom::with_write_delay_ms
pub const WRITE_CYCLE_DELAY_MS: u32 = match option_env!("EEPROM_WRITE_DELAY_MS") {
    Some(ms) => parse_ms(ms),
    None => 8,
};

/// 7-bit bus address of a 24-series part with A2..A0 tied low.
pub const DEFAULT_BUS_ADDRESS: u8 = 0x50;

const fn parse_ms(s: &str) -> u32 {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "EEPROM_WRITE_DELAY_MS is empty");
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        assert!(b.is_ascii_digit(), "EEPROM_WRITE_DELAY_MS must be decimal");
        value = value * 10 + (b - b'0') as u32;
        i += 1;
    }
    value
}

/// Device geometry as seen from the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Geometry {
    /// Total addressable bytes.
    pub memory_size: u32,
    /// Bytes that can be written in one page write.
    pub page_size: u32,
    /// Number of bytes used to send a memory address.
    pub address_width: u8,
    /// 7-bit bus address of the device.
    pub bus_address: u8,
}

impl Geometry {
    pub const fn new(memory_size: u32, page_size: u32, address_width: u8, bus_address: u8) -> Self {
        Self {
            memory_size,
            page_size,
            address_width,
            bus_address,
        }
    }

    /// 24C02: 2 Kbit, 8-byte pages, one address byte.
    pub const fn at24c02(bus_address: u8) -> Self {
        Self::new(256, 8, 1, bus_address)
    }

    /// 24C32: 32 Kbit, 32-byte pages.
    pub const fn at24c32(bus_address: u8) -> Self {
        Self::new(4 * 1024, 32, 2, bus_address)
    }

    /// 24C64: 64 Kbit, 32-byte pages.
    pub const fn at24c64(bus_address: u8) -> Self {
        Self::new(8 * 1024, 32, 2, bus_address)
    }

    /// 24C128: 128 Kbit, 64-byte pages.
    pub const fn at24c128(bus_address: u8) -> Self {
        Self::new(16 * 1024, 64, 2, bus_address)
    }

    /// 24C256: 256 Kbit, 64-byte pages.
    pub const fn at24c256(bus_address: u8) -> Self {
        Self::new(32 * 1024, 64, 2, bus_address)
    }

    /// 24C512: 512 Kbit, 128-byte pages.
    pub const fn at24c512(bus_address: u8) -> Self {
        Self::new(64 * 1024, 128, 2, bus_address)
    }

    /// Whether the geometry is self-consistent: all sizes nonzero and a page
    /// no larger than the whole device.
    pub const fn is_valid(&self) -> bool {
        self.memory_size > 0
            && self.page_size > 0
            && self.page_size <= self.memory_size
            && self.address_width > 0
    }

    /// Whether `len` bytes starting at `address` fit in the device.
    pub const fn contains(&self, address: u32, len: u64) -> bool {
        match (address as u64).checked_add(len) {
            Some(end) => end <= self.memory_size as u64,
            None => false,
        }
    }
}
