use core::fmt::{self, Debug, Display};

/// The error type used by this library.
///
/// This encapsulates a bus error, and adds the driver's own argument and
/// state errors on top of that.
pub enum Error<E> {
    /// A bus transaction failed.
    Bus(E),
    /// An operation was attempted before a successful `init`.
    NotInitialized,
    /// Empty buffer, or inconsistent geometry at `init` time.
    InvalidArguments,
    /// The requested range does not fit in the device.
    Overflow,
    /// Reserved. Not returned by the driver itself.
    Unknown,
}

impl<E> Error<E> {
    /// Returns the bus error, if this is one.
    pub fn bus(&self) -> Option<&E> {
        match self {
            Error::Bus(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt-03")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Bus(_bus) => defmt::write!(fmt, "Error::Bus"),
            Error::NotInitialized => defmt::write!(fmt, "Error::NotInitialized"),
            Error::InvalidArguments => defmt::write!(fmt, "Error::InvalidArguments"),
            Error::Overflow => defmt::write!(fmt, "Error::Overflow"),
            Error::Unknown => defmt::write!(fmt, "Error::Unknown"),
        }
    }
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(bus) => write!(f, "Error::Bus({:?})", bus),
            Error::NotInitialized => write!(f, "Error::NotInitialized"),
            Error::InvalidArguments => write!(f, "Error::InvalidArguments"),
            Error::Overflow => write!(f, "Error::Overflow"),
            Error::Unknown => write!(f, "Error::Unknown"),
        }
    }
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(bus) => write!(f, "bus transaction failed: {:?}", bus),
            Error::NotInitialized => f.write_str("device not initialized"),
            Error::InvalidArguments => f.write_str("invalid arguments"),
            Error::Overflow => f.write_str("address range exceeds device capacity"),
            Error::Unknown => f.write_str("unknown error"),
        }
    }
}

impl<E: PartialEq> PartialEq for Error<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Bus(a), Error::Bus(b)) => a == b,
            (Error::NotInitialized, Error::NotInitialized)
            | (Error::InvalidArguments, Error::InvalidArguments)
            | (Error::Overflow, Error::Overflow)
            | (Error::Unknown, Error::Unknown) => true,
            _ => false,
        }
    }
}
