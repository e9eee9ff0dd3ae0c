//! Error types for the PIR driver.

use core::fmt;

/// Errors that can occur when communicating with the PIR board.
#[derive(Debug, PartialEq, Eq)]
pub enum PirError<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// Requested I2C address is outside `0x08..=0x77`.
    InvalidAddress(u8),

    /// The board did not answer on its new address after an address change.
    AddressNotAcknowledged(u8),

    /// A pop was requested on a queue that holds no timestamps.
    QueueEmpty,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for PirError<E> {
    fn from(error: E) -> Self {
        PirError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for PirError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PirError::I2c(e) => write!(f, "I2C error: {:?}", e),
            PirError::InvalidAddress(a) => {
                write!(f, "Invalid I2C address {:#04x} (must be 0x08-0x77)", a)
            }
            PirError::AddressNotAcknowledged(a) => {
                write!(f, "No acknowledge on new I2C address {:#04x}", a)
            }
            PirError::QueueEmpty => write!(f, "Event queue is empty"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for PirError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            PirError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            PirError::InvalidAddress(a) => defmt::write!(f, "Invalid I2C address {=u8:#x}", a),
            PirError::AddressNotAcknowledged(a) => {
                defmt::write!(f, "No acknowledge on new I2C address {=u8:#x}", a)
            }
            PirError::QueueEmpty => defmt::write!(f, "Event queue is empty"),
        }
    }
}
