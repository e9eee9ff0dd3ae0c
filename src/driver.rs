//! Low-level register access for the Qwiic PIR.
//!
//! Implements the byte, block and word primitives the board firmware expects
//! on top of an `embedded-hal-async` I2C bus, plus the presence probe.
//!
//! This module is crate-private — consumers interact with [`PirSensor`]
//! in `pir_sensor.rs` instead.
//!
//! [`PirSensor`]: crate::PirSensor

use embedded_hal_async::i2c::{Error as _, ErrorKind, I2c};

use crate::error::PirError;

/// Low-level register driver.
///
/// Owns an I2C peripheral and the board's current 7-bit address.
pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    /// Create a new register driver.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (factory default 0x12)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Presence probe
    // -----------------------------------------------------------------------

    /// Check whether a device acknowledges at `address`.
    ///
    /// Issues a one-byte read. A NACK means nothing is listening and maps to
    /// `Ok(false)`; any other bus failure is returned as an error.
    pub async fn probe(&mut self, address: u8) -> Result<bool, PirError<I2C::Error>> {
        let mut buf = [0u8; 1];
        match self.i2c.read(address, &mut buf).await {
            Ok(()) => Ok(true),
            Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => Ok(false),
            Err(e) => Err(PirError::I2c(e)),
        }
    }

    // -----------------------------------------------------------------------
    // Typed read/write helpers
    // -----------------------------------------------------------------------

    /// Read one register.
    pub async fn read_u8(&mut self, register: u8) -> Result<u8, PirError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read_block(register, &mut buf).await?;
        Ok(buf[0])
    }

    /// Read `buffer.len()` consecutive registers starting at `register`.
    pub async fn read_block(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), PirError<I2C::Error>> {
        self.i2c.write_read(self.address, &[register], buffer).await?;
        Ok(())
    }

    /// Read a 16-bit little-endian register pair.
    pub async fn read_u16(&mut self, register: u8) -> Result<u16, PirError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_block(register, &mut buf).await?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a 32-bit little-endian register block.
    pub async fn read_u32(&mut self, register: u8) -> Result<u32, PirError<I2C::Error>> {
        let mut buf = [0u8; 4];
        self.read_block(register, &mut buf).await?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Write a single byte to a register.
    pub async fn write_u8(&mut self, register: u8, value: u8) -> Result<(), PirError<I2C::Error>> {
        self.i2c.write(self.address, &[register, value]).await?;
        Ok(())
    }

    /// Write a 16-bit word, low byte first (SMBus word order).
    pub async fn write_u16(
        &mut self,
        register: u8,
        value: u16,
    ) -> Result<(), PirError<I2C::Error>> {
        let [lo, hi] = value.to_le_bytes();
        self.i2c.write(self.address, &[register, lo, hi]).await?;
        Ok(())
    }
}
