//! Blocking variant of [`PirSensor`](crate::PirSensor).
//!
//! Same register semantics as the async driver, built on the
//! `embedded-hal` 1.0 blocking I2C and delay traits for hosts without an
//! executor (Linux `i2cdev`, bare polling loops).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use crate::config::{clamp_debounce, PirConfig};
use crate::error::PirError;
use crate::registers::{
    is_valid_address, ADDRESS_CHANGE_SETTLE_MS, DEFAULT_ADDRESS, DEVICE_ID, EVENT_DEBOUNCE_TIME,
    EVENT_STATUS, FIRMWARE_MAJOR, FIRMWARE_MINOR, I2C_ADDRESS, ID, INTERRUPT_CONFIG,
    INTERRUPT_ENABLE, QUEUE_POP_REQUEST, STATUS_EVENT_MASK,
};
use crate::status::{EventStatus, Queue, QueueStatus};

/// Blocking driver for the SparkFun Qwiic PIR.
pub struct PirSensor<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> PirSensor<I2C>
where
    I2C: I2c,
{
    /// Create a driver for a board on the factory address (0x12).
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver for a board that was previously moved to `address`.
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the underlying I2C peripheral, consuming this driver.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn probe(&mut self, address: u8) -> Result<bool, PirError<I2C::Error>> {
        let mut buf = [0u8; 1];
        match self.i2c.read(address, &mut buf) {
            Ok(()) => Ok(true),
            Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => Ok(false),
            Err(e) => Err(PirError::I2c(e)),
        }
    }

    fn read_block(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), PirError<I2C::Error>> {
        self.i2c.write_read(self.address, &[register], buffer)?;
        Ok(())
    }

    fn read_u8(&mut self, register: u8) -> Result<u8, PirError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read_block(register, &mut buf)?;
        Ok(buf[0])
    }

    fn write_u8(&mut self, register: u8, value: u8) -> Result<(), PirError<I2C::Error>> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Identification
    // -----------------------------------------------------------------------

    /// Whether a device acknowledges on the current address.
    pub fn is_connected(&mut self) -> Result<bool, PirError<I2C::Error>> {
        let address = self.address;
        self.probe(address)
    }

    /// Validate the board: present on the bus and ID register reads `0x72`.
    pub fn begin(&mut self) -> Result<bool, PirError<I2C::Error>> {
        if !self.is_connected()? {
            #[cfg(feature = "defmt")]
            defmt::warn!("PIR: no device at {=u8:#x}", self.address);
            return Ok(false);
        }

        let id = self.read_u8(ID)?;
        if id != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("PIR: unexpected device ID {=u8:#x}", id);
            return Ok(false);
        }

        Ok(true)
    }

    /// Firmware revision as `(major << 8) | minor`.
    pub fn firmware_version(&mut self) -> Result<u16, PirError<I2C::Error>> {
        let major = self.read_u8(FIRMWARE_MAJOR)?;
        let minor = self.read_u8(FIRMWARE_MINOR)?;
        Ok(u16::from_be_bytes([major, minor]))
    }

    // -----------------------------------------------------------------------
    // Address management
    // -----------------------------------------------------------------------

    /// The address this driver talks to. No I2C traffic.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Move the board to a new I2C address, switching over only once the
    /// board acknowledges there. See the async
    /// [`set_address`](crate::PirSensor::set_address) for the error cases.
    pub fn set_address<D: DelayNs>(
        &mut self,
        new_address: u8,
        delay: &mut D,
    ) -> Result<(), PirError<I2C::Error>> {
        if !is_valid_address(new_address) {
            return Err(PirError::InvalidAddress(new_address));
        }

        self.write_u8(I2C_ADDRESS, new_address)?;
        delay.delay_ms(ADDRESS_CHANGE_SETTLE_MS);

        if !self.probe(new_address)? {
            #[cfg(feature = "defmt")]
            defmt::warn!("PIR: no acknowledge on new address {=u8:#x}", new_address);
            return Err(PirError::AddressNotAcknowledged(new_address));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("PIR: address {=u8:#x} -> {=u8:#x}", self.address, new_address);
        self.address = new_address;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Motion status
    // -----------------------------------------------------------------------

    /// Read and decode the whole EVENT_STATUS register.
    pub fn event_status(&mut self) -> Result<EventStatus, PirError<I2C::Error>> {
        Ok(EventStatus::from(self.read_u8(EVENT_STATUS)?))
    }

    /// Instantaneous PIR output, bypassing the debounce.
    pub fn raw_reading(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.event_status()?.raw_object_detected)
    }

    /// A debounced detect or remove event is waiting.
    pub fn available(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.event_status()?.event_available)
    }

    /// A debounced "object left" event has fired.
    pub fn object_removed(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.event_status()?.object_removed)
    }

    /// A debounced "object present" event has fired.
    pub fn object_detected(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.event_status()?.object_detected)
    }

    /// Clear the latched event bits, leaving the raw reading untouched.
    pub fn clear_event_bits(&mut self) -> Result<(), PirError<I2C::Error>> {
        let status = self.read_u8(EVENT_STATUS)?;
        self.write_u8(EVENT_STATUS, status & !STATUS_EVENT_MASK)
    }

    // -----------------------------------------------------------------------
    // Interrupts and debounce
    // -----------------------------------------------------------------------

    /// Drive the INT pin on debounced events.
    pub fn enable_interrupt(&mut self) -> Result<(), PirError<I2C::Error>> {
        self.update_interrupt_config(true)
    }

    /// Stop driving the INT pin.
    pub fn disable_interrupt(&mut self) -> Result<(), PirError<I2C::Error>> {
        self.update_interrupt_config(false)
    }

    /// Whether the INT pin is currently enabled.
    pub fn interrupt_enabled(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.read_u8(INTERRUPT_CONFIG)? & INTERRUPT_ENABLE != 0)
    }

    /// Enable the INT pin and clear any latched events.
    pub fn reset_interrupt_config(&mut self) -> Result<(), PirError<I2C::Error>> {
        self.enable_interrupt()?;
        self.clear_event_bits()
    }

    fn update_interrupt_config(&mut self, enable: bool) -> Result<(), PirError<I2C::Error>> {
        let mut config = self.read_u8(INTERRUPT_CONFIG)?;
        if enable {
            config |= INTERRUPT_ENABLE;
        } else {
            config &= !INTERRUPT_ENABLE;
        }
        self.write_u8(INTERRUPT_CONFIG, config)
    }

    /// Current debounce time in milliseconds.
    pub fn debounce_time(&mut self) -> Result<u16, PirError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_block(EVENT_DEBOUNCE_TIME, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Set the debounce time, clamping values above 65535 ms.
    pub fn set_debounce_time(&mut self, ms: u32) -> Result<(), PirError<I2C::Error>> {
        let clamped = clamp_debounce(ms);
        #[cfg(feature = "defmt")]
        if u32::from(clamped) != ms {
            defmt::debug!("PIR: debounce {} ms clamped to {}", ms, clamped);
        }
        let [lo, hi] = clamped.to_le_bytes();
        self.i2c
            .write(self.address, &[EVENT_DEBOUNCE_TIME, lo, hi])?;
        Ok(())
    }

    /// Write debounce and interrupt settings in one go.
    pub fn apply_config(&mut self, config: &PirConfig) -> Result<(), PirError<I2C::Error>> {
        self.set_debounce_time(u32::from(config.debounce_time_ms))?;
        self.update_interrupt_config(config.interrupt_enabled)
    }

    // -----------------------------------------------------------------------
    // Event queues
    // -----------------------------------------------------------------------

    /// Read and decode a queue's status register.
    pub fn queue_status(&mut self, queue: Queue) -> Result<QueueStatus, PirError<I2C::Error>> {
        Ok(QueueStatus::from(self.read_u8(queue.status_register())?))
    }

    /// The queue is at capacity.
    pub fn is_queue_full(&mut self, queue: Queue) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.queue_status(queue)?.is_full)
    }

    /// The queue holds no timestamps.
    pub fn is_queue_empty(&mut self, queue: Queue) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.queue_status(queue)?.is_empty)
    }

    /// Milliseconds since the most recent event in `queue`.
    pub fn time_since_last_event(&mut self, queue: Queue) -> Result<u32, PirError<I2C::Error>> {
        let mut buf = [0u8; 4];
        self.read_block(queue.front_register(), &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Milliseconds since the oldest event still held in `queue`.
    pub fn time_since_first_event(&mut self, queue: Queue) -> Result<u32, PirError<I2C::Error>> {
        let mut buf = [0u8; 4];
        self.read_block(queue.back_register(), &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Remove the oldest timestamp from `queue` and return its age.
    ///
    /// Not atomic: the age read and the pop request are separate
    /// transactions. Returns [`PirError::QueueEmpty`] without writing if
    /// the queue reports empty.
    pub fn pop_queue(&mut self, queue: Queue) -> Result<u32, PirError<I2C::Error>> {
        let status = self.read_u8(queue.status_register())?;
        if QueueStatus::from(status).is_empty {
            #[cfg(feature = "defmt")]
            defmt::debug!("PIR: pop on empty {} queue", queue);
            return Err(PirError::QueueEmpty);
        }

        let age = self.time_since_first_event(queue)?;
        self.write_u8(queue.status_register(), QUEUE_POP_REQUEST)?;
        Ok(age)
    }

    /// Pop into `buffer` until the queue empties or `buffer` fills.
    pub fn drain_queue(
        &mut self,
        queue: Queue,
        buffer: &mut [u32],
    ) -> Result<usize, PirError<I2C::Error>> {
        let mut count = 0;
        for slot in buffer.iter_mut() {
            match self.pop_queue(queue) {
                Ok(age) => {
                    *slot = age;
                    count += 1;
                }
                Err(PirError::QueueEmpty) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(count)
    }
}
