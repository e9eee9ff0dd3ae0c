//! High-level async interface for the SparkFun Qwiic PIR.
//!
//! [`PirSensor`] wraps the low-level register driver with address
//! validation, typed status accessors, debounce/interrupt configuration and
//! the two device-side event queues.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::config::{clamp_debounce, PirConfig};
use crate::driver::RegisterDriver;
use crate::error::PirError;
use crate::registers::{
    is_valid_address, ADDRESS_CHANGE_SETTLE_MS, DEFAULT_ADDRESS, DEVICE_ID, EVENT_DEBOUNCE_TIME,
    EVENT_STATUS, FIRMWARE_MAJOR, FIRMWARE_MINOR, I2C_ADDRESS, ID, INTERRUPT_CONFIG,
    INTERRUPT_ENABLE, QUEUE_POP_REQUEST, STATUS_EVENT_MASK,
};
use crate::status::{EventStatus, Queue, QueueStatus};

/// Async driver for the SparkFun Qwiic PIR (Product #17374 / #17372).
///
/// Holds nothing but the bus and the board's current address; every
/// accessor goes to the device.
///
/// # Example
///
/// ```ignore
/// use pir_driver::PirSensor;
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut pir = PirSensor::new(i2c);
///
/// if pir.begin().await? {
///     if pir.available().await? {
///         let detected = pir.object_detected().await?;
///         pir.clear_event_bits().await?;
///     }
/// }
/// ```
pub struct PirSensor<I2C> {
    driver: RegisterDriver<I2C>,
}

impl<I2C> PirSensor<I2C>
where
    I2C: I2c,
{
    /// Create a driver for a board on the factory address (0x12).
    ///
    /// No I2C traffic is generated; call [`begin()`](Self::begin) first.
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver for a board that was previously moved to `address`.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self {
            driver: RegisterDriver::new(i2c, address),
        }
    }

    /// Returns the underlying I2C peripheral, consuming this driver.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Identification
    // -----------------------------------------------------------------------

    /// Whether a device acknowledges on the current address.
    ///
    /// # Errors
    /// [`PirError::I2c`] for bus failures other than a missing acknowledge.
    pub async fn is_connected(&mut self) -> Result<bool, PirError<I2C::Error>> {
        let address = self.driver.address();
        self.driver.probe(address).await
    }

    /// Validate the board.
    ///
    /// Returns `Ok(true)` only if a device answers on the current address
    /// and its ID register reads `0x72`. Other operations do not check that
    /// this has been called.
    pub async fn begin(&mut self) -> Result<bool, PirError<I2C::Error>> {
        if !self.is_connected().await? {
            #[cfg(feature = "defmt")]
            defmt::warn!("PIR: no device at {=u8:#x}", self.driver.address());
            return Ok(false);
        }

        let id = self.driver.read_u8(ID).await?;
        if id != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("PIR: unexpected device ID {=u8:#x}", id);
            return Ok(false);
        }

        Ok(true)
    }

    /// Firmware revision as `(major << 8) | minor`.
    ///
    /// The major byte is read first.
    pub async fn firmware_version(&mut self) -> Result<u16, PirError<I2C::Error>> {
        let major = self.driver.read_u8(FIRMWARE_MAJOR).await?;
        let minor = self.driver.read_u8(FIRMWARE_MINOR).await?;
        Ok(u16::from_be_bytes([major, minor]))
    }

    // -----------------------------------------------------------------------
    // Address management
    // -----------------------------------------------------------------------

    /// The address this driver talks to. No I2C traffic.
    pub fn address(&self) -> u8 {
        self.driver.address()
    }

    /// Move the board to a new I2C address.
    ///
    /// The new address is written through the old one, then, after
    /// [`ADDRESS_CHANGE_SETTLE_MS`], the new address is probed. The driver
    /// only switches over once the board acknowledges there.
    ///
    /// # Errors
    /// * [`PirError::InvalidAddress`] if `new_address` is outside `0x08..=0x77`;
    ///   nothing is sent
    /// * [`PirError::AddressNotAcknowledged`] if the board stays silent on the
    ///   new address; the driver keeps the old one
    /// * [`PirError::I2c`] on communication failure
    pub async fn set_address<D: DelayNs>(
        &mut self,
        new_address: u8,
        delay: &mut D,
    ) -> Result<(), PirError<I2C::Error>> {
        if !is_valid_address(new_address) {
            return Err(PirError::InvalidAddress(new_address));
        }

        self.driver.write_u8(I2C_ADDRESS, new_address).await?;
        delay.delay_ms(ADDRESS_CHANGE_SETTLE_MS).await;

        if !self.driver.probe(new_address).await? {
            #[cfg(feature = "defmt")]
            defmt::warn!("PIR: no acknowledge on new address {=u8:#x}", new_address);
            return Err(PirError::AddressNotAcknowledged(new_address));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "PIR: address {=u8:#x} -> {=u8:#x}",
            self.driver.address(),
            new_address
        );
        self.driver.set_address(new_address);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Motion status
    // -----------------------------------------------------------------------

    /// Read and decode the whole EVENT_STATUS register.
    pub async fn event_status(&mut self) -> Result<EventStatus, PirError<I2C::Error>> {
        Ok(EventStatus::from(self.driver.read_u8(EVENT_STATUS).await?))
    }

    /// Instantaneous PIR output, bypassing the debounce.
    pub async fn raw_reading(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.event_status().await?.raw_object_detected)
    }

    /// A debounced detect or remove event is waiting to be serviced.
    pub async fn available(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.event_status().await?.event_available)
    }

    /// A debounced "object left" event has fired.
    pub async fn object_removed(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.event_status().await?.object_removed)
    }

    /// A debounced "object present" event has fired.
    pub async fn object_detected(&mut self) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.event_status().await?.object_detected)
    }

    /// Clear the latched available/removed/detected bits.
    ///
    /// Events stay latched until this is called. The raw reading bit is
    /// written back unchanged.
    pub async fn clear_event_bits(&mut self) -> Result<(), PirError<I2C::Error>> {
        let status = self.driver.read_u8(EVENT_STATUS).await?;
        self.driver
            .write_u8(EVENT_STATUS, status & !STATUS_EVENT_MASK)
            .await
    }

    // -----------------------------------------------------------------------
    // Interrupt configuration
    // -----------------------------------------------------------------------

    /// Drive the INT pin on debounced events.
    pub async fn enable_interrupt(&mut self) -> Result<(), PirError<I2C::Error>> {
        self.update_interrupt_config(true).await
    }

    /// Stop driving the INT pin.
    pub async fn disable_interrupt(&mut self) -> Result<(), PirError<I2C::Error>> {
        self.update_interrupt_config(false).await
    }

    /// Whether the INT pin is currently enabled.
    pub async fn interrupt_enabled(&mut self) -> Result<bool, PirError<I2C::Error>> {
        let config = self.driver.read_u8(INTERRUPT_CONFIG).await?;
        Ok(config & INTERRUPT_ENABLE != 0)
    }

    /// Restore factory interrupt behaviour: enable the INT pin and clear
    /// any latched events.
    pub async fn reset_interrupt_config(&mut self) -> Result<(), PirError<I2C::Error>> {
        self.enable_interrupt().await?;
        self.clear_event_bits().await
    }

    async fn update_interrupt_config(&mut self, enable: bool) -> Result<(), PirError<I2C::Error>> {
        let mut config = self.driver.read_u8(INTERRUPT_CONFIG).await?;
        if enable {
            config |= INTERRUPT_ENABLE;
        } else {
            config &= !INTERRUPT_ENABLE;
        }
        self.driver.write_u8(INTERRUPT_CONFIG, config).await
    }

    // -----------------------------------------------------------------------
    // Debounce
    // -----------------------------------------------------------------------

    /// Current debounce time in milliseconds.
    pub async fn debounce_time(&mut self) -> Result<u16, PirError<I2C::Error>> {
        self.driver.read_u16(EVENT_DEBOUNCE_TIME).await
    }

    /// Set the debounce time in milliseconds.
    ///
    /// Values above 65535 are clamped rather than rejected.
    pub async fn set_debounce_time(&mut self, ms: u32) -> Result<(), PirError<I2C::Error>> {
        let clamped = clamp_debounce(ms);
        #[cfg(feature = "defmt")]
        if u32::from(clamped) != ms {
            defmt::debug!("PIR: debounce {} ms clamped to {}", ms, clamped);
        }
        self.driver.write_u16(EVENT_DEBOUNCE_TIME, clamped).await
    }

    /// Write debounce and interrupt settings in one go.
    pub async fn apply_config(&mut self, config: &PirConfig) -> Result<(), PirError<I2C::Error>> {
        self.set_debounce_time(u32::from(config.debounce_time_ms))
            .await?;
        self.update_interrupt_config(config.interrupt_enabled).await
    }

    // -----------------------------------------------------------------------
    // Event queues
    // -----------------------------------------------------------------------

    /// Read and decode a queue's status register.
    pub async fn queue_status(&mut self, queue: Queue) -> Result<QueueStatus, PirError<I2C::Error>> {
        Ok(QueueStatus::from(
            self.driver.read_u8(queue.status_register()).await?,
        ))
    }

    /// The queue is at capacity.
    pub async fn is_queue_full(&mut self, queue: Queue) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.queue_status(queue).await?.is_full)
    }

    /// The queue holds no timestamps.
    pub async fn is_queue_empty(&mut self, queue: Queue) -> Result<bool, PirError<I2C::Error>> {
        Ok(self.queue_status(queue).await?.is_empty)
    }

    /// Milliseconds since the most recent event in `queue`.
    ///
    /// The counter is 32 bits wide and wraps after about 49.7 days; use
    /// [`elapsed_between`](crate::elapsed_between) for deltas.
    pub async fn time_since_last_event(
        &mut self,
        queue: Queue,
    ) -> Result<u32, PirError<I2C::Error>> {
        self.driver.read_u32(queue.front_register()).await
    }

    /// Milliseconds since the oldest event still held in `queue`.
    pub async fn time_since_first_event(
        &mut self,
        queue: Queue,
    ) -> Result<u32, PirError<I2C::Error>> {
        self.driver.read_u32(queue.back_register()).await
    }

    /// Remove the oldest timestamp from `queue` and return its age.
    ///
    /// The age is read from the back register before the pop request is
    /// written. These are separate bus transactions; if the board enqueues
    /// or drops an entry in between, the returned age may belong to a
    /// different event than the one removed.
    ///
    /// # Errors
    /// * [`PirError::QueueEmpty`] if the queue reports empty; no pop is sent
    /// * [`PirError::I2c`] on communication failure
    pub async fn pop_queue(&mut self, queue: Queue) -> Result<u32, PirError<I2C::Error>> {
        let status = self.driver.read_u8(queue.status_register()).await?;
        if QueueStatus::from(status).is_empty {
            #[cfg(feature = "defmt")]
            defmt::debug!("PIR: pop on empty {} queue", queue);
            return Err(PirError::QueueEmpty);
        }

        let age = self.time_since_first_event(queue).await?;
        // Full/empty are owned by the firmware; only the request bit is written.
        self.driver
            .write_u8(queue.status_register(), QUEUE_POP_REQUEST)
            .await?;
        Ok(age)
    }

    /// Pop timestamps into `buffer` until the queue is empty or `buffer`
    /// is full. Returns the number of entries written, oldest first.
    pub async fn drain_queue(
        &mut self,
        queue: Queue,
        buffer: &mut [u32],
    ) -> Result<usize, PirError<I2C::Error>> {
        let mut count = 0;
        for slot in buffer.iter_mut() {
            match self.pop_queue(queue).await {
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

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_bus::{FakeDelay, FakeError, FakePir};
    use crate::registers::{DETECTED_QUEUE_STATUS, REMOVED_QUEUE_STATUS};
    use embassy_futures::block_on;

    fn sensor() -> PirSensor<FakePir> {
        PirSensor::new(FakePir::new())
    }

    // ── Identification ───────────────────────────────────────────────

    #[test]
    fn begin_accepts_matching_id() {
        let mut pir = sensor();
        assert_eq!(block_on(pir.begin()), Ok(true));
    }

    #[test]
    fn begin_rejects_wrong_id() {
        let mut fake = FakePir::new();
        fake.registers[ID as usize] = 0x71;
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.begin()), Ok(false));
    }

    #[test]
    fn begin_false_when_absent_even_with_valid_id() {
        let mut fake = FakePir::new();
        fake.present = false;
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.is_connected()), Ok(false));
        assert_eq!(block_on(pir.begin()), Ok(false));
    }

    #[test]
    fn bus_failure_is_an_error_not_absence() {
        let mut fake = FakePir::new();
        fake.broken = true;
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.is_connected()), Err(PirError::I2c(FakeError::Bus)));
        assert_eq!(block_on(pir.raw_reading()), Err(PirError::I2c(FakeError::Bus)));
    }

    #[test]
    fn firmware_version_packs_major_high() {
        let mut fake = FakePir::new();
        fake.registers[FIRMWARE_MAJOR as usize] = 0x01;
        fake.registers[FIRMWARE_MINOR as usize] = 0x05;
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.firmware_version()), Ok(0x0105));
    }

    // ── Address management ───────────────────────────────────────────

    #[test]
    fn set_address_round_trips_for_every_valid_address() {
        for address in 0x08..=0x77u8 {
            let mut pir = sensor();
            let mut delay = FakeDelay::default();
            assert_eq!(block_on(pir.set_address(address, &mut delay)), Ok(()));
            assert_eq!(pir.address(), address);
            assert_eq!(block_on(pir.begin()), Ok(true));
        }
    }

    #[test]
    fn set_address_rejects_out_of_range_without_traffic() {
        for address in (0x00..0x08u8).chain(0x78..=0xFF) {
            let mut pir = sensor();
            let mut delay = FakeDelay::default();
            assert_eq!(
                block_on(pir.set_address(address, &mut delay)),
                Err(PirError::InvalidAddress(address))
            );
            assert_eq!(pir.address(), DEFAULT_ADDRESS);
            assert!(pir.release().writes.is_empty());
        }
    }

    #[test]
    fn set_address_waits_before_probing() {
        let mut pir = sensor();
        let mut delay = FakeDelay::default();
        block_on(pir.set_address(0x5B, &mut delay)).unwrap();
        assert_eq!(delay.total_ns, ADDRESS_CHANGE_SETTLE_MS as u64 * 1_000_000);

        let fake = pir.release();
        assert_eq!(fake.writes_to(I2C_ADDRESS), [&[0x5Bu8][..]]);
        assert_eq!(fake.address, 0x5B);
    }

    #[test]
    fn set_address_keeps_old_address_when_board_stays_silent() {
        let mut fake = FakePir::new();
        fake.follows_address_write = false;
        let mut pir = PirSensor::new(fake);
        let mut delay = FakeDelay::default();
        assert_eq!(
            block_on(pir.set_address(0x30, &mut delay)),
            Err(PirError::AddressNotAcknowledged(0x30))
        );
        assert_eq!(pir.address(), DEFAULT_ADDRESS);
    }

    // ── Motion status ────────────────────────────────────────────────

    #[test]
    fn status_accessors_read_their_own_bit() {
        let mut fake = FakePir::new();
        fake.registers[EVENT_STATUS as usize] = 0b1010;
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.raw_reading()), Ok(false));
        assert_eq!(block_on(pir.available()), Ok(true));
        assert_eq!(block_on(pir.object_removed()), Ok(false));
        assert_eq!(block_on(pir.object_detected()), Ok(true));
    }

    #[test]
    fn clear_event_bits_preserves_raw_reading() {
        let mut fake = FakePir::new();
        fake.registers[EVENT_STATUS as usize] = 0b1111;
        let mut pir = PirSensor::new(fake);

        block_on(pir.clear_event_bits()).unwrap();

        assert_eq!(block_on(pir.available()), Ok(false));
        assert_eq!(block_on(pir.object_detected()), Ok(false));
        assert_eq!(block_on(pir.object_removed()), Ok(false));
        assert_eq!(block_on(pir.raw_reading()), Ok(true));
        assert_eq!(pir.release().writes_to(EVENT_STATUS), [&[0b0001u8][..]]);
    }

    #[test]
    fn event_status_reads_all_flags_at_once() {
        let mut fake = FakePir::new();
        fake.registers[EVENT_STATUS as usize] = 0b0111;
        let mut pir = PirSensor::new(fake);
        let status = block_on(pir.event_status()).unwrap();
        assert!(status.raw_object_detected);
        assert!(status.event_available);
        assert!(status.object_removed);
        assert!(!status.object_detected);
    }

    // ── Interrupts ───────────────────────────────────────────────────

    #[test]
    fn interrupt_enable_touches_only_its_bit() {
        let mut fake = FakePir::new();
        fake.registers[INTERRUPT_CONFIG as usize] = 0b1000_0000;
        let mut pir = PirSensor::new(fake);

        block_on(pir.enable_interrupt()).unwrap();
        assert_eq!(block_on(pir.interrupt_enabled()), Ok(true));
        block_on(pir.disable_interrupt()).unwrap();
        assert_eq!(block_on(pir.interrupt_enabled()), Ok(false));

        let fake = pir.release();
        assert_eq!(
            fake.writes_to(INTERRUPT_CONFIG),
            [&[0b1000_0001u8][..], &[0b1000_0000][..]]
        );
    }

    #[test]
    fn reset_interrupt_config_enables_and_clears() {
        let mut fake = FakePir::new();
        fake.registers[EVENT_STATUS as usize] = 0b1110;
        let mut pir = PirSensor::new(fake);

        block_on(pir.reset_interrupt_config()).unwrap();

        assert_eq!(block_on(pir.interrupt_enabled()), Ok(true));
        assert_eq!(block_on(pir.available()), Ok(false));
    }

    // ── Debounce ─────────────────────────────────────────────────────

    #[test]
    fn debounce_time_is_little_endian() {
        let mut fake = FakePir::new();
        fake.registers[EVENT_DEBOUNCE_TIME as usize] = 0x64;
        fake.registers[EVENT_DEBOUNCE_TIME as usize + 1] = 0x00;
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.debounce_time()), Ok(100));
    }

    #[test]
    fn set_debounce_time_clamps_and_writes_word() {
        let mut pir = sensor();
        block_on(pir.set_debounce_time(70_000)).unwrap();
        assert_eq!(block_on(pir.debounce_time()), Ok(0xFFFF));

        block_on(pir.set_debounce_time(750)).unwrap();
        assert_eq!(block_on(pir.debounce_time()), Ok(750));

        let fake = pir.release();
        assert_eq!(
            fake.writes_to(EVENT_DEBOUNCE_TIME),
            [&[0xFFu8, 0xFF][..], &[0xEE, 0x02][..]]
        );
    }

    #[test]
    fn apply_config_writes_both_settings() {
        let mut pir = sensor();
        let config = PirConfig {
            debounce_time_ms: 200,
            interrupt_enabled: false,
        };
        block_on(pir.apply_config(&config)).unwrap();
        assert_eq!(block_on(pir.debounce_time()), Ok(200));
        assert_eq!(block_on(pir.interrupt_enabled()), Ok(false));
    }

    // ── Queues ───────────────────────────────────────────────────────

    #[test]
    fn time_since_last_event_is_little_endian() {
        let mut fake = FakePir::new();
        fake.load_queue(Queue::Detected, &[10_000]);
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.time_since_last_event(Queue::Detected)), Ok(10_000));

        let mut fake = FakePir::new();
        fake.registers[0x08..0x0C].copy_from_slice(&[0x10, 0x27, 0x00, 0x00]);
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.time_since_last_event(Queue::Detected)), Ok(10_000));
    }

    #[test]
    fn front_is_newest_and_back_is_oldest() {
        let mut fake = FakePir::new();
        fake.load_queue(Queue::Removed, &[9_000, 4_000, 1_500]);
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.time_since_first_event(Queue::Removed)), Ok(9_000));
        assert_eq!(block_on(pir.time_since_last_event(Queue::Removed)), Ok(1_500));
        assert_eq!(block_on(pir.is_queue_empty(Queue::Removed)), Ok(false));
        assert_eq!(block_on(pir.is_queue_empty(Queue::Detected)), Ok(true));
    }

    #[test]
    fn full_flag_tracks_capacity() {
        let mut fake = FakePir::new();
        fake.load_queue(Queue::Detected, &[8, 7, 6, 5, 4, 3, 2, 1]);
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.is_queue_full(Queue::Detected)), Ok(true));
        assert_eq!(block_on(pir.is_queue_full(Queue::Removed)), Ok(false));
    }

    #[test]
    fn pop_returns_back_and_writes_pop_once() {
        let mut fake = FakePir::new();
        fake.load_queue(Queue::Detected, &[5_000, 2_000]);
        let mut pir = PirSensor::new(fake);

        let before = block_on(pir.time_since_first_event(Queue::Detected)).unwrap();
        let popped = block_on(pir.pop_queue(Queue::Detected)).unwrap();
        assert_eq!(popped, before);

        let fake = pir.release();
        let pops = fake.writes_to(DETECTED_QUEUE_STATUS);
        assert_eq!(pops, [&[QUEUE_POP_REQUEST][..]]);
        assert_eq!(fake.queue_len(Queue::Detected), 1);
    }

    #[test]
    fn pop_writes_only_the_request_bit() {
        let mut fake = FakePir::new();
        fake.load_queue(Queue::Removed, &[8, 7, 6, 5, 4, 3, 2, 1]);
        let mut pir = PirSensor::new(fake);
        assert_eq!(block_on(pir.is_queue_full(Queue::Removed)), Ok(true));

        assert_eq!(block_on(pir.pop_queue(Queue::Removed)), Ok(8));

        let fake = pir.release();
        assert_eq!(
            fake.writes_to(REMOVED_QUEUE_STATUS),
            [&[QUEUE_POP_REQUEST][..]]
        );
        assert_eq!(fake.queue_len(Queue::Removed), 7);
    }

    #[test]
    fn removed_queue_never_touches_detected_registers() {
        let mut fake = FakePir::new();
        fake.load_queue(Queue::Detected, &[111]);
        fake.load_queue(Queue::Removed, &[222, 333]);
        let mut pir = PirSensor::new(fake);

        assert_eq!(block_on(pir.time_since_first_event(Queue::Removed)), Ok(222));
        assert_eq!(block_on(pir.time_since_last_event(Queue::Removed)), Ok(333));
        assert_eq!(block_on(pir.pop_queue(Queue::Removed)), Ok(222));

        let fake = pir.release();
        assert!(fake.writes_to(DETECTED_QUEUE_STATUS).is_empty());
        assert_eq!(fake.writes_to(REMOVED_QUEUE_STATUS).len(), 1);
        assert_eq!(fake.queue_len(Queue::Detected), 1);
        assert_eq!(fake.queue_len(Queue::Removed), 1);
    }

    #[test]
    fn pop_on_empty_queue_sends_nothing() {
        let mut pir = sensor();
        assert_eq!(
            block_on(pir.pop_queue(Queue::Removed)),
            Err(PirError::QueueEmpty)
        );
        assert!(pir.release().writes.is_empty());
    }

    #[test]
    fn drain_stops_at_empty() {
        let mut fake = FakePir::new();
        fake.load_queue(Queue::Detected, &[300, 200, 100]);
        let mut pir = PirSensor::new(fake);

        let mut ages = [0u32; 8];
        assert_eq!(block_on(pir.drain_queue(Queue::Detected, &mut ages)), Ok(3));
        assert_eq!(ages[..3], [300u32, 200, 100]);
        assert_eq!(block_on(pir.is_queue_empty(Queue::Detected)), Ok(true));
    }

    #[test]
    fn drain_stops_at_buffer_end() {
        let mut fake = FakePir::new();
        fake.load_queue(Queue::Removed, &[40, 30, 20, 10]);
        let mut pir = PirSensor::new(fake);

        let mut ages = [0u32; 2];
        assert_eq!(block_on(pir.drain_queue(Queue::Removed, &mut ages)), Ok(2));
        assert_eq!(ages, [40, 30]);
        assert_eq!(pir.release().queue_len(Queue::Removed), 2);
    }
}
