//! Register map and bit masks for the SparkFun Qwiic PIR breakout.
//!
//! The board exposes a flat, byte-addressed register file behind a single
//! 7-bit I2C address. Multi-byte registers are little-endian and are read
//! with one auto-incrementing block transfer starting at the low byte.

// ---------------------------------------------------------------------------
// Identification
// ---------------------------------------------------------------------------

/// Device identification register (read-only).
pub const ID: u8 = 0x00;

/// Firmware minor revision (read-only).
pub const FIRMWARE_MINOR: u8 = 0x01;

/// Firmware major revision (read-only).
pub const FIRMWARE_MAJOR: u8 = 0x02;

// ---------------------------------------------------------------------------
// Event and interrupt configuration
// ---------------------------------------------------------------------------

/// Motion event status. Writing clears the latched event bits.
pub const EVENT_STATUS: u8 = 0x03;

/// Interrupt enable configuration.
pub const INTERRUPT_CONFIG: u8 = 0x04;

/// Debounce time in milliseconds (16-bit, little-endian).
pub const EVENT_DEBOUNCE_TIME: u8 = 0x05;

// ---------------------------------------------------------------------------
// Event queues
// ---------------------------------------------------------------------------

/// Detected-event queue status (full / empty / pop request).
pub const DETECTED_QUEUE_STATUS: u8 = 0x07;

/// Milliseconds since the most recent detect event (32-bit, little-endian).
pub const DETECTED_QUEUE_FRONT: u8 = 0x08;

/// Milliseconds since the oldest queued detect event (32-bit, little-endian).
pub const DETECTED_QUEUE_BACK: u8 = 0x0C;

/// Removed-event queue status (full / empty / pop request).
pub const REMOVED_QUEUE_STATUS: u8 = 0x10;

/// Milliseconds since the most recent remove event (32-bit, little-endian).
pub const REMOVED_QUEUE_FRONT: u8 = 0x11;

/// Milliseconds since the oldest queued remove event (32-bit, little-endian).
pub const REMOVED_QUEUE_BACK: u8 = 0x15;

/// I2C address register (write-only). The board moves to the written
/// address immediately.
pub const I2C_ADDRESS: u8 = 0x19;

// ---------------------------------------------------------------------------
// EVENT_STATUS bits
// ---------------------------------------------------------------------------

/// Instantaneous (undebounced) PIR output.
pub const STATUS_RAW_OBJECT_DETECTED: u8 = 1 << 0;

/// A debounced detect or remove event is waiting to be serviced.
pub const STATUS_EVENT_AVAILABLE: u8 = 1 << 1;

/// Debounced "object left" event.
pub const STATUS_OBJECT_REMOVED: u8 = 1 << 2;

/// Debounced "object present" event.
pub const STATUS_OBJECT_DETECTED: u8 = 1 << 3;

/// Latched event bits cleared by `clear_event_bits`. The raw bit is live
/// and never written.
pub const STATUS_EVENT_MASK: u8 =
    STATUS_EVENT_AVAILABLE | STATUS_OBJECT_REMOVED | STATUS_OBJECT_DETECTED;

// ---------------------------------------------------------------------------
// INTERRUPT_CONFIG bits
// ---------------------------------------------------------------------------

/// Drive the INT pin on debounced events.
pub const INTERRUPT_ENABLE: u8 = 1 << 0;

// ---------------------------------------------------------------------------
// *_QUEUE_STATUS bits
// ---------------------------------------------------------------------------

/// Write 1 to dequeue the oldest timestamp.
pub const QUEUE_POP_REQUEST: u8 = 1 << 0;

/// Queue holds no timestamps.
pub const QUEUE_IS_EMPTY: u8 = 1 << 1;

/// Queue is at capacity; further events overwrite the oldest entry.
pub const QUEUE_IS_FULL: u8 = 1 << 2;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Value of the [`ID`] register on every Qwiic PIR.
pub const DEVICE_ID: u8 = 0x72;

/// Factory default 7-bit I2C address.
pub const DEFAULT_ADDRESS: u8 = 0x12;

/// Lowest address accepted by `set_address`.
pub const MIN_ADDRESS: u8 = 0x08;

/// Highest address accepted by `set_address`.
pub const MAX_ADDRESS: u8 = 0x77;

/// Largest debounce time the board can store.
pub const MAX_DEBOUNCE_TIME_MS: u16 = u16::MAX;

/// Time the board needs to re-attach to the bus after an address change.
pub const ADDRESS_CHANGE_SETTLE_MS: u32 = 20;

/// Whether `address` is a legal target for an address change.
pub const fn is_valid_address(address: u8) -> bool {
    address >= MIN_ADDRESS && address <= MAX_ADDRESS
}
