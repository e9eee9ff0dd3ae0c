//! Decoded views of the status registers and the two event queues.

use crate::registers::{
    DETECTED_QUEUE_BACK, DETECTED_QUEUE_FRONT, DETECTED_QUEUE_STATUS, QUEUE_IS_EMPTY,
    QUEUE_IS_FULL, QUEUE_POP_REQUEST, REMOVED_QUEUE_BACK, REMOVED_QUEUE_FRONT,
    REMOVED_QUEUE_STATUS, STATUS_EVENT_AVAILABLE, STATUS_OBJECT_DETECTED, STATUS_OBJECT_REMOVED,
    STATUS_RAW_OBJECT_DETECTED,
};

/// Test a single-bit mask against a register value.
#[inline]
pub(crate) const fn flag(value: u8, mask: u8) -> bool {
    value & mask != 0
}

/// One of the two timestamp FIFOs kept by the board firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Queue {
    /// Debounced "object present" events.
    Detected,
    /// Debounced "object left" events.
    Removed,
}

impl Queue {
    /// Status register (full / empty / pop request).
    pub const fn status_register(self) -> u8 {
        match self {
            Queue::Detected => DETECTED_QUEUE_STATUS,
            Queue::Removed => REMOVED_QUEUE_STATUS,
        }
    }

    /// Age of the most recent event.
    pub const fn front_register(self) -> u8 {
        match self {
            Queue::Detected => DETECTED_QUEUE_FRONT,
            Queue::Removed => REMOVED_QUEUE_FRONT,
        }
    }

    /// Age of the oldest event still queued.
    pub const fn back_register(self) -> u8 {
        match self {
            Queue::Detected => DETECTED_QUEUE_BACK,
            Queue::Removed => REMOVED_QUEUE_BACK,
        }
    }
}

/// Snapshot of the EVENT_STATUS register.
///
/// Reading the individual accessors on the sensor costs one bus transaction
/// each; [`PirSensor::event_status`](crate::PirSensor::event_status) returns
/// all four flags from a single read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventStatus {
    /// Instantaneous PIR output. Not latched, not cleared.
    pub raw_object_detected: bool,
    /// A debounced event has occurred since the bits were last cleared.
    pub event_available: bool,
    /// Debounced "object left" event.
    pub object_removed: bool,
    /// Debounced "object present" event.
    pub object_detected: bool,
}

impl From<u8> for EventStatus {
    fn from(value: u8) -> Self {
        Self {
            raw_object_detected: flag(value, STATUS_RAW_OBJECT_DETECTED),
            event_available: flag(value, STATUS_EVENT_AVAILABLE),
            object_removed: flag(value, STATUS_OBJECT_REMOVED),
            object_detected: flag(value, STATUS_OBJECT_DETECTED),
        }
    }
}

/// Snapshot of a *_QUEUE_STATUS register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueStatus {
    /// A pop request is still pending in the firmware.
    pub pop_requested: bool,
    /// No timestamps are queued.
    pub is_empty: bool,
    /// The queue is at capacity.
    pub is_full: bool,
}

impl From<u8> for QueueStatus {
    fn from(value: u8) -> Self {
        Self {
            pop_requested: flag(value, QUEUE_POP_REQUEST),
            is_empty: flag(value, QUEUE_IS_EMPTY),
            is_full: flag(value, QUEUE_IS_FULL),
        }
    }
}

/// Milliseconds elapsed between two board timestamps, across rollover.
///
/// Every timestamp register is a free-running 32-bit millisecond counter that
/// wraps after roughly 49.7 days, so plain subtraction underflows when the
/// counter has wrapped between the two samples.
///
/// # Example
///
/// ```
/// use pir_driver::elapsed_between;
///
/// assert_eq!(elapsed_between(1_000, 1_250), 250);
/// assert_eq!(elapsed_between(u32::MAX - 9, 10), 20);
/// ```
pub const fn elapsed_between(earlier_ms: u32, later_ms: u32) -> u32 {
    later_ms.wrapping_sub(earlier_ms)
}
