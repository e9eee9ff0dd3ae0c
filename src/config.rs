//! Runtime configuration applied to the board after [`begin()`].
//!
//! [`begin()`]: crate::PirSensor::begin

use crate::registers::MAX_DEBOUNCE_TIME_MS;

/// Event-generation settings written by `apply_config`.
///
/// [`PirConfig::default()`] matches the board's factory behaviour with the
/// 750 ms debounce that suits a person walking past the lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PirConfig {
    /// Dwell time before a raw transition is reported as an event.
    /// Default: 750. Max: 65535.
    pub debounce_time_ms: u16,
    /// Drive the INT pin on debounced events. Default: `true`.
    pub interrupt_enabled: bool,
}

impl PirConfig {
    /// Configuration with a custom debounce, clamped to the register range.
    pub fn with_debounce_ms(ms: u32) -> Self {
        Self {
            debounce_time_ms: clamp_debounce(ms),
            ..Self::default()
        }
    }
}

impl Default for PirConfig {
    fn default() -> Self {
        Self {
            debounce_time_ms: 750,
            interrupt_enabled: true,
        }
    }
}

/// Saturate a millisecond value to what EVENT_DEBOUNCE_TIME can hold.
pub(crate) fn clamp_debounce(ms: u32) -> u16 {
    u16::try_from(ms).unwrap_or(MAX_DEBOUNCE_TIME_MS)
}
