//! Driver for the SparkFun Qwiic PIR motion sensor breakout.
//!
//! The board runs a small firmware in front of a passive-infrared sensor.
//! It debounces the raw PIR output into "object detected" / "object removed"
//! events, latches them in a status register, optionally pulses an INT pin,
//! and keeps the ages of recent events in two on-board FIFOs.
//!
//! # Architecture
//!
//! - **`driver`** (crate-private) — byte, word and block register access
//!   plus the presence probe, over `embedded-hal-async` I2C.
//! - **[`PirSensor`]** (public) — async, typed API over the register map.
//! - **[`blocking::PirSensor`]** (public) — the same API over blocking
//!   `embedded-hal` I2C.
//!
//! # Quick start
//!
//! ```ignore
//! use pir_driver::{PirSensor, Queue};
//!
//! // Construct with any `embedded-hal-async` I2C implementation
//! let mut pir = PirSensor::new(i2c);
//! if !pir.begin().await? {
//!     // not connected, or not a Qwiic PIR
//! }
//!
//! let status = pir.event_status().await?;
//! if status.event_available {
//!     pir.clear_event_bits().await?;
//! }
//!
//! while !pir.is_queue_empty(Queue::Detected).await? {
//!     let age_ms = pir.pop_queue(Queue::Detected).await?;
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   and driver log messages.

#![no_std]

pub use config::PirConfig;
pub use error::PirError;
pub use pir_sensor::PirSensor;
pub use registers::{DEFAULT_ADDRESS, DEVICE_ID, MAX_ADDRESS, MIN_ADDRESS};
pub use status::{elapsed_between, EventStatus, Queue, QueueStatus};

pub mod blocking;
mod config;
mod driver;
mod error;
#[cfg(test)]
mod fake_bus;
mod pir_sensor;
pub mod registers;
mod status;
