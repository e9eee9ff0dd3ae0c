//! In-memory Qwiic PIR used by the unit tests.
//!
//! [`FakePir`] implements both the blocking and async `embedded-hal` I2C
//! traits over a flat register file, models the two event queues, and
//! records every register write so tests can assert on bus traffic.

extern crate std;

use std::vec::Vec;

use embedded_hal::i2c::{Error, ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

use crate::registers::{
    DEFAULT_ADDRESS, DEVICE_ID, I2C_ADDRESS, QUEUE_IS_EMPTY, QUEUE_IS_FULL, QUEUE_POP_REQUEST,
};
use crate::status::Queue;

/// Capacity used for both fake queues.
pub const FAKE_QUEUE_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeError {
    /// Nothing acknowledged the address.
    Nack,
    /// Arbitration loss or similar electrical failure.
    Bus,
}

impl Error for FakeError {
    fn kind(&self) -> ErrorKind {
        match self {
            FakeError::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            FakeError::Bus => ErrorKind::Bus,
        }
    }
}

/// A register write seen on the bus: `(register, payload)`.
pub type WriteRecord = (u8, Vec<u8>);

pub struct FakePir {
    /// Address the fake currently answers on.
    pub address: u8,
    /// Whether the board is plugged in at all.
    pub present: bool,
    /// Fail every transaction with [`FakeError::Bus`].
    pub broken: bool,
    /// Move to the address written to I2C_ADDRESS (a real board does).
    pub follows_address_write: bool,
    pub registers: [u8; 0x20],
    pub writes: Vec<WriteRecord>,
    /// Oldest first, values are ages in milliseconds.
    detected: Vec<u32>,
    removed: Vec<u32>,
    pointer: usize,
}

impl FakePir {
    pub fn new() -> Self {
        let mut fake = Self {
            address: DEFAULT_ADDRESS,
            present: true,
            broken: false,
            follows_address_write: true,
            registers: [0; 0x20],
            writes: Vec::new(),
            detected: Vec::new(),
            removed: Vec::new(),
            pointer: 0,
        };
        fake.registers[0x00] = DEVICE_ID;
        fake.refresh_queue(Queue::Detected);
        fake.refresh_queue(Queue::Removed);
        fake
    }

    /// Replace a queue's contents, oldest age first.
    pub fn load_queue(&mut self, queue: Queue, ages: &[u32]) {
        *self.queue_mut(queue) = ages.to_vec();
        self.refresh_queue(queue);
    }

    pub fn queue_len(&self, queue: Queue) -> usize {
        match queue {
            Queue::Detected => self.detected.len(),
            Queue::Removed => self.removed.len(),
        }
    }

    /// Register writes addressed to `register`.
    pub fn writes_to(&self, register: u8) -> Vec<&[u8]> {
        self.writes
            .iter()
            .filter(|(r, _)| *r == register)
            .map(|(_, data)| data.as_slice())
            .collect()
    }

    fn queue_mut(&mut self, queue: Queue) -> &mut Vec<u32> {
        match queue {
            Queue::Detected => &mut self.detected,
            Queue::Removed => &mut self.removed,
        }
    }

    fn refresh_queue(&mut self, queue: Queue) {
        let ages = match queue {
            Queue::Detected => self.detected.clone(),
            Queue::Removed => self.removed.clone(),
        };
        let front = ages.last().copied().unwrap_or(0).to_le_bytes();
        let back = ages.first().copied().unwrap_or(0).to_le_bytes();
        let f = queue.front_register() as usize;
        let b = queue.back_register() as usize;
        self.registers[f..f + 4].copy_from_slice(&front);
        self.registers[b..b + 4].copy_from_slice(&back);

        let mut status = 0;
        if ages.is_empty() {
            status |= QUEUE_IS_EMPTY;
        }
        if ages.len() >= FAKE_QUEUE_DEPTH {
            status |= QUEUE_IS_FULL;
        }
        self.registers[queue.status_register() as usize] = status;
    }

    fn write_register(&mut self, register: u8, value: u8) {
        for queue in [Queue::Detected, Queue::Removed] {
            if register == queue.status_register() {
                if value & QUEUE_POP_REQUEST != 0 && !self.queue_mut(queue).is_empty() {
                    self.queue_mut(queue).remove(0);
                }
                self.refresh_queue(queue);
                return;
            }
        }

        if register == I2C_ADDRESS && self.follows_address_write {
            self.address = value;
        }
        self.registers[register as usize] = value;
    }

    fn apply(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), FakeError> {
        if self.broken {
            return Err(FakeError::Bus);
        }
        if !self.present || address != self.address {
            return Err(FakeError::Nack);
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let Some((&register, payload)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = register as usize;
                    if payload.is_empty() {
                        continue;
                    }
                    self.writes.push((register, payload.to_vec()));
                    for &value in payload {
                        self.write_register(self.pointer as u8, value);
                        self.pointer += 1;
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.registers[self.pointer % self.registers.len()];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

impl ErrorType for FakePir {
    type Error = FakeError;
}

impl embedded_hal::i2c::I2c for FakePir {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.apply(address, operations)
    }
}

impl embedded_hal_async::i2c::I2c for FakePir {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.apply(address, operations)
    }
}

/// Delay that returns immediately and counts the requested milliseconds.
#[derive(Default)]
pub struct FakeDelay {
    pub total_ns: u64,
}

impl embedded_hal::delay::DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
