//! Circular symbol queue
//!
//! A fixed-capacity ring holding the most recent symbol's worth of
//! decimated samples. Writes advance an internal cursor and wrap; reads
//! are combinational at an externally supplied index with no valid
//! signaling. Slots hold their zero default until first written, so reads
//! are undefined-until-first-full-cycle — steady-state consumers only read
//! indices that have been written.

use heapless::Vec;

use crate::config::MAX_SYMBOL_SLOTS;
use crate::error::{FrontEndError, Result};

/// Ring buffer of truncated symbol samples
///
/// Registers: the slot array and the write cursor. The read cursor is not
/// part of the queue; the consumer supplies an index per read.
#[derive(Clone, Debug)]
pub struct SymbolQueue {
    slots: Vec<i16, MAX_SYMBOL_SLOTS>,
    write_pos: usize,
    writes: u64,
}

impl SymbolQueue {
    /// Create a queue of `capacity` zeroed slots
    ///
    /// # Errors
    ///
    /// [`FrontEndError::QueueCapacity`] for zero or over-maximum capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        let mut slots = Vec::new();
        if capacity == 0 || slots.resize(capacity, 0).is_err() {
            return Err(FrontEndError::QueueCapacity(capacity));
        }
        Ok(Self {
            slots,
            write_pos: 0,
            writes: 0,
        })
    }

    /// Slot count
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Combinational read at `index`, wrapped to the capacity
    #[must_use]
    pub fn read(&self, index: usize) -> i16 {
        self.slots[index % self.slots.len()]
    }

    /// Total accepted writes since reset
    ///
    /// Once this reaches the capacity, every slot has been written at
    /// least once and reads are defined everywhere.
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.writes
    }

    /// Commit one clock edge, writing `value` if `input_valid`
    pub fn clock(&mut self, input_valid: bool, value: i16) {
        if input_valid {
            self.slots[self.write_pos] = value;
            self.write_pos = (self.write_pos + 1) % self.slots.len();
            self.writes += 1;
        }
    }

    /// Force the reset state: cursor to zero, slots to their default
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = 0;
        }
        self.write_pos = 0;
        self.writes = 0;
    }
}
