//! ADC protocol responder (test double)
//!
//! Emulates the external serial converter so the pipeline can run without
//! hardware. Clocked on the inverted serial clock, it waits for the
//! device-select line, pulls the data line through the real device's
//! lead-in and null-bit timing, then shifts out the held sample word most
//! significant bit first.
//!
//! Sample pacing is independent of the transfer FSM: a free-running cycle
//! counter advances the table index every time it reaches the configured
//! cycles-per-sample count. The select line is only consulted from `Idle`;
//! reasserting it mid-transfer does not abort the burst, matching the
//! modeled device.

use tracing::trace;

use crate::adc::ProtocolState;
use crate::afsk::WaveformTable;
use crate::error::{FrontEndError, Result};
use crate::types::GeneratedSample;

/// Serial converter emulator fed from a waveform table
#[derive(Clone, Debug)]
pub struct AdcResponder {
    bits: u8,
    cycles_per_sample: u32,
    table: WaveformTable,
    state: ProtocolState,
    sample_idx: usize,
    sample_counter: u32,
    held: GeneratedSample,
}

impl AdcResponder {
    /// Create a responder serving samples from `table`
    ///
    /// # Errors
    ///
    /// [`FrontEndError::EmptyTable`] if the table has no entries.
    pub fn new(bits: u8, cycles_per_sample: u32, table: WaveformTable) -> Result<Self> {
        if table.is_empty() {
            return Err(FrontEndError::EmptyTable);
        }
        Ok(Self {
            bits,
            cycles_per_sample,
            table,
            state: ProtocolState::Idle,
            sample_idx: 0,
            sample_counter: 0,
            held: GeneratedSample {
                bit: false,
                word: crate::types::AdcWord::default(),
            },
        })
    }

    /// Data line level for the current state
    ///
    /// High (pulled up) while idle and through the tri-state lead-in, low
    /// for the null bit, then the held word's bits.
    #[must_use]
    pub fn miso(&self) -> bool {
        match self.state {
            ProtocolState::Idle | ProtocolState::Lead0 | ProtocolState::Lead1 => true,
            ProtocolState::NullBit => false,
            ProtocolState::Bit(n) => self.held.word.bit(n),
        }
    }

    /// Ground-truth bit for the held sample (verification only)
    #[must_use]
    pub const fn truth_bit(&self) -> bool {
        self.held.bit
    }

    /// Table index the next load will use
    #[must_use]
    pub const fn sample_index(&self) -> usize {
        self.sample_idx
    }

    /// Current FSM state (inspection)
    #[must_use]
    pub const fn state(&self) -> ProtocolState {
        self.state
    }

    /// The waveform table backing this responder
    #[must_use]
    pub const fn table(&self) -> &WaveformTable {
        &self.table
    }

    /// Commit one inverted-serial-clock edge
    ///
    /// `select_inactive` must be the pre-edge value of the decoder-driven
    /// select line. All register updates read pre-edge state: the holding
    /// register loads with the index as it was before this edge's pacing
    /// update.
    pub fn clock(&mut self, select_inactive: bool) {
        // Holding register: loads at the edge taken while in the first
        // lead-in state.
        if self.state == ProtocolState::Lead0 {
            self.held = self.table.get(self.sample_idx);
            trace!(
                index = self.sample_idx,
                word = self.held.word.raw(),
                bit = self.held.bit,
                "sample loaded"
            );
        }

        // Free-running sample pacing, FSM state notwithstanding. The reset
        // happens when the counter reaches the configured count, so the
        // effective period is cycles_per_sample + 1 ticks.
        if self.sample_counter >= self.cycles_per_sample {
            self.sample_counter = 0;
            self.sample_idx = (self.sample_idx + 1) % self.table.len();
        } else {
            self.sample_counter += 1;
        }

        self.state = self.state.advance(self.bits - 1, select_inactive);
    }

    /// Force the reset state
    pub fn reset(&mut self) {
        self.state = ProtocolState::Idle;
        self.sample_idx = 0;
        self.sample_counter = 0;
        self.held = GeneratedSample {
            bit: false,
            word: crate::types::AdcWord::default(),
        };
    }
}
