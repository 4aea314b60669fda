//! Serial protocol decoder
//!
//! Runs on the system clock domain and rebuilds the converter's sample
//! word one bit per tick. The decoder is free-running: `Idle` lasts exactly
//! one cycle, so it starts a new transfer every `adc_bits + 4` ticks and
//! the device-select and data-valid outputs pulse once per loop.

use tracing::trace;

use crate::adc::ProtocolState;
use crate::types::AdcWord;

/// Serial decoder state machine
///
/// Registers: the FSM state and the word under assembly. Everything else
/// is combinational off the state.
#[derive(Clone, Debug)]
pub struct SpiDecoder {
    bits: u8,
    state: ProtocolState,
    word: AdcWord,
}

impl SpiDecoder {
    /// Create a decoder for `bits`-wide sample words, in its reset state
    #[must_use]
    pub const fn new(bits: u8) -> Self {
        Self {
            bits,
            state: ProtocolState::Idle,
            word: AdcWord::from_raw(0, 0),
        }
    }

    /// Device-select line, inactive (high) only while idle
    #[must_use]
    pub fn select_inactive(&self) -> bool {
        self.state == ProtocolState::Idle
    }

    /// Data-valid pulse, coincident with the return to idle
    ///
    /// High for exactly one tick; the assembled word is settled for that
    /// tick and consumers must capture it then.
    #[must_use]
    pub fn data_valid(&self) -> bool {
        self.state == ProtocolState::Idle
    }

    /// The word register (complete only while [`SpiDecoder::data_valid`])
    #[must_use]
    pub const fn word(&self) -> AdcWord {
        self.word
    }

    /// Current FSM state (inspection)
    #[must_use]
    pub const fn state(&self) -> ProtocolState {
        self.state
    }

    /// Commit one system clock edge, sampling the data line
    ///
    /// `data_in` must be the pre-edge value of the wire. Bit `n` of the
    /// word register captures the line at the edge taken while in the
    /// `Bit(n)` state.
    pub fn clock(&mut self, data_in: bool) {
        if let ProtocolState::Bit(n) = self.state {
            self.word = self.word.with_bit(n, data_in);
            if n == 0 {
                trace!(word = self.word.raw(), "transfer assembled");
            }
        }
        self.state = self.state.advance(self.bits - 1, false);
    }

    /// Force the reset state
    pub fn reset(&mut self) {
        self.state = ProtocolState::Idle;
        self.word = AdcWord::from_raw(0, 0);
    }
}
