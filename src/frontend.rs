//! Top-level front-end harness
//!
//! Composes the whole receive path across its two clock domains:
//!
//! ```text
//! waveform table ──► responder ──miso──► decoder ──word+valid──► accumulator
//!   (inverted serial clock domain)  │  (system clock domain)        │
//!                                   └◄─select──┘              symbol queue
//! ```
//!
//! The harness performs no signal processing of its own: it owns the
//! evaluation schedule, the two-phase tick, the domain-crossing rule, and
//! two small top-level registers (the data-valid-gated word capture and
//! the free-running queue read cursor).

use tracing::debug;

use crate::adc::decoder::SpiDecoder;
use crate::adc::responder::AdcResponder;
use crate::afsk::WaveformTable;
use crate::config::FrontEndConfig;
use crate::dsp::{truncate_sum, DecimatingAccumulator, SymbolQueue};
use crate::error::Result;
use crate::sim::clock::{ClockDomain, DerivedClock};
use crate::sim::graph::CombGraph;
use crate::types::AdcWord;

/// Combinational blocks of the front end, in declaration order
#[derive(Clone, Copy, Debug)]
enum CombBlock {
    DecoderOutputs,
    ResponderData,
    AccumulatorOutputs,
    Truncate,
    QueueRead,
}

const BLOCKS: [CombBlock; 5] = [
    CombBlock::DecoderOutputs,
    CombBlock::ResponderData,
    CombBlock::AccumulatorOutputs,
    CombBlock::Truncate,
    CombBlock::QueueRead,
];

/// Wire values observable during one system cycle
///
/// A pulse and its data are valid on the same tick, and only that tick:
/// [`CycleEvents::data_valid`] pairs with [`CycleEvents::word`], and
/// [`CycleEvents::sum_valid`] with [`CycleEvents::sum`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleEvents {
    /// Serial data line level driven by the responder
    pub miso: bool,
    /// Device-select line, inactive (high) while the decoder idles
    pub select_inactive: bool,
    /// Decoder finished a transfer this cycle
    pub data_valid: bool,
    /// Assembled sample word (capture on `data_valid`)
    pub word: AdcWord,
    /// Ground-truth bit held by the responder (verification only)
    pub truth_bit: bool,
    /// Accumulator emitted a decimated sum this cycle
    pub sum_valid: bool,
    /// Emitted sum (capture on `sum_valid`)
    pub sum: i32,
    /// Truncated symbol sample presented to the queue
    pub symbol: i16,
    /// Queue value at the current read cursor
    pub queue_read: i16,
}

/// The wired-up front end
pub struct FrontEnd {
    config: FrontEndConfig,
    sys: ClockDomain,
    serial_n: DerivedClock,
    responder: AdcResponder,
    decoder: SpiDecoder,
    accumulator: DecimatingAccumulator,
    queue: SymbolQueue,
    schedule: Vec<CombBlock>,
    /// Top-level word register, loaded while data-valid is high
    last_word: AdcWord,
    /// Free-running queue read cursor
    read_index: usize,
    read_divider: u32,
    /// Data-valid pulses observed since reset release
    transfers: u64,
}

impl FrontEnd {
    /// Build and wire the pipeline; both domains start in reset
    ///
    /// # Errors
    ///
    /// Configuration constraint violations, an empty waveform table, or a
    /// combinational scheduling error — all before any tick runs.
    pub fn new(config: FrontEndConfig, table: WaveformTable) -> Result<Self> {
        config.validate()?;

        // Declare the combinational wiring and schedule it. The declared
        // read/write sets mirror exactly what `evaluate` does below.
        let mut graph = CombGraph::new();
        let miso = graph.wire("miso");
        let select = graph.wire("select_n");
        let data_valid = graph.wire("data_valid");
        let adc_word = graph.wire("adc_word");
        let acc_valid = graph.wire("acc_valid");
        let acc_sum = graph.wire("acc_sum");
        let symbol_in = graph.wire("symbol_in");
        let symbol_out = graph.wire("symbol_out");
        graph.block("decoder/outputs", &[], &[select, data_valid, adc_word]);
        graph.block("responder/data", &[], &[miso]);
        graph.block("accumulator/outputs", &[], &[acc_valid, acc_sum]);
        graph.block("truncate", &[acc_sum], &[symbol_in]);
        graph.block("queue/read", &[], &[symbol_out]);
        let schedule: Vec<CombBlock> = graph.schedule()?.iter().map(|id| BLOCKS[id.0]).collect();

        let responder = AdcResponder::new(config.adc_bits, config.cycles_per_sample, table)?;
        let queue = SymbolQueue::new(config.samples_per_symbol)?;

        debug!(
            schedule = ?schedule,
            transfer_period = config.transfer_period(),
            decimation_period = config.decimation_period(),
            "front end constructed"
        );

        Ok(Self {
            config,
            sys: ClockDomain::new("sys"),
            serial_n: DerivedClock::new("serial_n"),
            responder,
            decoder: SpiDecoder::new(config.adc_bits),
            accumulator: DecimatingAccumulator::new(config.decimation),
            queue,
            schedule,
            last_word: AdcWord::default(),
            read_index: 0,
            read_divider: 0,
            transfers: 0,
        })
    }

    /// Evaluate every combinational wire from current register state
    fn evaluate(&self) -> CycleEvents {
        let mut w = CycleEvents::default();
        for block in &self.schedule {
            match block {
                CombBlock::DecoderOutputs => {
                    w.select_inactive = self.decoder.select_inactive();
                    w.data_valid = self.decoder.data_valid();
                    w.word = self.decoder.word();
                }
                CombBlock::ResponderData => {
                    w.miso = self.responder.miso();
                    w.truth_bit = self.responder.truth_bit();
                }
                CombBlock::AccumulatorOutputs => {
                    w.sum_valid = self.accumulator.output_valid();
                    w.sum = self.accumulator.output();
                }
                CombBlock::Truncate => {
                    w.symbol = truncate_sum(
                        w.sum,
                        self.config.accumulator_bits(),
                        self.config.symbol_bits,
                    );
                }
                CombBlock::QueueRead => {
                    w.queue_read = self.queue.read(self.read_index);
                }
            }
        }
        w
    }

    /// Release both domains' reset lines
    pub fn release_reset(&mut self) {
        self.sys.release_reset();
        self.serial_n.set_reset(false);
    }

    /// Re-assert both domains' reset lines
    pub fn reset(&mut self) {
        self.sys.assert_reset();
        self.serial_n.set_reset(true);
    }

    /// Execute one full system clock cycle
    ///
    /// Four phases: evaluate all wires from pre-edge state; commit the
    /// system domain; re-evaluate so the derived domain sees post-edge
    /// values; derive the inverted serial-clock edge from the system clock
    /// level and commit the responder. The returned events are the wire
    /// values this cycle exposed — pulses are observable here and nowhere
    /// else.
    pub fn step(&mut self) -> CycleEvents {
        let w = self.evaluate();

        self.sys.edge();
        if self.sys.in_reset() {
            self.decoder.reset();
            self.accumulator.reset();
            self.queue.reset();
            self.last_word = AdcWord::default();
            self.read_index = 0;
            self.read_divider = 0;
            self.transfers = 0;
        } else {
            self.decoder.clock(w.miso);
            self.accumulator
                .clock(w.data_valid, w.word.to_signed(self.config.adc_bits));
            self.queue.clock(w.sum_valid, w.symbol);
            if w.data_valid {
                self.last_word = w.word;
                self.transfers += 1;
            }
            self.read_divider += 1;
            if self.read_divider >= self.config.decimation_period() {
                self.read_divider = 0;
                self.read_index = (self.read_index + 1) % self.queue.capacity();
            }
        }

        // The decoder forwards the system clock as the serial clock. After
        // the committed edge the level is high; it falls mid-cycle, and the
        // inverted level rising is the derived domain's edge.
        let select_after_edge = self.decoder.select_inactive();
        self.serial_n.set_reset(self.sys.in_reset());
        self.serial_n.sample(true);
        if self.serial_n.sample(false) {
            if self.serial_n.in_reset() {
                self.responder.reset();
            } else {
                self.responder.clock(select_after_edge);
            }
        }

        w
    }

    /// Step `cycles` times, discarding per-cycle events
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.step();
        }
    }

    /// System cycles needed to play the entire waveform table once
    #[must_use]
    pub fn cycles_for_full_table(&self) -> u64 {
        let bits = self.responder.table().len() / self.responder.table().samples_per_bit();
        bits as u64 * u64::from(self.config.cycles_per_bit())
    }

    /// The configuration this front end was built with
    #[must_use]
    pub const fn config(&self) -> &FrontEndConfig {
        &self.config
    }

    /// Data-valid pulses seen since reset release
    #[must_use]
    pub const fn transfers(&self) -> u64 {
        self.transfers
    }

    /// Top-level captured word (last completed transfer)
    #[must_use]
    pub const fn last_word(&self) -> AdcWord {
        self.last_word
    }

    /// Current free-running read cursor
    #[must_use]
    pub const fn read_index(&self) -> usize {
        self.read_index
    }

    /// Elapsed system cycles
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.sys.edges()
    }

    /// The symbol queue (random-access reads are combinational)
    #[must_use]
    pub const fn queue(&self) -> &SymbolQueue {
        &self.queue
    }

    /// The responder test double (inspection)
    #[must_use]
    pub const fn responder(&self) -> &AdcResponder {
        &self.responder
    }

    /// The serial decoder (inspection)
    #[must_use]
    pub const fn decoder(&self) -> &SpiDecoder {
        &self.decoder
    }
}
