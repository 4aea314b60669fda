//! AFSK waveform and bit generation
//!
//! The synthetic driver for the pipeline: a seeded pseudorandom bit
//! sequence and the FSK waveform carrying it, sampled at the protocol rate
//! and quantized to the ADC width. Generation is fully deterministic —
//! identical seed and configuration reproduce an identical table bit for
//! bit, which is what makes the protocol round-trip tests repeatable.
//!
//! Tone switching is phase continuous. At a symbol boundary where the bit
//! changes, the phase offset is recomputed so the cosine argument is
//! unchanged at the switching tick; the frequency changes, the waveform
//! does not jump.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::FrontEndConfig;
use crate::error::{FrontEndError, Result};
use crate::types::{AdcWord, GeneratedSample};

/// Phase-continuous FSK tone state
///
/// Tracks the active tone frequency and the accumulated phase offset. The
/// per-tick argument grows as `coeff * freq + phase`, where `coeff` is the
/// caller's time argument for the current tick.
#[derive(Clone, Copy, Debug)]
pub struct FskPhase {
    freq: f64,
    phase: f64,
}

impl FskPhase {
    /// Start a tone at the given frequency with zero phase offset
    #[must_use]
    pub const fn new(freq: f64) -> Self {
        Self { freq, phase: 0.0 }
    }

    /// The active tone frequency
    #[must_use]
    pub const fn freq(&self) -> f64 {
        self.freq
    }

    /// Switch to a new tone, preserving continuity at time `coeff`
    ///
    /// The offset absorbs the argument difference between the old and new
    /// tone, so [`FskPhase::argument`] evaluates identically at the
    /// switching tick.
    pub fn retune(&mut self, coeff: f64, freq: f64) {
        self.phase += coeff * (self.freq - freq);
        self.freq = freq;
    }

    /// Cosine argument at time `coeff`
    #[must_use]
    pub fn argument(&self, coeff: f64) -> f64 {
        coeff * self.freq + self.phase
    }

    /// Instantaneous amplitude at time `coeff`
    #[must_use]
    pub fn value(&self, coeff: f64) -> f64 {
        self.argument(coeff).cos()
    }
}

/// Quantize a `[-1.0, 1.0]` amplitude to a signed ADC word
///
/// Scales to `±(2^(bits-1) - 1)`, truncates toward zero, and applies the
/// responder's midpoint bias of minus one; the most negative code stays in
/// range.
#[must_use]
pub fn quantize(amplitude: f64, bits: u8) -> AdcWord {
    let full_scale = f64::from((1i32 << (bits - 1)) - 1);
    AdcWord::from_signed((amplitude * full_scale) as i32 - 1, bits)
}

/// Pre-computed table of (bit, quantized sample) pairs
///
/// One entry per protocol sample tick, `samples_per_bit` entries per bit of
/// the sequence. Computed once ahead of simulation and consumed by the
/// protocol responder.
#[derive(Clone, Debug)]
pub struct WaveformTable {
    samples: Vec<GeneratedSample>,
    samples_per_bit: usize,
}

impl WaveformTable {
    /// Generate the table for `bit_count` pseudorandom bits
    ///
    /// # Errors
    ///
    /// [`FrontEndError::EmptyTable`] if `bit_count` is zero.
    pub fn generate(config: &FrontEndConfig, bit_count: usize, seed: u64) -> Result<Self> {
        if bit_count == 0 {
            return Err(FrontEndError::EmptyTable);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let bits: Vec<bool> = (0..bit_count).map(|_| rng.gen_range(0..2u8) == 1).collect();

        let sample_rate = config.sample_rate();
        let baud = f64::from(config.baud);
        let samples_per_bit = config.samples_per_bit();
        let coeff_per_tick =
            f64::from(config.cycles_per_sample) * TAU / f64::from(config.clock_hz);

        let mut current_bit = bits[0];
        let mut tone = FskPhase::new(tone_for(config, current_bit));
        let mut boundary = 0usize;

        let mut samples = Vec::with_capacity(samples_per_bit * bit_count);
        for i in 0..samples_per_bit * bit_count {
            let coeff = coeff_per_tick * i as f64;
            let symbol = (i as f64 * baud / sample_rate) as usize;
            if symbol > boundary {
                boundary = symbol;
                let next_bit = bits[i / samples_per_bit];
                if next_bit != current_bit {
                    tone.retune(coeff, tone_for(config, next_bit));
                    current_bit = next_bit;
                }
            }
            samples.push(GeneratedSample {
                bit: current_bit,
                word: quantize(tone.value(coeff), config.adc_bits),
            });
        }

        debug!(
            bits = bit_count,
            samples = samples.len(),
            seed,
            "waveform table generated"
        );
        Ok(Self {
            samples,
            samples_per_bit,
        })
    }

    /// Number of sample entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the table holds no entries (never true after `generate`)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Entries per transmitted bit
    #[must_use]
    pub const fn samples_per_bit(&self) -> usize {
        self.samples_per_bit
    }

    /// Entry at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> GeneratedSample {
        self.samples[index]
    }

    /// All entries in order
    #[must_use]
    pub fn samples(&self) -> &[GeneratedSample] {
        &self.samples
    }
}

/// Tone frequency for a bit value: mark for 1, space for 0
fn tone_for(config: &FrontEndConfig, bit: bool) -> f64 {
    if bit {
        config.mark_hz
    } else {
        config.space_hz
    }
}
