//! Front-end configuration
//!
//! The pipeline consumes a fixed set of derived constants: clock and baud
//! rates, bit widths, and decimation counts. They are computed outside the
//! core (board support, link planning) and treated as immutable inputs here.
//! [`FrontEndConfig::validate`] fails fast, before any circuit is built, so
//! a width that cannot hold its worst-case value never reaches simulation.

use tracing::debug;

use crate::error::{FrontEndError, Result};

/// Hard upper bound on the symbol queue capacity
///
/// The queue backing store is statically allocated; configurations request
/// any capacity up to this limit.
pub const MAX_SYMBOL_SLOTS: usize = 32;

/// Widest supported ADC word (the word register is 16 bits)
pub const MAX_ADC_BITS: u8 = 15;

/// Complete parameter set for one front-end instance
///
/// All rates are exact integers except the tone frequencies, which only the
/// synthetic waveform generator consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontEndConfig {
    /// System clock frequency in Hz
    pub clock_hz: u32,
    /// Symbol rate in baud
    pub baud: u32,
    /// ADC sample width in bits (signed)
    pub adc_bits: u8,
    /// System clock cycles per protocol sample, as planned by the link budget
    pub cycles_per_sample: u32,
    /// Number of counted ticks per decimation window
    pub decimation: u32,
    /// Symbol queue capacity (decimated samples per symbol)
    pub samples_per_symbol: usize,
    /// Width of the truncated sample stored in the symbol queue
    pub symbol_bits: u8,
    /// Tone frequency for a 1 bit ("mark"), Hz
    pub mark_hz: f64,
    /// Tone frequency for a 0 bit ("space"), Hz
    pub space_hz: f64,
}

impl FrontEndConfig {
    /// Reference configuration: Bell-202 style AFSK at 1200 baud
    ///
    /// 10-bit ADC clocked at 6 MHz, one sample per 13 clock cycles,
    /// decimated by 48 into an 8-slot symbol window.
    #[must_use]
    pub const fn afsk1200() -> Self {
        Self {
            clock_hz: 6_000_000,
            baud: 1200,
            adc_bits: 10,
            cycles_per_sample: 13,
            decimation: 48,
            samples_per_symbol: 8,
            symbol_bits: 8,
            mark_hz: 1200.0,
            space_hz: 2200.0,
        }
    }

    /// Protocol sample rate in Hz (clock divided by cycles per sample)
    #[must_use]
    pub fn sample_rate(&self) -> f64 {
        f64::from(self.clock_hz) / f64::from(self.cycles_per_sample)
    }

    /// Generator samples per transmitted bit (floor of sample rate / baud)
    #[must_use]
    pub fn samples_per_bit(&self) -> usize {
        (self.sample_rate() / f64::from(self.baud)) as usize
    }

    /// System clock cycles per transmitted bit
    #[must_use]
    pub const fn cycles_per_bit(&self) -> u32 {
        self.clock_hz / self.baud
    }

    /// Length of one serial transfer in system clock cycles
    ///
    /// One idle cycle, two lead-in cycles, the null bit, then one cycle per
    /// data bit.
    #[must_use]
    pub const fn transfer_period(&self) -> u32 {
        self.adc_bits as u32 + 4
    }

    /// Width of the decimating accumulator output
    ///
    /// Wide enough for the worst-case sum, so no division is needed: the
    /// growth is the intentional amplitude scaling.
    #[must_use]
    pub fn accumulator_bits(&self) -> u8 {
        self.adc_bits + ceil_log2(self.decimation)
    }

    /// System clock cycles between decimated outputs
    ///
    /// The accumulator counts `decimation` ticks and emits on the next one,
    /// and each counted tick is one completed transfer.
    #[must_use]
    pub const fn decimation_period(&self) -> u32 {
        (self.decimation + 1) * self.transfer_period()
    }

    /// Check every derived constant against its constraints
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: zero rates or counts, a
    /// degenerate queue capacity, or a bit width too small for the value it
    /// must hold.
    pub fn validate(&self) -> Result<()> {
        if self.clock_hz == 0 {
            return Err(FrontEndError::ZeroParameter("clock frequency"));
        }
        if self.baud == 0 {
            return Err(FrontEndError::ZeroParameter("baud rate"));
        }
        if self.cycles_per_sample == 0 {
            return Err(FrontEndError::ZeroParameter("cycles per sample"));
        }
        if self.decimation == 0 {
            return Err(FrontEndError::ZeroDecimation);
        }
        if self.samples_per_symbol == 0 || self.samples_per_symbol > MAX_SYMBOL_SLOTS {
            return Err(FrontEndError::QueueCapacity(self.samples_per_symbol));
        }
        if self.adc_bits < 2 {
            return Err(FrontEndError::WidthTooSmall {
                what: "ADC word",
                given: self.adc_bits,
                needed: 2,
            });
        }
        if self.adc_bits > MAX_ADC_BITS {
            return Err(FrontEndError::WidthTooLarge {
                what: "ADC word",
                given: self.adc_bits,
                max: MAX_ADC_BITS,
            });
        }
        let acc_bits = self.accumulator_bits();
        if acc_bits > 31 {
            return Err(FrontEndError::WidthTooLarge {
                what: "accumulator sum",
                given: acc_bits,
                max: 31,
            });
        }
        if self.symbol_bits == 0 || self.symbol_bits > acc_bits {
            return Err(FrontEndError::WidthTooSmall {
                what: "truncated symbol sample",
                given: self.symbol_bits,
                needed: 1,
            });
        }
        if self.samples_per_bit() == 0 {
            return Err(FrontEndError::ZeroParameter("samples per bit"));
        }
        if self.mark_hz <= 0.0 || self.space_hz <= 0.0 {
            return Err(FrontEndError::ZeroParameter("tone frequency"));
        }

        debug!(
            sample_rate = self.sample_rate(),
            samples_per_bit = self.samples_per_bit(),
            transfer_period = self.transfer_period(),
            accumulator_bits = acc_bits,
            "front-end configuration validated"
        );
        Ok(())
    }
}

impl Default for FrontEndConfig {
    fn default() -> Self {
        Self::afsk1200()
    }
}

/// Smallest `n` such that `2^n >= value` (0 for value 0 or 1)
#[must_use]
pub fn ceil_log2(value: u32) -> u8 {
    if value <= 1 {
        0
    } else {
        (32 - (value - 1).leading_zeros()) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_log2_powers_and_neighbors() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(32), 5);
        assert_eq!(ceil_log2(33), 6);
        assert_eq!(ceil_log2(48), 6);
    }
}
