//! Decimating accumulator
//!
//! Sums a fixed run of decoded samples and emits the sum once per
//! decimation period. No averaging division: the output bus is sized for
//! the worst-case sum, and the growth is the intended amplitude scaling.
//!
//! Boundary behavior, kept exactly as the modeled hardware: the counter
//! check precedes the accumulate path, so the emission tick adds the
//! current input on top of the stored sum and an emitted window covers
//! `decimation + 1` accepted samples. Downstream sizing accounts for it.

use tracing::trace;

/// Running accumulator with valid-gated input and a one-tick output pulse
///
/// Registers: the tick counter, the running sum, and the registered output
/// pair (sum + valid). The output pair always changes together, so a
/// consumer sampling on the pulse tick reads the matching sum.
#[derive(Clone, Debug)]
pub struct DecimatingAccumulator {
    decimation: u32,
    counter: u32,
    acc: i32,
    out: i32,
    out_valid: bool,
}

impl DecimatingAccumulator {
    /// Create an accumulator emitting once per `decimation + 1` inputs
    #[must_use]
    pub const fn new(decimation: u32) -> Self {
        Self {
            decimation,
            counter: 0,
            acc: 0,
            out: 0,
            out_valid: false,
        }
    }

    /// Registered output sum (meaningful while the pulse is high)
    #[must_use]
    pub const fn output(&self) -> i32 {
        self.out
    }

    /// One-tick output-valid pulse
    #[must_use]
    pub const fn output_valid(&self) -> bool {
        self.out_valid
    }

    /// Commit one clock edge
    ///
    /// With `input_valid` low, every register holds and the pulse drops.
    /// Otherwise the counter either accumulates or, having reached the
    /// decimation count, emits `acc + sample` and clears.
    pub fn clock(&mut self, input_valid: bool, sample: i32) {
        if !input_valid {
            self.out_valid = false;
            return;
        }
        if self.counter >= self.decimation {
            self.counter = 0;
            self.out = self.acc + sample;
            self.acc = 0;
            self.out_valid = true;
            trace!(sum = self.out, "decimated sum emitted");
        } else {
            self.counter += 1;
            self.acc += sample;
            self.out_valid = false;
        }
    }

    /// Force the reset state
    pub fn reset(&mut self) {
        self.counter = 0;
        self.acc = 0;
        self.out = 0;
        self.out_valid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_covers_decimation_plus_one_samples() {
        let mut acc = DecimatingAccumulator::new(4);
        acc.reset();
        let inputs = [1, 2, 3, 4, 5];
        let mut emitted = None;
        for &s in &inputs {
            acc.clock(true, s);
            if acc.output_valid() {
                emitted = Some(acc.output());
            }
        }
        assert_eq!(emitted, Some(15));
    }

    #[test]
    fn invalid_input_freezes_state() {
        let mut acc = DecimatingAccumulator::new(4);
        acc.reset();
        acc.clock(true, 10);
        let snapshot = acc.clone();
        for _ in 0..7 {
            acc.clock(false, 999);
        }
        assert_eq!(acc.output(), snapshot.output());
        assert!(!acc.output_valid());
        // The window resumes where it stopped.
        for &s in &[10, 10, 10, 10] {
            acc.clock(true, s);
        }
        assert!(acc.output_valid());
        assert_eq!(acc.output(), 50);
    }
}
