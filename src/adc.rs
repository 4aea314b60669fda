//! Serial ADC protocol
//!
//! The converter talks a three-wire serial protocol: a decoder-driven
//! serial clock, an active-low device-select line, and one data line. A
//! transfer is one idle cycle, two lead-in cycles while the device output
//! settles out of tri-state, a forced-low null bit, then the data bits most
//! significant first.
//!
//! - [`decoder`] reconstructs sample words on the system clock domain
//! - [`responder`] emulates the external converter for tests, clocked on
//!   the inverted serial clock

pub mod decoder;
pub mod responder;

/// FSM shared by both ends of the wire
///
/// The two state machines mirror each other state for state; only the
/// outputs differ. Per-bit states are the single [`ProtocolState::Bit`]
/// variant counting from the most significant bit down to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProtocolState {
    /// Between transfers; select inactive, output line released
    #[default]
    Idle,
    /// First lead-in cycle after select
    Lead0,
    /// Second lead-in cycle
    Lead1,
    /// Forced-low null bit ahead of the data
    NullBit,
    /// Driving/sampling data bit `n`, most significant first
    Bit(u8),
}

impl ProtocolState {
    /// Pure transition function
    ///
    /// `msb` is the index of the most significant data bit. `Idle` holds
    /// while `hold_idle` is set (the responder waits for select; the
    /// decoder starts unconditionally).
    #[must_use]
    pub const fn advance(self, msb: u8, hold_idle: bool) -> Self {
        match self {
            Self::Idle => {
                if hold_idle {
                    Self::Idle
                } else {
                    Self::Lead0
                }
            }
            Self::Lead0 => Self::Lead1,
            Self::Lead1 => Self::NullBit,
            Self::NullBit => Self::Bit(msb),
            Self::Bit(0) => Self::Idle,
            Self::Bit(n) => Self::Bit(n - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProtocolState;

    #[test]
    fn transfer_walks_every_state_once() {
        let mut state = ProtocolState::Idle;
        let mut seen = Vec::new();
        loop {
            state = state.advance(2, false);
            seen.push(state);
            if state == ProtocolState::Idle {
                break;
            }
        }
        assert_eq!(
            seen,
            [
                ProtocolState::Lead0,
                ProtocolState::Lead1,
                ProtocolState::NullBit,
                ProtocolState::Bit(2),
                ProtocolState::Bit(1),
                ProtocolState::Bit(0),
                ProtocolState::Idle,
            ]
        );
    }

    #[test]
    fn idle_holds_while_requested() {
        let state = ProtocolState::Idle;
        assert_eq!(state.advance(9, true), ProtocolState::Idle);
        assert_eq!(state.advance(9, false), ProtocolState::Lead0);
    }
}
