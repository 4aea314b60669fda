//! Error types for the front-end pipeline
//!
//! Everything that can fail does so at construction time, before the first
//! simulated tick. Once a [`crate::frontend::FrontEnd`] is built, the tick
//! functions are infallible: an incorrect tick is a logic bug, not a
//! recoverable error.

use thiserror::Error;

/// Front-end construction error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrontEndError {
    /// A configured bit width cannot hold its maximum value
    #[error("{what} needs {needed} bits but only {given} are configured")]
    WidthTooSmall {
        /// The register or bus concerned
        what: &'static str,
        /// The configured width
        given: u8,
        /// The minimum width that would fit
        needed: u8,
    },

    /// A configured bit width exceeds what the model supports
    #[error("{what} width {given} exceeds the supported maximum {max}")]
    WidthTooLarge {
        /// The register or bus concerned
        what: &'static str,
        /// The configured width
        given: u8,
        /// The widest supported width
        max: u8,
    },

    /// A configured parameter must be non-zero
    #[error("{0} must be non-zero")]
    ZeroParameter(&'static str),

    /// Decimation count of zero would produce a degenerate window
    #[error("decimation count must be non-zero")]
    ZeroDecimation,

    /// Symbol queue capacity outside the supported range
    #[error("symbol queue capacity {0} outside 1..={max}", max = crate::config::MAX_SYMBOL_SLOTS)]
    QueueCapacity(usize),

    /// The combinational dependency graph contains a cycle
    #[error("combinational dependency cycle through block `{0}`")]
    CombinationalCycle(&'static str),

    /// Two combinational blocks drive the same wire
    #[error("wire `{0}` has more than one driver")]
    MultipleDrivers(&'static str),

    /// The generator table handed to the responder is empty
    #[error("generator table is empty")]
    EmptyTable,
}

/// Crate-wide result alias
pub type Result<T> = core::result::Result<T, FrontEndError>;
