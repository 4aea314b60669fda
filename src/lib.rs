//! AFSK Front-End Library
//!
//! Cycle-accurate model of a clocked digital front-end for AFSK reception.
//! An analog audio FSK signal is digitized through a serial ADC protocol,
//! decimated to symbol-rate resolution, and staged in a circular queue for
//! a downstream bit demodulator. A deterministic waveform generator and a
//! protocol responder emulate the external converter, so the whole path
//! runs and verifies without hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TEST DRIVER                              │
//! │  Waveform/Bit Generator  │  ADC Protocol Responder           │
//! │                      (inverted serial clock domain)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     RECEIVE PATH                             │
//! │  Serial Decoder → Decimating Accumulator → Symbol Queue      │
//! │                      (system clock domain)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     SIMULATION CORE                          │
//! │  Two-phase tick  │  Clock domains  │  Comb. scheduling       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Registers read pre-edge**: combinational reads and edge commits are
//!   separate entry points; a whole domain commits atomically
//! - **FSMs are enums**: every state machine is a tagged enumeration with a
//!   pure transition function, no dynamic dispatch
//! - **Fail at construction**: bad widths, degenerate counts, and
//!   combinational cycles are `Err` before the first tick, never a panic
//! - **Deterministic by seed**: identical seed and configuration reproduce
//!   the waveform table bit for bit

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

/// Serial ADC protocol: decoder FSM and responder test double
pub mod adc;

/// AFSK waveform and deterministic bit generation
pub mod afsk;

/// Derived configuration constants and their validation
pub mod config;

/// Symbol-rate processing: decimation and the symbol queue
pub mod dsp;

/// Construction-time error types
pub mod error;

/// Top-level harness wiring both clock domains
pub mod frontend;

/// Synchronous simulation primitives
pub mod sim;

/// Shared sample and word types
pub mod types;

pub use config::FrontEndConfig;
pub use error::{FrontEndError, Result};
pub use frontend::{CycleEvents, FrontEnd};
