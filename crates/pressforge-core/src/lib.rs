//! Core types for PressForge
//!
//! This crate provides:
//! - The machine model (buttons, target counters, derived press bounds)
//! - Per-machine telemetry and the write-once solve outcome
//! - The lenient line parser
//! - Error types

pub mod error;
pub mod machine;
pub mod parse;

pub use error::{MachineError, ParseError, PressForgeError, Result};
pub use machine::{Button, CounterMatch, Machine, MachineStatus, Solution, SolveOutcome};
pub use parse::{parse_batch, parse_machine};
