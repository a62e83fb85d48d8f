//! Error types for PressForge

use thiserror::Error;

/// Errors raised while building or finishing a [`Machine`](crate::Machine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// A button that touches no counter would never change the state.
    #[error("button {button} touches no counter")]
    EmptyButton { button: usize },

    /// A button references a counter the target vector does not have.
    #[error("button {button} references counter {counter}, but the machine has {counters} counters")]
    CounterOutOfRange {
        button: usize,
        counter: usize,
        counters: usize,
    },

    /// The machine already carries a final outcome.
    #[error("machine {machine} already finished")]
    AlreadyFinished { machine: usize },
}

/// Structural errors in a machine description line.
///
/// Malformed numbers are not errors: they read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `{...}` target section.
    #[error("missing target section '{{...}}'")]
    MissingTarget,

    /// An opening delimiter without its closing partner.
    #[error("unterminated '{open}' group")]
    UnterminatedGroup { open: char },

    /// The parsed description does not form a valid machine.
    #[error(transparent)]
    Machine(#[from] MachineError),
}

/// Main error type for PressForge operations
#[derive(Debug, Error)]
pub enum PressForgeError {
    /// A batch line failed to parse.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number in the batch input.
        line: usize,
        #[source]
        source: ParseError,
    },

    /// Error in the machine model
    #[error("Machine error: {0}")]
    Machine(#[from] MachineError),

    /// Error in batch configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The worker pool could not be created
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Invalid operation for current batch state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for PressForge operations
pub type Result<T> = std::result::Result<T, PressForgeError>;
