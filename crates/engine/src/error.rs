//! Load-time and run-time errors for the Foldy engine.
//!
//! The two enums mirror the two phases of the interpreter: `LoadError` can
//! only happen while turning program text into a grid, `RuntimeError` can
//! only happen while ticking.

use thiserror::Error;

/// Errors that occur while loading program text into a [`crate::Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The program text contains characters outside the Foldy alphabet.
    /// `chars` holds every offender, deduplicated and sorted.
    #[error("unknown character(s) ({chars}) found in code")]
    UnknownCharacters { chars: String },
}

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `:` popped a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// An instruction that requires a non-empty stack found it empty.
    /// Only `]` has this requirement; the other pop-based instructions
    /// either floor-pad or fall back to a no-op.
    #[error("'{op}' on empty stack")]
    StackEmpty { op: char },

    /// The tick budget ran out before the program issued `@`.
    #[error("code did not terminate by tick {ticks}")]
    TickLimitExceeded { ticks: u64 },

    /// `;` hit end of input with no character left to read.
    #[error("input exhausted while reading a character")]
    InputExhausted,

    /// The caller's cancellation flag was set between ticks.
    #[error("execution cancelled")]
    Cancelled,

    /// An input or output operation failed. The message is captured as a
    /// string so the enum stays `Clone + Eq`.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::Io(err.to_string())
    }
}
