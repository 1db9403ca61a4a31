//! Error types for the coherence simulator.
//!
//! The simulator is fail-stop: trace errors abort the run with line context,
//! and there is no retry or partial recovery. See the crate-level invariant
//! checks in [`crate::coherence`] for the separate class of bugs (invariant
//! violations) that are enforced via `debug_assert!` rather than `Result`.

use thiserror::Error;

/// Errors that can terminate a simulation run before it produces output.
#[derive(Debug, Error)]
pub enum SimError {
    /// A trace line could not be parsed: bad opcode, bad processor id,
    /// non-numeric address, or an unknown directive.
    #[error("trace error at line {line}: {message}")]
    Trace {
        /// 1-indexed line number within the trace file.
        line: usize,
        /// Human-readable description of what was wrong with the line.
        message: String,
    },

    /// Wraps an I/O failure (trace file missing, output directory
    /// unwritable, etc.) with the path that was being operated on.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The path that the failing operation was acting on.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SimError {
    /// Builds a [`SimError::Trace`] for line `line` with the given message.
    pub fn trace(line: usize, message: impl Into<String>) -> Self {
        SimError::Trace {
            line,
            message: message.into(),
        }
    }

    /// Builds a [`SimError::Io`] tagging the path that failed.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        SimError::Io {
            path: path.into(),
            source,
        }
    }
}
