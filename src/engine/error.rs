//! Error types for buffer construction, reduction, and binary I/O.
//!
//! The engine reports failures through a single aggregate, [`ReduceError`],
//! built from small, focused leaf errors. Each leaf models one failure mode
//! and carries the values needed to act on it (requested vs. allowed length,
//! offending bounds, byte counts).
//!
//! ## Propagation
//! * Configuration and precondition failures are raised **before** any worker
//!   thread is spawned. A failed call performs no partial work.
//! * I/O failures on the binary export/import path propagate to the caller.
//! * Timing-log failures never reach this type; the observer reports them on
//!   stderr and carries on.
//! * Nothing in the engine retries. Every failure is reported once.
//!
//! ## Example
//! ```
//! use vecreduce::{NumericBuffer, EngineConfig, ReduceError};
//!
//! let cfg = EngineConfig::default();
//! match NumericBuffer::<f64>::with_config(10, &cfg) {
//!     Err(ReduceError::Config(e)) => eprintln!("rejected: {e}"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ReduceResult<T> = Result<T, ReduceError>;

/// Returned when construction parameters or call arguments are out of range.
///
/// ### Variants
/// * `BufferTooSmall`: requested length is below the configured minimum.
/// * `InvalidRange`: a range fill was asked for `min >= max`.
/// * `InvalidThreadCount`: a thread count of zero.
/// * `InvalidEnv`: an environment override could not be parsed.
/// * `InvalidMinLen`: a configuration with a zero minimum length.
/// * `OperandCount`: a reduction called with the wrong number of operands.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Buffer length below the minimum viable size.
    BufferTooSmall {
        /// Requested length.
        len: usize,
        /// Smallest accepted length.
        min: usize,
    },

    /// Range fill bounds are empty or inverted.
    InvalidRange {
        /// Lower bound as rendered by the element type.
        min: String,
        /// Upper bound as rendered by the element type.
        max: String,
    },

    /// Thread count below one.
    InvalidThreadCount {
        /// Offending count.
        threads: usize,
    },

    /// Environment variable holds an unusable value.
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },

    /// Minimum buffer length configured as zero.
    InvalidMinLen,

    /// A reduction received more or fewer operands than it reads.
    OperandCount {
        /// Operation that was attempted.
        op: &'static str,
        /// Operands the reduction reads.
        expected: usize,
        /// Operands supplied.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BufferTooSmall { len, min } => {
                write!(f, "buffer length {len} is below the minimum of {min}")
            }
            ConfigError::InvalidRange { min, max } => {
                write!(f, "range minimum {min} must be less than maximum {max}")
            }
            ConfigError::InvalidThreadCount { threads } => {
                write!(f, "thread count must be at least 1 (got {threads})")
            }
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "environment variable {var} has invalid value {value:?}")
            }
            ConfigError::InvalidMinLen => f.write_str("minimum buffer length must be at least 1"),
            ConfigError::OperandCount { op, expected, got } => {
                write!(f, "{op} takes {expected} operand(s), got {got}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returned when two operands of a binary reduction disagree on length.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMismatchError {
    /// Length of the left operand.
    pub left: usize,

    /// Length of the right operand.
    pub right: usize,
}

impl fmt::Display for SizeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operand lengths differ ({} vs {})", self.left, self.right)
    }
}

impl std::error::Error for SizeMismatchError {}

/// Aggregate error for every fallible engine operation.

#[derive(Debug, Error)]
pub enum ReduceError {
    /// Invalid construction parameter or argument.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data was read before any fill or import succeeded.
    #[error("{op}: buffer is not initialized")]
    Uninitialized {
        /// Operation that was attempted.
        op: &'static str,
    },

    /// Binary operands have different lengths.
    #[error("size mismatch: {0}")]
    SizeMismatch(#[from] SizeMismatchError),

    /// Opening, reading, or writing a data file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A binary dump does not hold exactly `N` elements of the buffer's type.
    #[error(
        "{} holds {actual_bytes} bytes, expected exactly {expected_bytes}",
        .path.display()
    )]
    LengthMismatch {
        /// File involved.
        path: PathBuf,
        /// `N * size_of::<T>()`.
        expected_bytes: u64,
        /// Size found on disk.
        actual_bytes: u64,
    },

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        /// Worker (partition) index.
        worker: usize,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A worker panicked. Reported only after every worker has been joined.
    #[error("worker {worker} panicked: {message}")]
    WorkerPanicked {
        /// Worker (partition) index.
        worker: usize,
        /// Panic payload, if it was a string.
        message: String,
    },
}

impl ReduceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReduceError::Io { path: path.into(), source }
    }
}
