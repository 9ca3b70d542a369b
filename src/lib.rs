//! # vecreduce
//!
//! Partitioned, multi-threaded reductions over large flat numeric buffers.
//!
//! A buffer of `N` elements is split into `K` contiguous partitions, one OS
//! thread folds each partition into a partial result, and the partials are
//! merged deterministically into a single aggregate.
//!
//! ## Supported reductions
//! - minimum and maximum
//! - sum (and the average derived from it)
//! - Euclidean norm (sum of squares, then one square root)
//! - Manhattan norm (sum of absolute values)
//! - dot product of two equal-length buffers
//!
//! Every reduction has a sequential reference and a parallel entry point
//! taking the thread count.
//!
//! ## Design Goals
//! - One engine generic over the element type and a closed set of operators
//! - Fresh scoped threads per call, joined before the call returns
//! - Lock held only to publish a partial, never during computation
//! - All precondition failures reported before any thread is spawned
//!
//! ```
//! use vecreduce::prelude::*;
//!
//! let cfg = EngineConfig::default().with_min_len(1);
//! let buf = NumericBuffer::from_vec(vec![3i64, -1, 4, 1, 5, -9, 2, 6], &cfg)?;
//!
//! assert_eq!(buf.min()?, -9);
//! assert_eq!(buf.sum_parallel(4)?, 11);
//! # Ok::<(), ReduceError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod config;
pub mod engine;
pub mod profiling;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use config::EngineConfig;

pub use engine::buffer::NumericBuffer;

pub use engine::types::{
    DType,
    Element,
    View,
};

pub use engine::partition::{
    Partition,
    plan,
};

pub use engine::reduce::Reduction;

pub use engine::error::{
    ReduceResult,
    ReduceError,
    ConfigError,
    SizeMismatchError,
};

pub use engine::random::XorShift64Star;

pub use profiling::timing::{
    Timed,
    TimingObserver,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used types.
///
/// Import with:
/// ```rust
/// use vecreduce::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        EngineConfig,
        NumericBuffer,
        Element,
        View,
        Reduction,
        ReduceError,
        ReduceResult,
        TimingObserver,
        XorShift64Star,
    };
    pub use crate::engine::{parallel, sequential};
}
