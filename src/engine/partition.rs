//! Static partitioning of `[0, N)` across `K` workers.
//!
//! The planner splits a buffer into `K` contiguous, ordered, non-overlapping
//! index ranges whose union is exactly `[0, N)`.
//!
//! ## Block policy
//! * `block = N / K` (floor).
//! * Partitions `0..K-1` each cover exactly `block` elements.
//! * The last partition starts at `(K - 1) * block` and runs to `N`, absorbing
//!   the remainder.
//!
//! When `K > N` the block size is zero: every partition but the last is empty
//! and the last one covers the whole buffer. Empty partitions are harmless;
//! their workers contribute the reduction's identity element.
//!
//! ```
//! use vecreduce::engine::partition::plan;
//!
//! let parts = plan(10, 3).unwrap();
//! let ranges: Vec<_> = parts.iter().map(|p| p.range()).collect();
//! assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
//! ```

use std::ops::Range;

use crate::engine::error::{ConfigError, ReduceResult};

/// One worker's share of the index space.
///
/// ## Invariants
/// * `start <= end`
/// * `worker` equals the partition's position in the planned sequence.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Partition {
    /// Worker identifier (also the slot index for its partial result).
    pub worker: usize,

    /// First index covered.
    pub start: usize,

    /// One past the last index covered.
    pub end: usize,
}

impl Partition {
    /// Number of indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the partition covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered indices as a range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Splits `[0, len)` into `threads` partitions.
///
/// ## Errors
/// [`ConfigError::InvalidThreadCount`] if `threads == 0`.
pub fn plan(len: usize, threads: usize) -> ReduceResult<Vec<Partition>> {
    if threads == 0 {
        return Err(ConfigError::InvalidThreadCount { threads }.into());
    }

    let block = len / threads;
    let last = threads - 1;

    Ok((0..threads)
        .map(|worker| {
            let start = worker * block;
            let end = if worker == last { len } else { start + block };
            Partition { worker, start, end }
        })
        .collect())
}
