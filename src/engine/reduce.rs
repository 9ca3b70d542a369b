//! Reduction operator descriptors.
//!
//! This module defines the **closed set of reductions** the engine supports,
//! as a tagged variant rather than six copies of the same loop. Each
//! [`Reduction`] knows:
//!
//! * its **identity** element (the start value of every accumulator),
//! * how to **fold** a contiguous run of elements into a partial result,
//! * how to **combine** two partial results.
//!
//! ## Execution model
//! A reduction proceeds in two phases:
//!
//! 1. **Local accumulation**
//!    * Each worker folds its own partition, starting from the identity.
//!    * An empty partition yields the identity unchanged.
//!
//! 2. **Deterministic combination**
//!    * Partials are combined in worker order, starting from the identity.
//!    * The combine step is associative and commutative for every variant,
//!      so the result does not depend on which worker finishes first.
//!
//! The sequential reducers are the same fold applied to the whole buffer,
//! which keeps the single-threaded path and the per-partition path
//! algorithmically identical.
//!
//! ## Post-transforms
//! [`Reduction::SumOfSquares`] is the accumulator behind the Euclidean norm.
//! The square root is applied once, after combination, by the caller.
//!
//! ## Sentinels
//! * `Min` starts from `T::max_sentinel()`, `Max` from `T::min_sentinel()`.
//!   For floats these are the infinities.
//! * Comparisons are strict, so ties keep the first extremum seen.

use crate::engine::error::ConfigError;
use crate::engine::types::Element;

/// Name of the sequential average, which is derived from [`Reduction::Sum`].
pub const AVG_SEQUENTIAL_NAME: &str = "findAvg";

/// Name of the parallel average.
pub const AVG_PARALLEL_NAME: &str = "findAvgParallel";

/// One of the supported reductions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Smallest element.
    Min,

    /// Largest element.
    Max,

    /// Sum of elements.
    Sum,

    /// Sum of squares (Euclidean norm before the square root).
    SumOfSquares,

    /// Sum of absolute values (Manhattan norm).
    SumOfAbs,

    /// Sum of pairwise products of two equal-length operands.
    Dot,
}

impl Reduction {
    /// Whether the reduction reads a second operand.
    pub const fn is_binary(self) -> bool {
        matches!(self, Reduction::Dot)
    }

    /// Number of operands the reduction reads.
    pub const fn arity(self) -> usize {
        if self.is_binary() {
            2
        } else {
            1
        }
    }

    /// Rejects a call whose operand count does not match [`arity`](Self::arity).
    ///
    /// `name` is the operation name reported in the error.
    pub fn check_operands(self, name: &'static str, has_rhs: bool) -> Result<(), ConfigError> {
        let got = 1 + usize::from(has_rhs);
        if got == self.arity() {
            Ok(())
        } else {
            Err(ConfigError::OperandCount { op: name, expected: self.arity(), got })
        }
    }

    /// Start value for an accumulator.
    #[inline]
    pub fn identity<T: Element>(self) -> T {
        match self {
            Reduction::Min => T::max_sentinel(),
            Reduction::Max => T::min_sentinel(),
            Reduction::Sum | Reduction::SumOfSquares | Reduction::SumOfAbs | Reduction::Dot => {
                T::zero()
            }
        }
    }

    /// Merges two partial results.
    #[inline]
    pub fn combine<T: Element>(self, acc: T, partial: T) -> T {
        match self {
            Reduction::Min => {
                if partial < acc {
                    partial
                } else {
                    acc
                }
            }
            Reduction::Max => {
                if partial > acc {
                    partial
                } else {
                    acc
                }
            }
            Reduction::Sum | Reduction::SumOfSquares | Reduction::SumOfAbs | Reduction::Dot => {
                acc.acc_add(partial)
            }
        }
    }

    /// Folds a contiguous run of elements, starting from the identity.
    ///
    /// For [`Reduction::Dot`] `rhs` must be `Some` and as long as `lhs`;
    /// [`check_operands`](Self::check_operands) and the engine's length check
    /// enforce this before any data is read. Debug builds assert it here. For
    /// every other variant `rhs` is ignored.
    pub fn fold<T: Element>(self, lhs: &[T], rhs: Option<&[T]>) -> T {
        let init = self.identity::<T>();
        match self {
            Reduction::Min | Reduction::Max => {
                lhs.iter().fold(init, |acc, &x| self.combine(acc, x))
            }
            Reduction::Sum => lhs.iter().fold(init, |acc, &x| acc.acc_add(x)),
            Reduction::SumOfSquares => lhs.iter().fold(init, |acc, &x| acc.acc_add(x.acc_mul(x))),
            Reduction::SumOfAbs => lhs.iter().fold(init, |acc, &x| acc.acc_add(x.magnitude())),
            Reduction::Dot => {
                debug_assert!(
                    rhs.is_some_and(|r| r.len() == lhs.len()),
                    "dot product needs two operands of equal length"
                );
                match rhs {
                    Some(rhs) => lhs
                        .iter()
                        .zip(rhs)
                        .fold(init, |acc, (&a, &b)| acc.acc_add(a.acc_mul(b))),
                    None => init,
                }
            }
        }
    }

    /// Combines a sequence of partials in order, starting from the identity.
    pub fn merge<T: Element>(self, partials: impl IntoIterator<Item = T>) -> T {
        partials
            .into_iter()
            .fold(self.identity::<T>(), |acc, p| self.combine(acc, p))
    }

    /// Name used for the sequential operation in timing logs.
    pub const fn sequential_name(self) -> &'static str {
        match self {
            Reduction::Min => "findMin",
            Reduction::Max => "findMax",
            Reduction::Sum => "findSum",
            Reduction::SumOfSquares => "findEuclid",
            Reduction::SumOfAbs => "findManhattan",
            Reduction::Dot => "findScalar",
        }
    }

    /// Name used for the parallel operation in timing logs.
    pub const fn parallel_name(self) -> &'static str {
        match self {
            Reduction::Min => "findMinParallel",
            Reduction::Max => "findMaxParallel",
            Reduction::Sum => "findSumParallel",
            Reduction::SumOfSquares => "findEuclidParallel",
            Reduction::SumOfAbs => "findManhattanParallel",
            Reduction::Dot => "findScalarParallel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_count_follows_arity() {
        assert!(Reduction::Sum.check_operands("findSum", false).is_ok());
        assert!(Reduction::Dot.check_operands("findScalar", true).is_ok());
        assert_eq!(
            Reduction::Dot.check_operands("findScalar", false),
            Err(ConfigError::OperandCount { op: "findScalar", expected: 2, got: 1 })
        );
        assert_eq!(
            Reduction::Max.check_operands("findMax", true),
            Err(ConfigError::OperandCount { op: "findMax", expected: 1, got: 2 })
        );
    }

    #[test]
    fn float_extrema_start_from_the_infinities() {
        assert_eq!(Reduction::Min.identity::<f64>(), f64::INFINITY);
        assert_eq!(Reduction::Max.identity::<f32>(), f32::NEG_INFINITY);
        assert_eq!(Reduction::Min.identity::<i32>(), i32::MAX);
        assert_eq!(Reduction::Max.identity::<u64>(), 0);

        assert_eq!(Reduction::Min.fold(&[f64::INFINITY, f64::INFINITY], None), f64::INFINITY);
        assert_eq!(Reduction::Max.fold(&[f64::NEG_INFINITY], None), f64::NEG_INFINITY);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "equal length")]
    fn dot_fold_asserts_matching_operands() {
        Reduction::Dot.fold(&[3i64, 4, 5], Some(&[1][..]));
    }
}
