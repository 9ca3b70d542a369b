//! Single-threaded reference reducers.
//!
//! These establish the correctness baseline for the parallel engine and are
//! the path taken when only one thread is wanted. Each function validates its
//! inputs first ([`ReduceError::Uninitialized`], then
//! [`ReduceError::SizeMismatch`] for the dot product) and then performs one
//! linear pass using the matching [`Reduction`] fold.
//!
//! All functions accept anything convertible into a [`View`]: a buffer's
//! `view()`, a slice, or a `&Vec<T>`.

use crate::engine::error::{ReduceResult, SizeMismatchError};
use crate::engine::reduce::{Reduction, AVG_SEQUENTIAL_NAME};
use crate::engine::types::{Element, View};

fn run<'a, T: Element>(op: Reduction, lhs: View<'a, T>, rhs: Option<View<'a, T>>) -> ReduceResult<T> {
    let name = op.sequential_name();
    op.check_operands(name, rhs.is_some())?;
    let lhs = lhs.require(name)?;
    let rhs = match rhs {
        Some(rhs) => {
            let rhs = rhs.require(name)?;
            if rhs.len() != lhs.len() {
                return Err(SizeMismatchError { left: lhs.len(), right: rhs.len() }.into());
            }
            Some(rhs)
        }
        None => None,
    };
    Ok(op.fold(lhs, rhs))
}

/// Smallest element. Ties keep the first occurrence.
pub fn min<'a, T: Element>(view: impl Into<View<'a, T>>) -> ReduceResult<T> {
    run(Reduction::Min, view.into(), None)
}

/// Largest element. Ties keep the first occurrence.
pub fn max<'a, T: Element>(view: impl Into<View<'a, T>>) -> ReduceResult<T> {
    run(Reduction::Max, view.into(), None)
}

/// Sum in element-type arithmetic.
pub fn sum<'a, T: Element>(view: impl Into<View<'a, T>>) -> ReduceResult<T> {
    run(Reduction::Sum, view.into(), None)
}

/// Sum of squares in element-type arithmetic.
pub fn sum_of_squares<'a, T: Element>(view: impl Into<View<'a, T>>) -> ReduceResult<T> {
    run(Reduction::SumOfSquares, view.into(), None)
}

/// Square root of the sum of squares, as `f64`.
pub fn euclidean_norm<'a, T: Element>(view: impl Into<View<'a, T>>) -> ReduceResult<f64> {
    sum_of_squares(view).map(|s| s.as_f64().sqrt())
}

/// Sum of absolute values.
pub fn manhattan_norm<'a, T: Element>(view: impl Into<View<'a, T>>) -> ReduceResult<T> {
    run(Reduction::SumOfAbs, view.into(), None)
}

/// Sum of pairwise products. Operands must have equal length.
pub fn dot<'a, T: Element>(
    lhs: impl Into<View<'a, T>>,
    rhs: impl Into<View<'a, T>>,
) -> ReduceResult<T> {
    run(Reduction::Dot, lhs.into(), Some(rhs.into()))
}

/// Mean value, derived from [`sum`] divided by the element count.
pub fn avg<'a, T: Element>(view: impl Into<View<'a, T>>) -> ReduceResult<f64> {
    let view = view.into();
    view.require(AVG_SEQUENTIAL_NAME)?;
    let total = sum(view)?;
    Ok(total.as_f64() / view.len() as f64)
}
