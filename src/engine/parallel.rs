//! Multi-threaded reduction engine.
//!
//! ## Execution model
//!
//! Every call runs the same scaffold:
//!
//! 1. **Validate**: initialization, operand lengths, and thread count are
//!    checked before any thread exists. A rejected call does no work.
//! 2. **Plan**: [`plan`] splits `[0, N)` into `K` contiguous partitions.
//! 3. **Spawn**: one scoped OS thread per partition. Each worker folds its
//!    own sub-slice with no synchronization at all.
//! 4. **Publish**: a worker takes the single slot mutex only to store its
//!    partial result into the pre-allocated slot for its worker id.
//! 5. **Join**: the caller waits for every worker. No partial is read
//!    before the last join.
//! 6. **Merge**: partials are combined in worker order with the
//!    reduction's combine rule.
//!
//! Threads are created fresh for every call and never pooled, even for
//! `K == 1`: the caller only ever blocks at the join.
//!
//! ## Failure semantics
//! * A worker panic is caught at join time. All other workers are still
//!   joined, then the lowest-numbered failure is returned as
//!   [`ReduceError::WorkerPanicked`].
//! * If the OS refuses a thread, the workers already started are joined and
//!   [`ReduceError::Spawn`] is returned.
//! * Oversubscription (`K > N`) is honored. Workers with empty partitions
//!   publish the identity element.

use std::any::Any;
use std::thread;

use parking_lot::Mutex;

use crate::engine::error::{ReduceError, ReduceResult, SizeMismatchError};
use crate::engine::partition::{plan, Partition};
use crate::engine::reduce::{Reduction, AVG_PARALLEL_NAME};
use crate::engine::types::{Element, View};

/// Runs `work` once per partition on its own scoped thread and returns the
/// published results indexed by worker id.
pub(crate) fn run_partitioned<T, F>(partitions: &[Partition], work: F) -> ReduceResult<Vec<T>>
where
    T: Copy + Send,
    F: Fn(&Partition) -> T + Sync,
{
    let slots: Mutex<Vec<Option<T>>> = Mutex::new(vec![None; partitions.len()]);
    let work = &work;
    let slots_ref = &slots;

    thread::scope(|scope| -> ReduceResult<()> {
        let mut handles = Vec::with_capacity(partitions.len());
        let mut spawn_error = None;

        for &part in partitions {
            let spawned = thread::Builder::new()
                .name(format!("reduce-worker-{}", part.worker))
                .spawn_scoped(scope, move || {
                    let partial = work(&part);
                    slots_ref.lock()[part.worker] = Some(partial);
                });

            match spawned {
                Ok(handle) => handles.push((part.worker, handle)),
                Err(source) => {
                    spawn_error = Some(ReduceError::Spawn { worker: part.worker, source });
                    break;
                }
            }
        }

        let mut first_panic = None;
        for (worker, handle) in handles {
            if let Err(payload) = handle.join() {
                if first_panic.is_none() {
                    first_panic = Some(ReduceError::WorkerPanicked {
                        worker,
                        message: panic_message(payload.as_ref()),
                    });
                }
            }
        }

        match (spawn_error, first_panic) {
            (Some(e), _) | (None, Some(e)) => Err(e),
            (None, None) => Ok(()),
        }
    })?;

    slots
        .into_inner()
        .into_iter()
        .enumerate()
        .map(|(worker, slot)| {
            slot.ok_or_else(|| ReduceError::WorkerPanicked {
                worker,
                message: "worker exited without publishing a result".to_string(),
            })
        })
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Runs `op` over `lhs` (and `rhs` for [`Reduction::Dot`]) on `threads`
/// workers and returns the merged aggregate.
///
/// ## Errors
/// * [`ConfigError::OperandCount`](crate::ConfigError) if `rhs` is given for a
///   unary reduction or missing for [`Reduction::Dot`].
/// * [`ReduceError::Uninitialized`] if either operand is unfilled.
/// * [`ReduceError::SizeMismatch`] if `rhs` differs in length from `lhs`.
/// * [`ConfigError::InvalidThreadCount`](crate::ConfigError) if `threads == 0`.
/// * [`ReduceError::Spawn`] / [`ReduceError::WorkerPanicked`] from the workers.
pub fn reduce<'a, T: Element>(
    op: Reduction,
    lhs: View<'a, T>,
    rhs: Option<View<'a, T>>,
    threads: usize,
) -> ReduceResult<T> {
    let name = op.parallel_name();
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

    let partitions = plan(lhs.len(), threads)?;
    let partials = run_partitioned(&partitions, |part| {
        let range = part.range();
        op.fold(&lhs[range.clone()], rhs.map(|r| &r[range]))
    })?;

    Ok(op.merge(partials))
}

/// Smallest element across `threads` workers.
pub fn min<'a, T: Element>(view: impl Into<View<'a, T>>, threads: usize) -> ReduceResult<T> {
    reduce(Reduction::Min, view.into(), None, threads)
}

/// Largest element across `threads` workers.
pub fn max<'a, T: Element>(view: impl Into<View<'a, T>>, threads: usize) -> ReduceResult<T> {
    reduce(Reduction::Max, view.into(), None, threads)
}

/// Sum across `threads` workers.
pub fn sum<'a, T: Element>(view: impl Into<View<'a, T>>, threads: usize) -> ReduceResult<T> {
    reduce(Reduction::Sum, view.into(), None, threads)
}

/// Sum of squares across `threads` workers.
pub fn sum_of_squares<'a, T: Element>(
    view: impl Into<View<'a, T>>,
    threads: usize,
) -> ReduceResult<T> {
    reduce(Reduction::SumOfSquares, view.into(), None, threads)
}

/// Euclidean norm: partial sums of squares are merged, then one square root.
pub fn euclidean_norm<'a, T: Element>(
    view: impl Into<View<'a, T>>,
    threads: usize,
) -> ReduceResult<f64> {
    sum_of_squares(view, threads).map(|s| s.as_f64().sqrt())
}

/// Manhattan norm across `threads` workers.
pub fn manhattan_norm<'a, T: Element>(
    view: impl Into<View<'a, T>>,
    threads: usize,
) -> ReduceResult<T> {
    reduce(Reduction::SumOfAbs, view.into(), None, threads)
}

/// Dot product across `threads` workers. Operands must have equal length.
pub fn dot<'a, T: Element>(
    lhs: impl Into<View<'a, T>>,
    rhs: impl Into<View<'a, T>>,
    threads: usize,
) -> ReduceResult<T> {
    reduce(Reduction::Dot, lhs.into(), Some(rhs.into()), threads)
}

/// Mean value: the merged parallel sum divided by `N`.
pub fn avg<'a, T: Element>(view: impl Into<View<'a, T>>, threads: usize) -> ReduceResult<f64> {
    let view = view.into();
    view.require(AVG_PARALLEL_NAME)?;
    let total = sum(view, threads)?;
    Ok(total.as_f64() / view.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn results_land_in_worker_slots() {
        let parts = plan(10, 4).unwrap();
        let out = run_partitioned(&parts, |p| p.worker * 100 + p.len()).unwrap();
        assert_eq!(out, vec![2, 102, 202, 304]);
    }

    #[test]
    fn single_partition_still_runs_on_a_worker() {
        let parts = plan(5, 1).unwrap();
        let names = run_partitioned(&parts, |_| {
            std::thread::current().name() == Some("reduce-worker-0")
        })
        .unwrap();
        assert_eq!(names, vec![true]);
    }

    #[test]
    fn panic_is_reported_after_all_workers_finish() {
        let parts = plan(1_000, 8).unwrap();
        let finished = AtomicUsize::new(0);

        let err = run_partitioned(&parts, |p| {
            if p.worker == 3 || p.worker == 6 {
                panic!("boom in {}", p.worker);
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
            finished.fetch_add(1, Ordering::SeqCst);
            p.len()
        })
        .unwrap_err();

        assert_eq!(finished.load(Ordering::SeqCst), 6);
        match err {
            ReduceError::WorkerPanicked { worker, message } => {
                assert_eq!(worker, 3);
                assert_eq!(message, "boom in 3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_partitions_publish_identity() {
        let parts = plan(3, 6).unwrap();
        let data = [4i64, 9, -1];
        let out = run_partitioned(&parts, |p| Reduction::Min.fold(&data[p.range()], None)).unwrap();
        assert_eq!(out[..5], [i64::MAX; 5]);
        assert_eq!(out[5], -1);
        assert_eq!(Reduction::Min.merge(out), -1);
    }

    #[test]
    fn panic_payload_formats() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let fixed: Box<dyn Any + Send> = Box::new("fixed");
        let other: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(fixed.as_ref()), "fixed");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
