//! Operation timing.
//!
//! This module sits beside the engine, not inside it: reductions never know
//! they are being timed. Callers wrap a call with
//! [`TimingObserver::observe`](timing::TimingObserver::observe), which
//! measures wall-clock time, appends `"<operation>: <seconds>"` to the
//! configured log, and hands back the call's own result.
//!
//! ## Usage
//!
//! ```no_run
//! use vecreduce::{NumericBuffer, TimingObserver};
//!
//! let mut buf = NumericBuffer::<f64>::new(4096)?;
//! buf.fill_constant(1.5);
//!
//! let observer = TimingObserver::new("execution_times.txt");
//! let timed = observer.observe("findSumParallel", || buf.sum_parallel(4));
//! println!("sum = {:?} in {:.6}s", timed.value, timed.secs());
//! # Ok::<(), vecreduce::ReduceError>(())
//! ```
//!
//! ## Design notes
//!
//! - Timing uses a monotonic clock (`Instant`).
//! - Log failures are printed to stderr and never alter the observed result.

pub mod timing;
