//! Per-call wall-clock timing with an append-only text log.
//!
//! Each observed call appends one line:
//!
//! ```text
//! findSumParallel: 0.001234
//! ```
//!
//! The log is opened in append mode (created if missing) for every line, so
//! several observers, or several processes, can share one file. Writes from
//! one process are serialized by a lock.
//!
//! A log that cannot be opened or written is reported on stderr and otherwise
//! ignored: the observed operation's result is returned unchanged.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::config::EngineConfig;

/// A value paired with the wall-clock time it took to produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timed<T> {
    /// What the observed call returned.
    pub value: T,

    /// Elapsed wall-clock time.
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in seconds.
    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Moves the `Result` outward: `Timed<Result<T, E>>` to `Result<Timed<T>, E>`.
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Measures operations and appends their timings to a log file.
#[derive(Debug)]
pub struct TimingObserver {
    log: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl TimingObserver {
    /// Observer appending to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { log: Some(path.into()), write_lock: Mutex::new(()) }
    }

    /// Observer that measures but never writes.
    pub fn disabled() -> Self {
        Self { log: None, write_lock: Mutex::new(()) }
    }

    /// Observer configured from `cfg.timing_log`.
    pub fn from_config(cfg: &EngineConfig) -> Self {
        match &cfg.timing_log {
            Some(path) => Self::new(path.clone()),
            None => Self::disabled(),
        }
    }

    /// Log destination, if any.
    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_deref()
    }

    /// Runs `op`, records its elapsed time under `name`, and returns the
    /// value with the timing attached.
    ///
    /// The line is written whether or not `op` returned an error.
    pub fn observe<T>(&self, name: &str, op: impl FnOnce() -> T) -> Timed<T> {
        let start = Instant::now();
        let value = op();
        let elapsed = start.elapsed();
        self.record(name, elapsed);
        Timed { value, elapsed }
    }

    /// Appends `"<name>: <seconds>"` to the log. Failures go to stderr.
    pub fn record(&self, name: &str, elapsed: Duration) {
        let Some(path) = &self.log else {
            return;
        };
        if let Err(e) = self.append_line(path, name, elapsed) {
            eprintln!("timing log {} unavailable: {e}", path.display());
        }
    }

    fn append_line(&self, path: &Path, name: &str, elapsed: Duration) -> io::Result<()> {
        let line = format_line(name, elapsed);
        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(line.as_bytes())
    }
}

/// One log line, newline-terminated.
pub fn format_line(name: &str, elapsed: Duration) -> String {
    format!("{name}: {:.6}\n", elapsed.as_secs_f64())
}
