//! Engine configuration and environment overrides.
//!
//! | Variable               | Field        | Meaning                                   |
//! |------------------------|--------------|-------------------------------------------|
//! | `VECREDUCE_MIN_LEN`    | `min_len`    | smallest accepted buffer length (>= 1)    |
//! | `VECREDUCE_THREADS`    | `threads`    | default worker count (>= 1)               |
//! | `VECREDUCE_TIMING_LOG` | `timing_log` | timing log path; empty disables the log   |
//!
//! Unset variables keep the defaults. Unparsable values are rejected with
//! [`ConfigError::InvalidEnv`] rather than silently ignored.

use std::env;
use std::path::PathBuf;
use std::thread;

use crate::engine::error::ConfigError;

const MIN_LEN_ENV: &str = "VECREDUCE_MIN_LEN";
const THREADS_ENV: &str = "VECREDUCE_THREADS";
const TIMING_LOG_ENV: &str = "VECREDUCE_TIMING_LOG";

/// Buffers must hold more than 1000 elements unless configured otherwise.
pub const DEFAULT_MIN_LEN: usize = 1001;

/// Default timing log, relative to the working directory.
pub const DEFAULT_TIMING_LOG: &str = "execution_times.txt";

/// Tunables shared by buffers, the engine front end, and the timing observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Smallest accepted buffer length.
    pub min_len: usize,

    /// Worker count used when the caller does not choose one.
    pub threads: usize,

    /// Append-mode timing log. `None` disables logging.
    pub timing_log: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            threads: thread::available_parallelism().map_or(1, |n| n.get()),
            timing_log: Some(PathBuf::from(DEFAULT_TIMING_LOG)),
        }
    }
}

impl EngineConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Defaults with overrides from an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(MIN_LEN_ENV) {
            cfg.min_len = parse_positive(MIN_LEN_ENV, &raw)?;
        }
        if let Some(raw) = lookup(THREADS_ENV) {
            cfg.threads = parse_positive(THREADS_ENV, &raw)?;
        }
        if let Some(raw) = lookup(TIMING_LOG_ENV) {
            let raw = raw.trim();
            cfg.timing_log = if raw.is_empty() { None } else { Some(PathBuf::from(raw)) };
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects a zero minimum length or a zero thread count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_len == 0 {
            return Err(ConfigError::InvalidMinLen);
        }
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreadCount { threads: 0 });
        }
        Ok(())
    }

    /// Builder-style override of `min_len`.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Builder-style override of `threads`.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Builder-style override of `timing_log`.
    pub fn with_timing_log(mut self, timing_log: Option<PathBuf>) -> Self {
        self.timing_log = timing_log;
        self
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidEnv { var, value: raw.to_string() }),
    }
}
