//! Owned numeric buffers.
//!
//! A [`NumericBuffer`] owns a contiguous `Vec<T>` of fixed length and an
//! `initialized` flag. Storage is allocated at construction, written in place
//! by fills and imports, and released when the buffer is dropped.
//!
//! ## Invariant
//! `initialized == true` implies every index in `[0, N)` holds a value that
//! was written by a fill or an import. Every reduction, and export, fails
//! with [`ReduceError::Uninitialized`] until that is the case.
//!
//! ## Binary format
//! A dump is `N` elements in native byte order, no header, no length prefix.
//! Reading it back requires a buffer of exactly `N` elements of the same
//! type; any other file size is a [`ReduceError::LengthMismatch`].
//!
//! ## Concurrency
//! Buffers are never mutated concurrently. Reductions borrow them immutably
//! and hand each worker a sub-slice.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::config::EngineConfig;
use crate::engine::error::{ConfigError, ReduceError, ReduceResult};
use crate::engine::types::{DType, Element, View};
use crate::engine::{parallel, sequential};

/// Fixed-length, owned numeric array.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericBuffer<T> {
    data: Vec<T>,
    initialized: bool,
}

impl<T: Element> NumericBuffer<T> {
    /// Allocates an uninitialized buffer of `len` elements using the default
    /// minimum length.
    pub fn new(len: usize) -> ReduceResult<Self> {
        Self::with_config(len, &EngineConfig::default())
    }

    /// Allocates an uninitialized buffer of `len` elements.
    ///
    /// ## Errors
    /// [`ConfigError::BufferTooSmall`] if `len < cfg.min_len`.
    pub fn with_config(len: usize, cfg: &EngineConfig) -> ReduceResult<Self> {
        check_len(len, cfg)?;
        Ok(Self { data: vec![T::zero(); len], initialized: false })
    }

    /// Wraps existing values as an initialized buffer.
    pub fn from_vec(values: Vec<T>, cfg: &EngineConfig) -> ReduceResult<Self> {
        check_len(values.len(), cfg)?;
        Ok(Self { data: values, initialized: true })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a constructed buffer; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether a fill or import has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Element type tag.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Read-only view carrying the initialization flag.
    pub fn view(&self) -> View<'_, T> {
        View::with_state(&self.data, self.initialized)
    }

    /// The elements, if initialized.
    pub fn as_slice(&self) -> ReduceResult<&[T]> {
        self.view().require("as_slice")
    }

    /// Sets every element to `value`.
    pub fn fill_constant(&mut self, value: T) {
        self.data.fill(value);
        self.initialized = true;
    }

    /// Fills with values drawn uniformly from `[min, max)` using `rng`.
    ///
    /// ## Errors
    /// [`ConfigError::InvalidRange`] if `min >= max`, if either bound is NaN
    /// or infinite, or if the float range is too wide to sample.
    pub fn fill_random_range<R>(&mut self, min: T, max: T, rng: &mut R) -> ReduceResult<()>
    where
        R: Rng + ?Sized,
    {
        if !sampleable(min, max) {
            return Err(ConfigError::InvalidRange { min: min.to_string(), max: max.to_string() }.into());
        }

        let dist = Uniform::<T>::new(min, max);
        for slot in self.data.iter_mut() {
            *slot = dist.sample(rng);
        }
        self.initialized = true;
        Ok(())
    }

    /// Writes the raw elements to `path`, replacing any existing file.
    pub fn export_binary(&self, path: impl AsRef<Path>) -> ReduceResult<()> {
        let path = path.as_ref();
        let data = self.view().require("exportBinary")?;
        fs::write(path, bytemuck::cast_slice::<T, u8>(data)).map_err(|e| ReduceError::io(path, e))
    }

    /// Reads exactly `len()` elements from `path`.
    ///
    /// The file is read into scratch storage first; on any error the buffer
    /// keeps its previous contents and flag.
    pub fn import_binary(&mut self, path: impl AsRef<Path>) -> ReduceResult<()> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| ReduceError::io(path, e))?;

        let expected_bytes = (self.data.len() * T::DTYPE.size_of()) as u64;
        let actual_bytes = file.metadata().map_err(|e| ReduceError::io(path, e))?.len();
        if actual_bytes != expected_bytes {
            return Err(ReduceError::LengthMismatch {
                path: path.to_path_buf(),
                expected_bytes,
                actual_bytes,
            });
        }

        let mut scratch = vec![T::zero(); self.data.len()];
        file.read_exact(bytemuck::cast_slice_mut::<T, u8>(&mut scratch))
            .map_err(|e| ReduceError::io(path, e))?;

        self.data = scratch;
        self.initialized = true;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Sequential operations
    // ─────────────────────────────────────────────────────────────────────

    /// See [`sequential::min`].
    pub fn min(&self) -> ReduceResult<T> {
        sequential::min(self.view())
    }

    /// See [`sequential::max`].
    pub fn max(&self) -> ReduceResult<T> {
        sequential::max(self.view())
    }

    /// See [`sequential::sum`].
    pub fn sum(&self) -> ReduceResult<T> {
        sequential::sum(self.view())
    }

    /// See [`sequential::avg`].
    pub fn avg(&self) -> ReduceResult<f64> {
        sequential::avg(self.view())
    }

    /// See [`sequential::euclidean_norm`].
    pub fn euclidean_norm(&self) -> ReduceResult<f64> {
        sequential::euclidean_norm(self.view())
    }

    /// See [`sequential::manhattan_norm`].
    pub fn manhattan_norm(&self) -> ReduceResult<T> {
        sequential::manhattan_norm(self.view())
    }

    /// See [`sequential::dot`].
    pub fn dot(&self, other: &Self) -> ReduceResult<T> {
        sequential::dot(self.view(), other.view())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Parallel operations
    // ─────────────────────────────────────────────────────────────────────

    /// See [`parallel::min`].
    pub fn min_parallel(&self, threads: usize) -> ReduceResult<T> {
        parallel::min(self.view(), threads)
    }

    /// See [`parallel::max`].
    pub fn max_parallel(&self, threads: usize) -> ReduceResult<T> {
        parallel::max(self.view(), threads)
    }

    /// See [`parallel::sum`].
    pub fn sum_parallel(&self, threads: usize) -> ReduceResult<T> {
        parallel::sum(self.view(), threads)
    }

    /// See [`parallel::avg`].
    pub fn avg_parallel(&self, threads: usize) -> ReduceResult<f64> {
        parallel::avg(self.view(), threads)
    }

    /// See [`parallel::euclidean_norm`].
    pub fn euclidean_norm_parallel(&self, threads: usize) -> ReduceResult<f64> {
        parallel::euclidean_norm(self.view(), threads)
    }

    /// See [`parallel::manhattan_norm`].
    pub fn manhattan_norm_parallel(&self, threads: usize) -> ReduceResult<T> {
        parallel::manhattan_norm(self.view(), threads)
    }

    /// See [`parallel::dot`].
    pub fn dot_parallel(&self, other: &Self, threads: usize) -> ReduceResult<T> {
        parallel::dot(self.view(), other.view(), threads)
    }
}

fn check_len(len: usize, cfg: &EngineConfig) -> Result<(), ConfigError> {
    if cfg.min_len == 0 {
        return Err(ConfigError::InvalidMinLen);
    }
    if len < cfg.min_len {
        return Err(ConfigError::BufferTooSmall { len, min: cfg.min_len });
    }
    Ok(())
}

fn sampleable<T: Element>(min: T, max: T) -> bool {
    if !(min < max) {
        return false;
    }
    if T::DTYPE.is_float() {
        let (lo, hi) = (min.as_f64(), max.as_f64());
        return lo.is_finite() && hi.is_finite() && hi - lo <= T::max_value().as_f64();
    }
    true
}
