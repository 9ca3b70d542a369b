//! Element Types, Type Tags, and Read-Only Views
//!
//! This module defines the **numeric vocabulary** shared by every other part
//! of the engine: which element types a buffer may hold, how those types are
//! described at runtime, and the read-only view handed to reducers.
//!
//! ## Element arithmetic
//!
//! Reductions accumulate in the element type itself. There is no widening:
//!
//! - integer types use **wrapping** arithmetic, so overflow behaves like the
//!   fixed-width register it models and never aborts a worker,
//! - floating-point types use plain IEEE arithmetic.
//!
//! The [`Element`] trait exposes exactly the operations the six reductions
//! need (`acc_add`, `acc_mul`, `magnitude`, the scan sentinels) plus the
//! additive identity provided by [`Zero`]. Float sentinels are the
//! infinities, so a buffer of `+inf` still has `+inf` as its minimum.
//! [`Bounded`] gives the largest finite value, which bounds range fills.
//!
//! ## Views
//!
//! A [`View`] is a borrowed slice plus the `initialized` flag of the buffer it
//! came from. Reducers check the flag before touching the data; a view built
//! directly from a slice is always initialized.

use std::fmt;

use bytemuck::Pod;
use num_traits::{Bounded, Zero};
use rand::distributions::uniform::SampleUniform;

use crate::engine::error::{ReduceError, ReduceResult};

/// Runtime tag describing the element type of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// IEEE-754 single precision.
    Float32,
    /// IEEE-754 double precision.
    Float64,
}

impl DType {
    /// Width of one element in bytes, as laid out in binary dumps.
    pub const fn size_of(self) -> usize {
        match self {
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Int64 | DType::UInt64 | DType::Float64 => 8,
        }
    }

    /// Whether this is a floating-point type.
    pub const fn is_float(self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    /// Short lowercase name (`"f64"`, `"i32"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            DType::Int32 => "i32",
            DType::Int64 => "i64",
            DType::UInt32 => "u32",
            DType::UInt64 => "u64",
            DType::Float32 => "f32",
            DType::Float64 => "f64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric element that a [`NumericBuffer`](crate::NumericBuffer) can hold
/// and the reduction engine can fold.
///
/// ## Required behavior
/// * `acc_add` / `acc_mul`: element-type arithmetic without widening
///   (wrapping for integers).
/// * `magnitude`: absolute value in the element type. Identity for unsigned
///   types; wrapping for signed integers (`i32::MIN.magnitude() == i32::MIN`).
/// * `as_f64`: lossy conversion used by the average and Euclidean norm.
/// * `max_sentinel` / `min_sentinel`: start values for the minimum and
///   maximum scans. Every element compares `<=` / `>=` to them, infinities
///   included.
///
/// `Pod` makes the type eligible for raw binary dumps, `SampleUniform` for
/// uniform range fills.
pub trait Element:
    Copy
    + Send
    + Sync
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Pod
    + Bounded
    + Zero
    + SampleUniform
    + 'static
{
    /// Runtime tag for this type.
    const DTYPE: DType;

    /// Element-type addition.
    fn acc_add(self, rhs: Self) -> Self;

    /// Element-type multiplication.
    fn acc_mul(self, rhs: Self) -> Self;

    /// Absolute value in the element type.
    fn magnitude(self) -> Self;

    /// Conversion to `f64`.
    fn as_f64(self) -> f64;

    /// Upper bound of the type. `+inf` for floats.
    fn max_sentinel() -> Self;

    /// Lower bound of the type. `-inf` for floats.
    fn min_sentinel() -> Self;
}

macro_rules! impl_signed_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn acc_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn acc_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline]
            fn magnitude(self) -> Self {
                self.wrapping_abs()
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn max_sentinel() -> Self {
                <$t>::MAX
            }

            #[inline]
            fn min_sentinel() -> Self {
                <$t>::MIN
            }
        }
    };
}

macro_rules! impl_unsigned_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn acc_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn acc_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline]
            fn magnitude(self) -> Self {
                self
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn max_sentinel() -> Self {
                <$t>::MAX
            }

            #[inline]
            fn min_sentinel() -> Self {
                <$t>::MIN
            }
        }
    };
}

macro_rules! impl_float_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn acc_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn acc_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn magnitude(self) -> Self {
                self.abs()
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn max_sentinel() -> Self {
                <$t>::INFINITY
            }

            #[inline]
            fn min_sentinel() -> Self {
                <$t>::NEG_INFINITY
            }
        }
    };
}

impl_signed_element!(i32, DType::Int32);
impl_signed_element!(i64, DType::Int64);
impl_unsigned_element!(u32, DType::UInt32);
impl_unsigned_element!(u64, DType::UInt64);
impl_float_element!(f32, DType::Float32);
impl_float_element!(f64, DType::Float64);

/// Read-only view over contiguous elements.
///
/// Carries the `initialized` flag of the owning buffer so reducers can refuse
/// to read garbage. Views are `Copy` and freely shared across worker threads.
#[derive(Clone, Copy, Debug)]
pub struct View<'a, T> {
    data: &'a [T],
    initialized: bool,
}

impl<'a, T: Element> View<'a, T> {
    /// Wraps a fully valid slice.
    pub fn new(data: &'a [T]) -> Self {
        Self { data, initialized: true }
    }

    pub(crate) fn with_state(data: &'a [T], initialized: bool) -> Self {
        Self { data, initialized }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the underlying storage holds valid data.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the elements, or [`ReduceError::Uninitialized`] naming `op`.
    pub fn require(&self, op: &'static str) -> ReduceResult<&'a [T]> {
        if self.initialized {
            Ok(self.data)
        } else {
            Err(ReduceError::Uninitialized { op })
        }
    }

}

impl<'a, T: Element> From<&'a [T]> for View<'a, T> {
    fn from(data: &'a [T]) -> Self {
        View::new(data)
    }
}

impl<'a, T: Element> From<&'a Vec<T>> for View<'a, T> {
    fn from(data: &'a Vec<T>) -> Self {
        View::new(data.as_slice())
    }
}
