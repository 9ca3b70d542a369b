//! Fast, explicitly seeded pseudo-random number generation.
//!
//! Range fills take their randomness from a **caller-supplied** generator, so
//! a buffer filled from a given seed is reproducible. Any [`rand::Rng`] works;
//! this module provides a small default, [`XorShift64Star`].
//!
//! # Design
//!
//! - xorshift64\* over a single `u64` of state, owned by the value.
//! - No global or thread-local state. Two generators with the same seed
//!   produce the same stream.
//! - Implements [`RngCore`] and [`SeedableRng`], so it plugs into every
//!   `rand` distribution, including the uniform sampling behind
//!   [`NumericBuffer::fill_random_range`](crate::NumericBuffer::fill_random_range).
//!
//! # Non-goals
//!
//! - Not cryptographically secure.
//!
//! ```
//! use rand::{Rng, SeedableRng};
//! use vecreduce::XorShift64Star;
//!
//! let mut a = XorShift64Star::seed_from_u64(7);
//! let mut b = XorShift64Star::seed_from_u64(7);
//! assert_eq!(a.gen::<u64>(), b.gen::<u64>());
//! ```

use rand::{RngCore, SeedableRng};
use rand_core::impls;

/// Seed substituted for an all-zero state, which xorshift cannot leave.
const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// xorshift64\* generator with explicit state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    /// Creates a generator from a raw state. Zero is replaced by a fixed
    /// non-zero constant.
    pub fn new(state: u64) -> Self {
        Self { state: if state == 0 { FALLBACK_SEED } else { state } }
    }
}

impl Default for XorShift64Star {
    fn default() -> Self {
        Self::new(FALLBACK_SEED)
    }
}

impl RngCore for XorShift64Star {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift64Star {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }
}
