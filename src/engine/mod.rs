//! # Engine Module
//!
//! The reduction engine and its direct collaborators.
//!
//! This module contains:
//! - Element types and read-only views
//! - Owned numeric buffers
//! - The partition planner
//! - Reduction operator descriptors
//! - Sequential reference reducers
//! - The multi-threaded engine
//! - A seedable random source for range fills
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod types;
pub mod error;
pub mod buffer;
pub mod partition;
pub mod reduce;
pub mod sequential;
pub mod parallel;
pub mod random;
