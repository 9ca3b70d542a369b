#![allow(dead_code)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vecreduce::{EngineConfig, NumericBuffer};

/// The eight-element buffer used throughout the scenario tests.
pub const SCENARIO: [i64; 8] = [3, -1, 4, 1, 5, -9, 2, 6];

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Config that accepts buffers of any non-zero length.
pub fn small_cfg() -> EngineConfig {
    EngineConfig::default().with_min_len(1).with_timing_log(None)
}

pub fn scenario_buffer() -> NumericBuffer<i64> {
    NumericBuffer::from_vec(SCENARIO.to_vec(), &small_cfg()).unwrap()
}

pub fn scenario_f64() -> NumericBuffer<f64> {
    let values = SCENARIO.iter().map(|&x| x as f64).collect();
    NumericBuffer::from_vec(values, &small_cfg()).unwrap()
}

pub fn random_f64(len: usize, seed: u64) -> NumericBuffer<f64> {
    let mut buf = NumericBuffer::with_config(len, &small_cfg()).unwrap();
    buf.fill_random_range(-50.0, 50.0, &mut seeded_rng(seed)).unwrap();
    buf
}

pub fn random_i64(len: usize, seed: u64) -> NumericBuffer<i64> {
    let mut buf = NumericBuffer::with_config(len, &small_cfg()).unwrap();
    buf.fill_random_range(-1_000, 1_000, &mut seeded_rng(seed)).unwrap();
    buf
}

/// Relative comparison for results whose summation order differs.
pub fn close(a: f64, b: f64, rel: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= rel * scale
}
