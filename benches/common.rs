#![allow(dead_code)]

use rand::SeedableRng;

use vecreduce::{EngineConfig, NumericBuffer, XorShift64Star};

pub const LEN_SMALL: usize = 100_000;
pub const LEN_MED: usize = 1_000_000;
pub const LEN_LARGE: usize = 10_000_000;

pub const THREAD_COUNTS: [usize; 5] = [1, 2, 4, 8, 16];

pub fn bench_config() -> EngineConfig {
    EngineConfig::default().with_timing_log(None)
}

pub fn random_f64(len: usize) -> NumericBuffer<f64> {
    let mut buf = NumericBuffer::with_config(len, &bench_config()).unwrap();
    buf.fill_random_range(-100.0, 100.0, &mut XorShift64Star::seed_from_u64(0x5EED))
        .unwrap();
    buf
}

pub fn random_i64(len: usize) -> NumericBuffer<i64> {
    let mut buf = NumericBuffer::with_config(len, &bench_config()).unwrap();
    buf.fill_random_range(-1_000, 1_000, &mut XorShift64Star::seed_from_u64(0x5EED))
        .unwrap();
    buf
}
