mod common;

use common::*;
use vecreduce::engine::sequential;
use vecreduce::{NumericBuffer, ReduceError, SizeMismatchError, View};

#[test]
fn scenario_reductions() {
    let buf = scenario_buffer();

    assert_eq!(buf.min().unwrap(), -9);
    assert_eq!(buf.max().unwrap(), 6);
    assert_eq!(buf.sum().unwrap(), 11);
    assert_eq!(buf.manhattan_norm().unwrap(), 31);
    assert!((buf.euclidean_norm().unwrap() - 173f64.sqrt()).abs() < 1e-12);
    assert!((buf.avg().unwrap() - 11.0 / 8.0).abs() < 1e-12);
}

#[test]
fn scenario_reductions_in_floating_point() {
    let buf = scenario_f64();

    assert_eq!(buf.min().unwrap(), -9.0);
    assert_eq!(buf.max().unwrap(), 6.0);
    assert_eq!(buf.sum().unwrap(), 11.0);
    assert_eq!(buf.manhattan_norm().unwrap(), 31.0);
    assert!((buf.euclidean_norm().unwrap() - 13.152946).abs() < 1e-6);
}

#[test]
fn slices_are_initialized_views() {
    let data = [2.5f32, -0.5, 1.0];
    assert_eq!(sequential::min(&data[..]).unwrap(), -0.5);
    assert_eq!(sequential::sum(&data[..]).unwrap(), 3.0);
    assert_eq!(sequential::dot(&data[..], &data[..]).unwrap(), 7.5);
}

#[test]
fn max_of_all_negative_floats_is_not_the_smallest_positive() {
    let data = [-3.0f64, -1.5, -7.25];
    assert_eq!(sequential::max(&data[..]).unwrap(), -1.5);
}

#[test]
fn infinities_are_their_own_extrema() {
    let data = [f64::INFINITY, f64::INFINITY];
    assert_eq!(sequential::min(&data[..]).unwrap(), f64::INFINITY);

    let data = [f32::NEG_INFINITY];
    assert_eq!(sequential::max(&data[..]).unwrap(), f32::NEG_INFINITY);

    let data = [1.0f64, f64::NEG_INFINITY, 4.0];
    assert_eq!(sequential::min(&data[..]).unwrap(), f64::NEG_INFINITY);
    assert_eq!(sequential::max(&data[..]).unwrap(), 4.0);
}

#[test]
fn dot_product_with_self_is_sum_of_squares() {
    let buf = scenario_buffer();
    assert_eq!(buf.dot(&buf).unwrap(), 173);
    assert_eq!(sequential::sum_of_squares(buf.view()).unwrap(), 173);
}

#[test]
fn dot_product_rejects_mismatched_lengths() {
    let a = [1i32, 2, 3];
    let b = [1i32, 2];
    match sequential::dot(&a[..], &b[..]) {
        Err(ReduceError::SizeMismatch(SizeMismatchError { left: 3, right: 2 })) => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn integer_sums_wrap_instead_of_widening() {
    let data = [i32::MAX, 1];
    assert_eq!(sequential::sum(&data[..]).unwrap(), i32::MIN);

    let data = [u32::MAX, 2];
    assert_eq!(sequential::sum(&data[..]).unwrap(), 1);
}

#[test]
fn unsigned_manhattan_equals_sum() {
    let data = [4u64, 0, 9, 1];
    assert_eq!(sequential::manhattan_norm(&data[..]).unwrap(), 14);
}

#[test]
fn every_reducer_refuses_uninitialized_buffers() {
    let buf = NumericBuffer::<f64>::with_config(16, &small_cfg()).unwrap();
    let other = random_f64(16, 1);

    let results = [
        buf.min().map(|_| ()),
        buf.max().map(|_| ()),
        buf.sum().map(|_| ()),
        buf.avg().map(|_| ()),
        buf.euclidean_norm().map(|_| ()),
        buf.manhattan_norm().map(|_| ()),
        buf.dot(&other).map(|_| ()),
        other.dot(&buf).map(|_| ()),
    ];
    for r in results {
        assert!(matches!(r, Err(ReduceError::Uninitialized { .. })), "{r:?}");
    }
}

#[test]
fn uninitialized_is_reported_before_size_mismatch() {
    let data = [1.0f64, 2.0];
    let short = [1.0f64];
    let lhs = View::new(&data[..]);
    let unfilled = NumericBuffer::<f64>::with_config(1, &small_cfg()).unwrap();

    assert!(matches!(
        sequential::dot(lhs, unfilled.view()),
        Err(ReduceError::Uninitialized { op: "findScalar" })
    ));
    assert!(matches!(sequential::dot(lhs, &short[..]), Err(ReduceError::SizeMismatch(_))));
}
