use proptest::prelude::*;

use vecreduce::engine::{parallel, sequential};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn integer_reductions_match_sequential(
        values in prop::collection::vec(-10_000i64..10_000, 1..400),
        threads in 1usize..24,
    ) {
        prop_assert_eq!(parallel::min(&values, threads).unwrap(), sequential::min(&values).unwrap());
        prop_assert_eq!(parallel::max(&values, threads).unwrap(), sequential::max(&values).unwrap());
        prop_assert_eq!(parallel::sum(&values, threads).unwrap(), sequential::sum(&values).unwrap());
        prop_assert_eq!(
            parallel::manhattan_norm(&values, threads).unwrap(),
            sequential::manhattan_norm(&values).unwrap()
        );
        prop_assert_eq!(
            parallel::dot(&values, &values, threads).unwrap(),
            sequential::sum_of_squares(&values).unwrap()
        );
    }

    #[test]
    fn float_norm_squared_tracks_sum_of_squares(
        values in prop::collection::vec(-1e3f64..1e3, 1..400),
        threads in 1usize..24,
    ) {
        let norm = parallel::euclidean_norm(&values, threads).unwrap();
        let squares = sequential::sum_of_squares(&values).unwrap();
        prop_assert!((norm * norm - squares).abs() <= 1e-9 * squares.max(1.0));

        let sum = parallel::sum(&values, threads).unwrap();
        let reference = sequential::sum(&values).unwrap();
        let scale = sequential::manhattan_norm(&values).unwrap().max(1.0);
        prop_assert!((sum - reference).abs() <= 1e-12 * scale);
    }
}
