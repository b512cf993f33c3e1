use player_profiles::percentile::{average_ranks, percentile_ranks};
use proptest::prelude::*;

fn column() -> impl Strategy<Value = Vec<Option<f64>>> {
    proptest::collection::vec(
        proptest::option::weighted(0.8, (-50i32..50).prop_map(|v| v as f64 / 4.0)),
        1..40,
    )
}

proptest! {
    #[test]
    fn percentiles_stay_within_bounds(values in column()) {
        for p in percentile_ranks(&values).into_iter().flatten() {
            prop_assert!(p > 0.0 && p <= 100.0);
        }
    }

    #[test]
    fn absent_cells_stay_absent(values in column()) {
        let ranks = percentile_ranks(&values);
        prop_assert_eq!(ranks.len(), values.len());
        for (value, rank) in values.iter().zip(&ranks) {
            prop_assert_eq!(value.is_some(), rank.is_some());
        }
    }

    #[test]
    fn the_maximum_ranks_at_one_hundred_when_unique(values in column()) {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        prop_assume!(!present.is_empty());
        let max = present.iter().copied().fold(f64::MIN, f64::max);
        prop_assume!(present.iter().filter(|v| **v == max).count() == 1);
        let ranks = percentile_ranks(&values);
        let at_max = values
            .iter()
            .zip(&ranks)
            .find(|(v, _)| **v == Some(max))
            .and_then(|(_, r)| *r);
        prop_assert_eq!(at_max, Some(100.0));
    }

    #[test]
    fn equal_values_share_a_percentile(values in column()) {
        let ranks = percentile_ranks(&values);
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                if a.is_some() && a == b {
                    prop_assert_eq!(ranks[i], ranks[j]);
                }
            }
        }
    }

    #[test]
    fn ranks_sum_to_the_triangular_number(values in proptest::collection::vec(-20i32..20, 1..30)) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let n = values.len() as f64;
        let total: f64 = average_ranks(&values).iter().sum();
        prop_assert!((total - n * (n + 1.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn higher_values_never_rank_lower(values in column()) {
        let ranks = percentile_ranks(&values);
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                if let (Some(a), Some(b)) = (a, b) && a < b {
                    prop_assert!(ranks[i] < ranks[j]);
                }
            }
        }
    }
}

#[test]
fn tied_pair_above_a_single_value() {
    let ranks: Vec<f64> = percentile_ranks(&[Some(0.1), Some(0.3), Some(0.3)])
        .into_iter()
        .flatten()
        .collect();
    assert!((ranks[0] - 33.333_333).abs() < 1e-4);
    assert!((ranks[1] - 83.333_333).abs() < 1e-4);
    assert_eq!(ranks[1], ranks[2]);
}
