//! Percentile ranks within a cohort.
//!
//! Ranks use the average method: tied values share the mean of the ranks they
//! would occupy, ranks are 1-based, and a rank becomes a percentile as
//! `rank / n * 100`, where `n` counts the values present in that column. The
//! ranked player is always part of the population.
//!
//! Absent cells are excluded from ranking and stay absent. Text columns are not
//! ranked at all; their cells pass through untouched.

use serde::Serialize;

use crate::{cohort::Cohort, data::Cell};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RankedCell {
    Percentile(f64),
    Unranked(Cell),
}

impl RankedCell {
    pub fn percentile(&self) -> Option<f64> {
        match self {
            RankedCell::Percentile(p) => Some(*p),
            RankedCell::Unranked(_) => None,
        }
    }
}

/// 1-based average ranks of `values`, in input order.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1 ..= end
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }
    ranks
}

/// Percentile ranks (0-100] of the present values; absent stays absent.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return vec![None; values.len()];
    }
    let n = present.len() as f64;
    let mut ranks = average_ranks(&present).into_iter();
    values
        .iter()
        .map(|value| {
            value.and_then(|_| ranks.next()).map(|rank| rank / n * 100.0)
        })
        .collect()
}

/// Every statistic column of a cohort, ranked. Column-major, aligned with the
/// roster's statistic columns and the cohort's member order.
#[derive(Debug, Clone)]
pub struct RankedCohort {
    columns: Vec<Vec<RankedCell>>,
}

impl RankedCohort {
    pub fn get(&self, member: usize, stat_index: usize) -> Option<&RankedCell> {
        self.columns.get(stat_index).and_then(|c| c.get(member))
    }

}

/// Ranks every eligible column of the cohort, not only the ones a template
/// will later pick. Text columns and columns ahead of the ranking offset pass
/// through unranked.
pub fn rank_cohort(cohort: &Cohort<'_>) -> RankedCohort {
    let columns = cohort
        .roster
        .statistics
        .iter()
        .enumerate()
        .map(|(stat_index, column)| {
            if column.is_ranked() {
                let values: Vec<Option<f64>> =
                    cohort.column(stat_index).map(Cell::as_number).collect();
                percentile_ranks(&values)
                    .into_iter()
                    .map(|p| p.map_or(RankedCell::Unranked(Cell::Missing), RankedCell::Percentile))
                    .collect()
            } else {
                cohort
                    .column(stat_index)
                    .map(|cell| RankedCell::Unranked(cell.clone()))
                    .collect()
            }
        })
        .collect();
    RankedCohort { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cohort::CohortQuery,
        data::ColumnKind,
        ingest::RawTable,
        position::{PositionStrategy, RoleToken},
        roster::normalize,
    };

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn average_ranks_share_ties() {
        assert_eq!(average_ranks(&[0.1, 0.3, 0.3]), vec![1.0, 2.5, 2.5]);
        assert_eq!(average_ranks(&[5.0, 1.0, 5.0, 5.0]), vec![3.0, 1.0, 3.0, 3.0]);
        assert!(average_ranks(&[]).is_empty());
    }

    #[test]
    fn three_player_example_matches_reference_values() {
        let ranks = percentile_ranks(&[Some(0.1), Some(0.3), Some(0.3)]);
        let ranks: Vec<f64> = ranks.into_iter().flatten().collect();
        assert!(approx(ranks[0], 100.0 / 3.0));
        assert!(approx(ranks[1], 250.0 / 3.0));
        assert_eq!(ranks[1], ranks[2]);
    }

    #[test]
    fn absent_values_are_skipped_and_shrink_the_population() {
        let ranks = percentile_ranks(&[Some(2.0), None, Some(1.0)]);
        assert_eq!(ranks, vec![Some(100.0), None, Some(50.0)]);
        assert_eq!(percentile_ranks(&[None, None]), vec![None, None]);
    }

    #[test]
    fn text_columns_pass_through_unranked() {
        let table = RawTable::new(
            ["Player", "Team", "Age", "Position", "Minutes played", "Preferred side", "xG per 90"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![
                ["A", "Alpha", "24", "CF", "1200", "left", "0.4"],
                ["B", "Beta", "27", "CF", "900", "right", "0.2"],
            ]
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
        );
        let roster = normalize(&table, PositionStrategy::Standard).unwrap();
        let side = roster.statistic_index("Preferred side").unwrap();
        let xg = roster.statistic_index("xG per 90").unwrap();
        assert_eq!(roster.statistics[side].kind, ColumnKind::Text);

        let cohort = Cohort::select(&roster, CohortQuery::new(RoleToken::CF, 0));
        let ranked = rank_cohort(&cohort);
        assert_eq!(
            ranked.get(0, side),
            Some(&RankedCell::Unranked(Cell::Text("left".to_string())))
        );
        assert_eq!(ranked.get(1, side).and_then(RankedCell::percentile), None);
        assert_eq!(ranked.get(0, xg), Some(&RankedCell::Percentile(100.0)));
        assert_eq!(ranked.get(1, xg), Some(&RankedCell::Percentile(50.0)));
    }

    #[test]
    fn single_member_cohort_ranks_at_one_hundred() {
        assert_eq!(percentile_ranks(&[Some(0.0)]), vec![Some(100.0)]);
    }
}
