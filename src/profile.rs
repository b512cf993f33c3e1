//! Profile builders.
//!
//! Both paths share cohort selection and the template registry, then diverge:
//!
//! - **Pizza**: rank every statistic column within the cohort, pick the
//!   template columns for the player, round each percentile to an integer.
//! - **Radar**: no ranking. Cohort minimum, maximum and mean of the raw
//!   template columns plus the player's raw values, rounded to two places.

use log::{info, warn};
use serde::Serialize;

use crate::{
    cohort::{Cohort, CohortQuery},
    data::{ColumnKind, round_to},
    error::ProfileError,
    percentile::rank_cohort,
    roster::Roster,
    templates::{MetricTemplate, template_for},
};

pub const RADAR_DECIMALS: i32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PizzaVector {
    pub columns: Vec<String>,
    pub labels: Vec<String>,
    pub values: Vec<Option<u8>>,
    pub cohort_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarVector {
    pub columns: Vec<String>,
    pub labels: Vec<String>,
    pub min: Vec<Option<f64>>,
    pub max: Vec<Option<f64>>,
    pub mean: Vec<Option<f64>>,
    pub player: Vec<Option<f64>>,
    pub cohort_size: usize,
}

/// Template lookup that turns "no template" into a reportable error.
pub fn require_template(query: &CohortQuery) -> Result<&'static MetricTemplate, ProfileError> {
    template_for(query.role).ok_or_else(|| ProfileError::UnsupportedRole(query.role.to_string()))
}

/// Selects the cohort and locates the player in it.
fn cohort_with_player<'a>(
    roster: &'a Roster,
    query: CohortQuery,
    player: &str,
) -> Result<(Cohort<'a>, usize), ProfileError> {
    let cohort = Cohort::select(roster, query);
    if cohort.is_empty() {
        return Err(ProfileError::EmptyCohort {
            role: query.role.to_string(),
            min_minutes: query.min_minutes,
        });
    }
    let member = cohort
        .position_of(player)
        .ok_or_else(|| ProfileError::PlayerNotInCohort {
            player: player.to_string(),
            role: query.role.to_string(),
            min_minutes: query.min_minutes,
        })?;
    info!(
        "{} cohort at {}+ minutes holds {} player(s)",
        query.role,
        query.min_minutes,
        cohort.len()
    );
    Ok((cohort, member))
}

fn template_indices(
    roster: &Roster,
    template: &MetricTemplate,
) -> Result<Vec<usize>, ProfileError> {
    let mut indices = Vec::with_capacity(template.columns.len());
    let mut missing = Vec::new();
    for column in template.columns {
        match roster.statistic_index(column) {
            Some(idx) => indices.push(idx),
            None => missing.push(column.to_string()),
        }
    }
    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(ProfileError::MissingColumns {
            role: template.role.to_string(),
            columns: missing,
        })
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn build_pizza(
    roster: &Roster,
    query: CohortQuery,
    player: &str,
) -> Result<PizzaVector, ProfileError> {
    let template = require_template(&query)?;
    let (cohort, member) = cohort_with_player(roster, query, player)?;
    let indices = template_indices(roster, template)?;

    let ranked = rank_cohort(&cohort);
    let values = indices
        .iter()
        .map(|&idx| {
            let percentile = ranked.get(member, idx).and_then(|cell| cell.percentile());
            let column = &roster.statistics[idx];
            if !column.is_ranked() {
                let reason = match column.kind {
                    ColumnKind::Text => "is not numeric",
                    ColumnKind::Numeric => "precedes the ranked statistics",
                };
                warn!("Column '{}' {reason}; leaving it unranked", column.name);
            }
            percentile.map(|p| p.round_ties_even().clamp(0.0, 100.0) as u8)
        })
        .collect();

    Ok(PizzaVector {
        columns: owned(&template.columns),
        labels: owned(&template.labels),
        values,
        cohort_size: cohort.len(),
    })
}

#[derive(Debug, Default)]
struct ColumnRange {
    count: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl ColumnRange {
    fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |current| current.min(value)));
        self.max = Some(self.max.map_or(value, |current| current.max(value)));
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

pub fn build_radar(
    roster: &Roster,
    query: CohortQuery,
    player: &str,
) -> Result<RadarVector, ProfileError> {
    let template = require_template(&query)?;
    let (cohort, member) = cohort_with_player(roster, query, player)?;
    let indices = template_indices(roster, template)?;

    let round = |value: Option<f64>| value.map(|v| round_to(v, RADAR_DECIMALS));
    let mut radar = RadarVector {
        columns: owned(&template.columns),
        labels: owned(&template.labels),
        min: Vec::with_capacity(indices.len()),
        max: Vec::with_capacity(indices.len()),
        mean: Vec::with_capacity(indices.len()),
        player: Vec::with_capacity(indices.len()),
        cohort_size: cohort.len(),
    };
    for &idx in &indices {
        let mut range = ColumnRange::default();
        for value in cohort.column(idx).filter_map(|cell| cell.as_number()) {
            range.add(value);
        }
        radar.min.push(round(range.min));
        radar.max.push(round(range.max));
        radar.mean.push(round(range.mean()));
        radar
            .player
            .push(round(cohort.members[member].stats[idx].as_number()));
    }
    Ok(radar)
}
