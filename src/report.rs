//! Renderer-facing payloads and their plain-text and JSON forms.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use crate::{
    cohort::Cohort,
    data::format_number,
    profile::{PizzaVector, RadarVector},
    session::ProfileContext,
    table::{Align, render_table},
    templates::Band,
};

const ABSENT: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PizzaPayload {
    pub context: ProfileContext,
    #[serde(flatten)]
    pub profile: PizzaVector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPayload {
    pub context: ProfileContext,
    #[serde(flatten)]
    pub profile: RadarVector,
}

fn title(context: &ProfileContext, kind: &str) -> String {
    let mut line = format!("{} ({}) {} {kind}", context.player, context.team, context.role);
    let scope = [context.league.as_deref(), context.season.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    if !scope.is_empty() {
        let _ = write!(line, ", {}", scope.join(" "));
    }
    let _ = write!(line, ", {}+ minutes", context.min_minutes);
    line
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn band_name(index: usize) -> String {
    Band::of_index(index).map(|band| band.to_string()).unwrap_or_default()
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| ABSENT.to_string(), format_number)
}

impl PizzaPayload {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self) -> String {
        let headers = strings(&["Band", "Metric", "Percentile"]);
        let rows = self
            .profile
            .labels
            .iter()
            .zip(&self.profile.values)
            .enumerate()
            .map(|(idx, (label, value))| {
                vec![
                    band_name(idx),
                    label.clone(),
                    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string()),
                ]
            })
            .collect::<Vec<_>>();
        let mut output = String::new();
        let _ = writeln!(output, "{}", title(&self.context, "percentile ranks"));
        let _ = writeln!(output, "Compared with {} player(s)", self.profile.cohort_size);
        if let Some(logo) = &self.context.logo {
            let _ = writeln!(output, "Logo: {logo}");
        }
        output.push('\n');
        output.push_str(&render_table(
            &headers,
            &rows,
            &[Align::Left, Align::Left, Align::Right],
        ));
        output
    }
}

impl RadarPayload {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self) -> String {
        let headers = strings(&["Band", "Metric", "Player", "Min", "Mean", "Max"]);
        let profile = &self.profile;
        let rows = (0..profile.labels.len())
            .map(|idx| {
                vec![
                    band_name(idx),
                    profile.labels[idx].clone(),
                    number(profile.player[idx]),
                    number(profile.min[idx]),
                    number(profile.mean[idx]),
                    number(profile.max[idx]),
                ]
            })
            .collect::<Vec<_>>();
        let mut output = String::new();
        let _ = writeln!(output, "{}", title(&self.context, "radar"));
        let _ = writeln!(output, "Compared with {} player(s)", profile.cohort_size);
        if let Some(logo) = &self.context.logo {
            let _ = writeln!(output, "Logo: {logo}");
        }
        output.push('\n');
        output.push_str(&render_table(
            &headers,
            &rows,
            &[
                Align::Left,
                Align::Left,
                Align::Right,
                Align::Right,
                Align::Right,
                Align::Right,
            ],
        ));
        output
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CohortEntry {
    pub player: String,
    pub team: String,
    pub age: String,
    pub minutes: Option<f64>,
    pub positions: String,
}

pub fn cohort_entries(cohort: &Cohort<'_>) -> Vec<CohortEntry> {
    cohort
        .members
        .iter()
        .map(|record| CohortEntry {
            player: record.name.clone(),
            team: record.team.clone(),
            age: record.age.clone(),
            minutes: record.minutes,
            positions: record.positions.to_set().joined(", "),
        })
        .collect()
}

pub fn render_cohort(entries: &[CohortEntry]) -> String {
    let headers = strings(&["Player", "Team", "Age", "Minutes", "Positions"]);
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                entry.player.clone(),
                entry.team.clone(),
                entry.age.clone(),
                number(entry.minutes),
                entry.positions.clone(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(
        &headers,
        &rows,
        &[Align::Left, Align::Left, Align::Right, Align::Right, Align::Left],
    )
}
