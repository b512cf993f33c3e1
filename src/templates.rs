//! Role → metric template registry.
//!
//! Every template is fifteen statistic columns paired index-for-index with
//! fifteen display labels, split into three bands of five. The arrays are fixed
//! length, so column/label alignment holds for every role by construction.

use std::fmt;

use serde::Serialize;

use crate::position::RoleToken;

pub const TEMPLATE_LEN: usize = 15;
pub const BAND_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Band {
    Attacking,
    Possession,
    Defending,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Attacking, Band::Possession, Band::Defending];

    /// Band of the metric at `index` (0-4, 5-9, 10-14).
    pub fn of_index(index: usize) -> Option<Band> {
        Band::ALL.get(index / BAND_LEN).copied()
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        let start = *self as usize * BAND_LEN;
        start..start + BAND_LEN
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Band::Attacking => "Attacking",
            Band::Possession => "Possession",
            Band::Defending => "Defending",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricTemplate {
    pub role: RoleToken,
    pub columns: [&'static str; TEMPLATE_LEN],
    pub labels: [&'static str; TEMPLATE_LEN],
}

impl MetricTemplate {
    pub fn metrics(&self) -> impl Iterator<Item = (Band, &'static str, &'static str)> + '_ {
        self.columns
            .iter()
            .zip(self.labels.iter())
            .enumerate()
            .filter_map(|(idx, (column, label))| {
                Band::of_index(idx).map(|band| (band, *column, *label))
            })
    }

    pub fn band_columns(&self, band: Band) -> &[&'static str] {
        &self.columns[band.range()]
    }
}

const CENTRAL_MIDFIELD_COLUMNS: [&str; TEMPLATE_LEN] = [
    "Non-penalty goals per 90",
    "xG per 90",
    "xA per 90",
    "Shot assists per 90",
    "Touches in box per 90",
    "Accurate passes, %",
    "Accurate progressive passes, %",
    "Progressive runs per 90",
    "Accurate passes to final third, %",
    "Accurate crosses, %",
    "Successful defensive actions per 90",
    "Defensive duels won, %",
    "PAdj Sliding tackles",
    "Shots blocked per 90",
    "PAdj Interceptions",
];

const CENTRAL_MIDFIELD_LABELS: [&str; TEMPLATE_LEN] = [
    "Non-penalty goals",
    "xG",
    "xA",
    "Shot assists",
    "Touches in box",
    "Accurate passes %",
    "Accurate progressive passes %",
    "Progressive runs",
    "Accurate passes to final third %",
    "Accurate crosses %",
    "Successful defensive actions",
    "Defensive duels won %",
    "PAdj Sliding tackles",
    "Shots blocked",
    "PAdj Interceptions",
];

const FULL_BACK_COLUMNS: [&str; TEMPLATE_LEN] = [
    "Shot assists per 90",
    "xA per 90",
    "Assists per 90",
    "xG per 90",
    "Successful attacking actions per 90",
    "Accurate passes, %",
    "Accurate progressive passes, %",
    "Crosses per 90",
    "Accurate crosses, %",
    "Progressive runs per 90",
    "Successful defensive actions per 90",
    "Defensive duels won, %",
    "PAdj Sliding tackles",
    "Shots blocked per 90",
    "PAdj Interceptions",
];

const FULL_BACK_LABELS: [&str; TEMPLATE_LEN] = [
    "Shot assists",
    "xA",
    "Assists",
    "xG",
    "Successful attacking actions",
    "Accurate passes %",
    "Accurate progressive passes %",
    "Crosses",
    "Accurate crosses %",
    "Progressive runs",
    "Successful defensive actions",
    "Defensive duels won %",
    "PAdj Sliding tackles",
    "Shots blocked",
    "PAdj Interceptions",
];

const CENTRE_BACK_COLUMNS: [&str; TEMPLATE_LEN] = [
    "Offensive duels won, %",
    "Shot assists per 90",
    "xA per 90",
    "xG per 90",
    "Non-penalty goals per 90",
    "Accurate passes, %",
    "Accurate lateral passes, %",
    "Accurate short / medium passes, %",
    "Progressive passes per 90",
    "Accurate progressive passes, %",
    "Defensive duels won, %",
    "Successful defensive actions per 90",
    "Aerial duels won, %",
    "PAdj Interceptions",
    "Shots blocked per 90",
];

const CENTRE_BACK_LABELS: [&str; TEMPLATE_LEN] = [
    "Offensive duels won %",
    "Shot assists",
    "xA",
    "xG",
    "Non-penalty goals",
    "Accurate passes %",
    "Accurate lateral passes %",
    "Accurate short & medium passes %",
    "Progressive passes",
    "Accurate progressive passes %",
    "Defensive duels won %",
    "Successful defensive actions",
    "Aerial duels won %",
    "PAdj Interceptions",
    "Shots blocked",
];

const CENTRE_FORWARD_COLUMNS: [&str; TEMPLATE_LEN] = [
    "Touches in box per 90",
    "Shots per 90",
    "Shots on target, %",
    "xG per 90",
    "Non-penalty goals per 90",
    "Accurate passes, %",
    "Accurate smart passes, %",
    "Shot assists per 90",
    "xA per 90",
    "Assists per 90",
    "Offensive duels per 90",
    "Offensive duels won, %",
    "Aerial duels won, %",
    "Successful dribbles, %",
    "Successful attacking actions per 90",
];

const CENTRE_FORWARD_LABELS: [&str; TEMPLATE_LEN] = [
    "Touches in box",
    "Shots",
    "Shots on target %",
    "xG",
    "Non-penalty goals",
    "Accurate passes %",
    "Accurate smart passes %",
    "Shot assists",
    "xA",
    "Assists",
    "Offensive duels",
    "Offensive duels won %",
    "Aerial duels won %",
    "Successful dribbles %",
    "Successful attacking actions",
];

const WINGER_COLUMNS: [&str; TEMPLATE_LEN] = [
    "Touches in box per 90",
    "Shots per 90",
    "Shots on target, %",
    "xG per 90",
    "Non-penalty goals per 90",
    "Progressive runs per 90",
    "Accurate crosses, %",
    "Shot assists per 90",
    "xA per 90",
    "Assists per 90",
    "Offensive duels per 90",
    "Offensive duels won, %",
    "Dribbles per 90",
    "Successful dribbles, %",
    "Successful attacking actions per 90",
];

const WINGER_LABELS: [&str; TEMPLATE_LEN] = [
    "Touches in box",
    "Shots",
    "Shots on target %",
    "xG",
    "Non-penalty goals",
    "Progressive runs",
    "Accurate crosses %",
    "Shot assists",
    "xA",
    "Assists",
    "Offensive duels",
    "Offensive duels won %",
    "Dribbles",
    "Successful dribbles %",
    "Successful attacking actions",
];

const DEFENSIVE_MIDFIELD_COLUMNS: [&str; TEMPLATE_LEN] = [
    "Successful attacking actions per 90",
    "Shot assists per 90",
    "xA per 90",
    "Shots per 90",
    "xG per 90",
    "Accurate passes, %",
    "Accurate short / medium passes, %",
    "Accurate through passes, %",
    "Progressive passes per 90",
    "Accurate progressive passes, %",
    "Successful defensive actions per 90",
    "Defensive duels per 90",
    "Defensive duels won, %",
    "PAdj Sliding tackles",
    "PAdj Interceptions",
];

const DEFENSIVE_MIDFIELD_LABELS: [&str; TEMPLATE_LEN] = [
    "Successful attacking actions",
    "Shot assists",
    "xA",
    "Shots",
    "xG",
    "Accurate passes %",
    "Accurate short/medium passes %",
    "Accurate through passes %",
    "Progressive passes",
    "Accurate progressive passes %",
    "Successful defensive actions",
    "Defensive duels",
    "Defensive duels won %",
    "PAdj Sliding tackles",
    "PAdj Interceptions",
];

const ATTACKING_MIDFIELD_COLUMNS: [&str; TEMPLATE_LEN] = [
    "Touches in box per 90",
    "Shots per 90",
    "Goal conversion, %",
    "Non-penalty goals per 90",
    "xG per 90",
    "Accurate passes to penalty area, %",
    "Accurate crosses, %",
    "Shot assists per 90",
    "xA per 90",
    "Assists per 90",
    "Offensive duels per 90",
    "Offensive duels won, %",
    "Successful attacking actions per 90",
    "Dribbles per 90",
    "Successful dribbles, %",
];

const ATTACKING_MIDFIELD_LABELS: [&str; TEMPLATE_LEN] = [
    "Touches in box",
    "Shots",
    "Goal conversion %",
    "Non-penalty goals",
    "xG",
    "Accurate passes to penalty area %",
    "Accurate crosses %",
    "Shot assists",
    "xA",
    "Assists",
    "Offensive duels",
    "Offensive duels won %",
    "Successful attacking actions",
    "Dribbles",
    "Successful dribbles %",
];

const fn template(
    role: RoleToken,
    columns: [&'static str; TEMPLATE_LEN],
    labels: [&'static str; TEMPLATE_LEN],
) -> MetricTemplate {
    MetricTemplate {
        role,
        columns,
        labels,
    }
}

static TEMPLATES: [MetricTemplate; 11] = [
    template(RoleToken::CB, CENTRE_BACK_COLUMNS, CENTRE_BACK_LABELS),
    template(RoleToken::LB, FULL_BACK_COLUMNS, FULL_BACK_LABELS),
    template(RoleToken::RB, FULL_BACK_COLUMNS, FULL_BACK_LABELS),
    template(RoleToken::LWB, FULL_BACK_COLUMNS, FULL_BACK_LABELS),
    template(RoleToken::RWB, FULL_BACK_COLUMNS, FULL_BACK_LABELS),
    template(RoleToken::DM, DEFENSIVE_MIDFIELD_COLUMNS, DEFENSIVE_MIDFIELD_LABELS),
    template(RoleToken::CM, CENTRAL_MIDFIELD_COLUMNS, CENTRAL_MIDFIELD_LABELS),
    template(RoleToken::AM, ATTACKING_MIDFIELD_COLUMNS, ATTACKING_MIDFIELD_LABELS),
    template(RoleToken::LW, WINGER_COLUMNS, WINGER_LABELS),
    template(RoleToken::RW, WINGER_COLUMNS, WINGER_LABELS),
    template(RoleToken::CF, CENTRE_FORWARD_COLUMNS, CENTRE_FORWARD_LABELS),
];

pub fn template_for(role: RoleToken) -> Option<&'static MetricTemplate> {
    TEMPLATES.iter().find(|t| t.role == role)
}

pub fn supported_roles() -> impl Iterator<Item = RoleToken> {
    TEMPLATES.iter().map(|t| t.role)
}

/// Columns and labels for a free-text role; both empty when the role is not
/// recognised or has no template.
pub fn resolve(role: &str) -> (Vec<&'static str>, Vec<&'static str>) {
    role.parse::<RoleToken>()
        .ok()
        .and_then(template_for)
        .map(|t| (t.columns.to_vec(), t.labels.to_vec()))
        .unwrap_or_default()
}
