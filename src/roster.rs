//! Normalized player roster built from a [`RawTable`].
//!
//! [`normalize`] is pure: it never touches the caller's table. It establishes
//! the canonical column layout (identity, position slots, biographical,
//! statistics), splits the `Position` field into slots with the requested
//! [`PositionStrategy`], and coerces every statistic column to typed cells.

use itertools::Itertools;
use log::{debug, warn};
use serde::Serialize;

use crate::{
    data::{Cell, ColumnKind, coerce_cell, parse_number},
    error::IngestError,
    ingest::{
        AGE_COLUMN, MINUTES_COLUMN, PLAYER_COLUMN, POSITION_COLUMN, RawTable, TEAM_COLUMN,
    },
    position::{
        POSITION_SLOT_COLUMNS, PositionSet, PositionSlots, PositionStrategy, RoleToken,
        normalize_field,
    },
};

/// Columns kept in place at the front of the export before biographical
/// fields are pulled forward.
const LEADING_COLUMNS: usize = 7;
/// Columns ahead of the inserted position slots.
const IDENTITY_COLUMNS: usize = 5;

pub const BIOGRAPHICAL_COLUMNS: &[&str] = &[
    "Birth country",
    "Passport country",
    "Foot",
    "Height",
    "Weight",
    "On loan",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatColumn {
    pub name: String,
    pub kind: ColumnKind,
    /// Sits at or after the ranking offset of the canonical layout.
    pub ranked: bool,
}

impl StatColumn {
    /// Whether the percentile pass ranks this column.
    pub fn is_ranked(&self) -> bool {
        self.ranked && self.kind == ColumnKind::Numeric
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub age: String,
    pub minutes: Option<f64>,
    pub positions: PositionSlots,
    /// Aligned with [`Roster::statistics`].
    pub stats: Vec<Cell>,
}

impl PlayerRecord {
    pub fn plays(&self, role: RoleToken) -> bool {
        self.positions.contains(role)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub strategy: PositionStrategy,
    pub layout: Vec<String>,
    pub statistics: Vec<StatColumn>,
    pub records: Vec<PlayerRecord>,
}

impl Roster {
    pub fn statistic_index(&self, name: &str) -> Option<usize> {
        self.statistics.iter().position(|c| c.name == name)
    }

    pub fn player_names(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.name.clone())
            .unique()
            .sorted()
            .collect()
    }

    pub fn contains_player(&self, player: &str) -> bool {
        self.records.iter().any(|r| r.name == player)
    }

    /// Every role the player has been listed at across all of their rows.
    pub fn roles_for_player(&self, player: &str) -> PositionSet {
        PositionSet::from_positions(
            self.records
                .iter()
                .filter(|r| r.name == player)
                .flat_map(|r| r.positions.iter().cloned()),
        )
    }
}

/// Reorders export headers into the canonical layout.
///
/// Biographical columns move directly behind the first seven columns, then
/// `Position` is replaced by four slot columns inserted after the first five.
pub fn canonical_layout(headers: &[String]) -> Vec<String> {
    let before: Vec<&String> = headers.iter().take(LEADING_COLUMNS).collect();
    let moving: Vec<&String> = BIOGRAPHICAL_COLUMNS
        .iter()
        .filter_map(|name| headers.iter().find(|h| h == name))
        .filter(|h| !before.contains(h))
        .collect();
    let after = headers
        .iter()
        .filter(|h| !before.contains(h) && !moving.contains(h));

    let without_position: Vec<String> = before
        .iter()
        .copied()
        .chain(moving.iter().copied())
        .chain(after)
        .filter(|h| h.as_str() != POSITION_COLUMN)
        .cloned()
        .collect();

    let split = IDENTITY_COLUMNS.min(without_position.len());
    let mut layout = Vec::with_capacity(without_position.len() + POSITION_SLOT_COLUMNS.len());
    layout.extend_from_slice(&without_position[..split]);
    layout.extend(POSITION_SLOT_COLUMNS.iter().map(|s| s.to_string()));
    layout.extend_from_slice(&without_position[split..]);
    layout
}

/// Index of the first statistic column: the column right after
/// `Minutes played`. Equals 18 for a full Wyscout export.
pub fn ranking_offset(layout: &[String]) -> usize {
    layout
        .iter()
        .position(|h| h == MINUTES_COLUMN)
        .map_or(layout.len(), |idx| idx + 1)
}

fn is_statistic_column(name: &str) -> bool {
    !POSITION_SLOT_COLUMNS.contains(&name)
        && ![PLAYER_COLUMN, TEAM_COLUMN, AGE_COLUMN, POSITION_COLUMN, MINUTES_COLUMN]
            .contains(&name)
}

pub fn normalize(table: &RawTable, strategy: PositionStrategy) -> Result<Roster, IngestError> {
    table.require_columns()?;
    let column = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
    };
    let player_idx = column(PLAYER_COLUMN)?;
    let team_idx = column(TEAM_COLUMN)?;
    let age_idx = column(AGE_COLUMN)?;
    let position_idx = column(POSITION_COLUMN)?;
    let minutes_idx = column(MINUTES_COLUMN)?;

    let kinds = table.infer_kinds();
    let layout = canonical_layout(&table.headers);
    let offset = ranking_offset(&layout);
    let sources: Vec<(usize, StatColumn)> = layout
        .iter()
        .enumerate()
        .filter(|(_, name)| is_statistic_column(name))
        .filter_map(|(position, name)| {
            table.column_index(name).map(|idx| {
                (
                    idx,
                    StatColumn {
                        name: name.clone(),
                        kind: kinds.get(idx).copied().unwrap_or(ColumnKind::Text),
                        ranked: position >= offset,
                    },
                )
            })
        })
        .collect();
    debug!(
        "Canonical layout holds {} statistic column(s); {} ranked from offset {offset}",
        sources.len(),
        sources.iter().filter(|(_, c)| c.is_ranked()).count()
    );

    let mut records = Vec::with_capacity(table.rows.len());
    let mut dropped = 0usize;
    for row in 0..table.rows.len() {
        let name = table.cell(row, player_idx).trim();
        let team = table.cell(row, team_idx).trim();
        let age = table.cell(row, age_idx).trim();
        if name.is_empty() || team.is_empty() || age.is_empty() {
            dropped += 1;
            continue;
        }
        let stats = sources
            .iter()
            .map(|(idx, col)| coerce_cell(table.cell(row, *idx), col.kind))
            .collect();
        records.push(PlayerRecord {
            name: name.to_string(),
            team: team.to_string(),
            age: age.to_string(),
            minutes: parse_number(table.cell(row, minutes_idx)),
            positions: normalize_field(table.cell(row, position_idx), strategy),
            stats,
        });
    }
    if dropped > 0 {
        warn!("Dropped {dropped} row(s) without player, team, or age");
    }

    Ok(Roster {
        strategy,
        layout,
        statistics: sources.into_iter().map(|(_, col)| col).collect(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    const WYSCOUT_HEADERS: &[&str] = &[
        "Player",
        "Team",
        "Team within selected timeframe",
        "Position",
        "Age",
        "Market value",
        "Contract expires",
        "Matches played",
        "Minutes played",
        "Goals",
        "xG",
        "Birth country",
        "Passport country",
        "Foot",
        "Height",
        "Weight",
        "On loan",
        "Non-penalty goals per 90",
    ];

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wyscout_layout_starts_ranking_at_offset_eighteen() {
        let layout = canonical_layout(&headers(WYSCOUT_HEADERS));
        assert_eq!(
            &layout[..9],
            &[
                "Player",
                "Team",
                "Team within selected timeframe",
                "Age",
                "Market value",
                "position1",
                "position2",
                "position3",
                "position4",
            ]
        );
        assert_eq!(layout[9], "Contract expires");
        assert_eq!(layout[10], "Birth country");
        assert_eq!(layout[17], "Minutes played");
        assert_eq!(ranking_offset(&layout), 18);
        assert_eq!(&layout[18..], &["Goals", "xG", "Non-penalty goals per 90"]);
    }

    #[test]
    fn normalize_leaves_the_source_table_untouched() {
        let table = RawTable::new(
            headers(&["Player", "Team", "Age", "Position", "Minutes played", "xG per 90"]),
            vec![headers(&["A", "Alpha", "23", "RCB, LCB", "900", "0.1"])],
        );
        let snapshot = table.clone();
        let roster = normalize(&table, PositionStrategy::Standard).unwrap();
        assert_eq!(table, snapshot);
        assert_eq!(roster.statistics.len(), 1);
        assert_eq!(roster.records[0].stats, vec![Cell::Number(0.1)]);
        assert_eq!(
            roster.roles_for_player("A").as_slice(),
            &[Position::Known(RoleToken::CB)]
        );
    }

    #[test]
    fn columns_ahead_of_minutes_are_kept_but_unranked() {
        let table = RawTable::new(
            headers(&["Player", "Team", "Age", "Position", "Height", "Minutes played", "Goals"]),
            vec![headers(&["A", "Alpha", "23", "CF", "181", "900", "7"])],
        );
        let roster = normalize(&table, PositionStrategy::Standard).unwrap();
        let height = roster.statistic_index("Height").unwrap();
        let goals = roster.statistic_index("Goals").unwrap();
        assert_eq!(roster.statistics[height].kind, ColumnKind::Numeric);
        assert!(!roster.statistics[height].is_ranked());
        assert!(roster.statistics[goals].is_ranked());
        assert_eq!(roster.records[0].stats[height], Cell::Number(181.0));
        assert_eq!(roster.statistic_index("Minutes played"), None);
    }

    #[test]
    fn rows_without_identity_are_dropped() {
        let table = RawTable::new(
            headers(&["Player", "Team", "Age", "Position", "Minutes played"]),
            vec![
                headers(&["A", "Alpha", "23", "CB", "900"]),
                headers(&["", "Alpha", "23", "CB", "900"]),
                headers(&["C", "", "30", "CB", "900"]),
            ],
        );
        let roster = normalize(&table, PositionStrategy::Standard).unwrap();
        assert_eq!(roster.player_names(), vec!["A"]);
    }

    #[test]
    fn roles_for_player_unions_every_row() {
        let table = RawTable::new(
            headers(&["Player", "Team", "Age", "Position", "Minutes played"]),
            vec![
                headers(&["A", "Alpha", "23", "RW, CF", "900"]),
                headers(&["A", "Beta", "23", "LAMF, X9", "400"]),
                headers(&["B", "Beta", "31", "GK", "1200"]),
            ],
        );
        let roster = normalize(&table, PositionStrategy::Standard).unwrap();
        assert_eq!(roster.roles_for_player("A").joined(","), "LW,RW,CF,X9");
        assert!(roster.roles_for_player("nobody").is_empty());
    }
}
