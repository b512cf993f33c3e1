//! Playing-position tokens and the normalizer for free-text position fields.
//!
//! Exports list up to four comma-separated role codes per player, mixing
//! canonical codes (`CB`, `LW`) with finer-grained variants (`RCB`, `LWF`,
//! `RDMF`). [`normalize_field`] splits the field into four slots and collapses
//! the variants through a [`PositionStrategy`]:
//!
//! - [`PositionStrategy::Standard`] folds the wide/central variants onto the
//!   twelve canonical roles.
//! - [`PositionStrategy::FoldWingBacks`] does the same and additionally folds
//!   `LWB`→`LB` and `RWB`→`RB`.
//!
//! Both strategies are fixed points: normalizing an already-normalized token
//! returns it unchanged.

use std::{cmp::Ordering, fmt, str::FromStr};

use log::debug;
use serde::{Deserialize, Serialize};

pub const POSITION_SLOTS: usize = 4;
pub const POSITION_SLOT_COLUMNS: [&str; POSITION_SLOTS] =
    ["position1", "position2", "position3", "position4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleToken {
    GK,
    CB,
    LB,
    RB,
    LWB,
    RWB,
    DM,
    CM,
    AM,
    LW,
    RW,
    CF,
}

impl RoleToken {
    /// Canonical role-priority order.
    pub const ALL: [RoleToken; 12] = [
        RoleToken::GK,
        RoleToken::CB,
        RoleToken::LB,
        RoleToken::RB,
        RoleToken::LWB,
        RoleToken::RWB,
        RoleToken::DM,
        RoleToken::CM,
        RoleToken::AM,
        RoleToken::LW,
        RoleToken::RW,
        RoleToken::CF,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleToken::GK => "GK",
            RoleToken::CB => "CB",
            RoleToken::LB => "LB",
            RoleToken::RB => "RB",
            RoleToken::LWB => "LWB",
            RoleToken::RWB => "RWB",
            RoleToken::DM => "DM",
            RoleToken::CM => "CM",
            RoleToken::AM => "AM",
            RoleToken::LW => "LW",
            RoleToken::RW => "RW",
            RoleToken::CF => "CF",
        }
    }

    pub fn priority(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for RoleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleToken {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.trim().to_ascii_uppercase();
        RoleToken::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == upper)
            .ok_or_else(|| format!("'{}' is not a recognised role", value.trim()))
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum PositionStrategy {
    #[default]
    Standard,
    FoldWingBacks,
}

const STANDARD_SYNONYMS: &[(&str, RoleToken)] = &[
    ("LWF", RoleToken::LW),
    ("RWF", RoleToken::RW),
    ("LCMF", RoleToken::CM),
    ("RCMF", RoleToken::CM),
    ("DMF", RoleToken::DM),
    ("RDMF", RoleToken::DM),
    ("LDMF", RoleToken::DM),
    ("AMF", RoleToken::AM),
    ("RAMF", RoleToken::RW),
    ("LAMF", RoleToken::LW),
    ("RCB", RoleToken::CB),
    ("LCB", RoleToken::CB),
];

const WING_BACK_FOLDS: &[(RoleToken, RoleToken)] =
    &[(RoleToken::LWB, RoleToken::LB), (RoleToken::RWB, RoleToken::RB)];

impl PositionStrategy {
    pub fn canonicalize(&self, token: &str) -> Option<Position> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        let upper = trimmed.to_ascii_uppercase();
        let role = STANDARD_SYNONYMS
            .iter()
            .find(|(alias, _)| *alias == upper)
            .map(|(_, role)| *role)
            .or_else(|| upper.parse::<RoleToken>().ok());
        let Some(role) = role else {
            return Some(Position::Unknown(trimmed.to_string()));
        };
        let role = match self {
            PositionStrategy::Standard => role,
            PositionStrategy::FoldWingBacks => WING_BACK_FOLDS
                .iter()
                .find(|(from, _)| *from == role)
                .map_or(role, |(_, to)| *to),
        };
        Some(Position::Known(role))
    }
}

impl fmt::Display for PositionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionStrategy::Standard => f.write_str("standard"),
            PositionStrategy::FoldWingBacks => f.write_str("fold-wing-backs"),
        }
    }
}

/// A normalized position token; anything outside the closed role set is kept
/// verbatim so it can still be shown, but it never matches a role filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Known(RoleToken),
    Unknown(String),
}

impl Position {
    pub fn role(&self) -> Option<RoleToken> {
        match self {
            Position::Known(role) => Some(*role),
            Position::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Position::Known(role) => role.as_str(),
            Position::Unknown(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four position slots of one record, in the order they appeared in the
/// raw field. Empty or missing slots are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSlots([Option<Position>; POSITION_SLOTS]);

impl PositionSlots {
    pub fn get(&self, slot: usize) -> Option<&Position> {
        self.0.get(slot).and_then(|p| p.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.0.iter().flatten()
    }

    pub fn contains(&self, role: RoleToken) -> bool {
        self.iter().any(|p| p.role() == Some(role))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn to_set(&self) -> PositionSet {
        PositionSet::from_positions(self.iter().cloned())
    }
}

/// Splits a raw comma-separated position field into four normalized slots.
pub fn normalize_field(raw: &str, strategy: PositionStrategy) -> PositionSlots {
    let mut slots: [Option<Position>; POSITION_SLOTS] = Default::default();
    if raw.trim().is_empty() {
        return PositionSlots(slots);
    }
    for (idx, token) in raw.split(',').enumerate() {
        if idx >= POSITION_SLOTS {
            debug!("Ignoring position token '{}' beyond slot {POSITION_SLOTS} in '{raw}'", token.trim());
            continue;
        }
        slots[idx] = strategy.canonicalize(token);
    }
    PositionSlots(slots)
}

/// De-duplicated positions ordered by role priority; unknown tokens follow in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSet(Vec<Position>);

impl PositionSet {
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut seen: Vec<Position> = Vec::new();
        for position in positions {
            if !seen.contains(&position) {
                seen.push(position);
            }
        }
        // stable sort keeps unknowns in first-seen order
        seen.sort_by(|a, b| match (a.role(), b.role()) {
            (Some(x), Some(y)) => x.priority().cmp(&y.priority()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        PositionSet(seen)
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    pub fn roles(&self) -> Vec<RoleToken> {
        self.0.iter().filter_map(Position::role).collect()
    }

    pub fn contains(&self, role: RoleToken) -> bool {
        self.0.iter().any(|p| p.role() == Some(role))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn joined(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(Position::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(role: RoleToken) -> Position {
        Position::Known(role)
    }

    #[test]
    fn rcb_and_cb_collapse_to_one_role() {
        let slots = normalize_field("RCB, CB", PositionStrategy::Standard);
        assert_eq!(slots.get(0), Some(&known(RoleToken::CB)));
        assert_eq!(slots.get(1), Some(&known(RoleToken::CB)));
        assert_eq!(slots.get(2), None);
        assert_eq!(slots.to_set().as_slice(), &[known(RoleToken::CB)]);
    }

    #[test]
    fn standard_keeps_wing_backs_but_fold_strategy_does_not() {
        let standard = normalize_field("LWB, RWB", PositionStrategy::Standard);
        assert!(standard.contains(RoleToken::LWB));
        assert!(!standard.contains(RoleToken::LB));

        let folded = normalize_field("LWB, RWB", PositionStrategy::FoldWingBacks);
        assert_eq!(folded.to_set().roles(), vec![RoleToken::LB, RoleToken::RB]);
    }

    #[test]
    fn synonyms_cover_wyscout_codes() {
        let slots = normalize_field("RAMF, LDMF, RCMF, LWF", PositionStrategy::Standard);
        let roles: Vec<_> = slots.iter().filter_map(Position::role).collect();
        assert_eq!(
            roles,
            vec![RoleToken::RW, RoleToken::DM, RoleToken::CM, RoleToken::LW]
        );
    }

    #[test]
    fn empty_field_yields_no_positions() {
        assert!(normalize_field("", PositionStrategy::Standard).is_empty());
        assert!(normalize_field("  ,  ", PositionStrategy::Standard).is_empty());
    }

    #[test]
    fn tokens_beyond_four_slots_are_dropped() {
        let slots = normalize_field("CB, LB, RB, DM, CF", PositionStrategy::Standard);
        assert_eq!(slots.iter().count(), 4);
        assert!(!slots.contains(RoleToken::CF));
    }

    #[test]
    fn unknown_tokens_sort_after_roles_in_first_seen_order() {
        let set = PositionSet::from_positions(vec![
            Position::Unknown("SW".to_string()),
            known(RoleToken::CF),
            Position::Unknown("LIB".to_string()),
            known(RoleToken::GK),
            Position::Unknown("SW".to_string()),
        ]);
        assert_eq!(set.joined(","), "GK,CF,SW,LIB");
    }

    #[test]
    fn role_token_parses_case_insensitively() {
        assert_eq!("lw".parse::<RoleToken>().unwrap(), RoleToken::LW);
        assert!("XX".parse::<RoleToken>().is_err());
    }
}
