//! Cohort selection by role and minimum minutes played.

use serde::Serialize;

use crate::{
    data::Cell,
    position::RoleToken,
    roster::{PlayerRecord, Roster},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CohortQuery {
    pub role: RoleToken,
    pub min_minutes: u32,
}

impl CohortQuery {
    pub fn new(role: RoleToken, min_minutes: u32) -> Self {
        Self { role, min_minutes }
    }

    pub fn matches(&self, record: &PlayerRecord) -> bool {
        record.plays(self.role)
            && record
                .minutes
                .is_some_and(|minutes| minutes >= f64::from(self.min_minutes))
    }
}

/// Records matching one [`CohortQuery`], borrowed from the roster they came
/// from. Built fresh for every query.
#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    pub query: CohortQuery,
    pub roster: &'a Roster,
    pub members: Vec<&'a PlayerRecord>,
}

impl<'a> Cohort<'a> {
    pub fn select(roster: &'a Roster, query: CohortQuery) -> Self {
        let members = roster
            .records
            .iter()
            .filter(|record| query.matches(record))
            .collect();
        Self {
            query,
            roster,
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Position of the player's first row within the cohort.
    pub fn position_of(&self, player: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name == player)
    }

    /// Cohort values of one statistic column, in member order.
    pub fn column(&self, stat_index: usize) -> impl Iterator<Item = &'a Cell> + '_ {
        self.members
            .iter()
            .copied()
            .map(move |member| &member.stats[stat_index])
    }
}
