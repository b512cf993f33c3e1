#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use player_profiles::{
    ingest::RawTable,
    templates::{supported_roles, template_for},
};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

const LEADING_HEADERS: &[&str] = &[
    "Player",
    "Team",
    "Team within selected timeframe",
    "Position",
    "Age",
    "Market value",
    "Contract expires",
    "Matches played",
    "Minutes played",
];

const BIOGRAPHICAL_HEADERS: &[&str] = &[
    "Birth country",
    "Passport country",
    "Foot",
    "Height",
    "Weight",
    "On loan",
];

/// Every statistic column any template asks for, in first-seen order.
pub fn template_columns() -> Vec<&'static str> {
    supported_roles()
        .filter_map(template_for)
        .flat_map(|t| t.columns)
        .unique()
        .collect()
}

#[derive(Debug, Clone)]
pub struct FixturePlayer {
    pub name: String,
    pub team: String,
    pub position: String,
    pub minutes: String,
    /// Value of the first statistic column; later columns step up by one.
    pub base: f64,
    /// Statistic columns left blank for this player.
    pub blanks: Vec<&'static str>,
}

/// Builder for a Wyscout-style export carrying every template column.
#[derive(Debug, Clone, Default)]
pub struct StatsFixture {
    players: Vec<FixturePlayer>,
}

impl StatsFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(mut self, name: &str, position: &str, minutes: &str, base: f64) -> Self {
        self.players.push(FixturePlayer {
            name: name.to_string(),
            team: format!("{name} FC"),
            position: position.to_string(),
            minutes: minutes.to_string(),
            base,
            blanks: Vec::new(),
        });
        self
    }

    /// Blanks `column` for the most recently added player.
    pub fn blank(mut self, column: &'static str) -> Self {
        if let Some(last) = self.players.last_mut() {
            last.blanks.push(column);
        }
        self
    }

    pub fn headers(&self) -> Vec<String> {
        LEADING_HEADERS
            .iter()
            .chain(BIOGRAPHICAL_HEADERS)
            .copied()
            .chain(template_columns())
            .map(str::to_string)
            .collect()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        let columns = template_columns();
        self.players
            .iter()
            .map(|p| {
                let mut row = vec![
                    p.name.clone(),
                    p.team.clone(),
                    p.team.clone(),
                    p.position.clone(),
                    "25".to_string(),
                    "1000000".to_string(),
                    "2026-06-30".to_string(),
                    "20".to_string(),
                    p.minutes.clone(),
                    "England".to_string(),
                    "England".to_string(),
                    "right".to_string(),
                    "180".to_string(),
                    "75".to_string(),
                    "no".to_string(),
                ];
                row.extend(columns.iter().enumerate().map(|(idx, column)| {
                    if p.blanks.contains(column) {
                        String::new()
                    } else {
                        (p.base + idx as f64).to_string()
                    }
                }));
                row
            })
            .collect()
    }

    pub fn table(&self) -> RawTable {
        RawTable::new(self.headers(), self.rows())
    }

    pub fn to_delimited(&self, delimiter: u8) -> String {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());
        writer.write_record(self.headers()).expect("write headers");
        for row in self.rows() {
            writer.write_record(&row).expect("write row");
        }
        String::from_utf8(writer.into_inner().expect("flush csv")).expect("utf-8 csv")
    }

    pub fn to_csv(&self) -> String {
        self.to_delimited(b',')
    }
}

/// Three left wingers plus a centre-back; one winger under 900 minutes.
pub fn league_fixture() -> StatsFixture {
    StatsFixture::new()
        .player("Ana Silva", "LW, LWF", "1800", 1.0)
        .player("Ben Carter", "LAMF", "950", 3.0)
        .player("Caio Reis", "LW", "400", 5.0)
        .player("Dan Okafor", "RCB, CB", "2000", 2.0)
        .player("Eli Novak", "LWB", "1500", 4.0)
}
