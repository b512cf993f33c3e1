//! Optional YAML configuration and the league logo catalog.
//!
//! ```yaml
//! min_minutes: 900
//! pizza_positions: standard
//! radar_positions: fold-wing-backs
//! leagues:
//!   - name: Premier League
//!     logo: https://cdn5.wyscout.com/photos/competition/public/5_140x140.png
//! ```
//!
//! Every field is optional; omitted fields keep the built-in defaults.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::position::PositionStrategy;

const LOGO_BASE: &str = "https://cdn5.wyscout.com/photos/competition/public";

const BUILTIN_LEAGUES: &[(&str, &str)] = &[
    ("Bundesliga", "2"),
    ("Bundesliga Two", "19"),
    ("Championship", "18"),
    ("English 7th Tier", "555"),
    ("La Liga", "4"),
    ("League One", "64"),
    ("League Two", "67"),
    ("Liga Portugal", "9"),
    ("Ligue 1", "3"),
    ("MLS", "324"),
    ("National League", "135"),
    ("National League N/S", "135"),
    ("PGA League", "g-557"),
    ("Premier League", "5"),
    ("Premier League 2", "g1592"),
    ("Pro League", "28"),
    ("Professional Development League", "g1191"),
    ("Scottish Premiership", "17"),
    ("Serie A", "1"),
    ("U18 Premier League", "g950"),
    ("USL Super League", "g-985"),
    ("WSL", "g886"),
    ("WSL2", "g1330"),
    ("Women's A-League", "g370"),
    ("Women's National League", "g327"),
    ("INT-FIFACWC", "g72"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_minutes: u32,
    pub pizza_positions: PositionStrategy,
    pub radar_positions: PositionStrategy,
    pub leagues: Vec<League>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_minutes: 0,
            pizza_positions: PositionStrategy::Standard,
            radar_positions: PositionStrategy::FoldWingBacks,
            leagues: builtin_leagues(),
        }
    }
}

pub fn builtin_leagues() -> Vec<League> {
    BUILTIN_LEAGUES
        .iter()
        .map(|(name, id)| League {
            name: name.to_string(),
            logo: Some(format!("{LOGO_BASE}/{id}_140x140.png")),
        })
        .collect()
}

impl Config {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("Opening config file {path:?}"))?;
        Config::from_yaml_str(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Logo reference for a league label. Absence is not an error: callers
    /// render without a logo.
    pub fn league_logo(&self, league: Option<&str>) -> Option<String> {
        let league = league.map(str::trim).filter(|l| !l.is_empty())?;
        let logo = self
            .leagues
            .iter()
            .find(|l| l.name == league)
            .and_then(|l| l.logo.clone())
            .filter(|logo| logo.starts_with("http"));
        if logo.is_none() {
            warn!("No logo available for league '{league}'");
        }
        logo
    }
}
