//! Interactive session state and the query entry points.
//!
//! A [`Session`] owns the normalized rosters for one loaded table. Every query
//! takes an explicit [`Selection`] and re-runs the pipeline from cohort
//! selection onward; nothing is cached between queries.

use log::info;
use serde::Serialize;

use crate::{
    cohort::{Cohort, CohortQuery},
    config::Config,
    error::{IngestError, ProfileError},
    ingest::RawTable,
    position::{PositionSet, RoleToken},
    profile::{self, PizzaVector, RadarVector},
    report::{PizzaPayload, RadarPayload},
    roster::{Roster, normalize},
};

/// What the user has picked so far. Unset player or role means no query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub player: Option<String>,
    pub role: Option<String>,
    pub league: Option<String>,
    pub season: Option<String>,
    pub min_minutes: u32,
}

impl Selection {
    /// Switching to a different player clears the role, since the previous
    /// role may not be one the new player has played.
    pub fn choose_player(&mut self, player: impl Into<String>) {
        let player = player.into();
        if self.player.as_deref() != Some(player.as_str()) {
            self.role = None;
        }
        self.player = Some(player);
    }

    pub fn choose_role(&mut self, role: impl Into<String>) {
        let role = role.into();
        self.role = (!role.trim().is_empty()).then_some(role);
    }

    fn player(&self) -> Result<&str, ProfileError> {
        self.player
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(ProfileError::UnresolvedSelection("player"))
    }

    fn role(&self) -> Result<RoleToken, ProfileError> {
        let raw = self
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(ProfileError::UnresolvedSelection("role"))?;
        raw.parse::<RoleToken>()
            .map_err(|_| ProfileError::UnsupportedRole(raw.to_string()))
    }
}

/// Strings the renderer needs alongside a profile vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileContext {
    pub player: String,
    pub team: String,
    pub role: RoleToken,
    pub league: Option<String>,
    pub season: Option<String>,
    pub min_minutes: u32,
    pub logo: Option<String>,
}

#[derive(Debug, Clone)]
struct Loaded {
    pizza: Roster,
    radar: Roster,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
    loaded: Option<Loaded>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            loaded: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalizes `table` for both profile paths. The session keeps its own
    /// rosters; the table is not retained.
    pub fn load(&mut self, table: &RawTable) -> Result<(), IngestError> {
        let pizza = normalize(table, self.config.pizza_positions)?;
        let radar = normalize(table, self.config.radar_positions)?;
        info!(
            "Loaded {} player row(s) with {} statistic column(s)",
            pizza.records.len(),
            pizza.statistics.len()
        );
        self.loaded = Some(Loaded { pizza, radar });
        Ok(())
    }

    fn loaded(&self) -> Result<&Loaded, ProfileError> {
        self.loaded.as_ref().ok_or(ProfileError::MissingInput)
    }

    pub fn roster(&self) -> Result<&Roster, ProfileError> {
        Ok(&self.loaded()?.pizza)
    }

    pub fn player_names(&self) -> Result<Vec<String>, ProfileError> {
        Ok(self.roster()?.player_names())
    }

    /// Roles offered for a player: only those they have actually played.
    pub fn allowed_roles(&self, player: &str) -> Result<PositionSet, ProfileError> {
        Ok(self.roster()?.roles_for_player(player))
    }

    pub fn cohort(&self, role: &str, min_minutes: u32) -> Result<Cohort<'_>, ProfileError> {
        let roster = self.roster()?;
        let role = role.trim();
        if role.is_empty() {
            return Err(ProfileError::UnresolvedSelection("role"));
        }
        let role = role
            .parse::<RoleToken>()
            .map_err(|_| ProfileError::UnsupportedRole(role.to_string()))?;
        let cohort = Cohort::select(roster, CohortQuery::new(role, min_minutes));
        if cohort.is_empty() {
            return Err(ProfileError::EmptyCohort {
                role: role.to_string(),
                min_minutes,
            });
        }
        Ok(cohort)
    }

    fn resolve<'a>(
        &self,
        selection: &'a Selection,
    ) -> Result<(&'a str, CohortQuery), ProfileError> {
        self.loaded()?;
        let player = selection.player()?;
        let role = selection.role()?;
        let query = CohortQuery::new(role, selection.min_minutes);
        profile::require_template(&query)?;
        Ok((player, query))
    }

    fn context(
        &self,
        roster: &Roster,
        selection: &Selection,
        player: &str,
        query: CohortQuery,
    ) -> ProfileContext {
        let team = roster
            .records
            .iter()
            .find(|r| r.name == player && query.matches(r))
            .map(|r| r.team.clone())
            .unwrap_or_default();
        ProfileContext {
            player: player.to_string(),
            team,
            role: query.role,
            league: selection.league.clone(),
            season: selection.season.clone(),
            min_minutes: query.min_minutes,
            logo: self.config.league_logo(selection.league.as_deref()),
        }
    }

    pub fn pizza(&self, selection: &Selection) -> Result<PizzaPayload, ProfileError> {
        let (player, query) = self.resolve(selection)?;
        let roster = &self.loaded()?.pizza;
        info!("Building pizza for '{player}' as {}", query.role);
        let vector: PizzaVector = profile::build_pizza(roster, query, player)?;
        Ok(PizzaPayload {
            context: self.context(roster, selection, player, query),
            profile: vector,
        })
    }

    pub fn radar(&self, selection: &Selection) -> Result<RadarPayload, ProfileError> {
        let (player, query) = self.resolve(selection)?;
        let roster = &self.loaded()?.radar;
        info!("Building radar for '{player}' as {}", query.role);
        let vector: RadarVector = profile::build_radar(roster, query, player)?;
        Ok(RadarPayload {
            context: self.context(roster, selection, player, query),
            profile: vector,
        })
    }
}
