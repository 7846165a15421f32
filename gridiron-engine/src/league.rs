//! League hierarchy: league shape, conferences, divisions and teams.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ids::{ConferenceId, DivisionId, LeagueId, TeamId};

/// Longest abbreviation a team may carry.
pub const MAX_ABBREVIATION_LEN: usize = 5;

/// Organizational shape fixed when a league is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueShape {
    #[serde(default = "LeagueShape::default_conference_count")]
    pub conference_count: u32,
    #[serde(default = "LeagueShape::default_divisions_per_conference")]
    pub divisions_per_conference: u32,
    #[serde(default = "LeagueShape::default_teams_per_division")]
    pub teams_per_division: u32,
}

impl LeagueShape {
    const fn default_conference_count() -> u32 {
        2
    }

    const fn default_divisions_per_conference() -> u32 {
        4
    }

    const fn default_teams_per_division() -> u32 {
        4
    }

    /// Nominal team capacity of the shape.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.conference_count * self.divisions_per_conference * self.teams_per_division
    }

    /// Reject shapes with an empty level.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidLeagueShape`] when any count is zero.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.conference_count == 0
            || self.divisions_per_conference == 0
            || self.teams_per_division == 0
        {
            return Err(EngineError::InvalidLeagueShape {
                conferences: self.conference_count,
                divisions: self.divisions_per_conference,
                teams: self.teams_per_division,
            });
        }
        Ok(())
    }
}

impl Default for LeagueShape {
    fn default() -> Self {
        Self {
            conference_count: Self::default_conference_count(),
            divisions_per_conference: Self::default_divisions_per_conference(),
            teams_per_division: Self::default_teams_per_division(),
        }
    }
}

/// Salary cap rules carried with the league. The cap business rules live
/// outside this crate; the values ride along for collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapRules {
    /// Cap in cents.
    #[serde(default = "CapRules::default_salary_cap")]
    pub salary_cap: u64,
    #[serde(default = "CapRules::default_roster_size_limit")]
    pub roster_size_limit: u32,
    #[serde(default)]
    pub allow_cap_growth: bool,
}

impl CapRules {
    const fn default_salary_cap() -> u64 {
        200_000_000 * 100
    }

    const fn default_roster_size_limit() -> u32 {
        53
    }
}

impl Default for CapRules {
    fn default() -> Self {
        Self {
            salary_cap: Self::default_salary_cap(),
            roster_size_limit: Self::default_roster_size_limit(),
            allow_cap_growth: false,
        }
    }
}

/// Input for creating a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSetup {
    pub name: String,
    #[serde(default)]
    pub shape: LeagueShape,
    #[serde(default)]
    pub cap: CapRules,
}

impl LeagueSetup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: LeagueShape::default(),
            cap: CapRules::default(),
        }
    }

    #[must_use]
    pub const fn with_shape(mut self, shape: LeagueShape) -> Self {
        self.shape = shape;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub shape: LeagueShape,
    pub cap: CapRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    pub id: ConferenceId,
    pub league: LeagueId,
    pub name: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    pub conference: ConferenceId,
    pub name: String,
    pub order: u32,
}

/// Default display name of the conference at `order` (zero-based).
#[must_use]
pub fn conference_name(order: u32) -> String {
    format!("Conference {}", order + 1)
}

/// Default display name of the division at `order` (zero-based).
#[must_use]
pub fn division_name(order: u32) -> String {
    format!("Division {}", order + 1)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub league: LeagueId,
    pub conference: ConferenceId,
    pub division: DivisionId,
    pub name: String,
    pub city: String,
    pub nickname: String,
    pub abbreviation: String,
}

/// Input for creating a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub conference: ConferenceId,
    pub division: DivisionId,
    pub name: String,
    pub city: String,
    pub nickname: String,
    pub abbreviation: String,
}

impl NewTeam {
    /// Minimal team input; city and nickname default to the name.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        conference: ConferenceId,
        division: DivisionId,
    ) -> Self {
        let name = name.into();
        Self {
            conference,
            division,
            city: name.clone(),
            nickname: name.clone(),
            name,
            abbreviation: abbreviation.into(),
        }
    }

    /// Check the abbreviation format and that the division sits under the
    /// conference. Uniqueness is the store's concern.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTeam`] describing the first violation.
    pub fn validate(&self, division: &Division) -> Result<(), EngineError> {
        let abbr = self.abbreviation.trim();
        if abbr.is_empty() || abbr.chars().count() > MAX_ABBREVIATION_LEN {
            return Err(EngineError::InvalidTeam(format!(
                "abbreviation '{}' must be 1-{MAX_ABBREVIATION_LEN} characters",
                self.abbreviation
            )));
        }
        if division.conference != self.conference {
            return Err(EngineError::InvalidTeam(format!(
                "{} does not belong to {}",
                division.id,
                self.conference
            )));
        }
        Ok(())
    }
}

/// Display metadata for one team, as the season algorithms need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_id: TeamId,
    pub abbreviation: String,
    pub conference_id: ConferenceId,
    pub conference: String,
    pub division_id: DivisionId,
    pub division: String,
}

/// Lookup of team metadata for a league snapshot.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    teams: HashMap<TeamId, TeamInfo>,
}

impl TeamDirectory {
    /// Join teams with their conference and division names. Teams whose
    /// conference or division is absent from the inputs are left out.
    #[must_use]
    pub fn build(teams: &[Team], conferences: &[Conference], divisions: &[Division]) -> Self {
        let conf_names: HashMap<ConferenceId, &str> = conferences
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();
        let div_names: HashMap<DivisionId, &str> = divisions
            .iter()
            .map(|d| (d.id, d.name.as_str()))
            .collect();

        let teams = teams
            .iter()
            .filter_map(|team| {
                let conference = conf_names.get(&team.conference)?;
                let division = div_names.get(&team.division)?;
                Some((
                    team.id,
                    TeamInfo {
                        team_id: team.id,
                        abbreviation: team.abbreviation.clone(),
                        conference_id: team.conference,
                        conference: (*conference).to_string(),
                        division_id: team.division,
                        division: (*division).to_string(),
                    },
                ))
            })
            .collect();
        Self { teams }
    }

    #[must_use]
    pub fn get(&self, team: TeamId) -> Option<&TeamInfo> {
        self.teams.get(&team)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
