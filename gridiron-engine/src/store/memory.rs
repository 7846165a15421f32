use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::LeagueStore;
use crate::ids::{
    ConferenceId, DivisionId, GameId, LeagueId, PlayerId, SeasonId, TeamId, WeekId,
};
use crate::league::{CapRules, Conference, Division, League, LeagueShape, NewTeam, Team};
use crate::records::{PlayLog, PlayerGameStat, TeamGameStat};
use crate::roster::{NewPlayer, Player};
use crate::schedule::{Pairing, WeekPlan};
use crate::season::{Game, GameView, Season, Week};

#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("{entity} {id} does not exist")]
    Missing { entity: &'static str, id: u32 },
    #[error("abbreviation '{abbreviation}' is already used in {league}")]
    DuplicateAbbreviation {
        league: LeagueId,
        abbreviation: String,
    },
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn missing(entity: &'static str, id: u32) -> MemoryStoreError {
    MemoryStoreError::Missing { entity, id }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Sequences {
    league: u32,
    conference: u32,
    division: u32,
    team: u32,
    player: u32,
    season: u32,
    week: u32,
    game: u32,
}

fn bump(counter: &mut u32) -> u32 {
    *counter += 1;
    *counter
}

/// Reference [`LeagueStore`] kept entirely in memory.
///
/// Writes validate every reference before touching any map, so a failed
/// call leaves the store as it was. The whole store serializes to JSON for
/// snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    sequences: Sequences,
    leagues: BTreeMap<LeagueId, League>,
    conferences: BTreeMap<ConferenceId, Conference>,
    divisions: BTreeMap<DivisionId, Division>,
    teams: BTreeMap<TeamId, Team>,
    players: BTreeMap<PlayerId, Player>,
    seasons: BTreeMap<SeasonId, Season>,
    weeks: BTreeMap<WeekId, Week>,
    games: BTreeMap<GameId, Game>,
    plays: BTreeMap<GameId, Vec<PlayLog>>,
    team_stats: BTreeMap<GameId, Vec<TeamGameStat>>,
    player_stats: BTreeMap<GameId, Vec<PlayerGameStat>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the whole store.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryStoreError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, MemoryStoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a store from [`MemoryStore::to_json`] output.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryStoreError::Json`] for malformed snapshots.
    pub fn from_json(json: &str) -> Result<Self, MemoryStoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), MemoryStoreError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, MemoryStoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn require_team(&self, id: TeamId) -> Result<&Team, MemoryStoreError> {
        self.teams.get(&id).ok_or_else(|| missing(TeamId::label(), id.get()))
    }

    fn require_season(&self, id: SeasonId) -> Result<&Season, MemoryStoreError> {
        self.seasons
            .get(&id)
            .ok_or_else(|| missing(SeasonId::label(), id.get()))
    }

    fn require_pairings(&self, pairings: &[Pairing]) -> Result<(), MemoryStoreError> {
        for pairing in pairings {
            self.require_team(pairing.home)?;
            self.require_team(pairing.away)?;
        }
        Ok(())
    }

    fn week_in_season(&self, week: WeekId, season: SeasonId) -> bool {
        self.weeks.get(&week).is_some_and(|w| w.season == season)
    }

    fn view(&self, game: &Game) -> Option<GameView> {
        let week = self.weeks.get(&game.week)?;
        Some(GameView {
            game: game.clone(),
            week_number: week.number,
            is_playoffs: week.is_playoffs,
        })
    }

    fn season_game_ids(&self, season: SeasonId) -> Vec<GameId> {
        let weeks: HashSet<WeekId> = self
            .weeks
            .values()
            .filter(|w| w.season == season)
            .map(|w| w.id)
            .collect();
        self.games
            .values()
            .filter(|g| weeks.contains(&g.week))
            .map(|g| g.id)
            .collect()
    }

    fn push_games(&mut self, week: WeekId, pairings: &[Pairing]) -> Vec<Game> {
        pairings
            .iter()
            .map(|pairing| {
                let id = GameId(bump(&mut self.sequences.game));
                let game = Game::scheduled(id, week, pairing.home, pairing.away);
                self.games.insert(id, game.clone());
                game
            })
            .collect()
    }
}

impl LeagueStore for MemoryStore {
    type Error = MemoryStoreError;

    fn create_league(
        &mut self,
        name: &str,
        shape: LeagueShape,
        cap: CapRules,
    ) -> Result<League, Self::Error> {
        let league = League {
            id: LeagueId(bump(&mut self.sequences.league)),
            name: name.to_string(),
            shape,
            cap,
        };
        self.leagues.insert(league.id, league.clone());
        Ok(league)
    }

    fn league(&self, id: LeagueId) -> Result<Option<League>, Self::Error> {
        Ok(self.leagues.get(&id).cloned())
    }

    fn create_conference(
        &mut self,
        league: LeagueId,
        name: &str,
        order: u32,
    ) -> Result<Conference, Self::Error> {
        if !self.leagues.contains_key(&league) {
            return Err(missing(LeagueId::label(), league.get()));
        }
        let conference = Conference {
            id: ConferenceId(bump(&mut self.sequences.conference)),
            league,
            name: name.to_string(),
            order,
        };
        self.conferences.insert(conference.id, conference.clone());
        Ok(conference)
    }

    fn create_division(
        &mut self,
        conference: ConferenceId,
        name: &str,
        order: u32,
    ) -> Result<Division, Self::Error> {
        if !self.conferences.contains_key(&conference) {
            return Err(missing(ConferenceId::label(), conference.get()));
        }
        let division = Division {
            id: DivisionId(bump(&mut self.sequences.division)),
            conference,
            name: name.to_string(),
            order,
        };
        self.divisions.insert(division.id, division.clone());
        Ok(division)
    }

    fn conferences(&self, league: LeagueId) -> Result<Vec<Conference>, Self::Error> {
        let mut conferences: Vec<Conference> = self
            .conferences
            .values()
            .filter(|c| c.league == league)
            .cloned()
            .collect();
        conferences.sort_by_key(|c| (c.order, c.id));
        Ok(conferences)
    }

    fn divisions(&self, league: LeagueId) -> Result<Vec<Division>, Self::Error> {
        let conference_order: BTreeMap<ConferenceId, u32> = self
            .conferences
            .values()
            .filter(|c| c.league == league)
            .map(|c| (c.id, c.order))
            .collect();
        let mut divisions: Vec<Division> = self
            .divisions
            .values()
            .filter(|d| conference_order.contains_key(&d.conference))
            .cloned()
            .collect();
        divisions.sort_by_key(|d| {
            (
                conference_order.get(&d.conference).copied(),
                d.conference,
                d.order,
                d.id,
            )
        });
        Ok(divisions)
    }

    fn division(&self, id: DivisionId) -> Result<Option<Division>, Self::Error> {
        Ok(self.divisions.get(&id).cloned())
    }

    fn create_team(&mut self, league: LeagueId, team: &NewTeam) -> Result<Team, Self::Error> {
        if !self.leagues.contains_key(&league) {
            return Err(missing(LeagueId::label(), league.get()));
        }
        if !self.conferences.contains_key(&team.conference) {
            return Err(missing(ConferenceId::label(), team.conference.get()));
        }
        if !self.divisions.contains_key(&team.division) {
            return Err(missing(DivisionId::label(), team.division.get()));
        }
        let abbreviation = team.abbreviation.trim().to_uppercase();
        let taken = self
            .teams
            .values()
            .filter(|t| t.league == league)
            .any(|t| t.abbreviation.eq_ignore_ascii_case(&abbreviation));
        if taken {
            return Err(MemoryStoreError::DuplicateAbbreviation {
                league,
                abbreviation,
            });
        }

        let created = Team {
            id: TeamId(bump(&mut self.sequences.team)),
            league,
            conference: team.conference,
            division: team.division,
            name: team.name.clone(),
            city: team.city.clone(),
            nickname: team.nickname.clone(),
            abbreviation,
        };
        self.teams.insert(created.id, created.clone());
        Ok(created)
    }

    fn team(&self, id: TeamId) -> Result<Option<Team>, Self::Error> {
        Ok(self.teams.get(&id).cloned())
    }

    fn teams(&self, league: LeagueId) -> Result<Vec<Team>, Self::Error> {
        Ok(self
            .teams
            .values()
            .filter(|t| t.league == league)
            .cloned()
            .collect())
    }

    fn create_player(&mut self, team: TeamId, player: &NewPlayer) -> Result<Player, Self::Error> {
        self.require_team(team)?;
        let created = Player {
            id: PlayerId(bump(&mut self.sequences.player)),
            team: Some(team),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            position: player.position,
            overall_rating: player.overall_rating,
            detailed: player.detailed,
        };
        self.players.insert(created.id, created.clone());
        Ok(created)
    }

    fn roster(&self, team: TeamId) -> Result<Vec<Player>, Self::Error> {
        Ok(self
            .players
            .values()
            .filter(|p| p.team == Some(team))
            .cloned()
            .collect())
    }

    fn players(&self, league: LeagueId) -> Result<Vec<Player>, Self::Error> {
        Ok(self
            .players
            .values()
            .filter(|p| {
                p.team
                    .and_then(|team| self.teams.get(&team))
                    .is_some_and(|team| team.league == league)
            })
            .cloned()
            .collect())
    }

    fn get_or_create_season(&mut self, league: LeagueId, year: i32) -> Result<Season, Self::Error> {
        if let Some(season) = self.find_season(league, year)? {
            return Ok(season);
        }
        if !self.leagues.contains_key(&league) {
            return Err(missing(LeagueId::label(), league.get()));
        }
        let season = Season {
            id: SeasonId(bump(&mut self.sequences.season)),
            league,
            year,
        };
        self.seasons.insert(season.id, season.clone());
        Ok(season)
    }

    fn find_season(&self, league: LeagueId, year: i32) -> Result<Option<Season>, Self::Error> {
        Ok(self
            .seasons
            .values()
            .find(|s| s.league == league && s.year == year)
            .cloned())
    }

    fn season(&self, id: SeasonId) -> Result<Option<Season>, Self::Error> {
        Ok(self.seasons.get(&id).cloned())
    }

    fn replace_schedule(
        &mut self,
        season: SeasonId,
        plan: &[WeekPlan],
    ) -> Result<Vec<Week>, Self::Error> {
        self.require_season(season)?;
        for week in plan {
            self.require_pairings(&week.pairings)?;
        }

        for game in self.season_game_ids(season) {
            self.games.remove(&game);
            self.plays.remove(&game);
            self.team_stats.remove(&game);
            self.player_stats.remove(&game);
        }
        self.weeks.retain(|_, w| w.season != season);

        let mut weeks = Vec::with_capacity(plan.len());
        for planned in plan {
            let week = Week {
                id: WeekId(bump(&mut self.sequences.week)),
                season,
                number: planned.number,
                is_playoffs: planned.is_playoffs,
            };
            self.weeks.insert(week.id, week.clone());
            self.push_games(week.id, &planned.pairings);
            weeks.push(week);
        }
        Ok(weeks)
    }

    fn weeks(&self, season: SeasonId) -> Result<Vec<Week>, Self::Error> {
        let mut weeks: Vec<Week> = self
            .weeks
            .values()
            .filter(|w| w.season == season)
            .cloned()
            .collect();
        weeks.sort_by_key(|w| (w.number, w.id));
        Ok(weeks)
    }

    fn games(&self, season: SeasonId) -> Result<Vec<GameView>, Self::Error> {
        let mut views: Vec<GameView> = self
            .games
            .values()
            .filter_map(|g| self.view(g))
            .filter(|v| self.week_in_season(v.game.week, season))
            .collect();
        views.sort_by_key(|v| (v.week_number, v.game.id));
        Ok(views)
    }

    fn game(&self, id: GameId) -> Result<Option<GameView>, Self::Error> {
        Ok(self.games.get(&id).and_then(|g| self.view(g)))
    }

    fn upsert_week(
        &mut self,
        season: SeasonId,
        number: u32,
        is_playoffs: bool,
    ) -> Result<Week, Self::Error> {
        self.require_season(season)?;
        let existing = self
            .weeks
            .values()
            .filter(|w| w.season == season && w.number == number)
            .find(|w| w.is_playoffs == is_playoffs);
        if let Some(week) = existing {
            return Ok(week.clone());
        }
        let week = Week {
            id: WeekId(bump(&mut self.sequences.week)),
            season,
            number,
            is_playoffs,
        };
        self.weeks.insert(week.id, week.clone());
        Ok(week)
    }

    fn insert_games(
        &mut self,
        week: WeekId,
        pairings: &[Pairing],
    ) -> Result<Vec<Game>, Self::Error> {
        if !self.weeks.contains_key(&week) {
            return Err(missing(WeekId::label(), week.get()));
        }
        self.require_pairings(pairings)?;
        Ok(self.push_games(week, pairings))
    }

    fn save_game(&mut self, game: &Game) -> Result<(), Self::Error> {
        let slot = self
            .games
            .get_mut(&game.id)
            .ok_or_else(|| missing(GameId::label(), game.id.get()))?;
        *slot = game.clone();
        Ok(())
    }

    fn record_simulation(
        &mut self,
        game: &Game,
        plays: &[PlayLog],
        team_stats: &[TeamGameStat],
        player_stats: &[PlayerGameStat],
    ) -> Result<(), Self::Error> {
        if !self.games.contains_key(&game.id) {
            return Err(missing(GameId::label(), game.id.get()));
        }
        for row in team_stats {
            self.require_team(row.team)?;
        }
        for row in player_stats {
            self.require_team(row.team)?;
            if !self.players.contains_key(&row.player) {
                return Err(missing(PlayerId::label(), row.player.get()));
            }
        }

        self.games.insert(game.id, game.clone());
        self.plays.insert(game.id, plays.to_vec());
        self.team_stats.insert(game.id, team_stats.to_vec());
        self.player_stats.insert(game.id, player_stats.to_vec());
        Ok(())
    }

    fn plays(&self, game: GameId) -> Result<Vec<PlayLog>, Self::Error> {
        let mut plays = self.plays.get(&game).cloned().unwrap_or_default();
        plays.sort_by_key(|p| p.play_index);
        Ok(plays)
    }

    fn team_stats(&self, game: GameId) -> Result<Vec<TeamGameStat>, Self::Error> {
        Ok(self.team_stats.get(&game).cloned().unwrap_or_default())
    }

    fn player_stats(&self, game: GameId) -> Result<Vec<PlayerGameStat>, Self::Error> {
        Ok(self.player_stats.get(&game).cloned().unwrap_or_default())
    }

    fn season_team_stats(&self, season: SeasonId) -> Result<Vec<TeamGameStat>, Self::Error> {
        Ok(self
            .season_game_ids(season)
            .iter()
            .filter_map(|id| self.team_stats.get(id))
            .flatten()
            .cloned()
            .collect())
    }

    fn season_player_stats(&self, season: SeasonId) -> Result<Vec<PlayerGameStat>, Self::Error> {
        Ok(self
            .season_game_ids(season)
            .iter()
            .filter_map(|id| self.player_stats.get(id))
            .flatten()
            .cloned()
            .collect())
    }
}
