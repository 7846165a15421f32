//! Persistence seam for league data.
//!
//! Season algorithms never talk to storage directly; the engine reads a
//! snapshot through [`LeagueStore`], runs the pure functions, and writes the
//! results back with a handful of coarse calls. Calls documented as atomic
//! must either apply completely or leave the store untouched.

mod memory;

pub use memory::{MemoryStore, MemoryStoreError};

use crate::ids::{ConferenceId, DivisionId, GameId, LeagueId, SeasonId, TeamId, WeekId};
use crate::league::{CapRules, Conference, Division, League, LeagueShape, NewTeam, Team};
use crate::records::{PlayLog, PlayerGameStat, TeamGameStat};
use crate::roster::{NewPlayer, Player};
use crate::schedule::{Pairing, WeekPlan};
use crate::season::{Game, GameView, Season, Week};

/// Storage backend for leagues, seasons, games and their stat rows.
///
/// Listing calls return rows in ascending id order unless stated otherwise.
pub trait LeagueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a new league without any conferences.
    ///
    /// # Errors
    ///
    /// Returns an error if the league cannot be written.
    fn create_league(
        &mut self,
        name: &str,
        shape: LeagueShape,
        cap: CapRules,
    ) -> Result<League, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn league(&self, id: LeagueId) -> Result<Option<League>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the league does not exist.
    fn create_conference(
        &mut self,
        league: LeagueId,
        name: &str,
        order: u32,
    ) -> Result<Conference, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the conference does not exist.
    fn create_division(
        &mut self,
        conference: ConferenceId,
        name: &str,
        order: u32,
    ) -> Result<Division, Self::Error>;

    /// Conferences of a league ordered by their `order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn conferences(&self, league: LeagueId) -> Result<Vec<Conference>, Self::Error>;

    /// Every division in a league, ordered by conference order then division
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn divisions(&self, league: LeagueId) -> Result<Vec<Division>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn division(&self, id: DivisionId) -> Result<Option<Division>, Self::Error>;

    /// Persist a validated team.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown references or a duplicate abbreviation
    /// within the league.
    fn create_team(&mut self, league: LeagueId, team: &NewTeam) -> Result<Team, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn team(&self, id: TeamId) -> Result<Option<Team>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn teams(&self, league: LeagueId) -> Result<Vec<Team>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the team does not exist.
    fn create_player(&mut self, team: TeamId, player: &NewPlayer) -> Result<Player, Self::Error>;

    /// Players currently on a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn roster(&self, team: TeamId) -> Result<Vec<Player>, Self::Error>;

    /// Every player rostered in a league.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn players(&self, league: LeagueId) -> Result<Vec<Player>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the league does not exist.
    fn get_or_create_season(&mut self, league: LeagueId, year: i32) -> Result<Season, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_season(&self, league: LeagueId, year: i32) -> Result<Option<Season>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn season(&self, id: SeasonId) -> Result<Option<Season>, Self::Error>;

    /// Atomically drop every week of the season, with its games, plays and
    /// stat rows, and create the planned weeks and scheduled games.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown season or team; nothing is changed.
    fn replace_schedule(&mut self, season: SeasonId, plan: &[WeekPlan])
    -> Result<Vec<Week>, Self::Error>;

    /// Weeks of a season ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn weeks(&self, season: SeasonId) -> Result<Vec<Week>, Self::Error>;

    /// Games of a season joined with their week, ordered by week number then
    /// game id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn games(&self, season: SeasonId) -> Result<Vec<GameView>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn game(&self, id: GameId) -> Result<Option<GameView>, Self::Error>;

    /// Week `(season, number, is_playoffs)`, created if absent.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown season.
    fn upsert_week(
        &mut self,
        season: SeasonId,
        number: u32,
        is_playoffs: bool,
    ) -> Result<Week, Self::Error>;

    /// Atomically create one scheduled game per pairing.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown week or team; nothing is changed.
    fn insert_games(
        &mut self,
        week: WeekId,
        pairings: &[Pairing],
    ) -> Result<Vec<Game>, Self::Error>;

    /// Overwrite score, status and result of an existing game.
    ///
    /// # Errors
    ///
    /// Returns an error if the game does not exist.
    fn save_game(&mut self, game: &Game) -> Result<(), Self::Error>;

    /// Atomically save the game and replace its plays and stat rows.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown game, team or player; nothing is
    /// changed.
    fn record_simulation(
        &mut self,
        game: &Game,
        plays: &[PlayLog],
        team_stats: &[TeamGameStat],
        player_stats: &[PlayerGameStat],
    ) -> Result<(), Self::Error>;

    /// Plays of a game ordered by play index.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn plays(&self, game: GameId) -> Result<Vec<PlayLog>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn team_stats(&self, game: GameId) -> Result<Vec<TeamGameStat>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn player_stats(&self, game: GameId) -> Result<Vec<PlayerGameStat>, Self::Error>;

    /// Team stat rows for every game of a season.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn season_team_stats(&self, season: SeasonId) -> Result<Vec<TeamGameStat>, Self::Error>;

    /// Player stat rows for every game of a season.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn season_player_stats(&self, season: SeasonId) -> Result<Vec<PlayerGameStat>, Self::Error>;
}
