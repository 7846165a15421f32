//! Season engine facade.
//!
//! [`SeasonEngine`] wires the pure season algorithms to a [`LeagueStore`]:
//! it reads a snapshot, computes, and writes results back through the
//! store's coarse atomic calls.
use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::ids::{DivisionId, GameId, LeagueId, SeasonId, TeamId};
use crate::league::{
    League, LeagueSetup, NewTeam, Team, TeamDirectory, conference_name, division_name,
};
use crate::playoffs::{
    Matchup, PlayoffProgress, PlayoffSeed, check_playable_seed_count, check_seed_count,
    generate_bracket, plan_advancement, playoff_progress, seed_conferences,
};
use crate::roster::{NewPlayer, Player};
use crate::schedule::plan_regular_season;
use crate::season::{Game, GameView, Season, Week, checked_scores, last_regular_week};
use crate::simulator::{SimRng, SimulationOutcome, TeamSide, simulate_game};
use crate::standings::{StandingRecord, compute_standings};
use crate::stats::{
    PlayerSeasonLine, StatCategory, TeamSeasonLine, player_leaders, player_season_stats,
    team_season_stats,
};
use crate::store::{LeagueStore, MemoryStore};

/// What a schedule regeneration produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub season: Season,
    pub weeks: Vec<Week>,
    pub games: usize,
}

/// Season lifecycle operations over a store.
#[derive(Debug)]
pub struct SeasonEngine<S: LeagueStore> {
    store: S,
    config: EngineConfig,
}

impl<S: LeagueStore> SeasonEngine<S> {
    /// Engine with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
        }
    }

    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn with_config(store: S, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn require_league(&self, id: LeagueId) -> EngineResult<League> {
        self.store
            .league(id)
            .map_err(EngineError::store)?
            .ok_or_else(|| EngineError::not_found(LeagueId::label(), id.get()))
    }

    fn require_season(&self, id: SeasonId) -> EngineResult<Season> {
        self.store
            .season(id)
            .map_err(EngineError::store)?
            .ok_or_else(|| EngineError::not_found(SeasonId::label(), id.get()))
    }

    fn require_game(&self, id: GameId) -> EngineResult<GameView> {
        self.store
            .game(id)
            .map_err(EngineError::store)?
            .ok_or_else(|| EngineError::not_found(GameId::label(), id.get()))
    }

    fn directory(&self, league: LeagueId) -> EngineResult<TeamDirectory> {
        let teams = self.store.teams(league).map_err(EngineError::store)?;
        let conferences = self.store.conferences(league).map_err(EngineError::store)?;
        let divisions = self.store.divisions(league).map_err(EngineError::store)?;
        Ok(TeamDirectory::build(&teams, &conferences, &divisions))
    }

    fn season_games(&self, season: SeasonId) -> EngineResult<Vec<GameView>> {
        self.store.games(season).map_err(EngineError::store)
    }

    /// Create a league with its conferences and divisions, named
    /// `Conference N` and `Division N`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidLeagueShape`] for an empty level and
    /// [`EngineError::Store`] if a write fails.
    pub fn create_league(&mut self, setup: &LeagueSetup) -> EngineResult<League> {
        setup.shape.validate()?;
        let league = self
            .store
            .create_league(&setup.name, setup.shape, setup.cap)
            .map_err(EngineError::store)?;
        for c in 0..setup.shape.conference_count {
            let conference = self
                .store
                .create_conference(league.id, &conference_name(c), c)
                .map_err(EngineError::store)?;
            for d in 0..setup.shape.divisions_per_conference {
                self.store
                    .create_division(conference.id, &division_name(d), d)
                    .map_err(EngineError::store)?;
            }
        }
        info!(
            "created {} '{}' with {} conferences",
            league.id,
            league.name,
            setup.shape.conference_count
        );
        Ok(league)
    }

    /// Add a team after checking that its conference belongs to the league
    /// and its division to the conference.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown league or division,
    /// [`EngineError::InvalidTeam`] for inconsistent references or a bad
    /// abbreviation, and [`EngineError::Store`] for store-side rejections
    /// such as a duplicate abbreviation.
    pub fn add_team(&mut self, league: LeagueId, team: &NewTeam) -> EngineResult<Team> {
        self.require_league(league)?;
        let conferences = self.store.conferences(league).map_err(EngineError::store)?;
        if !conferences.iter().any(|c| c.id == team.conference) {
            return Err(EngineError::InvalidTeam(format!(
                "{} is not part of {league}",
                team.conference
            )));
        }
        let division = self
            .store
            .division(team.division)
            .map_err(EngineError::store)?
            .ok_or_else(|| {
                EngineError::not_found(DivisionId::label(), team.division.get())
            })?;
        team.validate(&division)?;
        let created = self
            .store
            .create_team(league, team)
            .map_err(EngineError::store)?;
        debug!(
            "added {} ({}) to {league}",
            created.id,
            created.abbreviation
        );
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown team.
    pub fn add_player(&mut self, team: TeamId, player: &NewPlayer) -> EngineResult<Player> {
        if self.store.team(team).map_err(EngineError::store)?.is_none() {
            return Err(EngineError::not_found(TeamId::label(), team.get()));
        }
        self.store
            .create_player(team, player)
            .map_err(EngineError::store)
    }

    /// Standings from every completed game of the season, playoffs included.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown season.
    pub fn compute_standings(&self, season: SeasonId) -> EngineResult<Vec<StandingRecord>> {
        let season = self.require_season(season)?;
        let games = self.season_games(season.id)?;
        let directory = self.directory(season.league)?;
        Ok(compute_standings(&games, &directory))
    }

    /// Standings from completed regular-season games only. Playoff seeding
    /// reads these so playoff results never reshuffle the bracket.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown season.
    pub fn regular_season_standings(&self, season: SeasonId) -> EngineResult<Vec<StandingRecord>> {
        let season = self.require_season(season)?;
        let mut games = self.season_games(season.id)?;
        games.retain(|view| !view.is_playoffs);
        let directory = self.directory(season.league)?;
        Ok(compute_standings(&games, &directory))
    }

    /// Regenerate the regular season for `(league, year)` as a single round
    /// robin, replacing any existing weeks and games.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientTeams`] before anything is written
    /// when the league has fewer than two teams.
    pub fn generate_schedule(
        &mut self,
        league: LeagueId,
        year: i32,
    ) -> EngineResult<GeneratedSchedule> {
        self.require_league(league)?;
        let teams: Vec<TeamId> = self
            .store
            .teams(league)
            .map_err(EngineError::store)?
            .iter()
            .map(|t| t.id)
            .collect();
        let plan = plan_regular_season(&teams)?;
        let games: usize = plan.iter().map(|w| w.pairings.len()).sum();

        let season = self
            .store
            .get_or_create_season(league, year)
            .map_err(EngineError::store)?;
        let weeks = self
            .store
            .replace_schedule(season.id, &plan)
            .map_err(EngineError::store)?;
        info!(
            "scheduled {} for {year}: {} teams, {} weeks, {games} games",
            season.id,
            teams.len(),
            weeks.len()
        );
        Ok(GeneratedSchedule {
            season,
            weeks,
            games,
        })
    }

    fn seed_count(&self, requested: Option<usize>) -> usize {
        let configured = self.config.playoffs.seeds_per_conference;
        requested.unwrap_or(configured)
    }

    fn seeds_for(
        &self,
        season: SeasonId,
        per_conference: usize,
    ) -> EngineResult<Vec<PlayoffSeed>> {
        let standings = self.regular_season_standings(season)?;
        Ok(seed_conferences(&standings, per_conference))
    }

    /// Top seeds of each conference from regular-season standings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSeedCount`] for a count of zero and
    /// [`EngineError::NotFound`] for an unknown season.
    pub fn generate_playoff_seeds(
        &self,
        season: SeasonId,
        seeds: Option<usize>,
    ) -> EngineResult<Vec<PlayoffSeed>> {
        let per_conference = check_seed_count(self.seed_count(seeds))?;
        self.seeds_for(season, per_conference)
    }

    /// # Errors
    ///
    /// Same as [`SeasonEngine::generate_playoff_seeds`].
    pub fn generate_bracket(
        &self,
        season: SeasonId,
        seeds: Option<usize>,
    ) -> EngineResult<Vec<Matchup>> {
        let seeded = self.generate_playoff_seeds(season, seeds)?;
        Ok(generate_bracket(&seeded))
    }

    /// Bracket state from the season's playoff games.
    ///
    /// # Errors
    ///
    /// Same as [`SeasonEngine::generate_playoff_seeds`], plus
    /// [`EngineError::BracketTooLarge`] for more seeds than the conference
    /// rounds can resolve.
    pub fn playoff_progress(
        &self,
        season: SeasonId,
        seeds: Option<usize>,
    ) -> EngineResult<PlayoffProgress> {
        let per_conference = check_playable_seed_count(self.seed_count(seeds))?;
        let seeded = self.seeds_for(season, per_conference)?;
        let games = self.season_games(season)?;
        Ok(playoff_progress(&seeded, &games))
    }

    /// Create the playoff weeks and games the bracket currently calls for.
    ///
    /// Safe to call repeatedly: games already present in a round's week are
    /// not created again. Returns the ids of newly created games.
    ///
    /// # Errors
    ///
    /// Same as [`SeasonEngine::playoff_progress`], plus
    /// [`EngineError::Store`] if a write fails.
    pub fn advance_playoff_rounds(
        &mut self,
        season: SeasonId,
        seeds: Option<usize>,
    ) -> EngineResult<Vec<GameId>> {
        let progress = self.playoff_progress(season, seeds)?;
        let weeks = self.store.weeks(season).map_err(EngineError::store)?;
        let games = self.season_games(season)?;

        let mut created = Vec::new();
        for plan in plan_advancement(&progress, last_regular_week(&weeks), &games) {
            let week = self
                .store
                .upsert_week(season, plan.week_number, true)
                .map_err(EngineError::store)?;
            if plan.pairings.is_empty() {
                continue;
            }
            let inserted = self
                .store
                .insert_games(week.id, &plan.pairings)
                .map_err(EngineError::store)?;
            info!(
                "{season}: created {} {} game(s) in week {}",
                inserted.len(),
                plan.round,
                plan.week_number
            );
            created.extend(inserted.iter().map(|g| g.id));
        }
        Ok(created)
    }

    /// Simulate a stored game without persisting anything.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown game.
    pub fn simulate_game(&self, game: GameId, rng: &SimRng) -> EngineResult<SimulationOutcome> {
        let view = self.require_game(game)?;
        let home = self
            .store
            .roster(view.game.home_team)
            .map_err(EngineError::store)?;
        let away = self
            .store
            .roster(view.game.away_team)
            .map_err(EngineError::store)?;
        Ok(simulate_game(
            TeamSide::new(view.game.home_team, &home),
            TeamSide::new(view.game.away_team, &away),
            &self.config.simulation,
            rng,
        ))
    }

    /// Store a simulation: final score, status and result on the game, and
    /// its plays and stat rows in place of any earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown game and
    /// [`EngineError::InvalidTeam`] when the outcome was simulated for a
    /// different pairing.
    pub fn persist_sim_result(
        &mut self,
        game: GameId,
        outcome: &SimulationOutcome,
    ) -> EngineResult<Game> {
        let mut stored = self.require_game(game)?.game;
        if stored.home_team != outcome.home_team || stored.away_team != outcome.away_team {
            return Err(EngineError::InvalidTeam(format!(
                "simulation of {} vs {} does not match {game}",
                outcome.home_team,
                outcome.away_team
            )));
        }
        stored.complete(outcome.home_score, outcome.away_score);
        self.store
            .record_simulation(
                &stored,
                &outcome.plays,
                &outcome.team_stats,
                &outcome.player_stats,
            )
            .map_err(EngineError::store)?;
        info!(
            "{game} final {}-{} ({} plays)",
            stored.home_score,
            stored.away_score,
            outcome.plays.len()
        );
        Ok(stored)
    }

    /// Simulate and persist in one step.
    ///
    /// # Errors
    ///
    /// See [`SeasonEngine::simulate_game`] and
    /// [`SeasonEngine::persist_sim_result`].
    pub fn play_game(&mut self, game: GameId, rng: &SimRng) -> EngineResult<Game> {
        let outcome = self.simulate_game(game, rng)?;
        self.persist_sim_result(game, &outcome)
    }

    /// Record a final score entered by hand.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidScore`] for negative scores and
    /// [`EngineError::NotFound`] for an unknown game.
    pub fn complete_game(
        &mut self,
        game: GameId,
        home_score: i64,
        away_score: i64,
    ) -> EngineResult<Game> {
        let (home, away) = checked_scores(home_score, away_score)?;
        let mut stored = self.require_game(game)?.game;
        stored.complete(home, away);
        self.store.save_game(&stored).map_err(EngineError::store)?;
        info!("{game} completed {home}-{away}");
        Ok(stored)
    }

    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown season.
    pub fn player_season_stats(&self, season: SeasonId) -> EngineResult<Vec<PlayerSeasonLine>> {
        let season = self.require_season(season)?;
        let rows = self
            .store
            .season_player_stats(season.id)
            .map_err(EngineError::store)?;
        let players = self
            .store
            .players(season.league)
            .map_err(EngineError::store)?;
        let directory = self.directory(season.league)?;
        Ok(player_season_stats(&rows, &players, &directory))
    }

    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown season.
    pub fn player_leaders(
        &self,
        season: SeasonId,
        category: StatCategory,
        limit: usize,
    ) -> EngineResult<Vec<PlayerSeasonLine>> {
        let lines = self.player_season_stats(season)?;
        Ok(player_leaders(lines, category, limit))
    }

    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown season.
    pub fn team_season_stats(&self, season: SeasonId) -> EngineResult<Vec<TeamSeasonLine>> {
        let season = self.require_season(season)?;
        let rows = self
            .store
            .season_team_stats(season.id)
            .map_err(EngineError::store)?;
        let directory = self.directory(season.league)?;
        Ok(team_season_stats(&rows, &directory))
    }
}

impl SeasonEngine<MemoryStore> {
    /// Open an engine over a JSON snapshot written by
    /// [`SeasonEngine::save_snapshot`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or the configuration
    /// is invalid.
    pub fn load_snapshot(path: impl AsRef<Path>, config: EngineConfig) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let store = MemoryStore::load_from_path(path)
            .with_context(|| format!("loading league snapshot {}", path.display()))?;
        Self::with_config(store, config).context("engine configuration rejected")
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.store
            .save_to_path(path)
            .with_context(|| format!("writing league snapshot {}", path.display()))
    }
}
