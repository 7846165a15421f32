//! Seasons, weeks and games.
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::ids::{GameId, LeagueId, SeasonId, TeamId, WeekId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub league: LeagueId,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub id: WeekId,
    pub season: SeasonId,
    pub number: u32,
    pub is_playoffs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub week: WeekId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub status: GameStatus,
    pub home_score: u32,
    pub away_score: u32,
    pub winner: Option<TeamId>,
    pub loser: Option<TeamId>,
}

impl Game {
    /// A fresh scheduled game with no score.
    #[must_use]
    pub const fn scheduled(id: GameId, week: WeekId, home_team: TeamId, away_team: TeamId) -> Self {
        Self {
            id,
            week,
            home_team,
            away_team,
            status: GameStatus::Scheduled,
            home_score: 0,
            away_score: 0,
            winner: None,
            loser: None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.is_completed() && self.winner.is_none()
    }

    /// Whether the game is between `a` and `b` in either home/away order.
    #[must_use]
    pub fn involves_pair(&self, a: TeamId, b: TeamId) -> bool {
        (self.home_team == a && self.away_team == b) || (self.home_team == b && self.away_team == a)
    }

    /// Record a final score; winner and loser follow the score, none on a tie.
    pub fn complete(&mut self, home_score: u32, away_score: u32) {
        self.home_score = home_score;
        self.away_score = away_score;
        self.status = GameStatus::Completed;
        let (winner, loser) = decide(self.home_team, self.away_team, home_score, away_score);
        self.winner = winner;
        self.loser = loser;
    }
}

/// Winner and loser implied by a score line.
#[must_use]
pub fn decide(
    home: TeamId,
    away: TeamId,
    home_score: u32,
    away_score: u32,
) -> (Option<TeamId>, Option<TeamId>) {
    match home_score.cmp(&away_score) {
        std::cmp::Ordering::Greater => (Some(home), Some(away)),
        std::cmp::Ordering::Less => (Some(away), Some(home)),
        std::cmp::Ordering::Equal => (None, None),
    }
}

/// Convert caller-supplied scores, rejecting negatives.
///
/// # Errors
///
/// Returns [`EngineError::InvalidScore`] when either score is negative or
/// does not fit a `u32`.
pub fn checked_scores(home: i64, away: i64) -> EngineResult<(u32, u32)> {
    match (u32::try_from(home), u32::try_from(away)) {
        (Ok(h), Ok(a)) => Ok((h, a)),
        _ => Err(EngineError::InvalidScore { home, away }),
    }
}

/// A game joined with its week, which is what season algorithms read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game: Game,
    pub week_number: u32,
    pub is_playoffs: bool,
}

impl GameView {
    #[must_use]
    pub const fn id(&self) -> GameId {
        self.game.id
    }
}

/// Number of the last regular-season week, 0 when none exist.
#[must_use]
pub fn last_regular_week(weeks: &[Week]) -> u32 {
    weeks
        .iter()
        .filter(|w| !w.is_playoffs)
        .map(|w| w.number)
        .max()
        .unwrap_or(0)
}
