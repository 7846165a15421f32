//! Ratings-driven play-by-play game simulation.
//!
//! The simulator is pure: callers hand in rosters, configuration and a seeded
//! [`SimRng`], and get back a [`SimulationOutcome`] ready to persist.

mod box_score;
mod rng;

pub use rng::{CountingRng, SimRng};

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::ids::TeamId;
use crate::numbers::trunc_f64_to_i32;
use crate::records::{PlayLog, PlayerGameStat, TeamGameStat};
use crate::roster::{Player, SkillGroups, team_power};
use crate::season::{GameStatus, decide};

const TOUCHDOWN_POINTS: u32 = 7;
const FIELD_GOAL_POINTS: u32 = 3;

/// One team entering a simulation.
#[derive(Debug, Clone, Copy)]
pub struct TeamSide<'a> {
    pub team: TeamId,
    pub roster: &'a [Player],
}

impl<'a> TeamSide<'a> {
    #[must_use]
    pub const fn new(team: TeamId, roster: &'a [Player]) -> Self {
        Self { team, roster }
    }
}

/// Everything a simulated game produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_score: u32,
    pub away_score: u32,
    pub status: GameStatus,
    pub winner: Option<TeamId>,
    pub loser: Option<TeamId>,
    pub plays: Vec<PlayLog>,
    pub team_stats: Vec<TeamGameStat>,
    pub player_stats: Vec<PlayerGameStat>,
    pub home_power: f64,
    pub away_power: f64,
}

impl SimulationOutcome {
    #[must_use]
    pub const fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

impl Side {
    const fn label(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Away => "AWAY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayKind {
    Run,
    Pass,
}

impl PlayKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Pass => "pass",
        }
    }
}

/// Result of one snap before it is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayResult {
    Gain,
    Touchdown,
    FieldGoal,
    Turnover,
}

/// Probability that the home side has the ball on a given play.
fn home_possession_share(home_power: f64, away_power: f64) -> f64 {
    let share = home_power / (home_power + away_power);
    if share.is_finite() {
        share.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

fn draw_yards<R: Rng + ?Sized>(rng: &mut R, cfg: &SimConfig, offense: f64, defense: f64) -> i32 {
    let mean = (offense - defense) * cfg.power_weight + cfg.base_yards;
    let raw = Normal::new(mean, cfg.yard_std_dev).map_or(mean, |normal| normal.sample(rng));
    trunc_f64_to_i32(raw).clamp(cfg.min_yards, cfg.max_yards)
}

/// Scoring checks run in order and each draws only when its yardage gate
/// passes.
fn classify<R: Rng + ?Sized>(rng: &mut R, cfg: &SimConfig, yards: i32) -> PlayResult {
    if yards >= cfg.touchdown_yards && rng.gen_bool(cfg.touchdown_chance) {
        PlayResult::Touchdown
    } else if yards >= cfg.field_goal_yards && rng.gen_bool(cfg.field_goal_chance) {
        PlayResult::FieldGoal
    } else if yards < cfg.turnover_yards && rng.gen_bool(cfg.turnover_chance) {
        PlayResult::Turnover
    } else {
        PlayResult::Gain
    }
}

fn summarize(offense: Side, kind: PlayKind, yards: i32, result: PlayResult) -> String {
    let side = offense.label();
    match result {
        PlayResult::Gain => format!("{side} {} for {yards} yards", kind.label()),
        PlayResult::Touchdown => {
            format!("{side} TD on a {} ({TOUCHDOWN_POINTS} pts)", kind.label())
        }
        PlayResult::FieldGoal => format!("{side} FG ({FIELD_GOAL_POINTS} pts)"),
        PlayResult::Turnover => format!("{side} turnover"),
    }
}

/// Simulate a game between two rosters.
///
/// Identical seeds, rosters and configuration always produce identical
/// outcomes. Empty rosters play at the baseline power and record no
/// individual stat lines.
#[must_use]
pub fn simulate_game(
    home: TeamSide<'_>,
    away: TeamSide<'_>,
    cfg: &SimConfig,
    rng: &SimRng,
) -> SimulationOutcome {
    let home_power = team_power(home.roster);
    let away_power = team_power(away.roster);
    let home_share = home_possession_share(home_power, away_power);

    let mut plays = Vec::with_capacity(usize::try_from(cfg.total_plays()).unwrap_or(0));
    let (mut home_score, mut away_score) = (0u32, 0u32);
    {
        let mut drive = rng.drive();
        let mut play_index = 1u32;
        for quarter in 1..=cfg.quarters {
            let mut clock = cfg.quarter_seconds;
            for _ in 0..cfg.plays_per_quarter {
                let step = drive.gen_range(cfg.clock_step_min..=cfg.clock_step_max);
                clock = clock.saturating_sub(step);

                let (offense, attack, defend) = if drive.gen_bool(home_share) {
                    (Side::Home, home_power, away_power)
                } else {
                    (Side::Away, away_power, home_power)
                };
                let yards = draw_yards(&mut *drive, cfg, attack, defend);
                let kind = if drive.gen_bool(cfg.run_chance) {
                    PlayKind::Run
                } else {
                    PlayKind::Pass
                };
                let result = classify(&mut *drive, cfg, yards);
                let points = match result {
                    PlayResult::Touchdown => TOUCHDOWN_POINTS,
                    PlayResult::FieldGoal => FIELD_GOAL_POINTS,
                    PlayResult::Gain | PlayResult::Turnover => 0,
                };
                match offense {
                    Side::Home => home_score += points,
                    Side::Away => away_score += points,
                }

                plays.push(PlayLog {
                    play_index,
                    quarter,
                    clock_seconds: clock,
                    summary: summarize(offense, kind, yards, result),
                    home_score,
                    away_score,
                });
                play_index += 1;
            }
        }
    }

    let (team_stats, player_stats) = {
        let mut box_rng = rng.box_score();
        let mut player_rng = rng.players();
        let home_yards = box_score::total_yards(home_score, &mut *box_rng);
        let away_yards = box_score::total_yards(away_score, &mut *box_rng);
        let team_stats = vec![
            box_score::team_line(home.team, home_yards, &mut *box_rng),
            box_score::team_line(away.team, away_yards, &mut *box_rng),
        ];
        let mut player_stats = box_score::player_lines(
            home.team,
            &SkillGroups::from_roster(home.roster),
            home_yards,
            &mut *player_rng,
        );
        player_stats.extend(box_score::player_lines(
            away.team,
            &SkillGroups::from_roster(away.roster),
            away_yards,
            &mut *player_rng,
        ));
        (team_stats, player_stats)
    };

    let (winner, loser) = decide(home.team, away.team, home_score, away_score);
    debug!(
        "simulated {} vs {}: {home_score}-{away_score} over {} plays",
        home.team,
        away.team,
        plays.len()
    );

    SimulationOutcome {
        home_team: home.team,
        away_team: away.team,
        home_score,
        away_score,
        status: GameStatus::Completed,
        winner,
        loser,
        plays,
        team_stats,
        player_stats,
        home_power,
        away_power,
    }
}
