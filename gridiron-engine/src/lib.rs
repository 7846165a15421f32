//! Gridiron Season Engine
//!
//! Season lifecycle logic for a simulated football league: round-robin
//! scheduling, standings, conference playoffs and a ratings-driven game
//! simulator. Storage sits behind the [`LeagueStore`] trait; the crate ships
//! an in-memory implementation with JSON snapshots.

pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod league;
pub mod numbers;
pub mod playoffs;
pub mod records;
pub mod roster;
pub mod schedule;
pub mod season;
pub mod simulator;
pub mod standings;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, EngineConfig, PlayoffConfig, SimConfig, default_config};
pub use engine::{GeneratedSchedule, SeasonEngine};
pub use error::{EngineError, EngineResult};
pub use ids::{ConferenceId, DivisionId, GameId, LeagueId, PlayerId, SeasonId, TeamId, WeekId};
pub use league::{
    CapRules, Conference, Division, League, LeagueSetup, LeagueShape, NewTeam, Team, TeamDirectory,
    TeamInfo,
};
pub use playoffs::{
    GameRef, Matchup, MatchupRecord, PlayoffProgress, PlayoffRound, PlayoffSeed, RoundPlan,
};
pub use records::{PlayLog, PlayerGameStat, StatLine, TeamGameStat};
pub use roster::{DetailedRatings, NewPlayer, Player, Position, SkillGroups, team_power};
pub use schedule::{Pairing, WeekPlan, plan_regular_season};
pub use season::{Game, GameStatus, GameView, Season, Week};
pub use simulator::{SimRng, SimulationOutcome, TeamSide, simulate_game};
pub use standings::{StandingRecord, compute_standings};
pub use stats::{PlayerSeasonLine, StatCategory, TeamSeasonLine, UnknownStatCategory};
pub use store::{LeagueStore, MemoryStore, MemoryStoreError};
