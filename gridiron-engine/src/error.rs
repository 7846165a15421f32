//! Error taxonomy for season operations.
use thiserror::Error;

/// Errors raised by season-engine operations.
///
/// Indeterminate playoff results (ties, unplayed games) are never errors; they
/// surface as pending matchups instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a schedule needs at least two teams (found {found})")]
    InsufficientTeams { found: usize },
    #[error("playoff seed count must be at least 1 (got {requested})")]
    InvalidSeedCount { requested: usize },
    #[error("{seeds} seeds exceed the {max} a conference bracket can resolve")]
    BracketTooLarge { seeds: usize, max: usize },
    #[error("scores must be non-negative (got {home}-{away})")]
    InvalidScore { home: i64, away: i64 },
    #[error(
        "league shape needs at least one of each level (got {conferences}/{divisions}/{teams})"
    )]
    InvalidLeagueShape {
        conferences: u32,
        divisions: u32,
        teams: u32,
    },
    #[error("invalid team: {0}")]
    InvalidTeam(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },
    #[error("store failure: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    /// Wrap a collaborator store error.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }

    /// Shorthand for a missing entity.
    #[must_use]
    pub const fn not_found(entity: &'static str, id: u32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Whether the caller should surface this as a client-input problem
    /// rather than an internal failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
