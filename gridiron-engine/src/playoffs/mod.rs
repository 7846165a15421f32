//! Playoff seeding, brackets, progress tracking and advancement.
//!
//! Each conference runs `Wildcard -> Divisional -> Conference`; conference
//! champions then meet in a cross-conference `Championship`. Everything here
//! is a pure function over standings and a snapshot of playoff games. Missing
//! or tied games never raise; they leave matchups pending.

mod advance;
mod bracket;
mod progress;
mod seeding;

pub use advance::{RoundPlan, plan_advancement, playoff_week_number};
pub use bracket::{conference_bracket, generate_bracket, pair_inward};
pub use progress::playoff_progress;
pub use seeding::{
    check_playable_seed_count, check_seed_count, group_by_conference, seed_conferences,
};

use serde::{Deserialize, Serialize};

use crate::ids::{ConferenceId, GameId, TeamId};
use crate::season::GameStatus;
use crate::standings::StandingRecord;

/// Seeds per conference when the caller does not ask for a count.
pub const DEFAULT_SEEDS_PER_CONFERENCE: usize = 7;

/// Largest field that still collapses to one champion within the three
/// conference rounds.
pub const MAX_SEEDS_PER_CONFERENCE: usize = 8;

/// Label used on cross-conference records.
pub const LEAGUE_LABEL: &str = "League";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayoffRound {
    Wildcard,
    Divisional,
    Conference,
    Championship,
}

impl PlayoffRound {
    /// Rounds in the order they are played.
    pub const ALL: [Self; 4] = [
        Self::Wildcard,
        Self::Divisional,
        Self::Conference,
        Self::Championship,
    ];

    /// 1-based position of the round in the playoff calendar.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        match self {
            Self::Wildcard => 1,
            Self::Divisional => 2,
            Self::Conference => 3,
            Self::Championship => 4,
        }
    }

    /// Round that follows inside a conference, if any.
    #[must_use]
    pub const fn next_in_conference(self) -> Option<Self> {
        match self {
            Self::Wildcard => Some(Self::Divisional),
            Self::Divisional => Some(Self::Conference),
            Self::Conference | Self::Championship => None,
        }
    }
}

impl std::fmt::Display for PlayoffRound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wildcard => write!(f, "Wildcard"),
            Self::Divisional => write!(f, "Divisional"),
            Self::Conference => write!(f, "Conference Championship"),
            Self::Championship => write!(f, "Championship"),
        }
    }
}

/// A standings record with its seed inside the conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffSeed {
    pub seed: u32,
    #[serde(flatten)]
    pub record: StandingRecord,
}

impl PlayoffSeed {
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.record.team_id
    }

    #[must_use]
    pub const fn conference_id(&self) -> ConferenceId {
        self.record.conference_id
    }
}

/// A pairing inside a round. No lower seed means the higher seed has a bye.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub round: PlayoffRound,
    pub conference_id: Option<ConferenceId>,
    pub conference: String,
    pub higher_seed: PlayoffSeed,
    pub lower_seed: Option<PlayoffSeed>,
}

impl Matchup {
    #[must_use]
    pub const fn is_bye(&self) -> bool {
        self.lower_seed.is_none()
    }
}

/// Reference to the game located for a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    pub id: GameId,
    pub status: GameStatus,
    pub home_score: u32,
    pub away_score: u32,
}

/// A matchup together with whatever is known about its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub round: PlayoffRound,
    pub conference_id: Option<ConferenceId>,
    pub conference: String,
    pub higher_seed: PlayoffSeed,
    pub lower_seed: Option<PlayoffSeed>,
    pub game: Option<GameRef>,
    pub winner_seed: Option<u32>,
    pub winner_team: Option<TeamId>,
    pub winning_conference: Option<ConferenceId>,
}

impl MatchupRecord {
    /// Whether both sides are known, i.e. a game has to be played.
    #[must_use]
    pub const fn is_two_sided(&self) -> bool {
        self.lower_seed.is_some()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.winner_team.is_none()
    }

    /// Seed entry of the winning side, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayoffSeed> {
        let winner = self.winner_team?;
        if self.higher_seed.team_id() == winner {
            return Some(&self.higher_seed);
        }
        self.lower_seed.as_ref().filter(|s| s.team_id() == winner)
    }
}

/// Bracket state across all conferences.
///
/// `provisional_champions` holds, per conference, the one divisional game
/// winner known while the other divisional game is undecided. They never
/// enter the Championship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffProgress {
    pub matchups: Vec<MatchupRecord>,
    pub conference_champions: Vec<PlayoffSeed>,
    #[serde(default)]
    pub provisional_champions: Vec<PlayoffSeed>,
    pub champion: Option<PlayoffSeed>,
}

impl PlayoffProgress {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchups.is_empty()
    }

    /// Records for one round, in conference order.
    pub fn round(&self, round: PlayoffRound) -> impl Iterator<Item = &MatchupRecord> {
        self.matchups.iter().filter(move |m| m.round == round)
    }

    /// Records that still need a result.
    pub fn pending(&self) -> impl Iterator<Item = &MatchupRecord> {
        self.matchups.iter().filter(|m| m.is_pending())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_are_ordered() {
        let ordinals: Vec<u32> = PlayoffRound::ALL.iter().map(|r| r.ordinal()).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4]);
        assert_eq!(
            PlayoffRound::Wildcard.next_in_conference(),
            Some(PlayoffRound::Divisional)
        );
        assert_eq!(PlayoffRound::Conference.next_in_conference(), None);
        assert_eq!(
            PlayoffRound::Conference.to_string(),
            "Conference Championship"
        );
    }

    #[test]
    fn seed_serializes_flat() {
        let seed = PlayoffSeed {
            seed: 1,
            record: fixtures::record(4, 1, 10),
        };
        let json = serde_json::to_value(&seed).unwrap();
        assert_eq!(json["seed"], 1);
        assert_eq!(json["team_id"], 4);
        assert_eq!(json["conference"], "Conference 1");
    }
}
