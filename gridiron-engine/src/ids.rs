//! Strongly typed identifiers handed out by a [`crate::LeagueStore`].
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Raw numeric value of the identifier.
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Entity label used in error messages and logs.
            #[must_use]
            pub const fn label() -> &'static str {
                $label
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Identifies a league.
    LeagueId,
    "league"
);
entity_id!(
    /// Identifies a conference within a league.
    ConferenceId,
    "conference"
);
entity_id!(
    /// Identifies a division within a conference.
    DivisionId,
    "division"
);
entity_id!(
    /// Identifies a team; unique across all leagues in a store.
    TeamId,
    "team"
);
entity_id!(
    /// Identifies a player.
    PlayerId,
    "player"
);
entity_id!(
    /// Identifies a (league, year) season.
    SeasonId,
    "season"
);
entity_id!(
    /// Identifies a week of a season.
    WeekId,
    "week"
);
entity_id!(
    /// Identifies a game.
    GameId,
    "game"
);
