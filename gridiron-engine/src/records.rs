//! Per-game rows written when a simulation is persisted.
use serde::{Deserialize, Serialize};

use crate::ids::{PlayerId, TeamId};
use crate::roster::Position;

/// One logged play with the score after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayLog {
    pub play_index: u32,
    pub quarter: u8,
    pub clock_seconds: u32,
    pub summary: String,
    pub home_score: u32,
    pub away_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGameStat {
    pub team: TeamId,
    pub total_yards: u32,
    pub pass_yards: u32,
    pub rush_yards: u32,
    pub turnovers: u32,
}

/// A player's line for one game. Counters a player did not touch stay zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGameStat {
    pub player: PlayerId,
    pub team: TeamId,
    pub position: Position,
    #[serde(flatten)]
    pub line: StatLine,
}

impl PlayerGameStat {
    #[must_use]
    pub fn new(player: PlayerId, team: TeamId, position: Position) -> Self {
        Self {
            player,
            team,
            position,
            line: StatLine::default(),
        }
    }
}

/// Counting stats shared by game lines and season totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub pass_att: u32,
    pub pass_cmp: u32,
    pub pass_yds: u32,
    pub pass_td: u32,
    pub pass_int: u32,
    pub rush_att: u32,
    pub rush_yds: u32,
    pub rush_td: u32,
    pub rec: u32,
    pub rec_yds: u32,
    pub rec_td: u32,
    pub tackles: u32,
    pub sacks: u32,
    pub interceptions: u32,
    pub fumbles: u32,
}

impl std::ops::AddAssign for StatLine {
    fn add_assign(&mut self, rhs: Self) {
        self.pass_att += rhs.pass_att;
        self.pass_cmp += rhs.pass_cmp;
        self.pass_yds += rhs.pass_yds;
        self.pass_td += rhs.pass_td;
        self.pass_int += rhs.pass_int;
        self.rush_att += rhs.rush_att;
        self.rush_yds += rhs.rush_yds;
        self.rush_td += rhs.rush_td;
        self.rec += rhs.rec;
        self.rec_yds += rhs.rec_yds;
        self.rec_td += rhs.rec_td;
        self.tackles += rhs.tackles;
        self.sacks += rhs.sacks;
        self.interceptions += rhs.interceptions;
        self.fumbles += rhs.fumbles;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_lines_accumulate() {
        let mut total = StatLine {
            pass_yds: 200,
            rush_att: 4,
            ..StatLine::default()
        };
        total += StatLine {
            pass_yds: 50,
            rush_att: 12,
            rec_td: 1,
            ..StatLine::default()
        };
        assert_eq!(total.pass_yds, 250);
        assert_eq!(total.rush_att, 16);
        assert_eq!(total.rec_td, 1);
    }

    #[test]
    fn player_line_flattens_counters() {
        let mut stat = PlayerGameStat::new(PlayerId(4), TeamId(1), Position::Rb);
        stat.line.rush_yds = 87;
        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(json["rush_yds"], 87);
        assert_eq!(json["position"], "RB");
    }
}
