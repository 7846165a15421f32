//! Season aggregates over persisted per-game stat rows.
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{PlayerId, TeamId};
use crate::league::TeamDirectory;
use crate::records::{PlayerGameStat, StatLine, TeamGameStat};
use crate::roster::{Player, Position};

/// A player's season totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeasonLine {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_id: TeamId,
    pub team_abbr: String,
    pub position: Position,
    pub games: u32,
    #[serde(flatten)]
    pub totals: StatLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeasonLine {
    pub team_id: TeamId,
    pub team_abbr: String,
    pub games: u32,
    pub total_yards: u32,
    pub pass_yards: u32,
    pub rush_yards: u32,
    pub turnovers: u32,
}

/// Counters a leaderboard can rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    PassYds,
    PassTd,
    RushYds,
    RushTd,
    RecYds,
    RecTd,
    Tackles,
    Sacks,
    Interceptions,
}

impl StatCategory {
    pub const ALL: [Self; 9] = [
        Self::PassYds,
        Self::PassTd,
        Self::RushYds,
        Self::RushTd,
        Self::RecYds,
        Self::RecTd,
        Self::Tackles,
        Self::Sacks,
        Self::Interceptions,
    ];

    /// Column name used in reports and query strings.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::PassYds => "pass_yds",
            Self::PassTd => "pass_td",
            Self::RushYds => "rush_yds",
            Self::RushTd => "rush_td",
            Self::RecYds => "rec_yds",
            Self::RecTd => "rec_td",
            Self::Tackles => "tackles",
            Self::Sacks => "sacks",
            Self::Interceptions => "interceptions",
        }
    }

    #[must_use]
    pub const fn value(self, line: &StatLine) -> u32 {
        match self {
            Self::PassYds => line.pass_yds,
            Self::PassTd => line.pass_td,
            Self::RushYds => line.rush_yds,
            Self::RushTd => line.rush_td,
            Self::RecYds => line.rec_yds,
            Self::RecTd => line.rec_td,
            Self::Tackles => line.tackles,
            Self::Sacks => line.sacks,
            Self::Interceptions => line.interceptions,
        }
    }
}

impl std::fmt::Display for StatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown stat category `{0}`")]
pub struct UnknownStatCategory(pub String);

impl FromStr for StatCategory {
    type Err = UnknownStatCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| UnknownStatCategory(s.to_string()))
    }
}

/// Sum game rows per player, ordered by player id. Each row is one game.
#[must_use]
pub fn player_season_stats(
    rows: &[PlayerGameStat],
    players: &[Player],
    teams: &TeamDirectory,
) -> Vec<PlayerSeasonLine> {
    let mut totals: BTreeMap<PlayerId, PlayerSeasonLine> = BTreeMap::new();
    for row in rows {
        let entry = totals.entry(row.player).or_insert_with(|| PlayerSeasonLine {
            player_id: row.player,
            player_name: players
                .iter()
                .find(|p| p.id == row.player)
                .map_or_else(|| row.player.to_string(), Player::full_name),
            team_id: row.team,
            team_abbr: teams
                .get(row.team)
                .map(|info| info.abbreviation.clone())
                .unwrap_or_default(),
            position: row.position,
            games: 0,
            totals: StatLine::default(),
        });
        entry.games += 1;
        entry.totals += row.line;
    }
    totals.into_values().collect()
}

/// Top `limit` season lines for a category, highest first. Equal values
/// keep player-id order.
#[must_use]
pub fn player_leaders(
    mut lines: Vec<PlayerSeasonLine>,
    category: StatCategory,
    limit: usize,
) -> Vec<PlayerSeasonLine> {
    lines.sort_by_key(|line| Reverse(category.value(&line.totals)));
    lines.truncate(limit);
    lines
}

/// Sum game rows per team, ordered by team id.
#[must_use]
pub fn team_season_stats(rows: &[TeamGameStat], teams: &TeamDirectory) -> Vec<TeamSeasonLine> {
    let mut totals: BTreeMap<TeamId, TeamSeasonLine> = BTreeMap::new();
    for row in rows {
        let entry = totals.entry(row.team).or_insert_with(|| TeamSeasonLine {
            team_id: row.team,
            team_abbr: teams
                .get(row.team)
                .map(|info| info.abbreviation.clone())
                .unwrap_or_default(),
            games: 0,
            total_yards: 0,
            pass_yards: 0,
            rush_yards: 0,
            turnovers: 0,
        });
        entry.games += 1;
        entry.total_yards += row.total_yards;
        entry.pass_yards += row.pass_yards;
        entry.rush_yards += row.rush_yards;
        entry.turnovers += row.turnovers;
    }
    totals.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: u32, team: u32, position: Position, line: StatLine) -> PlayerGameStat {
        PlayerGameStat {
            player: PlayerId(player),
            team: TeamId(team),
            position,
            line,
        }
    }

    fn rushing(yds: u32, td: u32) -> StatLine {
        StatLine {
            rush_att: 12,
            rush_yds: yds,
            rush_td: td,
            ..StatLine::default()
        }
    }

    #[test]
    fn season_lines_sum_games() {
        let rows = vec![
            row(2, 1, Position::Rb, rushing(90, 1)),
            row(1, 1, Position::Qb, StatLine::default()),
            row(2, 1, Position::Rb, rushing(40, 0)),
        ];
        let lines = player_season_stats(&rows, &[], &TeamDirectory::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].player_id, PlayerId(1));
        let back = &lines[1];
        assert_eq!(back.games, 2);
        assert_eq!(back.totals.rush_yds, 130);
        assert_eq!(back.totals.rush_att, 24);
        assert_eq!(back.totals.rush_td, 1);
        assert_eq!(back.player_name, "player#2");
    }

    #[test]
    fn leaders_rank_by_category() {
        let rows = vec![
            row(1, 1, Position::Rb, rushing(50, 0)),
            row(2, 1, Position::Rb, rushing(120, 1)),
            row(3, 2, Position::Rb, rushing(50, 2)),
        ];
        let lines = player_season_stats(&rows, &[], &TeamDirectory::default());
        let yards: Vec<u32> = player_leaders(lines.clone(), StatCategory::RushYds, 10)
            .iter()
            .map(|l| l.player_id.get())
            .collect();
        assert_eq!(yards, vec![2, 1, 3]);
        let tds = player_leaders(lines, StatCategory::RushTd, 1);
        assert_eq!(tds.len(), 1);
        assert_eq!(tds[0].player_id, PlayerId(3));
    }

    #[test]
    fn categories_parse_from_keys() {
        for category in StatCategory::ALL {
            assert_eq!(category.key().parse::<StatCategory>(), Ok(category));
        }
        assert_eq!(
            "fumbles".parse::<StatCategory>(),
            Err(UnknownStatCategory("fumbles".into()))
        );
    }

    #[test]
    fn team_lines_count_games() {
        let line = |team: u32, total: u32| TeamGameStat {
            team: TeamId(team),
            total_yards: total,
            pass_yards: total * 6 / 10,
            rush_yards: total * 4 / 10,
            turnovers: 1,
        };
        let rows = [line(2, 300), line(1, 250), line(2, 400)];
        let lines = team_season_stats(&rows, &TeamDirectory::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].team_id, TeamId(2));
        assert_eq!(lines[1].games, 2);
        assert_eq!(lines[1].total_yards, 700);
        assert_eq!(lines[1].turnovers, 2);
    }
}
