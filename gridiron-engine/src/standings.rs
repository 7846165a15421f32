//! Standings derived from completed games. Never cached; recomputed from a
//! snapshot of the season's games on every call.
use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::ids::{ConferenceId, DivisionId, TeamId};
use crate::league::TeamDirectory;
use crate::season::GameView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRecord {
    pub team_id: TeamId,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub conference_id: ConferenceId,
    pub conference: String,
    pub division_id: DivisionId,
    pub division: String,
}

impl StandingRecord {
    #[must_use]
    pub fn point_differential(&self) -> i128 {
        i128::from(self.points_for) - i128::from(self.points_against)
    }

    #[must_use]
    pub const fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    wins: u32,
    losses: u32,
    ties: u32,
    points_for: u64,
    points_against: u64,
}

/// Aggregate every completed game into per-team records.
///
/// Only teams with at least one completed game appear. The result is ordered
/// by wins, then points scored, both descending. Teams level on both keep
/// ascending team-id order.
#[must_use]
pub fn compute_standings(games: &[GameView], teams: &TeamDirectory) -> Vec<StandingRecord> {
    let mut tallies: BTreeMap<TeamId, Tally> = BTreeMap::new();

    for view in games.iter().filter(|view| view.game.is_completed()) {
        let game = &view.game;
        if teams.get(game.home_team).is_none() || teams.get(game.away_team).is_none() {
            warn!(
                "skipping {} in standings: team outside the league directory",
                game.id
            );
            continue;
        }

        let tie = game.winner.is_none();
        {
            let home = tallies.entry(game.home_team).or_default();
            home.points_for += u64::from(game.home_score);
            home.points_against += u64::from(game.away_score);
            if tie {
                home.ties += 1;
            }
        }
        {
            let away = tallies.entry(game.away_team).or_default();
            away.points_for += u64::from(game.away_score);
            away.points_against += u64::from(game.home_score);
            if tie {
                away.ties += 1;
            }
        }
        if let (Some(winner), Some(loser)) = (game.winner, game.loser) {
            tallies.entry(winner).or_default().wins += 1;
            tallies.entry(loser).or_default().losses += 1;
        }
    }

    let mut standings: Vec<StandingRecord> = tallies
        .into_iter()
        .filter_map(|(team_id, tally)| {
            let info = teams.get(team_id)?;
            Some(StandingRecord {
                team_id,
                abbreviation: info.abbreviation.clone(),
                wins: tally.wins,
                losses: tally.losses,
                ties: tally.ties,
                points_for: tally.points_for,
                points_against: tally.points_against,
                conference_id: info.conference_id,
                conference: info.conference.clone(),
                division_id: info.division_id,
                division: info.division.clone(),
            })
        })
        .collect();

    standings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.points_for.cmp(&a.points_for))
    });
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{GameId, LeagueId, WeekId};
    use crate::league::{Conference, Division, Team};
    use crate::season::Game;

    fn directory(count: u32) -> TeamDirectory {
        let conferences = vec![Conference {
            id: ConferenceId(1),
            league: LeagueId(1),
            name: "Conference 1".into(),
            order: 0,
        }];
        let divisions = vec![Division {
            id: DivisionId(1),
            conference: ConferenceId(1),
            name: "Division 1".into(),
            order: 0,
        }];
        let teams: Vec<Team> = (1..=count)
            .map(|id| Team {
                id: TeamId(id),
                league: LeagueId(1),
                conference: ConferenceId(1),
                division: DivisionId(1),
                name: format!("Team {id}"),
                city: "City".into(),
                nickname: "Nick".into(),
                abbreviation: format!("T{id}"),
            })
            .collect();
        TeamDirectory::build(&teams, &conferences, &divisions)
    }

    fn completed(id: u32, home: u32, away: u32, hs: u32, aws: u32) -> GameView {
        let mut game = Game::scheduled(GameId(id), WeekId(1), TeamId(home), TeamId(away));
        game.complete(hs, aws);
        GameView {
            game,
            week_number: 1,
            is_playoffs: false,
        }
    }

    #[test]
    fn single_game_credits_both_sides() {
        let standings = compute_standings(&[completed(1, 1, 2, 21, 14)], &directory(2));
        assert_eq!(standings.len(), 2);
        let a = &standings[0];
        assert_eq!((a.team_id, a.wins, a.losses), (TeamId(1), 1, 0));
        assert_eq!((a.points_for, a.points_against), (21, 14));
        let b = &standings[1];
        assert_eq!((b.team_id, b.wins, b.losses), (TeamId(2), 0, 1));
        assert_eq!((b.points_for, b.points_against), (14, 21));
        assert_eq!(a.conference, "Conference 1");
    }

    #[test]
    fn tie_adds_points_but_no_result() {
        let standings = compute_standings(&[completed(1, 1, 2, 21, 21)], &directory(2));
        for record in &standings {
            assert_eq!(record.wins, 0);
            assert_eq!(record.losses, 0);
            assert_eq!(record.ties, 1);
            assert_eq!(record.points_for, 21);
            assert_eq!(record.points_against, 21);
        }
    }

    #[test]
    fn unfinished_games_and_idle_teams_are_ignored() {
        let scheduled = GameView {
            game: Game::scheduled(GameId(2), WeekId(1), TeamId(3), TeamId(4)),
            week_number: 1,
            is_playoffs: false,
        };
        let standings = compute_standings(&[completed(1, 1, 2, 10, 3), scheduled], &directory(4));
        let ids: Vec<TeamId> = standings.iter().map(|r| r.team_id).collect();
        assert_eq!(ids, vec![TeamId(1), TeamId(2)]);
        assert!(compute_standings(&[], &directory(4)).is_empty());
    }

    #[test]
    fn ordering_uses_wins_then_points_for() {
        let games = vec![
            completed(1, 1, 2, 10, 7),
            completed(2, 3, 4, 30, 0),
            completed(3, 2, 4, 17, 14),
            completed(4, 1, 3, 3, 6),
        ];
        let standings = compute_standings(&games, &directory(4));
        let order: Vec<u32> = standings.iter().map(|r| r.team_id.get()).collect();
        // T3 2-0 (36 PF), T1 1-1 (13), T2 1-1 (24) -> T2 ahead of T1, T4 0-2.
        assert_eq!(order, vec![3, 2, 1, 4]);

        let total_wins: u32 = standings.iter().map(|r| r.wins).sum();
        let total_losses: u32 = standings.iter().map(|r| r.losses).sum();
        let pf: u64 = standings.iter().map(|r| r.points_for).sum();
        let pa: u64 = standings.iter().map(|r| r.points_against).sum();
        assert_eq!(total_wins, 4);
        assert_eq!(total_wins, total_losses);
        assert_eq!(pf, pa);
    }

    #[test]
    fn level_records_keep_team_order() {
        let games = vec![completed(1, 3, 4, 10, 10), completed(2, 1, 2, 10, 10)];
        let standings = compute_standings(&games, &directory(4));
        let order: Vec<u32> = standings.iter().map(|r| r.team_id.get()).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
    }

    #[test]
    fn huge_scores_accumulate_without_overflow() {
        let games = [
            completed(1, 1, 2, 3_000_000_000, 0),
            completed(2, 1, 3, 3_000_000_000, 0),
            completed(3, 2, 3, u32::MAX, u32::MAX),
        ];
        let standings = compute_standings(&games, &directory(3));
        let leader = &standings[0];
        assert_eq!(leader.team_id, TeamId(1));
        assert_eq!(leader.points_for, 6_000_000_000);
        assert_eq!(leader.point_differential(), 6_000_000_000);
        let last = &standings[2];
        assert_eq!(last.points_against, 3_000_000_000 + u64::from(u32::MAX));
        assert_eq!(last.ties, 1);
    }
}
