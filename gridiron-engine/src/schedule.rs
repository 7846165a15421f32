//! Single round-robin regular-season scheduling.
//!
//! Uses the circle method: the first team stays fixed while the rest rotate
//! one seat per round. An odd field gets a bye placeholder so every round is
//! a perfect matching, and pairings against the placeholder are dropped.
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::ids::TeamId;

/// Home/away designation for a game yet to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub home: TeamId,
    pub away: TeamId,
}

impl Pairing {
    #[must_use]
    pub const fn new(home: TeamId, away: TeamId) -> Self {
        Self { home, away }
    }

    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }

    /// Unordered key, smaller id first.
    #[must_use]
    pub fn key(self) -> (TeamId, TeamId) {
        if self.home <= self.away {
            (self.home, self.away)
        } else {
            (self.away, self.home)
        }
    }
}

/// One week of games to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub number: u32,
    pub is_playoffs: bool,
    pub pairings: Vec<Pairing>,
}

/// Round-robin rounds for `teams` in the given order, without home/away
/// balancing. Rounds with only bye pairings come back empty.
#[must_use]
pub fn round_robin_pairings(teams: &[TeamId]) -> Vec<Vec<Pairing>> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }
    let n = slots.len();
    let half = n / 2;
    let fixed = slots[0];
    let mut rotation: VecDeque<Option<TeamId>> = slots[1..].iter().copied().collect();
    let last = rotation.len() - 1;

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let mut pairings = Vec::with_capacity(half);
        if let (Some(home), Some(away)) = (fixed, rotation[0]) {
            pairings.push(Pairing::new(home, away));
        }
        for i in 1..half {
            if let (Some(home), Some(away)) = (rotation[i], rotation[last + 1 - i]) {
                pairings.push(Pairing::new(home, away));
            }
        }
        rounds.push(pairings);
        rotation.rotate_right(1);
    }
    rounds
}

/// Full regular-season plan: one week per round, numbered from 1, with
/// home/away flipped on even-numbered weeks.
///
/// # Errors
///
/// Returns [`EngineError::InsufficientTeams`] for fewer than two teams.
pub fn plan_regular_season(teams: &[TeamId]) -> EngineResult<Vec<WeekPlan>> {
    if teams.len() < 2 {
        return Err(EngineError::InsufficientTeams { found: teams.len() });
    }

    let plans = round_robin_pairings(teams)
        .into_iter()
        .zip(1u32..)
        .map(|(pairings, number)| {
            let pairings = if number % 2 == 0 {
                pairings.into_iter().map(Pairing::swapped).collect()
            } else {
                pairings
            };
            WeekPlan {
                number,
                is_playoffs: false,
                pairings,
            }
        })
        .collect();
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn ids(n: u32) -> Vec<TeamId> {
        (1..=n).map(TeamId).collect()
    }

    fn assert_complete_round_robin(n: u32) {
        let teams = ids(n);
        let plan = plan_regular_season(&teams).unwrap();
        let expected_weeks = if n % 2 == 0 { n - 1 } else { n };
        assert_eq!(plan.len(), expected_weeks as usize, "weeks for n={n}");

        let mut seen = HashSet::new();
        for week in &plan {
            let mut busy = HashSet::new();
            for pairing in &week.pairings {
                assert_ne!(pairing.home, pairing.away);
                assert!(busy.insert(pairing.home), "team twice in a week");
                assert!(busy.insert(pairing.away), "team twice in a week");
                assert!(seen.insert(pairing.key()), "pair repeated for n={n}");
            }
        }
        assert_eq!(seen.len(), (n * (n - 1) / 2) as usize);
    }

    #[test]
    fn every_pair_meets_once() {
        for n in 2..=17 {
            assert_complete_round_robin(n);
        }
    }

    #[test]
    fn four_teams_three_weeks_six_games() {
        let plan = plan_regular_season(&ids(4)).unwrap();
        assert_eq!(plan.len(), 3);
        let games: usize = plan.iter().map(|w| w.pairings.len()).sum();
        assert_eq!(games, 6);
        let numbers: Vec<u32> = plan.iter().map(|w| w.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(plan.iter().all(|w| !w.is_playoffs));
    }

    #[test]
    fn odd_field_gives_each_team_one_bye() {
        let teams = ids(5);
        let plan = plan_regular_season(&teams).unwrap();
        let mut byes: HashMap<TeamId, u32> = HashMap::new();
        for week in &plan {
            let playing: HashSet<TeamId> = week
                .pairings
                .iter()
                .flat_map(|p| [p.home, p.away])
                .collect();
            for team in &teams {
                if !playing.contains(team) {
                    *byes.entry(*team).or_default() += 1;
                }
            }
        }
        assert!(teams.iter().all(|t| byes.get(t) == Some(&1)));
    }

    #[test]
    fn even_weeks_swap_home_and_away() {
        let raw = round_robin_pairings(&ids(4));
        let plan = plan_regular_season(&ids(4)).unwrap();
        assert_eq!(plan[0].pairings, raw[0]);
        let swapped: Vec<Pairing> = raw[1].iter().map(|p| p.swapped()).collect();
        assert_eq!(plan[1].pairings, swapped);
        assert_eq!(plan[2].pairings, raw[2]);
    }

    #[test]
    fn fixed_team_meets_head_of_rotation() {
        let raw = round_robin_pairings(&ids(4));
        assert_eq!(raw[0][0], Pairing::new(TeamId(1), TeamId(2)));
        assert_eq!(raw[0][1], Pairing::new(TeamId(3), TeamId(4)));
        // After one right rotation the head is the old tail.
        assert_eq!(raw[1][0], Pairing::new(TeamId(1), TeamId(4)));
    }

    #[test]
    fn fewer_than_two_teams_is_rejected() {
        assert!(matches!(
            plan_regular_season(&ids(1)),
            Err(EngineError::InsufficientTeams { found: 1 })
        ));
        assert!(plan_regular_season(&[]).is_err());
        assert!(round_robin_pairings(&ids(1)).is_empty());
    }
}
