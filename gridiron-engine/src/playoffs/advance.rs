use serde::{Deserialize, Serialize};

use super::{PlayoffProgress, PlayoffRound};
use crate::schedule::Pairing;
use crate::season::GameView;

/// Games still to be created for one playoff round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPlan {
    pub round: PlayoffRound,
    pub week_number: u32,
    pub pairings: Vec<Pairing>,
}

/// Playoff rounds occupy the weeks straight after the regular season.
#[must_use]
pub const fn playoff_week_number(last_regular_week: u32, round: PlayoffRound) -> u32 {
    last_regular_week + round.ordinal()
}

fn already_scheduled(scheduled: &[&GameView], pairing: &Pairing) -> bool {
    scheduled
        .iter()
        .any(|v| v.game.involves_pair(pairing.home, pairing.away))
}

/// Plan the games needed to bring the bracket up to date.
///
/// Every round with at least one two-sided matchup yields a plan, even when
/// all of its games already exist, so its week can be ensured. Pairings
/// already present in the round's playoff week, in either home/away order,
/// are left out. The higher seed hosts.
#[must_use]
pub fn plan_advancement(
    progress: &PlayoffProgress,
    last_regular_week: u32,
    games: &[GameView],
) -> Vec<RoundPlan> {
    PlayoffRound::ALL
        .into_iter()
        .filter_map(|round| {
            let week_number = playoff_week_number(last_regular_week, round);
            let scheduled: Vec<&GameView> = games
                .iter()
                .filter(|v| v.is_playoffs && v.week_number == week_number)
                .collect();

            let mut two_sided = progress
                .round(round)
                .filter_map(|m| {
                    let lower = m.lower_seed.as_ref()?;
                    Some(Pairing::new(m.higher_seed.team_id(), lower.team_id()))
                })
                .peekable();
            two_sided.peek()?;

            let pairings = two_sided
                .filter(|p| !already_scheduled(&scheduled, p))
                .collect();
            Some(RoundPlan {
                round,
                week_number,
                pairings,
            })
        })
        .collect()
}
