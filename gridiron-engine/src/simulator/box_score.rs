//! Coarse team and player box scores.
//!
//! Yardage is drawn from the final score rather than replayed from the play
//! log, so the two views of a game are deliberately independent.
use rand::Rng;

use crate::ids::{PlayerId, TeamId};
use crate::numbers::{share, split_evenly};
use crate::records::{PlayerGameStat, StatLine, TeamGameStat};
use crate::roster::{Player, Position, SkillGroups};

const YARDS_PER_POINT: u32 = 10;
const BASE_YARDS_MIN: u32 = 180;
const BASE_YARDS_MAX: u32 = 360;
const PASS_SHARE: f64 = 0.6;
const RUSH_SHARE: f64 = 0.4;
const MAX_TURNOVERS: u32 = 2;

const QB_ATTEMPTS: u32 = 25;
const QB_COMPLETIONS: u32 = 16;
const MAX_PASS_TD: u32 = 3;
const MAX_PASS_INT: u32 = 2;
const RB_CARRIES: u32 = 12;
const OTHER_CARRIES: u32 = 4;
const BASE_RECEPTIONS: u32 = 4;
const RUSH_TD_THRESHOLD: u32 = 80;
const PASS_TD_THRESHOLD: u32 = 120;

/// Total yards for a side: ten per point plus a random base.
pub fn total_yards<R: Rng + ?Sized>(score: u32, rng: &mut R) -> u32 {
    score * YARDS_PER_POINT + rng.gen_range(BASE_YARDS_MIN..=BASE_YARDS_MAX)
}

/// Team line for a side's total yardage.
pub fn team_line<R: Rng + ?Sized>(team: TeamId, total_yards: u32, rng: &mut R) -> TeamGameStat {
    TeamGameStat {
        team,
        total_yards,
        pass_yards: share(total_yards, PASS_SHARE),
        rush_yards: share(total_yards, RUSH_SHARE),
        turnovers: rng.gen_range(0..=MAX_TURNOVERS),
    }
}

/// Individual lines for a side's skill players.
///
/// A player who lands in more than one group (a quarterback who also
/// carries the ball) gets a single line holding every counter.
pub fn player_lines<R: Rng + ?Sized>(
    team: TeamId,
    groups: &SkillGroups,
    total_yards: u32,
    rng: &mut R,
) -> Vec<PlayerGameStat> {
    let pass_yds = share(total_yards, PASS_SHARE);
    let rush_yds = total_yards - pass_yds;
    let mut lines: Vec<PlayerGameStat> = Vec::new();

    if let Some(qb) = groups.quarterbacks.first() {
        let line = line_for(&mut lines, team, qb);
        line.pass_att = QB_ATTEMPTS;
        line.pass_cmp = QB_COMPLETIONS;
        line.pass_yds = pass_yds;
        line.pass_td = rng.gen_range(0..=MAX_PASS_TD);
        line.pass_int = rng.gen_range(0..=MAX_PASS_INT);
    }

    let rushers = groups.rushers();
    for (idx, (player, yards)) in rushers
        .iter()
        .zip(split_evenly(rush_yds, rushers.len()))
        .enumerate()
    {
        let line = line_for(&mut lines, team, player);
        line.rush_att = if player.position == Position::Rb {
            RB_CARRIES
        } else {
            OTHER_CARRIES
        };
        line.rush_yds = yards;
        line.rush_td = u32::from(idx == 0 && rush_yds > RUSH_TD_THRESHOLD);
    }

    let targets = groups.targets();
    for ((idx, player), yards) in targets
        .iter()
        .enumerate()
        .zip(split_evenly(pass_yds, targets.len()))
    {
        let line = line_for(&mut lines, team, player);
        line.rec = BASE_RECEPTIONS + u32::try_from(idx).unwrap_or(0);
        line.rec_yds = yards;
        line.rec_td = u32::from(idx == 0 && pass_yds > PASS_TD_THRESHOLD);
    }

    lines
}

fn line_for<'a>(
    lines: &'a mut Vec<PlayerGameStat>,
    team: TeamId,
    player: &Player,
) -> &'a mut StatLine {
    let idx = match position_of(lines, player.id) {
        Some(idx) => idx,
        None => {
            lines.push(PlayerGameStat::new(player.id, team, player.position));
            lines.len() - 1
        }
    };
    &mut lines[idx].line
}

fn position_of(lines: &[PlayerGameStat], player: PlayerId) -> Option<usize> {
    lines.iter().position(|l| l.player == player)
}
