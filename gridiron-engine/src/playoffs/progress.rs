use log::debug;

use super::{
    GameRef, LEAGUE_LABEL, Matchup, MatchupRecord, PlayoffProgress, PlayoffRound, PlayoffSeed,
    conference_bracket, group_by_conference, pair_inward,
};
use crate::ids::{GameId, TeamId};
use crate::season::{GameView, decide};

/// Most relevant playoff game between two teams: completed games first, then
/// the latest week, then the highest game id.
fn locate_game(games: &[GameView], a: TeamId, b: TeamId) -> Option<&GameView> {
    games
        .iter()
        .filter(|view| view.is_playoffs && view.game.involves_pair(a, b))
        .max_by_key(|view| recency(view))
}

fn recency(view: &GameView) -> (bool, u32, GameId) {
    (view.game.is_completed(), view.week_number, view.game.id)
}

/// Winner of a completed game with distinct scores.
fn decided_winner(view: &GameView) -> Option<TeamId> {
    if !view.game.is_completed() {
        return None;
    }
    let game = &view.game;
    let (winner, _) = decide(
        game.home_team,
        game.away_team,
        game.home_score,
        game.away_score,
    );
    winner
}

fn resolve(matchup: Matchup, games: &[GameView]) -> MatchupRecord {
    let Matchup {
        round,
        conference_id,
        conference,
        higher_seed,
        lower_seed,
    } = matchup;

    let (game, winner) = match &lower_seed {
        None => (None, Some(higher_seed.clone())),
        Some(lower) => {
            let view = locate_game(games, higher_seed.team_id(), lower.team_id());
            let winner_team = view.and_then(decided_winner);
            let winner = [&higher_seed, lower]
                .into_iter()
                .find(|s| Some(s.team_id()) == winner_team)
                .cloned();
            let game = view.map(|v| GameRef {
                id: v.game.id,
                status: v.game.status,
                home_score: v.game.home_score,
                away_score: v.game.away_score,
            });
            (game, winner)
        }
    };

    let winning_conference = if round == PlayoffRound::Championship {
        winner.as_ref().map(PlayoffSeed::conference_id)
    } else {
        None
    };

    MatchupRecord {
        round,
        conference_id,
        conference,
        higher_seed,
        lower_seed,
        game,
        winner_seed: winner.as_ref().map(|s| s.seed),
        winner_team: winner.as_ref().map(PlayoffSeed::team_id),
        winning_conference,
    }
}

/// Where one conference's bracket stands.
enum ConferenceState {
    Champion(PlayoffSeed),
    /// Sole decided divisional game winner while the other is still open.
    Provisional(PlayoffSeed),
    Pending,
}

/// Walk one conference's rounds as far as results allow.
fn conference_progress(
    group: &[PlayoffSeed],
    games: &[GameView],
    out: &mut Vec<MatchupRecord>,
) -> ConferenceState {
    let mut round = PlayoffRound::Wildcard;
    let mut matchups = conference_bracket(group);
    loop {
        let records: Vec<MatchupRecord> = matchups
            .into_iter()
            .map(|matchup| resolve(matchup, games))
            .collect();
        let winners: Vec<PlayoffSeed> = records
            .iter()
            .filter_map(|r| r.winner().cloned())
            .collect();
        let complete = winners.len() == records.len();
        let game_winners: Vec<PlayoffSeed> = records
            .iter()
            .filter(|r| r.is_two_sided())
            .filter_map(|r| r.winner().cloned())
            .collect();

        if !complete {
            debug!("{round} round still pending");
            let state = match (round, game_winners.as_slice()) {
                (PlayoffRound::Divisional, [only]) => ConferenceState::Provisional(only.clone()),
                _ => ConferenceState::Pending,
            };
            out.extend(records);
            return state;
        }
        out.extend(records);

        if let [champion] = winners.as_slice() {
            return ConferenceState::Champion(champion.clone());
        }
        let Some(next) = round.next_in_conference() else {
            return ConferenceState::Pending;
        };
        matchups = pair_inward(&winners, next);
        round = next;
    }
}

/// Current bracket state for a seed list and the season's games.
///
/// Later rounds appear only once every matchup of the round before has a
/// winner. Missing, unfinished and tied games leave their matchup pending.
#[must_use]
pub fn playoff_progress(seeds: &[PlayoffSeed], games: &[GameView]) -> PlayoffProgress {
    let mut progress = PlayoffProgress::default();
    let groups = group_by_conference(seeds);

    for (conference_id, group) in &groups {
        match conference_progress(group, games, &mut progress.matchups) {
            ConferenceState::Champion(champion) => {
                debug!("{conference_id} champion is {}", champion.team_id());
                progress.conference_champions.push(champion);
            }
            ConferenceState::Provisional(leader) => {
                debug!(
                    "{conference_id} provisional champion is {}",
                    leader.team_id()
                );
                progress.provisional_champions.push(leader);
            }
            ConferenceState::Pending => {}
        }
    }

    progress.champion = match progress.conference_champions.as_slice() {
        [only] if groups.len() == 1 => Some(only.clone()),
        [first, second, ..] => {
            let record = resolve(
                Matchup {
                    round: PlayoffRound::Championship,
                    conference_id: None,
                    conference: LEAGUE_LABEL.to_string(),
                    higher_seed: first.clone(),
                    lower_seed: Some(second.clone()),
                },
                games,
            );
            let champion = record.winner().cloned();
            progress.matchups.push(record);
            champion
        }
        _ => None,
    };
    progress
}
