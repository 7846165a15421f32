use std::collections::BTreeMap;

use super::{MAX_SEEDS_PER_CONFERENCE, PlayoffSeed};
use crate::error::{EngineError, EngineResult};
use crate::ids::ConferenceId;
use crate::standings::StandingRecord;

/// Reject an empty seed request. Seeding and bracket generation take any
/// positive count.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSeedCount`] when `seeds` is zero.
pub fn check_seed_count(seeds: usize) -> EngineResult<usize> {
    if seeds == 0 {
        Err(EngineError::InvalidSeedCount { requested: seeds })
    } else {
        Ok(seeds)
    }
}

/// Seed count check for bracket progress and advancement, which only have
/// the Wildcard, Divisional and Conference rounds to reach one champion.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSeedCount`] for zero and
/// [`EngineError::BracketTooLarge`] above `MAX_SEEDS_PER_CONFERENCE`.
pub fn check_playable_seed_count(seeds: usize) -> EngineResult<usize> {
    if seeds > MAX_SEEDS_PER_CONFERENCE {
        return Err(EngineError::BracketTooLarge {
            seeds,
            max: MAX_SEEDS_PER_CONFERENCE,
        });
    }
    check_seed_count(seeds)
}

/// Top `per_conference` teams of each conference, keeping standings order.
///
/// The result is ordered by conference name, then conference id, then seed.
/// Conferences with fewer teams than requested seed only what they have.
#[must_use]
pub fn seed_conferences(standings: &[StandingRecord], per_conference: usize) -> Vec<PlayoffSeed> {
    let mut groups: BTreeMap<ConferenceId, Vec<&StandingRecord>> = BTreeMap::new();
    for record in standings {
        groups.entry(record.conference_id).or_default().push(record);
    }

    let mut seeds: Vec<PlayoffSeed> = groups
        .into_values()
        .flat_map(|records| {
            records
                .into_iter()
                .take(per_conference)
                .zip(1u32..)
                .map(|(record, seed)| PlayoffSeed {
                    seed,
                    record: record.clone(),
                })
        })
        .collect();

    seeds.sort_by(|a, b| {
        a.record
            .conference
            .cmp(&b.record.conference)
            .then_with(|| a.conference_id().cmp(&b.conference_id()))
            .then_with(|| a.seed.cmp(&b.seed))
    });
    seeds
}

/// Split a seed list into per-conference groups, preserving first-seen order.
#[must_use]
pub fn group_by_conference(seeds: &[PlayoffSeed]) -> Vec<(ConferenceId, Vec<PlayoffSeed>)> {
    let mut groups: Vec<(ConferenceId, Vec<PlayoffSeed>)> = Vec::new();
    for seed in seeds {
        let conference = seed.conference_id();
        match groups.iter_mut().find(|(id, _)| *id == conference) {
            Some((_, group)) => group.push(seed.clone()),
            None => groups.push((conference, vec![seed.clone()])),
        }
    }
    for (_, group) in &mut groups {
        group.sort_by_key(|s| s.seed);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playoffs::fixtures::record;

    #[test]
    fn seeds_follow_standings_order_per_conference() {
        // Standings already sorted; conferences interleave.
        let standings = vec![
            record(1, 2, 9),
            record(2, 1, 8),
            record(3, 2, 7),
            record(4, 1, 6),
            record(5, 1, 5),
        ];
        let seeds = seed_conferences(&standings, 7);
        let flat: Vec<(u32, u32, u32)> = seeds
            .iter()
            .map(|s| (s.conference_id().get(), s.seed, s.team_id().get()))
            .collect();
        assert_eq!(
            flat,
            vec![(1, 1, 2), (1, 2, 4), (1, 3, 5), (2, 1, 1), (2, 2, 3)]
        );
    }

    #[test]
    fn seed_count_caps_each_conference() {
        let standings: Vec<_> = (1..=6).map(|t| record(t, 1, 10 - t)).collect();
        let seeds = seed_conferences(&standings, 4);
        assert_eq!(seeds.len(), 4);
        assert_eq!(seeds.last().map(|s| s.seed), Some(4));
        assert!(seed_conferences(&[], 7).is_empty());
    }

    #[test]
    fn conferences_sharing_a_name_stay_apart() {
        let mut a = record(1, 5, 3);
        let mut b = record(2, 3, 2);
        a.conference = "Same".into();
        b.conference = "Same".into();
        let seeds = seed_conferences(&[a, b], 7);
        assert_eq!(seeds.len(), 2);
        assert!(seeds.iter().all(|s| s.seed == 1));
        // Name ties fall back to conference id.
        assert_eq!(seeds[0].conference_id(), ConferenceId(3));
        assert_eq!(group_by_conference(&seeds).len(), 2);
    }

    #[test]
    fn seed_count_bounds() {
        assert!(check_seed_count(1).is_ok());
        assert!(matches!(check_seed_count(12), Ok(12)));
        assert!(matches!(
            check_seed_count(0),
            Err(EngineError::InvalidSeedCount { requested: 0 })
        ));
    }

    #[test]
    fn playable_seed_count_stops_at_three_rounds() {
        assert!(check_playable_seed_count(8).is_ok());
        assert!(matches!(
            check_playable_seed_count(9),
            Err(EngineError::BracketTooLarge { seeds: 9, max: 8 })
        ));
        assert!(matches!(
            check_playable_seed_count(0),
            Err(EngineError::InvalidSeedCount { requested: 0 })
        ));
    }

    #[test]
    fn large_seed_counts_take_the_whole_conference() {
        let standings: Vec<_> = (1..=10).map(|t| record(t, 1, 20 - t)).collect();
        let seeds = seed_conferences(&standings, 9);
        assert_eq!(seeds.len(), 9);
        let last = seeds.last().map(|s| (s.seed, s.team_id().get()));
        assert_eq!(last, Some((9, 9)));
        assert_eq!(seed_conferences(&standings, 10).len(), 10);
    }
}
