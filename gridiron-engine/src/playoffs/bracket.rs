use super::{Matchup, PlayoffRound, PlayoffSeed, group_by_conference};

/// Pair the best remaining seed with the worst, moving inward. With an odd
/// count the middle seed is left unpaired and gets a bye.
///
/// Seeds are ordered by seed number first, so callers may pass survivors in
/// any order.
#[must_use]
pub fn pair_inward(seeds: &[PlayoffSeed], round: PlayoffRound) -> Vec<Matchup> {
    let mut ordered = seeds.to_vec();
    ordered.sort_by_key(|s| s.seed);
    let Some(first) = ordered.first() else {
        return Vec::new();
    };
    let conference_id = Some(first.conference_id());
    let conference = first.record.conference.clone();

    let mut matchups = Vec::with_capacity(ordered.len().div_ceil(2));
    let (mut lo, mut hi) = (0usize, ordered.len());
    while lo < hi {
        hi -= 1;
        let higher_seed = ordered[lo].clone();
        let lower_seed = (lo < hi).then(|| ordered[hi].clone());
        matchups.push(Matchup {
            round,
            conference_id,
            conference: conference.clone(),
            higher_seed,
            lower_seed,
        });
        lo += 1;
    }
    matchups
}

/// Wildcard round for one conference.
///
/// A full seven-seed field gives the top seed the lone bye and plays 2v7,
/// 3v6 and 4v5. Any other field size pairs inward.
#[must_use]
pub fn conference_bracket(seeds: &[PlayoffSeed]) -> Vec<Matchup> {
    if seeds.len() != 7 {
        return pair_inward(seeds, PlayoffRound::Wildcard);
    }
    let mut ordered = seeds.to_vec();
    ordered.sort_by_key(|s| s.seed);
    let conference_id = Some(ordered[0].conference_id());
    let conference = ordered[0].record.conference.clone();
    let matchup = |higher: usize, lower: Option<usize>| Matchup {
        round: PlayoffRound::Wildcard,
        conference_id,
        conference: conference.clone(),
        higher_seed: ordered[higher].clone(),
        lower_seed: lower.map(|idx| ordered[idx].clone()),
    };
    vec![
        matchup(0, None),
        matchup(1, Some(6)),
        matchup(2, Some(5)),
        matchup(3, Some(4)),
    ]
}

/// Wildcard matchups for every conference, in seed-list conference order.
#[must_use]
pub fn generate_bracket(seeds: &[PlayoffSeed]) -> Vec<Matchup> {
    group_by_conference(seeds)
        .into_iter()
        .flat_map(|(_, group)| conference_bracket(&group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playoffs::fixtures::{seed_pair, seeds};

    fn shape(matchups: &[Matchup]) -> Vec<(u32, Option<u32>)> {
        matchups
            .iter()
            .map(|m| seed_pair(&m.higher_seed, m.lower_seed.as_ref()))
            .collect()
    }

    #[test]
    fn seven_seeds_give_the_top_seed_a_bye() {
        let bracket = conference_bracket(&seeds(1, 0, 7));
        assert_eq!(
            shape(&bracket),
            vec![(1, None), (2, Some(7)), (3, Some(6)), (4, Some(5))]
        );
        assert!(bracket.iter().all(|m| m.round == PlayoffRound::Wildcard));
        assert!(bracket[0].is_bye());
    }

    #[test]
    fn even_fields_pair_highest_with_lowest() {
        let bracket = conference_bracket(&seeds(1, 0, 6));
        assert_eq!(
            shape(&bracket),
            vec![(1, Some(6)), (2, Some(5)), (3, Some(4))]
        );
        let bracket = conference_bracket(&seeds(1, 0, 2));
        assert_eq!(shape(&bracket), vec![(1, Some(2))]);
    }

    #[test]
    fn odd_fields_bye_the_middle_seed() {
        let bracket = conference_bracket(&seeds(1, 0, 5));
        assert_eq!(shape(&bracket), vec![(1, Some(5)), (2, Some(4)), (3, None)]);
        let bracket = conference_bracket(&seeds(1, 0, 1));
        assert_eq!(shape(&bracket), vec![(1, None)]);
    }

    #[test]
    fn nine_seeds_leave_exactly_one_bye() {
        let bracket = conference_bracket(&seeds(1, 0, 9));
        assert_eq!(
            shape(&bracket),
            vec![
                (1, Some(9)),
                (2, Some(8)),
                (3, Some(7)),
                (4, Some(6)),
                (5, None),
            ]
        );
        assert_eq!(bracket.iter().filter(|m| m.is_bye()).count(), 1);

        let bracket = conference_bracket(&seeds(1, 0, 12));
        assert_eq!(bracket.len(), 6);
        assert!(bracket.iter().all(|m| !m.is_bye()));
    }

    #[test]
    fn reseeding_ignores_input_order() {
        let mut survivors = seeds(1, 0, 4);
        survivors.reverse();
        let pairs = pair_inward(&survivors, PlayoffRound::Divisional);
        assert_eq!(shape(&pairs), vec![(1, Some(4)), (2, Some(3))]);
        assert!(pair_inward(&[], PlayoffRound::Divisional).is_empty());
    }

    #[test]
    fn bracket_covers_each_conference() {
        let mut all = seeds(1, 0, 7);
        all.extend(seeds(2, 100, 7));
        let bracket = generate_bracket(&all);
        assert_eq!(bracket.len(), 8);
        assert_eq!(bracket[0].conference, "Conference 1");
        assert_eq!(bracket[4].conference, "Conference 2");
        assert_eq!(bracket[5].higher_seed.team_id().get(), 102);
        let visitor = bracket[5].lower_seed.as_ref().map(|s| s.team_id().get());
        assert_eq!(visitor, Some(107));
        assert!(generate_bracket(&[]).is_empty());
    }
}
