use gridiron_engine::{
    EngineConfig, GameId, LeagueId, LeagueSetup, LeagueStore, MemoryStore, NewPlayer, NewTeam,
    PlayoffRound, Position, SeasonEngine, SeasonId, SimRng, StatCategory,
};

const TEAMS_PER_CONFERENCE: u32 = 8;

fn build_league() -> (SeasonEngine<MemoryStore>, LeagueId) {
    let mut engine = SeasonEngine::new(MemoryStore::new());
    let league = engine
        .create_league(&LeagueSetup::new("Integration League"))
        .unwrap();
    let conferences = engine.store().conferences(league.id).unwrap();
    let divisions = engine.store().divisions(league.id).unwrap();

    for (c, conference) in conferences.iter().enumerate() {
        let own: Vec<_> = divisions
            .iter()
            .filter(|d| d.conference == conference.id)
            .collect();
        for n in 0..TEAMS_PER_CONFERENCE {
            let division = own[n as usize % own.len()];
            let abbr = format!("C{c}T{n}");
            let input = NewTeam::new(
                format!("Club {c}-{n}"),
                abbr.clone(),
                conference.id,
                division.id,
            );
            let team = engine.add_team(league.id, &input).unwrap();
            let lineup = [
                (Position::Qb, 60 + n as u8 * 3),
                (Position::Rb, 65),
                (Position::Rb, 58),
                (Position::Wr, 70),
                (Position::Wr, 62),
                (Position::Te, 55),
                (Position::Lb, 68),
            ];
            for (i, (position, overall)) in lineup.into_iter().enumerate() {
                let player = NewPlayer::new(format!("P{i}"), abbr.clone(), position, overall);
                engine.add_player(team.id, &player).unwrap();
            }
        }
    }
    (engine, league.id)
}

/// Simulate a game; ties are settled with a field goal so playoff rounds
/// can always advance.
fn play_decisive(engine: &mut SeasonEngine<MemoryStore>, game: GameId, seed: u64) {
    let played = engine
        .play_game(game, &SimRng::from_user_seed(seed))
        .unwrap();
    if played.winner.is_none() {
        engine
            .complete_game(
                game,
                i64::from(played.home_score) + 3,
                i64::from(played.away_score),
            )
            .unwrap();
    }
}

fn play_regular_season(engine: &mut SeasonEngine<MemoryStore>, season: SeasonId) {
    let ids: Vec<GameId> = engine
        .store()
        .games(season)
        .unwrap()
        .iter()
        .map(|view| view.id())
        .collect();
    for (n, id) in ids.into_iter().enumerate() {
        engine
            .play_game(id, &SimRng::from_user_seed(1_000 + n as u64))
            .unwrap();
    }
}

#[test]
fn season_runs_from_schedule_to_champion() {
    let (mut engine, league) = build_league();
    let schedule = engine.generate_schedule(league, 2025).unwrap();
    let team_count = TEAMS_PER_CONFERENCE as usize * 2;
    assert_eq!(schedule.weeks.len(), team_count - 1);
    assert_eq!(schedule.games, team_count * (team_count - 1) / 2);

    let season = schedule.season.id;
    play_regular_season(&mut engine, season);
    let seeds_before = engine.generate_playoff_seeds(season, None).unwrap();
    assert_eq!(seeds_before.len(), 14);

    let mut rounds = 0;
    let mut seed = 50;
    loop {
        let created = engine.advance_playoff_rounds(season, None).unwrap();
        if created.is_empty() {
            break;
        }
        rounds += 1;
        assert!(rounds <= 4, "playoffs should finish in four rounds");
        for id in created {
            seed += 1;
            play_decisive(&mut engine, id, seed);
        }
    }
    assert_eq!(rounds, 4);

    let progress = engine.playoff_progress(season, None).unwrap();
    assert_eq!(progress.pending().count(), 0);
    assert_eq!(progress.conference_champions.len(), 2);
    let champion = progress.champion.clone().expect("champion crowned");
    let final_game: Vec<_> = progress.round(PlayoffRound::Championship).collect();
    assert_eq!(final_game.len(), 1);
    assert_eq!(final_game[0].winner_team, Some(champion.team_id()));
    assert_eq!(final_game[0].conference, "League");
    assert_eq!(
        final_game[0].winning_conference,
        Some(champion.conference_id())
    );

    // Playoff weeks follow the regular season directly.
    let weeks = engine.store().weeks(season).unwrap();
    let playoff_weeks: Vec<u32> = weeks
        .iter()
        .filter(|w| w.is_playoffs)
        .map(|w| w.number)
        .collect();
    let last = u32::try_from(team_count - 1).unwrap();
    assert_eq!(playoff_weeks, vec![last + 1, last + 2, last + 3, last + 4]);
    let playoff_games = engine
        .store()
        .games(season)
        .unwrap()
        .iter()
        .filter(|g| g.is_playoffs)
        .count();
    assert_eq!(playoff_games, 6 + 4 + 2 + 1);

    // Seeding ignores playoff results.
    let reseeded = engine.generate_playoff_seeds(season, None).unwrap();
    assert_eq!(reseeded, seeds_before);
    let again = engine.advance_playoff_rounds(season, None).unwrap();
    assert!(again.is_empty());

    let leaders = engine
        .player_leaders(season, StatCategory::PassYds, 5)
        .unwrap();
    assert_eq!(leaders.len(), 5);
    assert!(
        leaders
            .windows(2)
            .all(|w| w[0].totals.pass_yds >= w[1].totals.pass_yds)
    );
    assert!(leaders.iter().all(|l| l.position == Position::Qb));
    assert_eq!(engine.team_season_stats(season).unwrap().len(), team_count);
}

#[test]
fn advancing_twice_creates_nothing_new() {
    let (mut engine, league) = build_league();
    let season = engine.generate_schedule(league, 2026).unwrap().season.id;
    play_regular_season(&mut engine, season);

    let first = engine.advance_playoff_rounds(season, Some(4)).unwrap();
    assert_eq!(first.len(), 4);
    let second = engine.advance_playoff_rounds(season, Some(4)).unwrap();
    assert!(second.is_empty());
}

#[test]
fn unfinished_round_blocks_the_next() {
    let (mut engine, league) = build_league();
    let season = engine.generate_schedule(league, 2027).unwrap().season.id;
    play_regular_season(&mut engine, season);

    let wildcard = engine.advance_playoff_rounds(season, None).unwrap();
    assert_eq!(wildcard.len(), 6);
    for (n, id) in wildcard.iter().skip(1).enumerate() {
        play_decisive(&mut engine, *id, 700 + n as u64);
    }

    let progress = engine.playoff_progress(season, None).unwrap();
    let pending: Vec<_> = progress.pending().map(|m| m.round).collect();
    assert_eq!(
        pending,
        vec![
            PlayoffRound::Wildcard,
            PlayoffRound::Divisional,
            PlayoffRound::Divisional,
        ]
    );
    assert!(progress.champion.is_none());
    // The conference with every wildcard game decided moves on alone.
    let created = engine.advance_playoff_rounds(season, None).unwrap();
    assert_eq!(created.len(), 2);
    let divisional = engine.playoff_progress(season, None).unwrap();
    assert_eq!(divisional.round(PlayoffRound::Divisional).count(), 2);
}

#[test]
fn snapshots_round_trip_through_disk() {
    let (mut engine, league) = build_league();
    let season = engine.generate_schedule(league, 2028).unwrap().season.id;
    play_regular_season(&mut engine, season);

    let path = std::env::temp_dir().join(format!("gridiron-snapshot-{}.json", std::process::id()));
    engine.save_snapshot(&path).unwrap();
    let restored = SeasonEngine::load_snapshot(&path, EngineConfig::default()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(
        restored.compute_standings(season).unwrap(),
        engine.compute_standings(season).unwrap()
    );
    assert_eq!(
        restored.player_season_stats(season).unwrap(),
        engine.player_season_stats(season).unwrap()
    );
}

#[test]
fn missing_snapshot_reports_context() {
    let path = std::env::temp_dir().join("gridiron-snapshot-missing.json");
    let err = SeasonEngine::load_snapshot(&path, EngineConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("loading league snapshot"));
}
