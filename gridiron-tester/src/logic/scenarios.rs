use anyhow::{Context, Result, ensure};
use gridiron_engine::{
    EngineConfig, GameId, LeagueStore, MemoryStore, PlayoffRound, SeasonEngine, SeasonId, SimRng,
    StatCategory,
};
use std::collections::{BTreeMap, HashSet};

use super::league_builder::LeagueFixture;

const SEASON_YEAR: i32 = 2025;

/// Inputs shared by every scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub seed: u64,
    pub fixture: LeagueFixture,
    pub config: &'a EngineConfig,
    pub verbose: bool,
}

/// A named end-to-end check over a freshly built league.
#[derive(Debug, Clone, Copy)]
pub struct SeasonScenario {
    pub key: &'static str,
    pub description: &'static str,
    run: fn(&ScenarioCtx<'_>) -> Result<()>,
}

impl SeasonScenario {
    /// # Errors
    ///
    /// Returns the first failed expectation, or any engine error raised on
    /// the way.
    pub fn run(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        (self.run)(ctx)
    }
}

const CATALOG: &[SeasonScenario] = &[
    SeasonScenario {
        key: "round-robin",
        description: "Every pair meets once and no team plays twice in a week",
        run: round_robin,
    },
    SeasonScenario {
        key: "standings",
        description: "Standings balance wins, losses and points after a full season",
        run: standings_balance,
    },
    SeasonScenario {
        key: "playoffs",
        description: "Playoff rounds advance week by week to a single champion",
        run: playoffs_to_champion,
    },
    SeasonScenario {
        key: "determinism",
        description: "The same seed simulates the same game",
        run: determinism,
    },
    SeasonScenario {
        key: "stat-leaders",
        description: "Season stat lines cover every team and leaders are ranked",
        run: stat_leaders,
    },
    SeasonScenario {
        key: "snapshot",
        description: "A saved league reloads with identical standings",
        run: snapshot_round_trip,
    },
];

#[must_use]
pub fn get_scenario(key: &str) -> Option<&'static SeasonScenario> {
    CATALOG.iter().find(|s| s.key == key)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.iter().map(|s| (s.key, s.description)).collect()
}

#[must_use]
pub fn all_scenario_keys() -> Vec<String> {
    CATALOG.iter().map(|s| s.key.to_string()).collect()
}

fn scheduled_league(ctx: &ScenarioCtx<'_>) -> Result<(SeasonEngine<MemoryStore>, SeasonId)> {
    let (mut engine, league) = ctx.fixture.build(ctx.seed, ctx.config)?;
    let schedule = engine.generate_schedule(league, SEASON_YEAR)?;
    Ok((engine, schedule.season.id))
}

fn play_regular_season(
    engine: &mut SeasonEngine<MemoryStore>,
    season: SeasonId,
    seed: u64,
) -> Result<usize> {
    let games = engine.store().games(season)?;
    let ids: Vec<GameId> = games.iter().map(|v| v.id()).collect();
    for (n, id) in ids.iter().enumerate() {
        let game_seed = seed.wrapping_add(u64::try_from(n).unwrap_or(u64::MAX));
        engine.play_game(*id, &SimRng::from_user_seed(game_seed))?;
    }
    Ok(ids.len())
}

/// Simulate a playoff game; a tie is broken with a field goal for the home side.
fn play_decisive(engine: &mut SeasonEngine<MemoryStore>, game: GameId, seed: u64) -> Result<()> {
    let played = engine.play_game(game, &SimRng::from_user_seed(seed))?;
    if played.winner.is_none() {
        engine.complete_game(
            game,
            i64::from(played.home_score) + 3,
            i64::from(played.away_score),
        )?;
    }
    Ok(())
}

fn round_robin(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let (engine, season) = scheduled_league(ctx)?;
    let teams = usize::try_from(ctx.fixture.team_count())?;
    let games = engine.store().games(season)?;
    let weeks = engine.store().weeks(season)?;

    let expected_weeks = if teams % 2 == 0 { teams - 1 } else { teams };
    ensure!(
        weeks.len() == expected_weeks,
        "expected {expected_weeks} weeks for {teams} teams, got {}",
        weeks.len()
    );
    ensure!(
        games.len() == teams * (teams - 1) / 2,
        "expected every pair once, got {} games",
        games.len()
    );

    let mut pairs = HashSet::new();
    let mut per_week: BTreeMap<u32, HashSet<_>> = BTreeMap::new();
    for view in &games {
        let game = &view.game;
        ensure!(
            game.home_team != game.away_team,
            "{} pits a team against itself",
            game.id
        );
        let key = if game.home_team < game.away_team {
            (game.home_team, game.away_team)
        } else {
            (game.away_team, game.home_team)
        };
        ensure!(pairs.insert(key), "{} repeats a pairing", game.id);
        let week = per_week.entry(view.week_number).or_default();
        ensure!(
            week.insert(game.home_team) && week.insert(game.away_team),
            "a team plays twice in week {}",
            view.week_number
        );
    }
    Ok(())
}

fn standings_balance(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let (mut engine, season) = scheduled_league(ctx)?;
    let played = play_regular_season(&mut engine, season, ctx.seed)?;
    let standings = engine.compute_standings(season)?;
    let teams = usize::try_from(ctx.fixture.team_count())?;

    ensure!(
        standings.len() == teams,
        "standings list {} teams",
        standings.len()
    );
    let wins: u32 = standings.iter().map(|r| r.wins).sum();
    let losses: u32 = standings.iter().map(|r| r.losses).sum();
    let appearances: u32 = standings.iter().map(|r| r.games_played()).sum();
    let points_for: u64 = standings.iter().map(|r| r.points_for).sum();
    let points_against: u64 = standings.iter().map(|r| r.points_against).sum();
    ensure!(wins == losses, "{wins} wins against {losses} losses");
    ensure!(
        usize::try_from(appearances)? == played * 2,
        "{appearances} team appearances for {played} games"
    );
    ensure!(
        points_for == points_against,
        "points for {points_for} vs against {points_against}"
    );
    let ranks: Vec<(u32, u64)> = standings.iter().map(|r| (r.wins, r.points_for)).collect();
    ensure!(
        ranks.windows(2).all(|w| w[0] >= w[1]),
        "standings are out of order"
    );
    if ctx.verbose {
        if let Some(top) = standings.first() {
            println!(
                "    leader {} {}-{}-{}",
                top.abbreviation,
                top.wins,
                top.losses,
                top.ties
            );
        }
    }
    Ok(())
}

fn playoffs_to_champion(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let (mut engine, season) = scheduled_league(ctx)?;
    play_regular_season(&mut engine, season, ctx.seed)?;
    let seeds_before = engine.generate_playoff_seeds(season, None)?;

    let mut rounds = 0;
    let mut game_seed = ctx.seed.wrapping_mul(31);
    loop {
        let created = engine.advance_playoff_rounds(season, None)?;
        if created.is_empty() {
            break;
        }
        rounds += 1;
        ensure!(
            rounds <= PlayoffRound::ALL.len(),
            "playoffs did not settle after {rounds} rounds"
        );
        for id in created {
            game_seed = game_seed.wrapping_add(1);
            play_decisive(&mut engine, id, game_seed)?;
        }
    }

    let progress = engine.playoff_progress(season, None)?;
    ensure!(
        progress.pending().next().is_none(),
        "bracket still has pending matchups"
    );
    let champion = progress.champion.as_ref().context("no champion crowned")?;
    if ctx.fixture.conferences > 1 {
        ensure!(
            progress.round(PlayoffRound::Championship).count() == 1,
            "expected one championship game"
        );
    }
    ensure!(
        engine.generate_playoff_seeds(season, None)? == seeds_before,
        "playoff results changed the seeding"
    );
    ensure!(
        engine.advance_playoff_rounds(season, None)?.is_empty(),
        "advancing a finished bracket created games"
    );
    if ctx.verbose {
        println!(
            "    champion {} (seed {}, {})",
            champion.record.abbreviation,
            champion.seed,
            champion.record.conference
        );
    }
    Ok(())
}

fn determinism(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let (engine, season) = scheduled_league(ctx)?;
    let first = engine
        .store()
        .games(season)?
        .first()
        .map(|v| v.id())
        .context("schedule has no games")?;
    let a = engine.simulate_game(first, &SimRng::from_user_seed(ctx.seed))?;
    let b = engine.simulate_game(first, &SimRng::from_user_seed(ctx.seed))?;
    ensure!(a == b, "seed {} produced two different games", ctx.seed);
    ensure!(
        u64::try_from(a.plays.len())? == u64::from(ctx.config.simulation.total_plays()),
        "expected {} plays, got {}",
        ctx.config.simulation.total_plays(),
        a.plays.len()
    );
    Ok(())
}

fn stat_leaders(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let (mut engine, season) = scheduled_league(ctx)?;
    play_regular_season(&mut engine, season, ctx.seed)?;
    let teams = ctx.fixture.team_count();

    let team_lines = engine.team_season_stats(season)?;
    ensure!(
        team_lines.len() == usize::try_from(teams)?,
        "team stats cover {} teams",
        team_lines.len()
    );
    ensure!(
        team_lines.iter().all(|l| l.games == teams - 1),
        "every team should log one stat line per game"
    );

    for category in StatCategory::ALL {
        let leaders = engine.player_leaders(season, category, 10)?;
        ensure!(
            leaders.len() <= 10,
            "{category} returned {} leaders",
            leaders.len()
        );
        let values: Vec<u32> = leaders.iter().map(|l| category.value(&l.totals)).collect();
        ensure!(
            values.windows(2).all(|w| w[0] >= w[1]),
            "{category} leaders are out of order"
        );
    }
    Ok(())
}

fn snapshot_round_trip(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let (mut engine, season) = scheduled_league(ctx)?;
    play_regular_season(&mut engine, season, ctx.seed)?;

    let path = std::env::temp_dir().join(format!(
        "gridiron-tester-{}-{}.json",
        std::process::id(),
        ctx.seed
    ));
    engine.save_snapshot(&path)?;
    let restored = SeasonEngine::load_snapshot(&path, ctx.config.clone());
    let _ = std::fs::remove_file(&path);
    let restored = restored?;

    ensure!(
        restored.compute_standings(season)? == engine.compute_standings(season)?,
        "standings differ after reload"
    );
    ensure!(
        restored.team_season_stats(season)? == engine.team_season_stats(season)?,
        "team stats differ after reload"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(config: &EngineConfig) -> ScenarioCtx<'_> {
        ScenarioCtx {
            seed: 42,
            fixture: LeagueFixture {
                conferences: 2,
                teams_per_conference: 4,
            },
            config,
            verbose: false,
        }
    }

    #[test]
    fn catalog_keys_are_unique() {
        let keys = all_scenario_keys();
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
        assert!(get_scenario("playoffs").is_some());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn every_scenario_passes_on_a_small_league() {
        let config = EngineConfig::default();
        for scenario in CATALOG {
            scenario
                .run(&ctx(&config))
                .unwrap_or_else(|e| panic!("{} failed: {e:#}", scenario.key));
        }
    }

    #[test]
    fn odd_team_counts_get_a_bye_week() {
        let config = EngineConfig::default();
        let mut odd = ctx(&config);
        odd.fixture = LeagueFixture {
            conferences: 1,
            teams_per_conference: 5,
        };
        round_robin(&odd).unwrap();
        playoffs_to_champion(&odd).unwrap();
    }
}
