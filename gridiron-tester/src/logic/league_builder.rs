use anyhow::{Context, Result};
use gridiron_engine::{
    EngineConfig, LeagueId, LeagueSetup, LeagueShape, LeagueStore, MemoryStore, NewPlayer,
    NewTeam, Position, SeasonEngine,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const CITIES: &[&str] = &[
    "Harbor", "Granite", "Prairie", "Summit", "Lakeside", "Ironwood", "Cedar", "Redrock",
    "Bayview", "Northgate", "Foxhill", "Millbrook", "Stonebridge", "Riverton", "Ashford",
    "Kingsport",
];

const NICKNAMES: &[&str] = &[
    "Hawks", "Miners", "Bison", "Comets", "Pilots", "Wolves", "Rangers", "Titans",
];

/// Positions every synthetic roster fills, with a rating bias per slot.
const ROSTER: &[(Position, i16)] = &[
    (Position::Qb, 4),
    (Position::Rb, 2),
    (Position::Rb, -4),
    (Position::Wr, 3),
    (Position::Wr, 0),
    (Position::Wr, -5),
    (Position::Te, -2),
    (Position::Ol, 0),
    (Position::Dl, 0),
    (Position::Lb, 1),
    (Position::Cb, 0),
    (Position::S, -1),
    (Position::K, -8),
];

/// Shape of a synthetic league used by scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueFixture {
    pub conferences: u32,
    pub teams_per_conference: u32,
}

impl Default for LeagueFixture {
    fn default() -> Self {
        Self {
            conferences: 2,
            teams_per_conference: 8,
        }
    }
}

impl LeagueFixture {
    #[must_use]
    pub const fn team_count(&self) -> u32 {
        self.conferences * self.teams_per_conference
    }

    /// Build a league with randomly rated rosters. The same seed always
    /// produces the same league.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the configuration or any part
    /// of the league.
    pub fn build(
        &self,
        seed: u64,
        config: &EngineConfig,
    ) -> Result<(SeasonEngine<MemoryStore>, LeagueId)> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut engine = SeasonEngine::with_config(MemoryStore::new(), config.clone())
            .context("engine configuration rejected")?;
        let shape = LeagueShape {
            conference_count: self.conferences,
            divisions_per_conference: 2,
            teams_per_division: self.teams_per_conference.div_ceil(2),
        };
        let setup = LeagueSetup::new(format!("Fixture League {seed}")).with_shape(shape);
        let league = engine.create_league(&setup)?;

        let conferences = engine.store().conferences(league.id)?;
        let divisions = engine.store().divisions(league.id)?;
        let per_conference = usize::try_from(self.teams_per_conference)?;
        let mut team_number = 0_usize;
        for conference in &conferences {
            let own: Vec<_> = divisions
                .iter()
                .filter(|d| d.conference == conference.id)
                .collect();
            for slot in 0..per_conference {
                let division = own[slot % own.len()];
                let city = CITIES[team_number % CITIES.len()];
                let nickname = NICKNAMES[team_number % NICKNAMES.len()];
                let abbreviation = format!("T{team_number:02}");
                let mut input = NewTeam::new(
                    format!("{city} {nickname}"),
                    abbreviation,
                    conference.id,
                    division.id,
                );
                input.city = city.to_string();
                input.nickname = nickname.to_string();
                let team = engine.add_team(league.id, &input)?;

                let strength: i16 = rng.gen_range(-8..=8);
                for (index, (position, bias)) in ROSTER.iter().enumerate() {
                    let spread: i16 = rng.gen_range(-6..=6);
                    let rating = (65 + strength + bias + spread).clamp(40, 99);
                    let overall = u8::try_from(rating).unwrap_or(65);
                    let player = NewPlayer::new(
                        format!("{}{index}", position.code()),
                        team.abbreviation.clone(),
                        *position,
                        overall,
                    );
                    engine.add_player(team.id, &player)?;
                }
                team_number += 1;
            }
        }
        log::debug!("built {} teams for fixture seed {seed}", team_number);
        Ok((engine, league.id))
    }
}
