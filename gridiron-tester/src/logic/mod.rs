pub mod league_builder;
pub mod reports;
pub mod scenarios;
pub mod seeds;
pub mod tester;

pub use league_builder::LeagueFixture;
pub use scenarios::{all_scenario_keys, get_scenario, list_scenarios};
pub use seeds::resolve_seed_inputs;
pub use tester::*;
