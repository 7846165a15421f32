mod logic;
mod util;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{
    LeagueFixture, ScenarioResult, SeasonTester, all_scenario_keys, get_scenario, list_scenarios,
    resolve_seed_inputs,
};
use util::{load_config, report_stamp, split_csv};

#[derive(Debug, Parser)]
#[command(name = "gridiron-tester", version = "0.1.0")]
#[command(about = "Scenario runner for the gridiron season engine")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated; ranges like `1..5` allowed)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Engine configuration JSON; defaults apply to anything it omits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Conferences in the synthetic league
    #[arg(long, default_value_t = 2)]
    conferences: u32,

    /// Teams per conference in the synthetic league
    #[arg(long, default_value_t = 8)]
    teams_per_conference: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn fixture(&self) -> Result<LeagueFixture> {
        if self.conferences == 0 || self.teams_per_conference == 0 {
            bail!("the synthetic league needs a conference and a team");
        }
        if self.conferences * self.teams_per_conference < 2 {
            bail!("the synthetic league needs at least two teams");
        }
        Ok(LeagueFixture {
            conferences: self.conferences,
            teams_per_conference: self.teams_per_conference,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let fixture = args.fixture()?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let scenarios = expand_scenarios(&args.scenarios);

    let tester = SeasonTester::new(config, fixture, args.verbose);
    let results = run_scenarios(&tester, &scenarios, &seeds, args.iterations);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:15} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🏈 Gridiron Season Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in all_scenario_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn run_scenarios(
    tester: &SeasonTester,
    scenarios: &[String],
    seeds: &[u64],
    iterations: usize,
) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Season Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let mut results = Vec::new();
    for name in scenarios {
        if let Some(scenario) = get_scenario(name) {
            results.extend(tester.run_scenario(scenario, seeds, iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
            output_target.flush_inner()?;
            return Ok(());
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Gridiron Season Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
            writeln!(&mut output_target, "_Generated {}_", report_stamp())?;
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    let duration = start_time.elapsed();
    writeln!(&mut output_target)?;
    writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "gridiron-main-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    fn base_args() -> Args {
        Args {
            scenarios: "round-robin".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            config: None,
            conferences: 1,
            teams_per_conference: 4,
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn expands_all_scenarios_keyword() {
        let scenarios = expand_scenarios("playoffs,all");
        assert_eq!(scenarios[0], "playoffs");
        assert_eq!(scenarios.len(), all_scenario_keys().len());
    }

    #[test]
    fn expand_scenarios_without_all_preserves_order() {
        let expanded = expand_scenarios("snapshot, standings");
        assert_eq!(expanded, vec!["snapshot", "standings"]);
    }

    #[test]
    fn fixture_rejects_empty_leagues() {
        let mut args = base_args();
        assert!(args.fixture().is_ok());
        args.conferences = 0;
        assert!(args.fixture().is_err());
        args.conferences = 1;
        args.teams_per_conference = 1;
        assert!(args.fixture().is_err());
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let path = temp_path("list");
        let mut args = base_args();
        args.list_scenarios = true;
        args.output = Some(path.clone());
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("playoffs"));
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn write_reports_emits_json_output() {
        let path = temp_path("json");
        let mut args = base_args();
        args.output = Some(path.clone());
        let tester = SeasonTester::new(
            gridiron_engine::EngineConfig::default(),
            args.fixture().unwrap(),
            false,
        );
        let results = run_scenarios(&tester, &expand_scenarios(&args.scenarios), &[5], 1);
        write_reports(&args, &results, Instant::now()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0]["scenario_name"], "round-robin");
        assert_eq!(parsed[0]["passed"], true);
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let path = temp_path("md");
        let mut args = base_args();
        args.report = "markdown".to_string();
        args.output = Some(path.clone());
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("_No scenarios executed._"));
        assert!(content.contains("_Generated "));
    }
}
