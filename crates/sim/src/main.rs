//! Headless scenario player.
//!
//! Loads combat tuning and a scripted scenario, plays it for a fixed number
//! of frames and prints the run totals.
//! Run with: `cargo run -p combat-sim -- --scenario chain_demo`

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use combat_content::{ConfigLoader, ContentFactory, Scenario, ScenarioLoader};
use combat_runtime::ScenarioRunner;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Frames played after the last scripted frame when `--frames` is omitted.
const DEFAULT_TAIL_FRAMES: u64 = 180;

/// Headless combat scenario player
#[derive(Parser, Debug)]
#[command(name = "combat-sim")]
#[command(about = "Play a scripted combat scenario without a renderer", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory holding combat.toml and scenarios/
    /// (defaults to the data bundled with combat-content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Tuning file overriding <data-dir>/combat.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scenario name under <data-dir>/scenarios, or a path to a .ron file
    #[arg(short, long, value_name = "SCENARIO", required_unless_present = "list")]
    scenario: Option<String>,

    /// Number of frames to play
    #[arg(short, long, value_name = "N")]
    frames: Option<u64>,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// List the scenarios in the data directory and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let factory = match &cli.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };

    if cli.list {
        for name in factory.scenario_names()? {
            println!("{name}");
        }
        return Ok(());
    }

    if !(cli.dt.is_finite() && cli.dt > 0.0) {
        bail!("--dt must be a positive number of seconds, got {}", cli.dt);
    }

    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    let scenario = load_scenario(&factory, cli.scenario.as_deref().unwrap_or_default())?;
    info!(
        scenario = %scenario.name,
        data_dir = %factory.data_dir().display(),
        "content loaded"
    );

    let runner = ScenarioRunner::new(config, scenario)?;
    let frames = cli
        .frames
        .unwrap_or_else(|| runner.suggested_frames(DEFAULT_TAIL_FRAMES));
    let summary = runner.run(frames, cli.dt)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to encode summary")?;
        println!("{json}");
    } else {
        print!("{}", report::render(&summary));
    }
    Ok(())
}

/// Logs go to stderr so stdout stays clean for the summary.
fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Treats anything that looks like a file path as one, otherwise as a name
/// under the data directory.
fn load_scenario(factory: &ContentFactory, scenario: &str) -> Result<Scenario> {
    let path = PathBuf::from(scenario);
    if path.extension().is_some_and(|ext| ext == "ron") || path.components().count() > 1 {
        return ScenarioLoader::load(&path);
    }
    factory
        .load_scenario(scenario)
        .with_context(|| format!("Unknown scenario '{scenario}'"))
}
