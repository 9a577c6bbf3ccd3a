use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use presale_core::phase_at;
use presale_simulator::{scenario, Clock, DeployConfig, Scenario, SystemClock};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "presale-sim", about = "Replay presale deployments off-chain")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario against a deploy config and print the report.
    Run {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        scenario: PathBuf,
    },
    /// Print the sale phase at a Unix timestamp (default: now).
    Phase {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        at: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            config,
            scenario: scenario_path,
        } => {
            let deploy = DeployConfig::load(&config)
                .with_context(|| format!("loading deploy config {}", config.display()))?;
            let json = std::fs::read_to_string(&scenario_path)
                .with_context(|| format!("reading scenario {}", scenario_path.display()))?;
            let replay = Scenario::from_json(&json)
                .with_context(|| format!("parsing scenario {}", scenario_path.display()))?;

            let report = scenario::run(&deploy, &replay).context("scenario failed")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Phase { config, at } => {
            let deploy = DeployConfig::load(&config)
                .with_context(|| format!("loading deploy config {}", config.display()))?;
            let sale = deploy.sale_config().context("invalid sale parameters")?;
            let now = at.unwrap_or_else(|| SystemClock.now());
            let phase = phase_at(&sale, now);
            info!(now, ?phase, "phase resolved");
            println!("{phase:?}");
        }
    }
    Ok(())
}
