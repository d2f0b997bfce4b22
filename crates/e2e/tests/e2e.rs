//! E2E scenario harness entry point
//!
//! This file is the test binary that runs the collection scenarios.
//! Run with: cargo test --package tabshelf-e2e --test e2e -- --scenario rename_collection

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tabshelf_e2e::{HarnessConfig, LocatorKind, Scenario, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "tabshelf-e2e")]
#[command(about = "Scenario runner for the tab collections UI")]
struct Args {
    /// Run only this scenario (repeatable); all scenarios by default
    #[arg(short, long)]
    scenario: Vec<String>,

    /// Harness configuration file
    #[arg(short, long, default_value = "tabshelf-e2e.toml")]
    config: PathBuf,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Locator strategy (text, id)
    #[arg(long)]
    locators: Option<String>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let result = tokio::runtime::Runtime::new()
        .context("failed to create tokio runtime")
        .and_then(|rt| rt.block_on(async_main(args)));

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> anyhow::Result<bool> {
    let mut config = HarnessConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    config.apply_env()?;

    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(raw) = args.locators {
        config.locators = raw.parse::<LocatorKind>()?;
    }

    let scenarios = if args.scenario.is_empty() {
        Scenario::all().to_vec()
    } else {
        args.scenario
            .iter()
            .map(|name| name.parse::<Scenario>())
            .collect::<Result<Vec<_>, _>>()?
    };

    let runner = ScenarioRunner::with_config(config);
    let results = runner.run_scenarios(&scenarios).await;

    // Write results
    runner.write_results(&results)?;

    Ok(results.failed == 0)
}
