//! # Wave Tracker Application Entry Point
//!
//! Command-line front end: resolves beach names, fetches conditions through
//! the cached fallback chain and prints them as text or JSON.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wave_tracker_lib::config::{Config, Credentials, CONFIG_FILE};
use wave_tracker_lib::renderer::draw_ascii;
use wave_tracker_lib::service::{ServiceError, WaveService};
use wave_tracker_lib::simulate::Simulator;

/// Sea-wave and wind conditions for Rio de Janeiro beaches.
#[derive(Debug, Parser)]
#[command(name = "wave-tracker", version, about)]
struct Cli {
    /// Beach to report on (see --list); all beaches when omitted
    location: Option<String>,

    /// List known beaches and exit
    #[arg(long)]
    list: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Path to the configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Seed for simulated values, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // API keys may live in a .env file next to the binary
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_from_path(&cli.config);

    if cli.list {
        let directory = config.directory();
        if cli.json {
            let names: Vec<&str> = directory.names().collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        } else {
            for name in directory.names() {
                println!("{}", name);
            }
        }
        return Ok(());
    }

    let simulator = Arc::new(match cli.seed {
        Some(seed) => Simulator::seeded(seed),
        None => Simulator::from_entropy(),
    });
    let credentials = Credentials::from_env();
    let service = WaveService::from_config(&config, &credentials, simulator)
        .context("failed to build HTTP client")?;

    let rt = tokio::runtime::Runtime::new()?;
    let observations = rt.block_on(async {
        match cli.location.as_deref() {
            Some(name) => service.report(name).await.map(|obs| vec![obs]),
            None => Ok(service.report_all().await),
        }
    });

    let observations = match observations {
        Ok(observations) => observations,
        Err(ServiceError::NotFound(name)) => {
            eprintln!("Beach '{}' not found. Known beaches:", name);
            for known in service.directory().names() {
                eprintln!("  {}", known);
            }
            anyhow::bail!("location not found: {}", name);
        }
    };

    if cli.json {
        let json = match (cli.location.is_some(), observations.as_slice()) {
            (true, [single]) => serde_json::to_string_pretty(single)?,
            (_, all) => serde_json::to_string_pretty(all)?,
        };
        println!("{}", json);
    } else {
        draw_ascii(&observations);
    }

    Ok(())
}
