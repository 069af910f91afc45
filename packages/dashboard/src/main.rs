#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the crime dashboard core.
//!
//! Runs one render pass and writes the resulting chart-description
//! document as JSON, to stdout or to `--out`.

use std::path::PathBuf;

use clap::Parser;
use crime_dash_config::DashboardConfig;
use crime_dash_source::cache::LoadCache;

#[derive(Parser)]
#[command(name = "crime_dash", about = "Chicago crime dashboard core")]
struct Cli {
    /// Path to a TOML configuration file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load from the local CSV snapshots instead of the network
    #[arg(long)]
    local: bool,

    /// Write the dashboard JSON to this path instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_toml_file(path)?,
        None => DashboardConfig::default(),
    };
    if cli.local {
        config.use_local_data = true;
    }

    log::info!(
        "Render pass starting (source: {})",
        if config.use_local_data {
            "local snapshots"
        } else {
            "remote endpoint"
        }
    );

    let mut cache = LoadCache::new();
    let output = crime_dash::render_pass(&config, &mut cache).await;

    let json = serde_json::to_string_pretty(&output)?;
    match &cli.out {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Dashboard document written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
