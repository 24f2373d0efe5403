#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the eco migration analytics.
//!
//! Loads occurrences from the API, a local JSON file, or the synthetic
//! generator, then prints one derived table as pretty JSON on stdout.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use eco_migration_analytics::Dataset;
use eco_migration_geography::{default_region_table, parse_region_table};
use eco_migration_geography_models::RegionTable;
use eco_migration_source::OccurrenceSource;
use eco_migration_source::config::SourceConfig;
use eco_migration_source::file::FileOccurrenceSource;
use eco_migration_source::http::HttpOccurrenceSource;
use eco_migration_source::load::{LoadedRecords, current_year, load_with_fallback, synthetic};
use eco_migration_source::synthetic::SyntheticConfig;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng as _};

use crate::commands::Commands;

#[derive(Parser)]
#[command(name = "eco_migration", about = "Species migration analytics")]
struct Cli {
    /// Occurrence API base URL (overrides `ECO_MIGRATION_API_URL`)
    #[arg(long)]
    api_url: Option<String>,
    /// Read occurrences from a local JSON file instead of the API
    #[arg(long, conflicts_with = "synthetic")]
    input: Option<PathBuf>,
    /// Skip fetching and use generated sample data
    #[arg(long)]
    synthetic: bool,
    /// Seed for synthetic data and placeholder projections
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file replacing the built-in region table
    #[arg(long)]
    region_table: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let table = match &cli.region_table {
        Some(path) => parse_region_table(&std::fs::read_to_string(path)?)?,
        None => default_region_table(),
    };

    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let loaded = load(&cli, &table, rng.as_mut()).await?;
    let dataset = Dataset::new(loaded.records, loaded.origin, &table.regions);

    println!("{}", render(&cli.command, &dataset, &table, rng.as_mut())?);

    Ok(())
}

/// Runs `command` and formats its output as pretty JSON.
fn render(
    command: &Commands,
    dataset: &Dataset,
    table: &RegionTable,
    rng: &mut dyn RngCore,
) -> Result<String, serde_json::Error> {
    let output = commands::run(command, dataset, table, current_year(), rng)?;
    serde_json::to_string_pretty(&output)
}

async fn load(
    cli: &Cli,
    table: &RegionTable,
    rng: &mut dyn RngCore,
) -> Result<LoadedRecords, Box<dyn std::error::Error>> {
    let config = SyntheticConfig::default();

    if cli.synthetic {
        log::info!("Using synthetic occurrences");
        return Ok(synthetic(&table.regions, &config, current_year(), rng));
    }

    let source: Box<dyn OccurrenceSource> = if let Some(path) = &cli.input {
        Box::new(FileOccurrenceSource::new(path))
    } else {
        let mut source_config = SourceConfig::from_env();
        if let Some(url) = &cli.api_url {
            source_config = source_config.with_api_url(url);
        }
        Box::new(HttpOccurrenceSource::new(&source_config)?)
    };

    Ok(load_with_fallback(source.as_ref(), &table.regions, &config, rng).await)
}
