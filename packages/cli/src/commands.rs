//! Subcommands and their JSON output.

use clap::Subcommand;
use eco_migration_analytics::Dataset;
use eco_migration_analytics::logistic::{compare_regions, project, total_series};
use eco_migration_analytics_models::RouteGrouping;
use eco_migration_geography_models::RegionTable;
use eco_migration_server_models::{ApiProjection, ProjectionQueryParams};
use rand::RngCore;
use serde_json::Value;

#[derive(Subcommand)]
pub enum Commands {
    /// List distinct species in the dataset
    Species,
    /// Movement segments between consecutive sightings
    Routes {
        /// Only include this species
        #[arg(long)]
        species: Option<String>,
        /// `species` (one route per species) or `species_year`
        #[arg(long, default_value_t = RouteGrouping::SpeciesYear)]
        grouping: RouteGrouping,
    },
    /// Yearly population totals with per-region subtotals
    Population {
        #[arg(long)]
        species: Option<String>,
    },
    /// Logistic projection of the yearly totals
    Project {
        #[arg(long)]
        species: Option<String>,
        /// Comma-separated region names to project individually (e.g. "Tasmania,Victoria")
        #[arg(long)]
        regions: Option<String>,
    },
    /// Seasonal patterns, migration timing, correlations and summary stats
    Insights {
        #[arg(long)]
        species: Option<String>,
    },
}

/// Runs `command` against `dataset` and returns its JSON output.
///
/// # Errors
///
/// Returns an error if the output cannot be converted to JSON.
pub fn run(
    command: &Commands,
    dataset: &Dataset,
    table: &RegionTable,
    current_year: i32,
    rng: &mut dyn RngCore,
) -> Result<Value, serde_json::Error> {
    match command {
        Commands::Species => serde_json::to_value(dataset.species()),
        Commands::Routes { species, grouping } => {
            serde_json::to_value(dataset.routes(species_filter(species.as_deref()), *grouping))
        }
        Commands::Population { species } => {
            serde_json::to_value(dataset.population(species_filter(species.as_deref())))
        }
        Commands::Project { species, regions } => {
            let params = ProjectionQueryParams {
                species: species.clone(),
                regions: regions.clone(),
            };
            let aggregates = dataset.population(params.species());
            let total = project(&total_series(&aggregates), current_year, rng);
            let regions = compare_regions(&aggregates, &params.regions(), current_year, rng);
            serde_json::to_value(ApiProjection { total, regions })
        }
        Commands::Insights { species } => {
            serde_json::to_value(dataset.insights(species_filter(species.as_deref()), table))
        }
    }
}

fn species_filter(species: Option<&str>) -> Option<&str> {
    species.map(str::trim).filter(|s| !s.is_empty())
}
