//! The in-memory dataset for one fetch cycle.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use eco_migration_analytics_models::{Insights, MovementSegment, RouteGrouping, YearAggregate};
use eco_migration_geography_models::{Region, RegionTable};
use eco_migration_occurrence_models::{DatasetOrigin, EnrichedRecord, RawRecord};

use crate::enrich::enrich_all;
use crate::insights::analyze;
use crate::population::aggregate;
use crate::routes::build_routes;

/// Enriched records from a single load, plus where they came from.
///
/// A dataset is never mutated; a refresh builds a new one and replaces the
/// old one wholesale.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<EnrichedRecord>,
    origin: DatasetOrigin,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Enriches `raw` against `regions`.
    #[must_use]
    pub fn new(raw: Vec<RawRecord>, origin: DatasetOrigin, regions: &[Region]) -> Self {
        let records = enrich_all(raw, regions);
        log::info!("Loaded {} occurrence records ({origin})", records.len());
        Self {
            records,
            origin,
            loaded_at: Utc::now(),
        }
    }

    /// All enriched records, in input order.
    #[must_use]
    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    /// Where the raw records came from.
    #[must_use]
    pub const fn origin(&self) -> DatasetOrigin {
        self.origin
    }

    /// When the dataset was built.
    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct species names, sorted.
    #[must_use]
    pub fn species(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(EnrichedRecord::species)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Movement segments for the map layer.
    #[must_use]
    pub fn routes(&self, species: Option<&str>, grouping: RouteGrouping) -> Vec<MovementSegment> {
        build_routes(&self.records, species, grouping)
    }

    /// Yearly population table.
    #[must_use]
    pub fn population(&self, species: Option<&str>) -> Vec<YearAggregate> {
        aggregate(&self.records, species)
    }

    /// Migration insights using the rules in `table`.
    #[must_use]
    pub fn insights(&self, species: Option<&str>, table: &RegionTable) -> Insights {
        analyze(&self.records, species, table)
    }
}
