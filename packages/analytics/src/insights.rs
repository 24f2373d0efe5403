//! Descriptive migration statistics over the enriched record set.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike as _;
use eco_migration_analytics_models::{
    CorrelationResult, Insights, MigrationTiming, OccurrenceStats, RegionShare, Relationship,
    SeasonalPattern, YearAggregate,
};
use eco_migration_geography_models::{MigrationRule, RegionTable};
use eco_migration_occurrence_models::EnrichedRecord;

use crate::population::{aggregate, usable_year};
use crate::stats::{pearson, round1};

/// Number of regions reported in [`OccurrenceStats::top_regions`].
pub const TOP_REGION_COUNT: usize = 3;

/// Derives seasonal patterns, migration timing flags, region correlations
/// and occurrence statistics for the records matching `species`.
///
/// Timing rules and the correlated regions come from `table`.
#[must_use]
pub fn analyze(records: &[EnrichedRecord], species: Option<&str>, table: &RegionTable) -> Insights {
    let selected: Vec<&EnrichedRecord> = records
        .iter()
        .filter(|r| r.matches_species(species))
        .collect();

    let seasonal_patterns = seasonal_patterns(&selected);
    let migration_timing = migration_timing(&seasonal_patterns, &table.rules);
    let state_correlations =
        state_correlations(&aggregate(records, species), &table.correlation_regions);
    let occurrence_stats = occurrence_stats(&selected);

    Insights {
        seasonal_patterns,
        migration_timing,
        state_correlations,
        occurrence_stats,
    }
}

/// Counts records per calendar month for each region.
///
/// Records without a parseable `eventDate` are ignored; a region with no
/// dated records does not appear.
#[must_use]
pub fn seasonal_patterns(records: &[&EnrichedRecord]) -> BTreeMap<String, SeasonalPattern> {
    let mut monthly: BTreeMap<&str, BTreeMap<u32, u64>> = BTreeMap::new();

    for record in records {
        let Some(occurred_at) = record.occurred_at else {
            continue;
        };
        *monthly
            .entry(record.state_province.as_str())
            .or_default()
            .entry(occurred_at.month())
            .or_insert(0) += 1;
    }

    monthly
        .into_iter()
        .map(|(region, monthly_counts)| {
            let peak_month = peak_month(&monthly_counts);
            (
                region.to_string(),
                SeasonalPattern {
                    monthly_counts,
                    peak_month,
                },
            )
        })
        .collect()
}

/// Month with the highest count; the earliest month wins ties.
fn peak_month(monthly_counts: &BTreeMap<u32, u64>) -> u32 {
    let mut peak: Option<(u32, u64)> = None;
    for (&month, &count) in monthly_counts {
        if peak.is_none_or(|(_, best)| count > best) {
            peak = Some((month, count));
        }
    }
    peak.map_or(0, |(month, _)| month)
}

/// Evaluates each rule against its region's seasonal pattern.
///
/// Rules for regions without a pattern compare `0 > 0` and never fire.
#[must_use]
pub fn migration_timing(
    patterns: &BTreeMap<String, SeasonalPattern>,
    rules: &[MigrationRule],
) -> Vec<MigrationTiming> {
    rules
        .iter()
        .filter(|rule| {
            patterns.get(&rule.region).is_some_and(|pattern| {
                pattern.sum_months(&rule.months) > pattern.sum_months(&rule.baseline_months)
            })
        })
        .map(|rule| MigrationTiming {
            region: rule.region.clone(),
            label: rule.label.clone(),
        })
        .collect()
}

/// Pairwise Pearson correlation of yearly totals for `regions`.
///
/// Series are aligned on every year present in `aggregates`; a region with
/// no contribution in a year counts as zero there. Pairs follow table
/// order: `(0, 1)`, `(0, 2)`, `(1, 2)`, ...
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn state_correlations(
    aggregates: &[YearAggregate],
    regions: &[String],
) -> Vec<CorrelationResult> {
    let series: Vec<Vec<f64>> = regions
        .iter()
        .map(|region| {
            aggregates
                .iter()
                .map(|agg| agg.region(region) as f64)
                .collect()
        })
        .collect();

    let mut results = Vec::new();
    for i in 0..regions.len() {
        for j in i + 1..regions.len() {
            let correlation = pearson(&series[i], &series[j]);
            results.push(CorrelationResult {
                states: [regions[i].clone(), regions[j].clone()],
                correlation,
                relationship: Relationship::classify(correlation),
            });
        }
    }
    results
}

/// Record totals, year coverage, and the regions holding the largest share
/// of records.
///
/// Region ties are broken by name so the ranking is deterministic.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn occurrence_stats(records: &[&EnrichedRecord]) -> OccurrenceStats {
    let total_records = records.len() as u64;

    let years: BTreeSet<i32> = records.iter().filter_map(|r| usable_year(r)).collect();
    let timespan = match (years.first(), years.last()) {
        (Some(min), Some(max)) => format!("{min} - {max}"),
        _ => "N/A".to_string(),
    };

    let mut by_region: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *by_region.entry(record.state_province.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, u64)> = by_region.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let top_regions = ranked
        .into_iter()
        .take(TOP_REGION_COUNT)
        .map(|(region, count)| RegionShare {
            region: region.to_string(),
            count,
            percentage: round1(count as f64 * 100.0 / total_records as f64),
        })
        .collect();

    OccurrenceStats {
        total_records,
        distinct_years: years.len(),
        timespan,
        top_regions,
    }
}
