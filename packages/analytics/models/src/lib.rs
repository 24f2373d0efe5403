#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived table types produced by the occurrence analytics pipeline.
//!
//! Every type here is an immutable value recomputed from the enriched
//! record set. They serialize to the JSON shapes the map and chart layers
//! consume (camelCase keys, `[lng, lat]` coordinate pairs, flat per-region
//! columns on yearly aggregates).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How occurrence points are grouped into movement routes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RouteGrouping {
    /// One route per species across all years.
    Species,
    /// One route per species per calendar year. Avoids long cross-year jumps.
    #[default]
    SpeciesYear,
}

/// Two chronologically adjacent observations of the same species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementSegment {
    /// Species name.
    pub species: String,
    /// Earlier observation as `[lng, lat]`.
    pub source: [f64; 2],
    /// Later observation as `[lng, lat]`.
    pub target: [f64; 2],
    /// Calendar year of the source observation.
    pub year: i32,
    /// Individual count at the source observation.
    pub count: i64,
}

/// Individual counts for one year, in total and per region.
///
/// Regions without a contribution in this year have no entry (they are not
/// stored as zero); use [`YearAggregate::region`] to read with a zero
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearAggregate {
    /// Calendar year.
    pub year: i32,
    /// Sum over all regions.
    pub actual: i64,
    /// Per-region subtotals, serialized as flat columns.
    #[serde(flatten)]
    pub regions: BTreeMap<String, i64>,
}

impl YearAggregate {
    /// Creates an empty bucket for `year`.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self {
            year,
            actual: 0,
            regions: BTreeMap::new(),
        }
    }

    /// Adds `count` to both the total and the region's subtotal.
    ///
    /// Both sums saturate at the `i64` bounds instead of overflowing.
    pub fn add(&mut self, region: &str, count: i64) {
        self.actual = self.actual.saturating_add(count);
        let subtotal = self.regions.entry(region.to_string()).or_insert(0);
        *subtotal = subtotal.saturating_add(count);
    }

    /// Region subtotal, treating an absent region as zero.
    #[must_use]
    pub fn region(&self, name: &str) -> i64 {
        self.regions.get(name).copied().unwrap_or(0)
    }
}

/// One `{year, actual}` observation fed to the logistic projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Calendar year.
    pub year: i32,
    /// Observed population.
    pub actual: i64,
}

/// A projected point: observed value alongside the model prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticPoint {
    /// Calendar year.
    pub year: i32,
    /// Observed population.
    pub actual: i64,
    /// Model-predicted population, rounded.
    pub count: i64,
}

/// Fitted parameters of a logistic growth curve
/// `N(t) = K / (1 + ((K - N0) / N0) * e^(-r t))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticModel {
    /// Carrying capacity `K`.
    pub carrying_capacity: f64,
    /// Growth rate `r`.
    pub growth_rate: f64,
    /// Initial population `N0`.
    pub initial_population: f64,
    /// Year at which `t = 0`.
    pub base_year: i32,
}

impl LogisticModel {
    /// Predicted population at `year`.
    #[must_use]
    pub fn predict(&self, year: i32) -> f64 {
        let k = self.carrying_capacity;
        let n0 = self.initial_population;
        let t = f64::from(year) - f64::from(self.base_year);
        k / (1.0 + ((k - n0) / n0) * (-self.growth_rate * t).exp())
    }
}

/// Sign classification of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Relationship {
    /// Coefficient below -0.3.
    Negative,
    /// Coefficient above 0.3.
    Positive,
    /// Anything in between.
    Weak,
}

impl Relationship {
    /// Classifies a correlation coefficient.
    #[must_use]
    pub fn classify(correlation: f64) -> Self {
        if correlation < -0.3 {
            Self::Negative
        } else if correlation > 0.3 {
            Self::Positive
        } else {
            Self::Weak
        }
    }
}

/// Pearson correlation between two regions' yearly totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    /// The two region names compared.
    pub states: [String; 2],
    /// Coefficient in `[-1, 1]`.
    pub correlation: f64,
    /// Sign classification of the coefficient.
    pub relationship: Relationship,
}

/// Monthly occurrence distribution for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPattern {
    /// Record counts keyed by calendar month (1-12). Months without
    /// records are absent.
    pub monthly_counts: BTreeMap<u32, u64>,
    /// Month with the highest count (earliest month on ties).
    pub peak_month: u32,
}

impl SeasonalPattern {
    /// Sum of counts over `months`, treating absent months as zero.
    #[must_use]
    pub fn sum_months(&self, months: &[u32]) -> u64 {
        months
            .iter()
            .map(|m| self.monthly_counts.get(m).copied().unwrap_or(0))
            .sum()
    }
}

/// A migration role assigned to a region by a timing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationTiming {
    /// Region name.
    pub region: String,
    /// Rule label (e.g. "breeding", "wintering").
    pub label: String,
}

/// A region's share of all occurrence records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionShare {
    /// Region name.
    pub region: String,
    /// Number of records in the region.
    pub count: u64,
    /// Percentage of all records, rounded to one decimal place.
    pub percentage: f64,
}

/// Summary counts over the record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceStats {
    /// Number of records.
    pub total_records: u64,
    /// Number of distinct resolved years.
    pub distinct_years: usize,
    /// `"{min} - {max}"` over resolved years, or `"N/A"`.
    pub timespan: String,
    /// Up to three regions with the largest record share.
    pub top_regions: Vec<RegionShare>,
}

/// Descriptive migration statistics for one species filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Monthly distribution per region.
    pub seasonal_patterns: BTreeMap<String, SeasonalPattern>,
    /// Regions flagged by the timing rules.
    pub migration_timing: Vec<MigrationTiming>,
    /// Pairwise yearly-total correlations.
    pub state_correlations: Vec<CorrelationResult>,
    /// Record, year and region share counts.
    pub occurrence_stats: OccurrenceStats,
}
