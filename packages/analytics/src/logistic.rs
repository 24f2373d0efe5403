//! Logistic growth projection over yearly population series.
//!
//! The model uses fixed parameters rather than a least-squares fit: the
//! carrying capacity is 1.5x the observed maximum and the growth rate is a
//! constant. It is a display aid, not an estimator.

use std::collections::BTreeMap;

use eco_migration_analytics_models::{LogisticModel, LogisticPoint, SeriesPoint, YearAggregate};
use rand::Rng;

/// Growth rate applied to real series.
pub const GROWTH_RATE: f64 = 0.2;

/// Growth rate applied to the placeholder series.
pub const PLACEHOLDER_GROWTH_RATE: f64 = 0.3;

/// Carrying capacity as a multiple of the observed maximum.
pub const CAPACITY_FACTOR: f64 = 1.5;

/// Carrying capacity used for a placeholder series whose maximum is zero.
pub const PLACEHOLDER_CAPACITY: f64 = 100.0;

/// Number of years in the placeholder series.
pub const PLACEHOLDER_YEARS: i32 = 5;

/// Fits the fixed-parameter model to a series sorted by year.
///
/// Returns `None` for fewer than two points. A zero maximum yields `K = 0`
/// and a zero first value is replaced by `1` so `N0` is never zero.
#[must_use]
pub fn fit(series: &[SeriesPoint]) -> Option<LogisticModel> {
    if series.len() < 2 {
        return None;
    }
    Some(model_for(series, GROWTH_RATE, None))
}

/// Builds the five-year placeholder series ending at `current_year`.
///
/// Values are `i * 5 + rng(0..=2)`, so the output is only reproducible
/// with a seeded `rng`.
pub fn placeholder_series<R: Rng + ?Sized>(current_year: i32, rng: &mut R) -> Vec<SeriesPoint> {
    (0..PLACEHOLDER_YEARS)
        .map(|i| SeriesPoint {
            year: current_year - (PLACEHOLDER_YEARS - 1) + i,
            actual: i64::from(i) * 5 + rng.gen_range(0..=2),
        })
        .collect()
}

/// Projects a series sorted by year onto the logistic curve.
///
/// Series with fewer than two points are replaced by
/// [`placeholder_series`] (projected with [`PLACEHOLDER_GROWTH_RATE`]);
/// that branch draws from `rng` and is non-deterministic unless the caller
/// seeds it.
pub fn project<R: Rng + ?Sized>(
    series: &[SeriesPoint],
    current_year: i32,
    rng: &mut R,
) -> Vec<LogisticPoint> {
    if let Some(model) = fit(series) {
        return apply(&model, series);
    }

    log::debug!(
        "Series has {} point(s); projecting placeholder data",
        series.len()
    );
    let placeholder = placeholder_series(current_year, rng);
    let model = model_for(&placeholder, PLACEHOLDER_GROWTH_RATE, Some(PLACEHOLDER_CAPACITY));
    apply(&model, &placeholder)
}

/// Extracts one region's `{year, actual}` series from yearly aggregates.
///
/// Only years in which the region contributed are included.
#[must_use]
pub fn region_series(aggregates: &[YearAggregate], region: &str) -> Vec<SeriesPoint> {
    aggregates
        .iter()
        .filter_map(|agg| {
            agg.regions.get(region).map(|actual| SeriesPoint {
                year: agg.year,
                actual: *actual,
            })
        })
        .collect()
}

/// Extracts the all-region `{year, actual}` series.
#[must_use]
pub fn total_series(aggregates: &[YearAggregate]) -> Vec<SeriesPoint> {
    aggregates
        .iter()
        .map(|agg| SeriesPoint {
            year: agg.year,
            actual: agg.actual,
        })
        .collect()
}

/// Projects one series per compared region.
pub fn compare_regions<R: Rng + ?Sized>(
    aggregates: &[YearAggregate],
    regions: &[String],
    current_year: i32,
    rng: &mut R,
) -> BTreeMap<String, Vec<LogisticPoint>> {
    regions
        .iter()
        .map(|region| {
            let series = region_series(aggregates, region);
            (region.clone(), project(&series, current_year, rng))
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn model_for(
    series: &[SeriesPoint],
    growth_rate: f64,
    zero_capacity_fallback: Option<f64>,
) -> LogisticModel {
    let max = series.iter().map(|p| p.actual).max().unwrap_or(0);
    let carrying_capacity = match zero_capacity_fallback {
        Some(fallback) if max == 0 => fallback,
        _ => max as f64 * CAPACITY_FACTOR,
    };
    let first = series.first().map_or(0, |p| p.actual);

    LogisticModel {
        carrying_capacity,
        growth_rate,
        initial_population: if first == 0 { 1.0 } else { first as f64 },
        base_year: series.first().map_or(0, |p| p.year),
    }
}

fn apply(model: &LogisticModel, series: &[SeriesPoint]) -> Vec<LogisticPoint> {
    series
        .iter()
        .map(|p| LogisticPoint {
            year: p.year,
            actual: p.actual,
            count: round_count(model.predict(p.year)),
        })
        .collect()
}

/// Rounds a prediction to a whole count; non-finite predictions become `0`.
#[allow(clippy::cast_possible_truncation)]
fn round_count(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}
