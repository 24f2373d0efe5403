//! Record enrichment: region and year resolution plus field parsing.

use chrono::Datelike as _;
use eco_migration_geography::classify;
use eco_migration_geography_models::{Region, UNKNOWN_REGION};
use eco_migration_occurrence_models::parsing::{parse_coordinate, parse_event_date, parse_int_prefix};
use eco_migration_occurrence_models::{EnrichedRecord, RawRecord};

/// Individual count used when `individualCount` is missing or malformed.
pub const DEFAULT_INDIVIDUAL_COUNT: i64 = 1;

/// Normalizes one raw record.
///
/// Region resolution order:
/// 1. the provider's `stateProvince`, unless empty or `"Unknown"`;
/// 2. classification of the parsed coordinates against `regions`;
/// 3. `"Unknown"` (unparseable coordinates never match a region).
///
/// Year resolution order: the explicit `year` field when it parses as an
/// integer, else the calendar year of `eventDate`, else `None`.
#[must_use]
pub fn enrich(raw: RawRecord, regions: &[Region]) -> EnrichedRecord {
    let latitude = raw.decimal_latitude.as_deref().and_then(parse_coordinate);
    let longitude = raw.decimal_longitude.as_deref().and_then(parse_coordinate);
    let occurred_at = raw.event_date.as_deref().and_then(parse_event_date);

    let state_province = match raw
        .state_province
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty() && *p != UNKNOWN_REGION)
    {
        Some(provided) => provided.to_string(),
        None => classify(
            latitude.unwrap_or(f64::NAN),
            longitude.unwrap_or(f64::NAN),
            regions,
        )
        .to_string(),
    };

    let year = raw
        .year
        .as_deref()
        .and_then(parse_int_prefix)
        .and_then(|y| i32::try_from(y).ok())
        .or_else(|| occurred_at.map(|d| d.year()));

    let individual_count = raw
        .individual_count
        .as_deref()
        .and_then(parse_int_prefix)
        .unwrap_or(DEFAULT_INDIVIDUAL_COUNT);

    EnrichedRecord {
        raw,
        state_province,
        year,
        latitude,
        longitude,
        occurred_at,
        individual_count,
    }
}

/// Enriches every record, preserving input order.
#[must_use]
pub fn enrich_all(raw: Vec<RawRecord>, regions: &[Region]) -> Vec<EnrichedRecord> {
    raw.into_iter().map(|r| enrich(r, regions)).collect()
}
