//! Population-by-year aggregation.

use std::collections::BTreeMap;

use eco_migration_analytics_models::YearAggregate;
use eco_migration_occurrence_models::EnrichedRecord;

/// Returns the record's year when it is usable for time bucketing.
///
/// Unresolved years and year `0` are both treated as missing.
#[must_use]
pub fn usable_year(record: &EnrichedRecord) -> Option<i32> {
    record.year.filter(|y| *y != 0)
}

/// Sums individual counts per year and per region.
///
/// Records without a usable year are skipped. Counts are added as parsed,
/// so negative counts reduce the totals. The result is sorted by year and
/// every entry satisfies `actual == sum(regions)`.
#[must_use]
pub fn aggregate(records: &[EnrichedRecord], species: Option<&str>) -> Vec<YearAggregate> {
    let mut by_year: BTreeMap<i32, YearAggregate> = BTreeMap::new();
    let mut skipped = 0_usize;

    for record in records.iter().filter(|r| r.matches_species(species)) {
        let Some(year) = usable_year(record) else {
            skipped += 1;
            continue;
        };
        by_year
            .entry(year)
            .or_insert_with(|| YearAggregate::new(year))
            .add(&record.state_province, record.individual_count);
    }

    log::debug!(
        "Aggregated {} years ({skipped} records without a usable year)",
        by_year.len()
    );

    by_year.into_values().collect()
}
