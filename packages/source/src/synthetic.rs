//! Synthetic occurrence records used when no real data is available.
//!
//! Records carry the same field names as provider data, so everything
//! downstream treats them exactly like a real fetch.

use eco_migration_geography_models::Region;
use eco_migration_occurrence_models::RawRecord;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Species generated when no explicit list is configured.
pub const DEFAULT_SPECIES: &[&str] = &[
    "Phascolarctos cinereus",
    "Ornithorhynchus anatinus",
    "Ardenna tenuirostris",
    "Lathamus discolor",
    "Macropus giganteus",
];

/// Number of years generated, ending at the current year.
pub const DEFAULT_YEARS: u16 = 5;

/// Upper bound (inclusive) of a synthetic `individualCount`.
pub const MAX_INDIVIDUAL_COUNT: u32 = 20;

/// What the synthetic generator produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticConfig {
    /// Species names, one record set each.
    pub species: Vec<String>,
    /// Number of consecutive years ending at the current year.
    #[serde(default = "default_years")]
    pub years: u16,
}

const fn default_years() -> u16 {
    DEFAULT_YEARS
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            species: DEFAULT_SPECIES.iter().map(ToString::to_string).collect(),
            years: DEFAULT_YEARS,
        }
    }
}

impl SyntheticConfig {
    /// Number of records [`synthetic_records`] produces for `region_count`
    /// regions.
    #[must_use]
    pub fn record_count(&self, region_count: usize) -> usize {
        region_count * self.species.len() * usize::from(self.years)
    }
}

/// Generates one record per region, species and year.
///
/// Years run from `current_year - years + 1` through `current_year`.
/// Coordinates are drawn uniformly inside the region's bounds, the event
/// date falls on day 1-28 of a random month of that year and
/// `individualCount` is in `1..=20`.
pub fn synthetic_records<R: Rng + ?Sized>(
    regions: &[Region],
    config: &SyntheticConfig,
    current_year: i32,
    rng: &mut R,
) -> Vec<RawRecord> {
    let first_year = current_year - i32::from(config.years) + 1;
    let mut records = Vec::with_capacity(config.record_count(regions.len()));

    for region in regions {
        let bounds = &region.bounds;
        for species in &config.species {
            for year in first_year..=current_year {
                let lat = rng.gen_range(bounds.min_lat..=bounds.max_lat);
                let lng = rng.gen_range(bounds.min_lng..=bounds.max_lng);
                let month: u32 = rng.gen_range(1..=12);
                let day: u32 = rng.gen_range(1..=28);
                let count = rng.gen_range(1..=MAX_INDIVIDUAL_COUNT);

                records.push(RawRecord {
                    species: Some(species.clone()),
                    decimal_latitude: Some(format!("{lat:.5}")),
                    decimal_longitude: Some(format!("{lng:.5}")),
                    event_date: Some(format!("{year:04}-{month:02}-{day:02}")),
                    year: Some(year.to_string()),
                    individual_count: Some(count.to_string()),
                    state_province: Some(region.name.clone()),
                });
            }
        }
    }

    log::debug!(
        "Generated {} synthetic records for {} region(s)",
        records.len(),
        regions.len()
    );
    records
}
