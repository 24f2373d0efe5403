//! Fetch-with-fallback loading.

use chrono::Datelike as _;
use eco_migration_geography_models::Region;
use eco_migration_occurrence_models::{DatasetOrigin, RawRecord};
use rand::Rng;

use crate::OccurrenceSource;
use crate::synthetic::{SyntheticConfig, synthetic_records};

/// Records produced by one load cycle and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRecords {
    /// Raw records, fetched or generated.
    pub records: Vec<RawRecord>,
    /// [`DatasetOrigin::Synthetic`] when the fetch failed, otherwise the
    /// source's own origin.
    pub origin: DatasetOrigin,
}

/// Calendar year in local time, used to anchor synthetic data.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Fetches from `source`, substituting synthetic records on any error.
///
/// Never fails: the error is logged at `warn` and the dataset is generated
/// from `regions` and `config` instead.
pub async fn load_with_fallback<R: Rng + ?Sized>(
    source: &dyn OccurrenceSource,
    regions: &[Region],
    config: &SyntheticConfig,
    rng: &mut R,
) -> LoadedRecords {
    match source.fetch().await {
        Ok(records) => LoadedRecords {
            records,
            origin: source.origin(),
        },
        Err(e) => {
            log::warn!(
                "Failed to load occurrences from {}: {e}; using synthetic data",
                source.describe()
            );
            synthetic(regions, config, current_year(), rng)
        }
    }
}

/// Builds a synthetic [`LoadedRecords`] directly.
pub fn synthetic<R: Rng + ?Sized>(
    regions: &[Region],
    config: &SyntheticConfig,
    current_year: i32,
    rng: &mut R,
) -> LoadedRecords {
    LoadedRecords {
        records: synthetic_records(regions, config, current_year, rng),
        origin: DatasetOrigin::Synthetic,
    }
}
