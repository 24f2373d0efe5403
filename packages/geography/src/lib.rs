#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region classification and the embedded region registry.
//!
//! The default [`RegionTable`] is baked into the binary at compile time from
//! `regions.toml` via [`include_str!`]. Alternative tables (tests, other
//! study areas) are parsed with [`parse_region_table`] and injected wherever
//! a table is needed; nothing in the pipeline reads a global.

use eco_migration_geography_models::{Region, RegionTable, UNKNOWN_REGION};
use thiserror::Error;

/// Default region table, embedded at compile time.
const DEFAULT_REGIONS_TOML: &str = include_str!("../regions.toml");

/// Errors that can occur while loading a region table.
#[derive(Debug, Error)]
pub enum GeographyError {
    /// TOML parsing failed.
    #[error("Region table parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A region's bounds are inverted.
    #[error("Region '{name}' has invalid bounds (min must not exceed max)")]
    InvalidBounds {
        /// Name of the offending region.
        name: String,
    },

    /// A rule or correlation entry references a region that is not in the table.
    #[error("Unknown region '{name}' referenced by {context}")]
    UnknownRegion {
        /// The unresolved region name.
        name: String,
        /// Where the reference was found.
        context: String,
    },
}

/// Assigns a point to the first region whose closed box contains it.
///
/// Regions are tested in slice order, so when boxes overlap the earlier
/// entry wins. Returns [`UNKNOWN_REGION`] when no box matches, including
/// when either coordinate is `NaN`.
#[must_use]
pub fn classify(lat: f64, lng: f64, regions: &[Region]) -> &str {
    regions
        .iter()
        .find(|r| r.bounds.contains(lat, lng))
        .map_or(UNKNOWN_REGION, |r| r.name.as_str())
}

/// Parses and validates a region table from TOML.
///
/// # Errors
///
/// Returns [`GeographyError`] if the TOML is malformed, any region has
/// inverted bounds, or a rule/correlation entry names a region that is not
/// in the table.
pub fn parse_region_table(toml_str: &str) -> Result<RegionTable, GeographyError> {
    let table: RegionTable = toml::de::from_str(toml_str)?;
    validate(&table)?;

    for (a, b) in overlapping_pairs(&table) {
        log::warn!("Regions '{a}' and '{b}' overlap; '{a}' takes priority");
    }

    Ok(table)
}

/// Returns the embedded default region table.
///
/// # Panics
///
/// Panics if the embedded `regions.toml` is malformed (covered by tests).
#[must_use]
pub fn default_region_table() -> RegionTable {
    parse_region_table(DEFAULT_REGIONS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse regions.toml: {e}"))
}

/// Returns every pair of region names whose boxes intersect, in table
/// order (the first name of each pair is the one that wins).
#[must_use]
pub fn overlapping_pairs(table: &RegionTable) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    for (i, a) in table.regions.iter().enumerate() {
        for b in &table.regions[i + 1..] {
            if a.bounds.intersects(&b.bounds) {
                pairs.push((a.name.as_str(), b.name.as_str()));
            }
        }
    }
    pairs
}

fn validate(table: &RegionTable) -> Result<(), GeographyError> {
    if let Some(bad) = table.regions.iter().find(|r| !r.bounds.is_valid()) {
        return Err(GeographyError::InvalidBounds {
            name: bad.name.clone(),
        });
    }

    for rule in &table.rules {
        if table.get(&rule.region).is_none() {
            return Err(GeographyError::UnknownRegion {
                name: rule.region.clone(),
                context: format!("rule '{}'", rule.label),
            });
        }
    }

    for name in &table.correlation_regions {
        if table.get(name).is_none() {
            return Err(GeographyError::UnknownRegion {
                name: name.clone(),
                context: "correlationRegions".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use eco_migration_geography_models::RegionBounds;

    use super::*;

    fn region(name: &str, bounds: RegionBounds) -> Region {
        Region {
            name: name.to_string(),
            bounds,
        }
    }

    #[test]
    fn loads_default_table() {
        let table = default_region_table();
        assert_eq!(table.regions.len(), 7);
        assert_eq!(table.regions[0].name, "Tasmania");
        assert_eq!(table.rules.len(), 3);
        assert_eq!(
            table.correlation_regions,
            vec!["Tasmania", "Victoria", "New South Wales"]
        );
    }

    #[test]
    fn default_table_has_no_overlaps() {
        let table = default_region_table();
        assert!(overlapping_pairs(&table).is_empty());
    }

    #[test]
    fn classifies_interior_points() {
        let table = default_region_table();
        assert_eq!(classify(-42.0, 147.0, &table.regions), "Tasmania");
        assert_eq!(classify(-37.0, 145.0, &table.regions), "Victoria");
        assert_eq!(classify(-33.87, 151.21, &table.regions), "New South Wales");
        assert_eq!(classify(-27.47, 153.03, &table.regions), "Queensland");
        assert_eq!(classify(-34.93, 138.6, &table.regions), "South Australia");
        assert_eq!(classify(-12.46, 130.84, &table.regions), "Northern Territory");
        assert_eq!(classify(-31.95, 115.86, &table.regions), "Western Australia");
    }

    #[test]
    fn points_outside_every_box_are_unknown() {
        let table = default_region_table();
        assert_eq!(classify(51.5, -0.12, &table.regions), UNKNOWN_REGION);
        assert_eq!(classify(f64::NAN, 147.0, &table.regions), UNKNOWN_REGION);
        assert_eq!(classify(-42.0, f64::NAN, &table.regions), UNKNOWN_REGION);
        assert_eq!(classify(-42.0, 147.0, &[]), UNKNOWN_REGION);
    }

    #[test]
    fn first_listed_region_wins_on_overlap() {
        let regions = vec![
            region("A", RegionBounds::new(0.0, 10.0, 0.0, 10.0)),
            region("B", RegionBounds::new(5.0, 15.0, 5.0, 15.0)),
        ];
        assert_eq!(classify(7.0, 7.0, &regions), "A");
        assert_eq!(classify(12.0, 12.0, &regions), "B");

        let reversed: Vec<Region> = regions.into_iter().rev().collect();
        assert_eq!(classify(7.0, 7.0, &reversed), "B");
    }

    #[test]
    fn reports_overlapping_pairs_in_priority_order() {
        let table = RegionTable {
            regions: vec![
                region("A", RegionBounds::new(0.0, 10.0, 0.0, 10.0)),
                region("B", RegionBounds::new(20.0, 30.0, 20.0, 30.0)),
                region("C", RegionBounds::new(5.0, 25.0, 5.0, 25.0)),
            ],
            rules: Vec::new(),
            correlation_regions: Vec::new(),
        };
        assert_eq!(overlapping_pairs(&table), vec![("A", "C"), ("B", "C")]);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let toml = r#"
            [[regions]]
            name = "Broken"
            bounds = { minLat = 5.0, maxLat = 1.0, minLng = 0.0, maxLng = 1.0 }
        "#;
        let err = parse_region_table(toml).unwrap_err();
        assert!(matches!(err, GeographyError::InvalidBounds { name } if name == "Broken"));
    }

    #[test]
    fn rejects_rules_for_unknown_regions() {
        let toml = r#"
            [[regions]]
            name = "Somewhere"
            bounds = { minLat = 0.0, maxLat = 1.0, minLng = 0.0, maxLng = 1.0 }

            [[rules]]
            region = "Elsewhere"
            label = "breeding"
            months = [9, 10, 11]
            baselineMonths = [6, 7, 8]
        "#;
        let err = parse_region_table(toml).unwrap_err();
        assert!(matches!(err, GeographyError::UnknownRegion { name, .. } if name == "Elsewhere"));
    }

    #[test]
    fn rules_and_correlations_default_to_empty() {
        let toml = r#"
            [[regions]]
            name = "Somewhere"
            bounds = { minLat = 0.0, maxLat = 1.0, minLng = 0.0, maxLng = 1.0 }
        "#;
        let table = parse_region_table(toml).unwrap();
        assert!(table.rules.is_empty());
        assert!(table.correlation_regions.is_empty());
    }
}
