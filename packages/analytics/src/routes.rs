//! Movement routes: consecutive observations of a species joined into
//! segments for the map layer.

use std::collections::BTreeMap;

use chrono::{Datelike as _, NaiveDateTime};
use eco_migration_analytics_models::{MovementSegment, RouteGrouping};
use eco_migration_occurrence_models::EnrichedRecord;

/// A routable observation: every field the segment needs is present.
struct RoutePoint {
    lng: f64,
    lat: f64,
    occurred_at: NaiveDateTime,
    count: i64,
}

/// Builds movement segments from enriched records.
///
/// Records missing a species, either coordinate, or a parseable date are
/// skipped. Remaining records are grouped per `grouping`, sorted by date
/// (stable, so equal timestamps keep input order), and each consecutive
/// pair yields one segment. Groups are emitted in `(species, year)` order.
#[must_use]
pub fn build_routes(
    records: &[EnrichedRecord],
    species: Option<&str>,
    grouping: RouteGrouping,
) -> Vec<MovementSegment> {
    let mut groups: BTreeMap<(&str, Option<i32>), Vec<RoutePoint>> = BTreeMap::new();

    for record in records.iter().filter(|r| r.matches_species(species)) {
        let (Some(name), Some(lat), Some(lng), Some(occurred_at)) = (
            record.species(),
            record.latitude,
            record.longitude,
            record.occurred_at,
        ) else {
            continue;
        };

        let key = match grouping {
            RouteGrouping::Species => (name, None),
            RouteGrouping::SpeciesYear => (name, Some(occurred_at.year())),
        };

        groups.entry(key).or_default().push(RoutePoint {
            lng,
            lat,
            occurred_at,
            count: record.individual_count,
        });
    }

    let mut segments = Vec::new();
    for ((name, _), mut points) in groups {
        points.sort_by_key(|p| p.occurred_at);
        segments.extend(points.windows(2).map(|pair| MovementSegment {
            species: name.to_string(),
            source: [pair[0].lng, pair[0].lat],
            target: [pair[1].lng, pair[1].lat],
            year: pair[0].occurred_at.year(),
            count: pair[0].count,
        }));
    }

    log::debug!("Built {} movement segments ({grouping})", segments.len());

    segments
}

#[cfg(test)]
mod tests {
    use eco_migration_occurrence_models::RawRecord;

    use super::*;
    use crate::enrich::enrich;

    fn record(species: &str, lat: &str, lng: &str, date: &str, count: &str) -> EnrichedRecord {
        enrich(
            RawRecord {
                species: Some(species.to_string()),
                decimal_latitude: Some(lat.to_string()),
                decimal_longitude: Some(lng.to_string()),
                event_date: Some(date.to_string()),
                individual_count: Some(count.to_string()),
                ..RawRecord::default()
            },
            &[],
        )
    }

    #[test]
    fn two_koala_sightings_make_one_segment() {
        let records = vec![
            record("Koala", "-42", "147", "2020-01-01", "4"),
            record("Koala", "-37", "145", "2021-01-01", "2"),
        ];
        let segments = build_routes(&records, None, RouteGrouping::Species);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].species, "Koala");
        assert_eq!(segments[0].source, [147.0, -42.0]);
        assert_eq!(segments[0].target, [145.0, -37.0]);
        assert_eq!(segments[0].count, 4);
        assert_eq!(segments[0].year, 2020);
    }

    #[test]
    fn k_points_yield_k_minus_one_sorted_segments() {
        let records = vec![
            record("Wombat", "-3", "3", "2020-03-01", "1"),
            record("Wombat", "-1", "1", "2020-01-01", "1"),
            record("Wombat", "-4", "4", "2020-04-01", "1"),
            record("Wombat", "-2", "2", "2020-02-01", "1"),
        ];
        let segments = build_routes(&records, None, RouteGrouping::SpeciesYear);

        assert_eq!(segments.len(), 3);
        for (i, segment) in segments.iter().enumerate() {
            let from = f64::from(u8::try_from(i).unwrap()) + 1.0;
            assert_eq!(segment.source, [from, -from]);
            assert_eq!(segment.target, [from + 1.0, -(from + 1.0)]);
        }
    }

    #[test]
    fn species_year_grouping_restarts_each_year() {
        let records = vec![
            record("Koala", "-42", "147", "2020-01-01", "4"),
            record("Koala", "-37", "145", "2021-01-01", "2"),
        ];
        assert!(build_routes(&records, None, RouteGrouping::SpeciesYear).is_empty());

        let records = vec![
            record("Koala", "-42", "147", "2020-01-01", "1"),
            record("Koala", "-41", "146", "2020-06-01", "1"),
            record("Koala", "-37", "145", "2021-01-01", "1"),
            record("Koala", "-36", "144", "2021-02-01", "1"),
        ];
        let segments = build_routes(&records, None, RouteGrouping::SpeciesYear);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].year, 2020);
        assert_eq!(segments[1].year, 2021);
    }

    #[test]
    fn incomplete_records_are_excluded() {
        let mut records = vec![
            record("Koala", "-42", "147", "2020-01-01", "1"),
            record("Koala", "bad", "147", "2020-02-01", "1"),
            record("Koala", "-40", "146", "not a date", "1"),
            record("Koala", "-39", "145", "2020-04-01", "1"),
        ];
        records.push(enrich(
            RawRecord {
                decimal_latitude: Some("-38".to_string()),
                decimal_longitude: Some("144".to_string()),
                event_date: Some("2020-05-01".to_string()),
                ..RawRecord::default()
            },
            &[],
        ));

        let segments = build_routes(&records, None, RouteGrouping::Species);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].target, [145.0, -39.0]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            record("Emu", "-1", "1", "2020-01-01", "1"),
            record("Emu", "-2", "2", "2020-01-01", "1"),
            record("Emu", "-3", "3", "2020-01-01", "1"),
        ];
        let segments = build_routes(&records, None, RouteGrouping::Species);
        assert_eq!(segments[0].source, [1.0, -1.0]);
        assert_eq!(segments[1].source, [2.0, -2.0]);
    }

    #[test]
    fn species_filter_and_groups_are_separate() {
        let records = vec![
            record("Koala", "-42", "147", "2020-01-01", "1"),
            record("Emu", "-30", "140", "2020-01-02", "1"),
            record("Koala", "-41", "146", "2020-02-01", "1"),
            record("Emu", "-31", "141", "2020-02-02", "1"),
        ];
        let all = build_routes(&records, None, RouteGrouping::Species);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].species, "Emu");
        assert_eq!(all[1].species, "Koala");

        let koala = build_routes(&records, Some("Koala"), RouteGrouping::Species);
        assert_eq!(koala.len(), 1);
        assert_eq!(koala[0].species, "Koala");
    }

    #[test]
    fn unparseable_count_defaults_to_one() {
        let records = vec![
            record("Koala", "-42", "147", "2020-01-01", "lots"),
            record("Koala", "-41", "146", "2020-02-01", "3"),
        ];
        let segments = build_routes(&records, None, RouteGrouping::Species);
        assert_eq!(segments[0].count, 1);
    }
}
