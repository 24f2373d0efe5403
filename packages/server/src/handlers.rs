//! HTTP handler functions for the eco migration API.

use actix_web::{HttpResponse, web};
use eco_migration_analytics::Dataset;
use eco_migration_analytics::logistic::{compare_regions, project, total_series};
use eco_migration_occurrence_models::EnrichedRecord;
use eco_migration_server_models::{
    ApiDatasetInfo, ApiHealth, ApiProjection, OccurrenceQueryParams, ProjectionQueryParams,
    RouteQueryParams, SpeciesQueryParams,
};
use eco_migration_source::load::current_year;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/dataset`
///
/// Describes the dataset currently being served.
pub async fn dataset(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(dataset_info(&state.dataset()))
}

/// `GET /api/regions`
///
/// Returns the region table, migration rules and correlation regions.
pub async fn regions(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.regions)
}

/// `GET /api/species`
pub async fn species(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dataset().species())
}

/// `GET /api/occurrences`
///
/// Enriched records, optionally filtered by species and paginated.
pub async fn occurrences(
    state: web::Data<AppState>,
    params: web::Query<OccurrenceQueryParams>,
) -> HttpResponse {
    let dataset = state.dataset();
    let species = params.species();
    let records: Vec<&EnrichedRecord> = dataset
        .records()
        .iter()
        .filter(|r| r.matches_species(species))
        .skip(params.offset.unwrap_or(0))
        .take(params.limit.unwrap_or(usize::MAX))
        .collect();

    HttpResponse::Ok().json(records)
}

/// `GET /api/routes`
pub async fn routes(
    state: web::Data<AppState>,
    params: web::Query<RouteQueryParams>,
) -> HttpResponse {
    let segments = state
        .dataset()
        .routes(params.species(), params.grouping.unwrap_or_default());
    log::debug!("Built {} route segments", segments.len());
    HttpResponse::Ok().json(segments)
}

/// `GET /api/population`
pub async fn population(
    state: web::Data<AppState>,
    params: web::Query<SpeciesQueryParams>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.dataset().population(params.species()))
}

/// `GET /api/projection`
///
/// Projects the all-region yearly total and each region named in
/// `regions`.
pub async fn projection(
    state: web::Data<AppState>,
    params: web::Query<ProjectionQueryParams>,
) -> HttpResponse {
    let aggregates = state.dataset().population(params.species());
    let year = current_year();
    let mut rng = rand::thread_rng();

    let total = project(&total_series(&aggregates), year, &mut rng);
    let regions = compare_regions(&aggregates, &params.regions(), year, &mut rng);

    HttpResponse::Ok().json(ApiProjection { total, regions })
}

/// `GET /api/insights`
pub async fn insights(
    state: web::Data<AppState>,
    params: web::Query<SpeciesQueryParams>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.dataset().insights(params.species(), &state.regions))
}

/// `POST /api/refresh`
///
/// Refetches occurrences (falling back to synthetic data) and replaces the
/// served dataset.
#[allow(clippy::future_not_send)]
pub async fn refresh(state: web::Data<AppState>) -> HttpResponse {
    let dataset = state.refresh().await;
    HttpResponse::Ok().json(dataset_info(&dataset))
}

fn dataset_info(dataset: &Dataset) -> ApiDatasetInfo {
    ApiDatasetInfo {
        origin: dataset.origin(),
        record_count: dataset.len(),
        species_count: dataset.species().len(),
        loaded_at: dataset.loaded_at(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use eco_migration_geography::default_region_table;
    use eco_migration_occurrence_models::{DatasetOrigin, RawRecord};
    use eco_migration_source::file::FileOccurrenceSource;
    use eco_migration_source::synthetic::SyntheticConfig;
    use serde_json::Value;

    use super::*;
    use crate::configure;

    fn raw(species: &str, lat: &str, lng: &str, date: &str, count: &str) -> RawRecord {
        RawRecord {
            species: Some(species.to_string()),
            decimal_latitude: Some(lat.to_string()),
            decimal_longitude: Some(lng.to_string()),
            event_date: Some(date.to_string()),
            individual_count: Some(count.to_string()),
            ..RawRecord::default()
        }
    }

    fn state() -> web::Data<AppState> {
        let table = default_region_table();
        let records = vec![
            raw("Ardenna tenuirostris", "-42.88", "147.33", "2020-10-01", "4"),
            raw("Ardenna tenuirostris", "-37.81", "144.96", "2020-12-01", "2"),
            raw("Ardenna tenuirostris", "-42.88", "147.33", "2021-10-03", "6"),
            raw("Phascolarctos cinereus", "-33.87", "151.21", "2021-07-15", "1"),
        ];
        let dataset = Dataset::new(records, DatasetOrigin::File, &table.regions);
        web::Data::new(AppState::new(
            dataset,
            table,
            Box::new(FileOccurrenceSource::new(
                "/nonexistent/eco_migration/occurrences.json",
            )),
            SyntheticConfig {
                species: vec!["Vombatus ursinus".to_string()],
                years: 2,
            },
        ))
    }

    async fn get_json(uri: &str) -> Value {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_and_read_body_json(&app, req).await
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let body = get_json("/api/health").await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn species_are_sorted_and_distinct() {
        let body = get_json("/api/species").await;
        assert_eq!(
            body,
            serde_json::json!(["Ardenna tenuirostris", "Phascolarctos cinereus"])
        );
    }

    #[actix_web::test]
    async fn occurrences_filter_and_paginate() {
        let body = get_json("/api/occurrences?species=Ardenna%20tenuirostris").await;
        assert_eq!(body.as_array().unwrap().len(), 3);

        let body = get_json("/api/occurrences?limit=1&offset=3").await;
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["stateProvince"], "New South Wales");
    }

    #[actix_web::test]
    async fn routes_respect_grouping() {
        let by_year = get_json("/api/routes?species=Ardenna%20tenuirostris").await;
        assert_eq!(by_year.as_array().unwrap().len(), 1);

        let by_species =
            get_json("/api/routes?species=Ardenna%20tenuirostris&grouping=species").await;
        let segments = by_species.as_array().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0]["count"], 4);
        assert_eq!(segments[0]["source"], serde_json::json!([147.33, -42.88]));
    }

    #[actix_web::test]
    async fn population_rows_are_flat() {
        let body = get_json("/api/population").await;
        assert_eq!(
            body,
            serde_json::json!([
                { "year": 2020, "actual": 6, "Tasmania": 4, "Victoria": 2 },
                { "year": 2021, "actual": 7, "Tasmania": 6, "New South Wales": 1 },
            ])
        );
    }

    #[actix_web::test]
    async fn projection_includes_requested_regions() {
        let body = get_json("/api/projection?regions=Tasmania,Victoria").await;
        assert_eq!(body["total"].as_array().unwrap().len(), 2);
        assert_eq!(body["total"][0]["count"], 6);
        assert_eq!(body["regions"]["Tasmania"].as_array().unwrap().len(), 2);
        // One point of history falls back to the five-year placeholder.
        assert_eq!(body["regions"]["Victoria"].as_array().unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn insights_cover_configured_regions() {
        let body = get_json("/api/insights?species=Ardenna%20tenuirostris").await;
        assert_eq!(body["occurrenceStats"]["totalRecords"], 3);
        assert_eq!(body["occurrenceStats"]["timespan"], "2020 - 2021");
        assert_eq!(body["stateCorrelations"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn refresh_falls_back_to_synthetic() {
        let state = state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/api/refresh").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let regions = state.regions.regions.len();
        assert_eq!(body["origin"], "synthetic");
        assert_eq!(body["recordCount"], regions * 2);
        assert_eq!(body["speciesCount"], 1);
        assert_eq!(state.dataset().origin(), DatasetOrigin::Synthetic);

        let req = test::TestRequest::get().uri("/api/species").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!(["Vombatus ursinus"]));
    }

    #[actix_web::test]
    async fn regions_expose_rules() {
        let body = get_json("/api/regions").await;
        assert_eq!(body["regions"][0]["name"], "Tasmania");
        assert_eq!(body["rules"].as_array().unwrap().len(), 3);
        assert_eq!(
            body["correlationRegions"],
            serde_json::json!(["Tasmania", "Victoria", "New South Wales"])
        );
    }
}
