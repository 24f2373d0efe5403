#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the eco migration analytics.
//!
//! Loads the occurrence dataset once at startup (falling back to synthetic
//! records when the upstream API is unavailable) and serves every derived
//! table as JSON under `/api`. `POST /api/refresh` rebuilds the dataset
//! and swaps it in.

mod handlers;

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use eco_migration_analytics::Dataset;
use eco_migration_geography::default_region_table;
use eco_migration_geography_models::RegionTable;
use eco_migration_source::OccurrenceSource;
use eco_migration_source::config::SourceConfig;
use eco_migration_source::file::FileOccurrenceSource;
use eco_migration_source::http::HttpOccurrenceSource;
use eco_migration_source::load::load_with_fallback;
use eco_migration_source::synthetic::SyntheticConfig;

/// Environment variable naming a local JSON file to serve instead of the
/// remote API.
pub const INPUT_ENV: &str = "ECO_MIGRATION_INPUT";

/// Shared application state.
pub struct AppState {
    dataset: RwLock<Arc<Dataset>>,
    /// Region, rule and correlation configuration.
    pub regions: RegionTable,
    source: Box<dyn OccurrenceSource>,
    synthetic: SyntheticConfig,
}

impl AppState {
    /// Creates state serving `dataset` until the first refresh.
    #[must_use]
    pub fn new(
        dataset: Dataset,
        regions: RegionTable,
        source: Box<dyn OccurrenceSource>,
        synthetic: SyntheticConfig,
    ) -> Self {
        Self {
            dataset: RwLock::new(Arc::new(dataset)),
            regions,
            source,
            synthetic,
        }
    }

    /// Loads a dataset from `source` (with synthetic fallback) and wraps it
    /// in fresh state.
    #[allow(clippy::future_not_send)]
    pub async fn load(
        regions: RegionTable,
        source: Box<dyn OccurrenceSource>,
        synthetic: SyntheticConfig,
    ) -> Self {
        let dataset = build_dataset(source.as_ref(), &regions, &synthetic).await;
        Self::new(dataset, regions, source, synthetic)
    }

    /// The dataset currently being served.
    #[must_use]
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Rebuilds the dataset and swaps it in.
    ///
    /// The new dataset is built without holding the lock, so readers keep
    /// the previous one until the swap.
    #[allow(clippy::future_not_send)]
    pub async fn refresh(&self) -> Arc<Dataset> {
        let dataset = Arc::new(
            build_dataset(self.source.as_ref(), &self.regions, &self.synthetic).await,
        );
        *self.dataset.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&dataset);
        dataset
    }
}

#[allow(clippy::future_not_send)]
async fn build_dataset(
    source: &dyn OccurrenceSource,
    regions: &RegionTable,
    synthetic: &SyntheticConfig,
) -> Dataset {
    let mut rng = rand::thread_rng();
    let loaded = load_with_fallback(source, &regions.regions, synthetic, &mut rng).await;
    Dataset::new(loaded.records, loaded.origin, &regions.regions)
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/dataset", web::get().to(handlers::dataset))
            .route("/regions", web::get().to(handlers::regions))
            .route("/species", web::get().to(handlers::species))
            .route("/occurrences", web::get().to(handlers::occurrences))
            .route("/routes", web::get().to(handlers::routes))
            .route("/population", web::get().to(handlers::population))
            .route("/projection", web::get().to(handlers::projection))
            .route("/insights", web::get().to(handlers::insights))
            .route("/refresh", web::post().to(handlers::refresh)),
    );
}

/// Picks the occurrence source from the environment: a local file when
/// [`INPUT_ENV`] is set, otherwise the HTTP API.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn source_from_env() -> std::io::Result<Box<dyn OccurrenceSource>> {
    if let Some(path) = std::env::var_os(INPUT_ENV) {
        return Ok(Box::new(FileOccurrenceSource::new(PathBuf::from(path))));
    }
    let source =
        HttpOccurrenceSource::new(&SourceConfig::from_env()).map_err(std::io::Error::other)?;
    Ok(Box::new(source))
}

/// Starts the eco migration API server.
///
/// Loads the dataset, then starts the Actix-Web HTTP server on
/// `BIND_ADDR:PORT` (default `127.0.0.1:8080`). The caller provides the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP client cannot be built,
/// the server fails to bind, or it encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let source = source_from_env()?;
    log::info!("Loading occurrences from {}", source.describe());

    let state = web::Data::new(
        AppState::load(default_region_table(), source, SyntheticConfig::default()).await,
    );

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
