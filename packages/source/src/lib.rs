#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Occurrence data sources and fetch-with-fallback loading.
//!
//! Each provider implements the [`OccurrenceSource`] trait. The only
//! recovery path is [`load::load_with_fallback`]: when a fetch fails for
//! any reason, a synthetic dataset with the same field names is generated
//! locally so downstream derivations never need to special-case it.

pub mod config;
pub mod file;
pub mod http;
pub mod load;
pub mod synthetic;

use async_trait::async_trait;
use eco_migration_occurrence_models::{DatasetOrigin, RawRecord};

/// Errors that can occur while fetching occurrence records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Requested URL.
        url: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A provider of raw occurrence records.
#[async_trait]
pub trait OccurrenceSource: Send + Sync {
    /// Human-readable description for log messages (URL, file path, ...).
    fn describe(&self) -> String;

    /// The origin recorded on datasets built from this source.
    fn origin(&self) -> DatasetOrigin;

    /// Fetches every available record.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the records cannot be retrieved or decoded.
    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceError>;
}
