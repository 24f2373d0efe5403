#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the eco migration server.
//!
//! Derived tables (routes, population rows, insights) are served in their
//! analytics shapes; the types here cover query parameters and the few
//! responses that only exist at the API boundary.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use eco_migration_analytics_models::{LogisticPoint, RouteGrouping};
use eco_migration_occurrence_models::DatasetOrigin;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Summary of the dataset currently being served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDatasetInfo {
    /// Where the records came from.
    pub origin: DatasetOrigin,
    /// Number of enriched records.
    pub record_count: usize,
    /// Number of distinct species.
    pub species_count: usize,
    /// When the dataset was built.
    pub loaded_at: DateTime<Utc>,
}

/// Query parameters accepted by endpoints that filter by species.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesQueryParams {
    /// Exact species name. Blank means all species.
    pub species: Option<String>,
}

impl SpeciesQueryParams {
    /// The species filter, with blank values treated as absent.
    #[must_use]
    pub fn species(&self) -> Option<&str> {
        non_blank(self.species.as_deref())
    }
}

/// Query parameters for the occurrences endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceQueryParams {
    /// Exact species name. Blank means all species.
    pub species: Option<String>,
    /// Maximum number of records returned.
    pub limit: Option<usize>,
    /// Number of matching records skipped before `limit` applies.
    pub offset: Option<usize>,
}

impl OccurrenceQueryParams {
    /// The species filter, with blank values treated as absent.
    #[must_use]
    pub fn species(&self) -> Option<&str> {
        non_blank(self.species.as_deref())
    }
}

/// Query parameters for the routes endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQueryParams {
    /// Exact species name. Blank means all species.
    pub species: Option<String>,
    /// `species` or `species_year` (default).
    pub grouping: Option<RouteGrouping>,
}

impl RouteQueryParams {
    /// The species filter, with blank values treated as absent.
    #[must_use]
    pub fn species(&self) -> Option<&str> {
        non_blank(self.species.as_deref())
    }
}

/// Query parameters for the projection endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionQueryParams {
    /// Exact species name. Blank means all species.
    pub species: Option<String>,
    /// Comma-separated region names to project individually.
    pub regions: Option<String>,
}

impl ProjectionQueryParams {
    /// The species filter, with blank values treated as absent.
    #[must_use]
    pub fn species(&self) -> Option<&str> {
        non_blank(self.species.as_deref())
    }

    /// Parses the comma-separated `regions` list, dropping blank entries
    /// and duplicates while keeping first-seen order.
    #[must_use]
    pub fn regions(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for name in self
            .regions
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            if !out.iter().any(|existing| existing == name) {
                out.push(name.to_string());
            }
        }
        out
    }
}

/// Logistic projection of the all-region total and of each requested
/// region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProjection {
    /// Projection of the all-region yearly totals.
    pub total: Vec<LogisticPoint>,
    /// Projection per requested region, keyed by region name.
    pub regions: BTreeMap<String, Vec<LogisticPoint>>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
