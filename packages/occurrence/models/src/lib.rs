#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Species-occurrence record types.
//!
//! [`RawRecord`] mirrors the JSON objects returned by the occurrences API:
//! every field is optional and loosely typed. [`EnrichedRecord`] is the
//! normalized form produced once per raw record, carrying a resolved region
//! and year plus the pre-parsed coordinates, date and count that the
//! analytics derivations consume.

pub mod parsing;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Where a dataset's raw records came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetOrigin {
    /// Fetched from the occurrences API.
    Remote,
    /// Read from a local JSON export.
    File,
    /// Generated locally after a failed fetch (or on request).
    Synthetic,
}

/// A species-occurrence record as delivered by the backend.
///
/// Fields accept JSON strings, numbers, or null. Anything else (arrays,
/// objects, booleans) is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// Species name.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub decimal_latitude: Option<String>,
    /// Longitude in decimal degrees.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub decimal_longitude: Option<String>,
    /// Observation date (Darwin Core `eventDate`).
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    /// Explicit observation year.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Number of individuals observed.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub individual_count: Option<String>,
    /// Provider-assigned state or province.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,
}

/// A raw record after region/year resolution and field parsing.
///
/// Created once by the enricher and never mutated. The parsed fields are
/// `None` when the raw value was missing or malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    /// The record as received.
    pub raw: RawRecord,
    /// Resolved region name, or `"Unknown"`.
    pub state_province: String,
    /// Resolved observation year.
    pub year: Option<i32>,
    /// Parsed latitude.
    pub latitude: Option<f64>,
    /// Parsed longitude.
    pub longitude: Option<f64>,
    /// Parsed `eventDate`.
    pub occurred_at: Option<NaiveDateTime>,
    /// Parsed individual count, `1` when missing or malformed.
    pub individual_count: i64,
}

impl EnrichedRecord {
    /// Trimmed, non-empty species name.
    #[must_use]
    pub fn species(&self) -> Option<&str> {
        self.raw
            .species
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns `true` if the record belongs to `species`, or if no filter
    /// is given.
    #[must_use]
    pub fn matches_species(&self, species: Option<&str>) -> bool {
        species.is_none_or(|wanted| self.species() == Some(wanted))
    }
}

/// Deserializes any scalar JSON value into an optional string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => None,
    }))
}
