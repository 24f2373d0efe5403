#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region bounding-box and migration rule types.
//!
//! Regions are coarse, named latitude/longitude rectangles standing in for
//! administrative areas (states, territories). They are loaded once from
//! configuration and never mutated. The table order is significant: it is
//! the priority order used when a point falls inside more than one box.

use serde::{Deserialize, Serialize};

/// Region name assigned to records that fall outside every configured box.
pub const UNKNOWN_REGION: &str = "Unknown";

/// A closed latitude/longitude rectangle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBounds {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lng: f64,
    /// Eastern edge.
    pub max_lng: f64,
}

impl RegionBounds {
    /// Creates a new bounding box.
    #[must_use]
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Returns `true` if the point lies inside the closed rectangle.
    ///
    /// `NaN` coordinates fail every comparison and are never contained.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }

    /// Returns `true` if `min <= max` holds on both axes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_lat <= self.max_lat && self.min_lng <= self.max_lng
    }

    /// Returns `true` if the two closed rectangles share at least one point.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
            && self.min_lng <= other.max_lng
            && other.min_lng <= self.max_lng
    }

    /// Center of the rectangle as `(lat, lng)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::midpoint(self.min_lat, self.max_lat),
            f64::midpoint(self.min_lng, self.max_lng),
        )
    }
}

/// A named region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Display name (e.g. "Tasmania").
    pub name: String,
    /// Bounding rectangle.
    pub bounds: RegionBounds,
}

/// A seasonal comparison used to label a region's migration role.
///
/// The region earns `label` when the summed monthly occurrence counts over
/// `months` strictly exceed the sum over `baseline_months`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationRule {
    /// Region the rule is evaluated against.
    pub region: String,
    /// Label attached when the rule holds (e.g. "breeding").
    pub label: String,
    /// Calendar months (1-12) expected to dominate.
    pub months: Vec<u32>,
    /// Calendar months (1-12) compared against.
    pub baseline_months: Vec<u32>,
}

/// The full region configuration: ordered boxes, timing rules, and the
/// regions whose yearly totals are correlated pairwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTable {
    /// Regions in priority order.
    pub regions: Vec<Region>,
    /// Migration timing rules.
    #[serde(default)]
    pub rules: Vec<MigrationRule>,
    /// Regions compared pairwise by yearly-total correlation.
    #[serde(default)]
    pub correlation_regions: Vec<String>,
}

impl RegionTable {
    /// Looks up a region by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Region names in priority order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.name.as_str()).collect()
    }
}
