#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Occurrence analytics pipeline.
//!
//! Raw records are enriched once ([`enrich`]) and then feed independent,
//! pure derivations: movement routes ([`routes`]), the yearly population
//! table ([`population`]), logistic projections ([`logistic`]) and
//! descriptive migration insights ([`insights`]). None of them fail; a
//! malformed field only drops the record from the derivation that needs
//! that field.

pub mod dataset;
pub mod enrich;
pub mod insights;
pub mod logistic;
pub mod population;
pub mod routes;
pub mod stats;

pub use dataset::Dataset;
