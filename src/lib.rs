//! Compile relational schema definitions (`CREATE TABLE` DDL) into laid-out Grafana dashboards.
#![warn(missing_docs)]

/// Column classification: role flags, display units, and the ordered rule tables behind them.
pub mod classifier;
/// Crate-wide error type.
pub mod error;
/// Dashboard compilation: panel emission, grid packing, query templates, and the JSON document.
pub mod generator;
/// File output and markdown report generation.
pub mod output;
/// SQL DDL parsing and identifier helpers.
pub mod parser;

pub use error::Error;
