//! Core domain logic for Workcast.
//!
//! This crate contains pure logic with ZERO web or database dependencies.
//! Record types, input validation, the reconciliation engine and forecast
//! aggregation live here.
//!
//! # Modules
//!
//! - `catalog` - Lookup records (verticals, units, clients, work types, origins)
//! - `forecast` - Forecast records, detail rows and aggregation
//! - `reconcile` - Diffing an edited table against its snapshot
//! - `validation` - Field-level rules shared by all records

pub mod catalog;
pub mod forecast;
pub mod reconcile;
pub mod validation;

pub use validation::ValidationError;
