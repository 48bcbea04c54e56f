//! Ad pacing analytics over a published spreadsheet export.
//!
//! The sheet is fetched once per source URL, decoded into fixed-schema
//! records, filtered, grouped and turned into the dashboard reports:
//! the per-app campaign split, the day-over-day comparison and the monthly
//! budget tracker.

pub mod budgets;
pub mod config;
pub mod dates;
pub mod errors;
pub mod export;
pub mod filters;
pub mod metrics;
pub mod reports;
pub mod sheet;

pub use errors::{Error, LoadError, Result, ValidationError};
