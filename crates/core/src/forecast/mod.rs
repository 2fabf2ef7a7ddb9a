//! Forecast records, denormalized detail rows and aggregation.

pub mod summary;
pub mod types;


pub use summary::{ForecastSummary, MonthTotal, NamedTotal};
pub use types::{AmountUpdate, Forecast, ForecastDetail, ForecastKey, NewForecast};
