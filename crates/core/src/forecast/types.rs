//! Forecast data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use workcast_shared::types::{BusinessUnitId, ClientId, ForecastId, WorkTypeId};

use crate::catalog::Draft;
use crate::validation::{ValidationError, check_amount, check_month_start, normalize_label};

/// A projected work amount for a client, unit, work type and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    /// Forecast ID.
    #[serde(rename = "forecast_id")]
    pub id: ForecastId,
    /// Client the work is for.
    pub client_id: ClientId,
    /// Business unit delivering the work.
    #[serde(rename = "business_unit_id")]
    pub unit_id: BusinessUnitId,
    /// Kind of work.
    pub work_type_id: WorkTypeId,
    /// First day of the forecast month.
    #[serde(rename = "dt")]
    pub date: NaiveDate,
    /// Forecast amount.
    #[serde(rename = "forecast_amount")]
    pub amount: i32,
    /// Optional label.
    #[serde(rename = "forecast_name", default)]
    pub name: Option<String>,
}

impl Forecast {
    /// Returns the identity tuple of this forecast.
    #[must_use]
    pub const fn key(&self) -> ForecastKey {
        ForecastKey {
            unit_id: self.unit_id,
            client_id: self.client_id,
            work_type_id: self.work_type_id,
            date: self.date,
        }
    }
}

/// Input for creating a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewForecast {
    /// Client the work is for.
    pub client_id: ClientId,
    /// Business unit delivering the work.
    #[serde(rename = "business_unit_id")]
    pub unit_id: BusinessUnitId,
    /// Kind of work.
    pub work_type_id: WorkTypeId,
    /// First day of the forecast month.
    #[serde(rename = "dt")]
    pub date: NaiveDate,
    /// Forecast amount.
    #[serde(rename = "forecast_amount")]
    pub amount: i32,
    /// Optional label.
    #[serde(rename = "forecast_name", default)]
    pub name: Option<String>,
}

impl NewForecast {
    /// Returns the identity tuple the new forecast will occupy.
    #[must_use]
    pub const fn key(&self) -> ForecastKey {
        ForecastKey {
            unit_id: self.unit_id,
            client_id: self.client_id,
            work_type_id: self.work_type_id,
            date: self.date,
        }
    }
}

impl Draft for NewForecast {
    fn validated(self) -> Result<Self, ValidationError> {
        check_amount(self.amount)?;
        check_month_start(self.date)?;
        Ok(Self {
            name: normalize_label("forecast_name", self.name)?,
            ..self
        })
    }
}

/// Unique identity of a forecast. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ForecastKey {
    /// Business unit.
    #[serde(rename = "business_unit_id")]
    pub unit_id: BusinessUnitId,
    /// Client.
    pub client_id: ClientId,
    /// Work type.
    pub work_type_id: WorkTypeId,
    /// Month.
    #[serde(rename = "dt")]
    pub date: NaiveDate,
}

/// The only mutation a stored forecast accepts.
///
/// Any other field in the request body is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountUpdate {
    /// New forecast amount.
    #[serde(rename = "forecast_amount")]
    pub amount: i32,
}

impl AmountUpdate {
    /// Validates the new amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative.
    pub fn validated(self) -> Result<Self, ValidationError> {
        check_amount(self.amount)?;
        Ok(self)
    }
}

/// A forecast joined with the display names of its ancestor lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDetail {
    /// Forecast ID.
    #[serde(rename = "forecast_id")]
    pub id: ForecastId,
    /// Vertical owning the forecast's unit.
    #[serde(rename = "business_vertical_name")]
    pub vertical_name: String,
    /// Forecast's business unit.
    #[serde(rename = "business_unit_name")]
    pub unit_name: String,
    /// Client.
    pub client_name: String,
    /// Work type.
    pub work_type_name: String,
    /// Month.
    #[serde(rename = "dt")]
    pub date: NaiveDate,
    /// Forecast amount.
    #[serde(rename = "forecast_amount")]
    pub amount: i32,
}
