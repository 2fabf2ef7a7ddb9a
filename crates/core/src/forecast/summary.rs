//! Aggregation over forecast detail rows for dashboard display.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::ForecastDetail;

/// Total amount for one display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTotal {
    /// Display name.
    pub name: String,
    /// Summed amount.
    pub total: i64,
}

/// Total amount for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// First day of the month.
    pub month: NaiveDate,
    /// Summed amount.
    pub total: i64,
}

/// Aggregated view of a set of forecasts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Number of forecasts.
    pub forecast_count: usize,
    /// Sum of all amounts.
    pub total_amount: i64,
    /// Mean amount rounded to 2 decimal places. Zero when empty.
    pub average_amount: Decimal,
    /// Distinct clients.
    pub client_count: usize,
    /// Distinct business units.
    pub unit_count: usize,
    /// Distinct verticals.
    pub vertical_count: usize,
    /// Totals per vertical, by name.
    pub by_vertical: Vec<NamedTotal>,
    /// Totals per business unit, by name.
    pub by_unit: Vec<NamedTotal>,
    /// Totals per client, by name.
    pub by_client: Vec<NamedTotal>,
    /// Totals per work type, by name.
    pub by_work_type: Vec<NamedTotal>,
    /// Totals per month, chronological.
    pub by_month: Vec<MonthTotal>,
}

impl ForecastSummary {
    /// Aggregates detail rows.
    pub fn from_details<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a ForecastDetail>,
    {
        let mut count = 0usize;
        let mut total = 0i64;
        let mut by_vertical = BTreeMap::<&str, i64>::new();
        let mut by_unit = BTreeMap::<&str, i64>::new();
        let mut by_client = BTreeMap::<&str, i64>::new();
        let mut by_work_type = BTreeMap::<&str, i64>::new();
        let mut by_month = BTreeMap::<NaiveDate, i64>::new();

        for row in rows {
            let amount = i64::from(row.amount);
            count += 1;
            total += amount;
            *by_vertical.entry(row.vertical_name.as_str()).or_default() += amount;
            *by_unit.entry(row.unit_name.as_str()).or_default() += amount;
            *by_client.entry(row.client_name.as_str()).or_default() += amount;
            *by_work_type.entry(row.work_type_name.as_str()).or_default() += amount;
            *by_month.entry(month_of(row.date)).or_default() += amount;
        }

        let average_amount = if count == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(total) / Decimal::from(count)).round_dp(2)
        };

        Self {
            forecast_count: count,
            total_amount: total,
            average_amount,
            client_count: by_client.len(),
            unit_count: by_unit.len(),
            vertical_count: by_vertical.len(),
            by_vertical: named(by_vertical),
            by_unit: named(by_unit),
            by_client: named(by_client),
            by_work_type: named(by_work_type),
            by_month: by_month
                .into_iter()
                .map(|(month, total)| MonthTotal { month, total })
                .collect(),
        }
    }
}

fn named(totals: BTreeMap<&str, i64>) -> Vec<NamedTotal> {
    totals
        .into_iter()
        .map(|(name, total)| NamedTotal {
            name: name.to_string(),
            total,
        })
        .collect()
}

fn month_of(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
