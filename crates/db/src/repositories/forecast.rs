//! Forecast repository: denormalized reads and the narrow write path.
//!
//! A forecast's identity (client, unit, work type, month) is fixed at
//! creation. The only mutation is an amount update.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, NotSet, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use tracing::info;
use workcast_core::catalog::Draft;
use workcast_core::forecast::{AmountUpdate, Forecast, ForecastDetail, ForecastSummary, NewForecast};
use workcast_core::reconcile::ReconcileTarget;
use workcast_shared::types::{ForecastId, PageRequest};

use super::error::{StoreError, within, write_error};
use crate::entities::{business_unit, business_vertical, clients, forecasts, work_type};

/// Detail row as selected by the joined query.
#[derive(Debug, FromQueryResult)]
struct DetailRow {
    forecast_id: i32,
    business_vertical_name: String,
    business_unit_name: String,
    client_name: String,
    work_type_name: String,
    dt: NaiveDate,
    forecast_amount: i32,
}

impl From<DetailRow> for ForecastDetail {
    fn from(row: DetailRow) -> Self {
        Self {
            id: row.forecast_id.into(),
            vertical_name: row.business_vertical_name,
            unit_name: row.business_unit_name,
            client_name: row.client_name,
            work_type_name: row.work_type_name,
            date: row.dt,
            amount: row.forecast_amount,
        }
    }
}

fn to_forecast(model: forecasts::Model) -> Forecast {
    Forecast {
        id: model.forecast_id.into(),
        client_id: model.client_id.into(),
        unit_id: model.business_unit_id.into(),
        work_type_id: model.work_type_id.into(),
        date: model.dt,
        amount: model.forecast_amount,
        name: model.forecast_name,
    }
}

/// Forecast repository.
#[derive(Debug, Clone)]
pub struct ForecastRepository {
    db: DatabaseConnection,
    deadline: Duration,
}

impl ForecastRepository {
    /// Creates a new forecast repository. Every call is bounded by `deadline`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, deadline: Duration) -> Self {
        Self { db, deadline }
    }

    /// Lists detail rows ordered by vertical, unit, client, work type and month.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_detail(&self, page: PageRequest) -> Result<Vec<ForecastDetail>, StoreError> {
        let query = detail_query().offset(page.offset()).limit(page.limit());
        self.fetch_details(query).await
    }

    /// Aggregates every forecast for dashboard display.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn summary(&self) -> Result<ForecastSummary, StoreError> {
        let rows = self.fetch_details(detail_query()).await?;
        Ok(ForecastSummary::from_details(&rows))
    }

    /// Fetches a raw forecast row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self, id: ForecastId) -> Result<Option<Forecast>, StoreError> {
        Ok(self.find_model(id).await?.map(to_forecast))
    }

    /// Inserts a forecast.
    ///
    /// # Errors
    ///
    /// `Validation` for a negative amount or a date that is not the first of
    /// a month, `DuplicateForecast` when the identity tuple is taken,
    /// `InvalidReference` when a referenced row does not exist.
    pub async fn create(&self, forecast: NewForecast) -> Result<Forecast, StoreError> {
        let forecast = forecast.validated()?;
        let key = forecast.key();

        let active = forecasts::ActiveModel {
            forecast_id: NotSet,
            client_id: Set(forecast.client_id.into()),
            business_unit_id: Set(forecast.unit_id.into()),
            work_type_id: Set(forecast.work_type_id.into()),
            dt: Set(forecast.date),
            forecast_amount: Set(forecast.amount),
            forecast_name: Set(forecast.name),
        };

        let model = within(self.deadline, async {
            active.insert(&self.db).await.map_err(|err| {
                write_error(
                    err,
                    || {
                        StoreError::DuplicateForecast(format!(
                            "a forecast for client {}, business unit {}, work type {} and {} already exists",
                            key.client_id, key.unit_id, key.work_type_id, key.date
                        ))
                    },
                    || {
                        StoreError::InvalidReference(
                            "forecast references a missing client, business unit or work type"
                                .to_string(),
                        )
                    },
                )
            })
        })
        .await?;

        let forecast = to_forecast(model);
        info!(forecast_id = %forecast.id, "forecast created");
        Ok(forecast)
    }

    /// Sets a new amount. Identity fields are never written.
    ///
    /// # Errors
    ///
    /// `Validation` for a negative amount, `NotFound` when the forecast does
    /// not exist.
    pub async fn update_amount(
        &self,
        id: ForecastId,
        update: AmountUpdate,
    ) -> Result<Forecast, StoreError> {
        let update = update.validated()?;

        let current = self.find_model(id).await?.ok_or(not_found(id))?;
        let mut active: forecasts::ActiveModel = current.into();
        active.forecast_amount = Set(update.amount);

        let model = within(self.deadline, async {
            active.update(&self.db).await.map_err(|err| match err {
                DbErr::RecordNotUpdated => not_found(id),
                err => err.into(),
            })
        })
        .await?;

        info!(forecast_id = %id, amount = update.amount, "forecast amount updated");
        Ok(to_forecast(model))
    }

    /// Deletes a forecast and returns its last value.
    ///
    /// # Errors
    ///
    /// `NotFound` when the forecast does not exist.
    pub async fn delete(&self, id: ForecastId) -> Result<Forecast, StoreError> {
        let current = self.find_model(id).await?.ok_or(not_found(id))?;

        let result = within(self.deadline, async {
            Ok(forecasts::Entity::delete_many()
                .filter(forecasts::Column::ForecastId.eq(id.into_inner()))
                .exec(&self.db)
                .await?)
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(not_found(id));
        }

        info!(forecast_id = %id, "forecast deleted");
        Ok(to_forecast(current))
    }

    async fn find_model(&self, id: ForecastId) -> Result<Option<forecasts::Model>, StoreError> {
        within(self.deadline, async {
            Ok(forecasts::Entity::find_by_id(id.into_inner())
                .one(&self.db)
                .await?)
        })
        .await
    }

    async fn fetch_details(
        &self,
        query: Select<forecasts::Entity>,
    ) -> Result<Vec<ForecastDetail>, StoreError> {
        let rows = within(self.deadline, async {
            Ok(query.into_model::<DetailRow>().all(&self.db).await?)
        })
        .await?;

        Ok(rows.into_iter().map(ForecastDetail::from).collect())
    }
}

#[async_trait]
impl ReconcileTarget for ForecastRepository {
    type Row = ForecastDetail;
    type Error = StoreError;

    async fn apply_update(&self, id: ForecastId, changes: AmountUpdate) -> Result<(), StoreError> {
        self.update_amount(id, changes).await.map(drop)
    }

    async fn apply_delete(&self, id: ForecastId) -> Result<(), StoreError> {
        self.delete(id).await.map(drop)
    }
}

/// Forecasts joined to client, work type, unit and the unit's vertical.
fn detail_query() -> Select<forecasts::Entity> {
    forecasts::Entity::find()
        .select_only()
        .column(forecasts::Column::ForecastId)
        .column(business_vertical::Column::BusinessVerticalName)
        .column(business_unit::Column::BusinessUnitName)
        .column(clients::Column::ClientName)
        .column(work_type::Column::WorkTypeName)
        .column(forecasts::Column::Dt)
        .column(forecasts::Column::ForecastAmount)
        .join(JoinType::InnerJoin, forecasts::Relation::Clients.def())
        .join(JoinType::InnerJoin, forecasts::Relation::WorkType.def())
        .join(JoinType::InnerJoin, forecasts::Relation::BusinessUnit.def())
        .join(
            JoinType::InnerJoin,
            business_unit::Relation::BusinessVertical.def(),
        )
        .order_by_asc(business_vertical::Column::BusinessVerticalName)
        .order_by_asc(business_unit::Column::BusinessUnitName)
        .order_by_asc(clients::Column::ClientName)
        .order_by_asc(work_type::Column::WorkTypeName)
        .order_by_asc(forecasts::Column::Dt)
        .order_by_asc(forecasts::Column::ForecastId)
}

const fn not_found(id: ForecastId) -> StoreError {
    StoreError::NotFound {
        entity: "forecast",
        id: id.into_inner(),
    }
}
