//! Initial database migration.
//!
//! Creates the five lookup tables and the forecasts fact table. The DDL is
//! shared between PostgreSQL and SQLite except for the serial key column.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let serial = serial_key(manager.get_database_backend())?;

        // ============================================================
        // PART 1: LOOKUP TABLES (parents first)
        // ============================================================
        for template in [
            BUSINESS_VERTICAL_SQL,
            WORK_TYPE_ORIGIN_TYPE_SQL,
            BUSINESS_UNIT_SQL,
            WORK_TYPE_SQL,
            CLIENTS_SQL,
        ] {
            db.execute_unprepared(&template.replace("{serial}", serial))
                .await?;
        }

        // ============================================================
        // PART 2: FORECASTS
        // ============================================================
        db.execute_unprepared(&FORECASTS_SQL.replace("{serial}", serial))
            .await?;
        db.execute_unprepared(FORECASTS_DT_INDEX_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in [
            "forecasts",
            "clients",
            "work_type",
            "business_unit",
            "work_type_origin_type",
            "business_vertical",
        ] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {table};"))
                .await?;
        }
        Ok(())
    }
}

fn serial_key(backend: DatabaseBackend) -> Result<&'static str, DbErr> {
    match backend {
        DatabaseBackend::Postgres => Ok("SERIAL PRIMARY KEY"),
        DatabaseBackend::Sqlite => Ok("INTEGER PRIMARY KEY AUTOINCREMENT"),
        DatabaseBackend::MySql => Err(DbErr::Migration(
            "MySQL is not a supported backend".to_string(),
        )),
    }
}

const BUSINESS_VERTICAL_SQL: &str = r"
CREATE TABLE business_vertical (
    business_vertical_id {serial},
    business_vertical_name VARCHAR(255) NOT NULL UNIQUE
);
";

const WORK_TYPE_ORIGIN_TYPE_SQL: &str = r"
CREATE TABLE work_type_origin_type (
    work_type_origin_type_id {serial},
    work_type_origin_type_name VARCHAR(255) NOT NULL UNIQUE
);
";

const BUSINESS_UNIT_SQL: &str = r"
CREATE TABLE business_unit (
    business_unit_id {serial},
    business_unit_name VARCHAR(255) NOT NULL UNIQUE,
    business_vertical_id INTEGER NOT NULL
        REFERENCES business_vertical(business_vertical_id)
);
";

const WORK_TYPE_SQL: &str = r"
CREATE TABLE work_type (
    work_type_id {serial},
    work_type_name VARCHAR(255) NOT NULL UNIQUE,
    work_type_origin_type_id INTEGER NOT NULL
        REFERENCES work_type_origin_type(work_type_origin_type_id)
);
";

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    client_id {serial},
    client_name VARCHAR(255) NOT NULL UNIQUE,
    client_active BOOLEAN NOT NULL DEFAULT TRUE,
    client_start_date DATE NOT NULL,
    client_end_date DATE,
    business_unit_id INTEGER NOT NULL
        REFERENCES business_unit(business_unit_id),
    CONSTRAINT chk_client_dates CHECK (client_end_date IS NULL OR client_end_date >= client_start_date)
);
";

const FORECASTS_SQL: &str = r"
CREATE TABLE forecasts (
    forecast_id {serial},
    client_id INTEGER NOT NULL
        REFERENCES clients(client_id),
    business_unit_id INTEGER NOT NULL
        REFERENCES business_unit(business_unit_id),
    work_type_id INTEGER NOT NULL
        REFERENCES work_type(work_type_id),
    dt DATE NOT NULL,
    forecast_amount INTEGER NOT NULL,
    forecast_name VARCHAR(255),
    CONSTRAINT unique_forecast UNIQUE (business_unit_id, client_id, work_type_id, dt),
    CONSTRAINT chk_forecast_amount CHECK (forecast_amount >= 0)
);
";

const FORECASTS_DT_INDEX_SQL: &str = "CREATE INDEX idx_dt ON forecasts(dt);";
