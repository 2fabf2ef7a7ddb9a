//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - The lookup store and the forecast repository
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    ClientRepository, ForecastRepository, LookupRepository, OriginRepository, StoreError,
    UnitRepository, VerticalRepository, WorkTypeRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;
use workcast_shared::PostgresConfig;

/// Opens the connection pool described by `config`.
///
/// # Errors
///
/// Returns `Unavailable` if the URL is malformed or the database cannot be reached
/// within the connect timeout.
pub async fn connect(config: &PostgresConfig) -> Result<DatabaseConnection, StoreError> {
    let url = config
        .url()
        .map_err(|err| StoreError::Unavailable(err.to_string()))?;

    let mut options = ConnectOptions::new(url);
    options
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .connect_timeout(config.connect_timeout())
        .acquire_timeout(config.acquire_timeout())
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(
        host = %config.host,
        dbname = %config.dbname,
        max_connections = config.max_connections,
        "database pool ready"
    );
    Ok(db)
}
