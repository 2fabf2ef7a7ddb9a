//! Shared fixtures for repository tests.
#![allow(dead_code)]

use std::time::Duration;

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use workcast_core::catalog::{
    BusinessUnit, BusinessVertical, Client, NewBusinessUnit, NewBusinessVertical, NewClient,
    NewWorkType, NewWorkTypeOrigin, WorkType, WorkTypeOrigin,
};
use workcast_db::migration::Migrator;
use workcast_db::{
    ClientRepository, ForecastRepository, OriginRepository, UnitRepository, VerticalRepository,
    WorkTypeRepository,
};

pub const DEADLINE: Duration = Duration::from_secs(5);

/// Fresh in-memory database with the schema applied.
pub async fn memory_db() -> DatabaseConnection {
    // One connection: every in-memory connection is its own database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// All repositories over one connection.
pub struct Stores {
    pub verticals: VerticalRepository,
    pub units: UnitRepository,
    pub clients: ClientRepository,
    pub origins: OriginRepository,
    pub work_types: WorkTypeRepository,
    pub forecasts: ForecastRepository,
}

impl Stores {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            verticals: VerticalRepository::new(db.clone(), DEADLINE),
            units: UnitRepository::new(db.clone(), DEADLINE),
            clients: ClientRepository::new(db.clone(), DEADLINE),
            origins: OriginRepository::new(db.clone(), DEADLINE),
            work_types: WorkTypeRepository::new(db.clone(), DEADLINE),
            forecasts: ForecastRepository::new(db.clone(), DEADLINE),
        }
    }
}

/// One row of every lookup kind, wired together.
pub struct Lookups {
    pub vertical: BusinessVertical,
    pub unit: BusinessUnit,
    pub client: Client,
    pub origin: WorkTypeOrigin,
    pub work_type: WorkType,
}

pub async fn seed_lookups(stores: &Stores) -> Lookups {
    let vertical = stores
        .verticals
        .create(NewBusinessVertical {
            name: "Technology".into(),
        })
        .await
        .unwrap();
    let unit = stores
        .units
        .create(NewBusinessUnit {
            name: "Consulting Services".into(),
            vertical_id: vertical.id,
        })
        .await
        .unwrap();
    let client = stores
        .clients
        .create(NewClient {
            name: "Acme Corp".into(),
            active: true,
            start_date: date(2023, 1, 1),
            end_date: None,
            unit_id: unit.id,
        })
        .await
        .unwrap();
    let origin = stores
        .origins
        .create(NewWorkTypeOrigin {
            name: "Client Request".into(),
        })
        .await
        .unwrap();
    let work_type = stores
        .work_types
        .create(NewWorkType {
            name: "Consulting".into(),
            origin_id: origin.id,
        })
        .await
        .unwrap();

    Lookups {
        vertical,
        unit,
        client,
        origin,
        work_type,
    }
}
