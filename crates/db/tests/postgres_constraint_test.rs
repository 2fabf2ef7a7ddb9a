//! Constraint tests against a real `PostgreSQL` server.
//!
//! Starts a throwaway container, so these need a Docker daemon.
//! Run with `cargo test -p workcast-db --test postgres_constraint_test -- --ignored`.

use chrono::NaiveDate;
use sea_orm_migration::MigratorTrait;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;
use workcast_core::catalog::{
    NewBusinessUnit, NewBusinessVertical, NewClient, NewWorkType, NewWorkTypeOrigin,
};
use workcast_core::forecast::NewForecast;
use workcast_db::migration::Migrator;
use workcast_db::{
    ClientRepository, ForecastRepository, OriginRepository, StoreError, UnitRepository,
    VerticalRepository, WorkTypeRepository, connect,
};
use workcast_shared::PostgresConfig;

fn config(port: u16) -> PostgresConfig {
    PostgresConfig {
        host: "127.0.0.1".to_string(),
        port,
        user: "postgres".to_string(),
        password: "postgres".to_string(),
        dbname: "postgres".to_string(),
        min_connections: 1,
        max_connections: 4,
        connect_timeout_secs: 10,
        acquire_timeout_secs: 10,
        statement_timeout_secs: 10,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_constraints_on_postgres() {
    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start postgres container");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to read mapped port");

    let config = config(port);
    let db = connect(&config).await.expect("Failed to connect");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let deadline = config.statement_timeout();
    let verticals = VerticalRepository::new(db.clone(), deadline);
    let units = UnitRepository::new(db.clone(), deadline);
    let clients = ClientRepository::new(db.clone(), deadline);
    let origins = OriginRepository::new(db.clone(), deadline);
    let work_types = WorkTypeRepository::new(db.clone(), deadline);
    let forecasts = ForecastRepository::new(db.clone(), deadline);

    let tech = verticals
        .create(NewBusinessVertical {
            name: "Technology".into(),
        })
        .await
        .unwrap();
    let err = verticals
        .create(NewBusinessVertical {
            name: "Technology".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateName(_)), "got {err:?}");

    let unit = units
        .create(NewBusinessUnit {
            name: "Consulting Services".into(),
            vertical_id: tech.id,
        })
        .await
        .unwrap();
    let client = clients
        .create(NewClient {
            name: "Acme Corp".into(),
            active: true,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: None,
            unit_id: unit.id,
        })
        .await
        .unwrap();
    let origin = origins
        .create(NewWorkTypeOrigin {
            name: "Client Request".into(),
        })
        .await
        .unwrap();
    let work_type = work_types
        .create(NewWorkType {
            name: "Consulting".into(),
            origin_id: origin.id,
        })
        .await
        .unwrap();

    let draft = NewForecast {
        client_id: client.id,
        unit_id: unit.id,
        work_type_id: work_type.id,
        date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        amount: 10_000,
        name: None,
    };
    forecasts.create(draft.clone()).await.unwrap();
    let err = forecasts.create(draft).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateForecast(_)), "got {err:?}");

    let err = verticals.delete(tech.id).await.unwrap_err();
    assert!(matches!(err, StoreError::ReferencedByChild(_)), "got {err:?}");
    let err = clients.delete(client.id).await.unwrap_err();
    assert!(matches!(err, StoreError::ReferencedByChild(_)), "got {err:?}");

    Migrator::down(&db, None).await.expect("Failed to roll back");
    db.close().await.expect("Failed to close pool");
}
