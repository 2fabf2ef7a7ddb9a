//! Sample data seeder for Workcast development and testing.
//!
//! Loads three verticals, two origins, four business units, four work
//! types, three clients and eleven monthly forecasts through the stores.
//! Rows that already exist are skipped, so the seeder can run repeatedly.
//!
//! Usage: cargo run --bin seeder

use std::collections::HashMap;
use std::hash::Hash;

use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workcast_core::catalog::{
    NewBusinessUnit, NewBusinessVertical, NewClient, NewWorkType, NewWorkTypeOrigin,
};
use workcast_core::forecast::NewForecast;
use workcast_db::repositories::Lookup;
use workcast_db::{
    ClientRepository, ForecastRepository, LookupRepository, OriginRepository, StoreError,
    UnitRepository, VerticalRepository, WorkTypeRepository, connect,
};
use workcast_shared::AppConfig;
use workcast_shared::types::PageRequest;

/// Large enough to read back every seeded row in one page.
const ALL: PageRequest = PageRequest::new(0, 10_000);

/// (client, unit, work type, month, amount)
const FORECASTS: [(&str, &str, &str, (i32, u32), i32); 11] = [
    ("Acme Corp", "Consulting Services", "Consulting", (2025, 11), 10_000),
    ("Acme Corp", "Consulting Services", "Consulting", (2025, 12), 12_000),
    ("Acme Corp", "Consulting Services", "Consulting", (2026, 1), 11_000),
    ("Acme Corp", "Consulting Services", "Development", (2025, 11), 25_000),
    ("Acme Corp", "Consulting Services", "Development", (2025, 12), 22_000),
    ("Acme Corp", "Consulting Services", "Development", (2026, 1), 27_000),
    ("Beta Industries", "Managed Services", "Support", (2025, 11), 5_000),
    ("Beta Industries", "Managed Services", "Support", (2025, 12), 5_000),
    ("Beta Industries", "Managed Services", "Support", (2026, 1), 5_500),
    ("Beta Industries", "Managed Services", "Data Analysis", (2025, 11), 8_000),
    ("Beta Industries", "Managed Services", "Data Analysis", (2025, 12), 9_000),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workcast=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect(&config.postgres).await?;
    let deadline = config.postgres.statement_timeout();

    let verticals = VerticalRepository::new(db.clone(), deadline);
    let units = UnitRepository::new(db.clone(), deadline);
    let clients = ClientRepository::new(db.clone(), deadline);
    let origins = OriginRepository::new(db.clone(), deadline);
    let work_types = WorkTypeRepository::new(db.clone(), deadline);
    let forecasts = ForecastRepository::new(db.clone(), deadline);

    info!("Seeding business verticals...");
    let drafts = ["Technology", "Finance", "Healthcare"].map(|name| NewBusinessVertical {
        name: name.to_string(),
    });
    seed_lookup(&verticals, drafts).await?;
    let vertical_ids = index(verticals.list(ALL).await?, |v| (v.name, v.id));

    info!("Seeding work type origins...");
    let drafts = ["Internal Project", "Client Request"].map(|name| NewWorkTypeOrigin {
        name: name.to_string(),
    });
    seed_lookup(&origins, drafts).await?;
    let origin_ids = index(origins.list(ALL).await?, |o| (o.name, o.id));

    info!("Seeding business units...");
    let mut drafts = Vec::new();
    for (name, vertical) in [
        ("Consulting Services", "Technology"),
        ("Managed Services", "Technology"),
        ("Investment Banking", "Finance"),
        ("Data Science", "Healthcare"),
    ] {
        drafts.push(NewBusinessUnit {
            name: name.to_string(),
            vertical_id: lookup(&vertical_ids, vertical)?,
        });
    }
    seed_lookup(&units, drafts).await?;
    let unit_ids = index(units.list(ALL).await?, |u| (u.name, u.id));

    info!("Seeding work types...");
    let mut drafts = Vec::new();
    for (name, origin) in [
        ("Consulting", "Client Request"),
        ("Development", "Internal Project"),
        ("Support", "Client Request"),
        ("Data Analysis", "Client Request"),
    ] {
        drafts.push(NewWorkType {
            name: name.to_string(),
            origin_id: lookup(&origin_ids, origin)?,
        });
    }
    seed_lookup(&work_types, drafts).await?;
    let work_type_ids = index(work_types.list(ALL).await?, |w| (w.name, w.id));

    info!("Seeding clients...");
    let mut drafts = Vec::new();
    for (name, active, (y, m, d), unit) in [
        ("Acme Corp", true, (2023, 1, 1), "Consulting Services"),
        ("Beta Industries", true, (2024, 5, 15), "Managed Services"),
        ("Gamma Solutions", false, (2022, 3, 10), "Consulting Services"),
    ] {
        drafts.push(NewClient {
            name: name.to_string(),
            active,
            start_date: date(y, m, d)?,
            end_date: None,
            unit_id: lookup(&unit_ids, unit)?,
        });
    }
    seed_lookup(&clients, drafts).await?;
    let client_ids = index(clients.list(ALL).await?, |c| (c.name, c.id));

    info!("Seeding forecasts...");
    let (mut created, mut skipped) = (0, 0);
    for (client, unit, work_type, (y, m), amount) in FORECASTS {
        let forecast = NewForecast {
            client_id: lookup(&client_ids, client)?,
            unit_id: lookup(&unit_ids, unit)?,
            work_type_id: lookup(&work_type_ids, work_type)?,
            date: date(y, m, 1)?,
            amount,
            name: None,
        };
        match forecasts.create(forecast).await {
            Ok(_) => created += 1,
            Err(StoreError::DuplicateForecast(_)) => skipped += 1,
            Err(err) => return Err(err.into()),
        }
    }
    info!(created, skipped, "  forecasts");

    db.close().await?;
    info!("Seeding complete!");
    Ok(())
}

/// Creates each draft, treating an existing name as already seeded.
async fn seed_lookup<L, I>(repo: &LookupRepository<L>, drafts: I) -> anyhow::Result<()>
where
    L: Lookup,
    I: IntoIterator<Item = L::Draft>,
{
    let (mut created, mut skipped) = (0, 0);
    for draft in drafts {
        match repo.create(draft).await {
            Ok(_) => created += 1,
            Err(StoreError::DuplicateName(_)) => skipped += 1,
            Err(err) => return Err(err.into()),
        }
    }
    info!(kind = L::LABEL, created, skipped, "  done");
    Ok(())
}

fn index<R, K, V>(rows: Vec<R>, key: impl Fn(R) -> (K, V)) -> HashMap<K, V>
where
    K: Eq + Hash,
{
    rows.into_iter().map(key).collect()
}

fn lookup<V: Copy>(ids: &HashMap<String, V>, name: &str) -> anyhow::Result<V> {
    ids.get(name)
        .copied()
        .ok_or_else(|| anyhow!("seeded row `{name}` is missing"))
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("invalid date {year}-{month}-{day}"))
}
