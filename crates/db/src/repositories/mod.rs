//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every call runs under a per-call deadline and reports failures as
//! [`StoreError`].

pub mod catalog;
pub mod error;
pub mod forecast;
pub mod lookup;

pub use catalog::{
    ClientRepository, Clients, OriginRepository, Origins, UnitRepository, Units,
    VerticalRepository, Verticals, WorkTypeRepository, WorkTypes,
};
pub use error::StoreError;
pub use forecast::ForecastRepository;
pub use lookup::{Lookup, LookupRepository};
