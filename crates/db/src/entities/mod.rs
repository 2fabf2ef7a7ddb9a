//! `SeaORM` entity definitions.
//!
//! Table and column names match the existing schema.

pub mod business_unit;
pub mod business_vertical;
pub mod clients;
pub mod forecasts;
pub mod work_type;
pub mod work_type_origin_type;
