//! `SeaORM` Entity for forecasts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "forecasts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub forecast_id: i32,
    pub client_id: i32,
    pub business_unit_id: i32,
    pub work_type_id: i32,
    pub dt: Date,
    pub forecast_amount: i32,
    pub forecast_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::ClientId",
        on_delete = "NoAction"
    )]
    Clients,
    #[sea_orm(
        belongs_to = "super::business_unit::Entity",
        from = "Column::BusinessUnitId",
        to = "super::business_unit::Column::BusinessUnitId",
        on_delete = "NoAction"
    )]
    BusinessUnit,
    #[sea_orm(
        belongs_to = "super::work_type::Entity",
        from = "Column::WorkTypeId",
        to = "super::work_type::Column::WorkTypeId",
        on_delete = "NoAction"
    )]
    WorkType,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::business_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessUnit.def()
    }
}

impl Related<super::work_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
