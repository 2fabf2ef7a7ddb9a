//! `SeaORM` Entity for business_unit table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "business_unit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub business_unit_id: i32,
    #[sea_orm(unique)]
    pub business_unit_name: String,
    pub business_vertical_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::business_vertical::Entity",
        from = "Column::BusinessVerticalId",
        to = "super::business_vertical::Column::BusinessVerticalId",
        on_delete = "NoAction"
    )]
    BusinessVertical,
    #[sea_orm(has_many = "super::clients::Entity")]
    Clients,
    #[sea_orm(has_many = "super::forecasts::Entity")]
    Forecasts,
}

impl Related<super::business_vertical::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessVertical.def()
    }
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::forecasts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forecasts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
