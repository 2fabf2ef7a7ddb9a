//! `SeaORM` Entity for work_type table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "work_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub work_type_id: i32,
    #[sea_orm(unique)]
    pub work_type_name: String,
    pub work_type_origin_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_type_origin_type::Entity",
        from = "Column::WorkTypeOriginTypeId",
        to = "super::work_type_origin_type::Column::WorkTypeOriginTypeId",
        on_delete = "NoAction"
    )]
    WorkTypeOriginType,
    #[sea_orm(has_many = "super::forecasts::Entity")]
    Forecasts,
}

impl Related<super::work_type_origin_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkTypeOriginType.def()
    }
}

impl Related<super::forecasts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forecasts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
