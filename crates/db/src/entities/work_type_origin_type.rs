//! `SeaORM` Entity for work_type_origin_type table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "work_type_origin_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub work_type_origin_type_id: i32,
    #[sea_orm(unique)]
    pub work_type_origin_type_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_type::Entity")]
    WorkType,
}

impl Related<super::work_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
