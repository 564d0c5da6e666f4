use crate::ids::GroupId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Topical category posts can be filed under. Groups are created by admin
/// tooling, never by end-user handlers; the slug is treated as immutable.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "group")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: GroupId,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
