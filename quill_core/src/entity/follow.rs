use crate::ids::{FollowId, UserId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Directed subscription: `user_id` follows `author_id`. The pair carries a
/// unique index, so a duplicate follow fails at the schema level rather
/// than relying on the check-then-create in the service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "follow")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: FollowId,
    /// The follower.
    pub user_id: UserId,
    /// The followed author.
    pub author_id: UserId,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Follower,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl ActiveModelBehavior for ActiveModel {}
