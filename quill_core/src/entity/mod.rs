// SeaORM entities for the blogging schema.

pub mod comment;
pub mod follow;
pub mod group;
pub mod post;
pub mod user;


pub mod prelude {
    // Re-export all entities for convenience
    pub use super::comment::{
        ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as Comment,
        Model as CommentModel,
    };
    pub use super::follow::{
        ActiveModel as FollowActiveModel, Column as FollowColumn, Entity as Follow,
        Model as FollowModel,
    };
    pub use super::group::{
        ActiveModel as GroupActiveModel, Column as GroupColumn, Entity as Group,
        Model as GroupModel,
    };
    pub use super::post::{
        ActiveModel as PostActiveModel, Column as PostColumn, Entity as Post, Model as PostModel,
    };
    pub use super::user::{
        ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
    };

    // Re-export commonly used SeaORM types and traits
    pub use sea_orm::{
        ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
        DbConn, DbErr, EntityTrait, ModelTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
        QuerySelect, Related, RelationTrait, Select, Set, Unchanged,
    };
}
