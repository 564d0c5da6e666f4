use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::info;

use crate::{
    entity::prelude::*,
    ids::{FollowId, UserId},
};

#[derive(Debug, Error)]
pub enum FollowsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),
}

#[derive(Clone)]
pub struct FollowsService {
    db: DatabaseConnection,
}

impl FollowsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Subscribe `user_id` to `author_id`. Idempotent get-or-create: repeat
    /// calls and self-follows are no-ops, not errors. The unique
    /// (user_id, author_id) index closes the race between the existence
    /// check and the insert. Returns whether a row was created.
    pub async fn follow(
        &self,
        user_id: UserId,
        author_id: UserId,
    ) -> Result<bool, FollowsServiceError> {
        if user_id == author_id {
            return Ok(false);
        }

        if self.is_following(user_id, author_id).await? {
            return Ok(false);
        }

        let follow = FollowActiveModel {
            id: Set(FollowId::new()),
            user_id: Set(user_id),
            author_id: Set(author_id),
        };
        Follow::insert(follow).exec(&self.db).await?;

        info!(user_id = %user_id, author_id = %author_id, "created follow");
        Ok(true)
    }

    /// Remove the (user, author) pair if present. Idempotent. Returns
    /// whether a row was deleted.
    pub async fn unfollow(
        &self,
        user_id: UserId,
        author_id: UserId,
    ) -> Result<bool, FollowsServiceError> {
        let result = Follow::delete_many()
            .filter(FollowColumn::UserId.eq(user_id))
            .filter(FollowColumn::AuthorId.eq(author_id))
            .exec(&self.db)
            .await?;

        let deleted = result.rows_affected > 0;
        if deleted {
            info!(user_id = %user_id, author_id = %author_id, "deleted follow");
        }
        Ok(deleted)
    }

    pub async fn is_following(
        &self,
        user_id: UserId,
        author_id: UserId,
    ) -> Result<bool, FollowsServiceError> {
        let count = Follow::find()
            .filter(FollowColumn::UserId.eq(user_id))
            .filter(FollowColumn::AuthorId.eq(author_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
