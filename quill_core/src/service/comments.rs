use chrono::Utc;
use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::info;

use crate::{
    entity::prelude::*,
    ids::{CommentId, PostId, UserId},
};

#[derive(Debug, Error)]
pub enum CommentsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),
}

#[derive(Clone)]
pub struct CommentsService {
    db: DatabaseConnection,
}

impl CommentsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach a comment to a post. Comments are immutable after this point;
    /// there is no edit or delete entry anywhere.
    pub async fn add_comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        text: String,
    ) -> Result<CommentModel, CommentsServiceError> {
        let comment = CommentActiveModel {
            id: Set(CommentId::new()),
            post_id: Set(post_id),
            author_id: Set(author_id),
            text: Set(text),
            created: Set(Utc::now()),
        };

        let comment = Comment::insert(comment).exec_with_returning(&self.db).await?;
        info!(post_id = %post_id, comment_id = %comment.id, "added comment");
        Ok(comment)
    }

    /// Comments for a post in conversation order (oldest first).
    pub async fn for_post(&self, post_id: PostId) -> Result<Vec<CommentModel>, CommentsServiceError> {
        let comments = Comment::find()
            .filter(CommentColumn::PostId.eq(post_id))
            .order_by_asc(CommentColumn::Created)
            .all(&self.db)
            .await?;
        Ok(comments)
    }

    pub async fn count_for_post(&self, post_id: PostId) -> Result<u64, CommentsServiceError> {
        let count = Comment::find()
            .filter(CommentColumn::PostId.eq(post_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils;

    #[tokio::test]
    async fn adds_and_lists_comments_in_conversation_order() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "op").await;
        let commenter = test_utils::create_user(&db, "commenter").await;
        let post = test_utils::create_post(&db, &author, "a post", None).await;

        let comments = CommentsService::new(db);
        comments
            .add_comment(post.id, commenter.id, "first".to_string())
            .await
            .unwrap();
        comments
            .add_comment(post.id, author.id, "second".to_string())
            .await
            .unwrap();

        let listed = comments.for_post(post.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created <= listed[1].created);
        assert_eq!(comments.count_for_post(post.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn comments_are_scoped_to_their_post() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "op").await;
        let post_a = test_utils::create_post(&db, &author, "post a", None).await;
        let post_b = test_utils::create_post(&db, &author, "post b", None).await;

        let comments = CommentsService::new(db);
        comments
            .add_comment(post_a.id, author.id, "on a".to_string())
            .await
            .unwrap();

        assert_eq!(comments.for_post(post_a.id).await.unwrap().len(), 1);
        assert!(comments.for_post(post_b.id).await.unwrap().is_empty());
    }
}
