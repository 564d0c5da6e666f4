use chrono::Utc;
use sea_orm::{sea_query::Query, DatabaseConnection};
use thiserror::Error;
use tracing::info;

use crate::{
    entity::{follow, prelude::*},
    ids::{GroupId, PostId, UserId},
};

#[derive(Debug, Error)]
pub enum PostsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("post not found")]
    PostNotFound,
}

#[derive(Clone)]
pub struct PostsService {
    db: DatabaseConnection,
}

impl PostsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new post. The author always comes from the request context,
    /// never from the submitted form.
    pub async fn create_post(
        &self,
        author_id: UserId,
        text: String,
        group_id: Option<GroupId>,
        image: Option<Vec<u8>>,
    ) -> Result<PostModel, PostsServiceError> {
        let post = PostActiveModel {
            id: Set(PostId::new()),
            author_id: Set(author_id),
            group_id: Set(group_id),
            text: Set(text),
            pub_date: Set(Utc::now()),
            image: Set(image),
        };

        let post = Post::insert(post).exec_with_returning(&self.db).await?;
        info!(post_id = %post.id, author_id = %author_id, "created post");
        Ok(post)
    }

    /// Update text, group and image in place. `pub_date` and the author are
    /// never touched by an edit.
    pub async fn update_post(
        &self,
        post: PostModel,
        text: String,
        group_id: Option<GroupId>,
        image: Option<Vec<u8>>,
    ) -> Result<PostModel, PostsServiceError> {
        let mut active: PostActiveModel = post.into();
        active.text = Set(text);
        active.group_id = Set(group_id);
        active.image = Set(image);

        let updated = active.update(&self.db).await?;
        info!(post_id = %updated.id, "updated post");
        Ok(updated)
    }

    pub async fn by_id(&self, id: PostId) -> Result<Option<PostModel>, PostsServiceError> {
        let post = Post::find_by_id(id).one(&self.db).await?;
        Ok(post)
    }

    pub async fn get(&self, id: PostId) -> Result<PostModel, PostsServiceError> {
        self.by_id(id).await?.ok_or(PostsServiceError::PostNotFound)
    }

    /// All posts, newest first. Returned as a query so callers can paginate.
    pub fn all(&self) -> Select<Post> {
        Post::find().order_by_desc(PostColumn::PubDate)
    }

    pub fn by_group(&self, group_id: GroupId) -> Select<Post> {
        Post::find()
            .filter(PostColumn::GroupId.eq(group_id))
            .order_by_desc(PostColumn::PubDate)
    }

    pub fn by_author(&self, author_id: UserId) -> Select<Post> {
        Post::find()
            .filter(PostColumn::AuthorId.eq(author_id))
            .order_by_desc(PostColumn::PubDate)
    }

    /// Posts authored by anyone `user_id` follows, newest first.
    pub fn feed_for(&self, user_id: UserId) -> Select<Post> {
        Post::find()
            .filter(
                PostColumn::AuthorId.in_subquery(
                    Query::select()
                        .column(follow::Column::AuthorId)
                        .from(follow::Entity)
                        .and_where(follow::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            )
            .order_by_desc(PostColumn::PubDate)
    }

    pub async fn count_by_author(&self, author_id: UserId) -> Result<u64, PostsServiceError> {
        let count = Post::find()
            .filter(PostColumn::AuthorId.eq(author_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
