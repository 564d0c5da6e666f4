use sea_orm_migration::{prelude::*, schema::*};

use super::m20260830_000001_create_users_table::User;
use super::m20260830_000003_create_posts_table::Post;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .col(pk_uuid(Comment::Id))
                    .col(uuid(Comment::PostId))
                    .col(uuid(Comment::AuthorId))
                    .col(text(Comment::Text))
                    .col(timestamp(Comment::Created))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-comment-post_id")
                            .from(Comment::Table, Comment::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-comment-author_id")
                            .from(Comment::Table, Comment::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on post_id for loading a post's comment thread
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post_id")
                    .table(Comment::Table)
                    .col(Comment::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Comment {
    Table,
    Id,
    PostId,
    AuthorId,
    Text,
    Created,
}
