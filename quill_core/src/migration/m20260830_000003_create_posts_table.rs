use sea_orm_migration::{prelude::*, schema::*};

use super::m20260830_000001_create_users_table::User;
use super::m20260830_000002_create_groups_table::Group;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .col(pk_uuid(Post::Id))
                    .col(uuid(Post::AuthorId))
                    .col(uuid_null(Post::GroupId)) // Posts do not have to sit in a group
                    .col(text(Post::Text))
                    .col(timestamp(Post::PubDate))
                    .col(binary_null(Post::Image))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post-author_id")
                            .from(Post::Table, Post::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post-group_id")
                            .from(Post::Table, Post::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on author_id
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_author_id")
                    .table(Post::Table)
                    .col(Post::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Create index on group_id
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_group_id")
                    .table(Post::Table)
                    .col(Post::GroupId)
                    .to_owned(),
            )
            .await?;

        // Create index on pub_date for newest-first listings
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_pub_date")
                    .table(Post::Table)
                    .col(Post::PubDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    AuthorId,
    GroupId,
    Text,
    PubDate,
    Image,
}
