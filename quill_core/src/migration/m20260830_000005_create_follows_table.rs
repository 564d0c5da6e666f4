use sea_orm_migration::{prelude::*, schema::*};

use super::m20260830_000001_create_users_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Follow::Table)
                    .col(pk_uuid(Follow::Id))
                    .col(uuid(Follow::UserId))
                    .col(uuid(Follow::AuthorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-follow-user_id")
                            .from(Follow::Table, Follow::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-follow-author_id")
                            .from(Follow::Table, Follow::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One follow row per (follower, followed) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_follows_user_author")
                    .table(Follow::Table)
                    .col(Follow::UserId)
                    .col(Follow::AuthorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create index on author_id for feed lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_follows_author_id")
                    .table(Follow::Table)
                    .col(Follow::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Follow::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Follow {
    Table,
    Id,
    UserId,
    AuthorId,
}
