use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::info;

use crate::{entity::prelude::*, ids::GroupId};

#[derive(Debug, Error)]
pub enum GroupsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),
}

#[derive(Clone)]
pub struct GroupsService {
    db: DatabaseConnection,
}

impl GroupsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Admin tooling entry point; no end-user handler reaches this.
    pub async fn create_group(
        &self,
        title: String,
        slug: String,
        description: String,
    ) -> Result<GroupModel, GroupsServiceError> {
        let group = GroupActiveModel {
            id: Set(GroupId::new()),
            title: Set(title),
            slug: Set(slug),
            description: Set(description),
        };

        let group = Group::insert(group).exec_with_returning(&self.db).await?;
        info!(slug = %group.slug, "created group");
        Ok(group)
    }

    pub async fn by_slug(&self, slug: &str) -> Result<Option<GroupModel>, GroupsServiceError> {
        let group = Group::find()
            .filter(GroupColumn::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(group)
    }

    pub async fn by_id(&self, id: GroupId) -> Result<Option<GroupModel>, GroupsServiceError> {
        let group = Group::find_by_id(id).one(&self.db).await?;
        Ok(group)
    }
}
