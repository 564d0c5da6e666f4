use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::info;

use crate::{entity::prelude::*, ids::UserId};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),
}

#[derive(Clone)]
pub struct UsersService {
    db: DatabaseConnection,
}

impl UsersService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert an account row. Called by the signup collaborator, which owns
    /// password hashing; a duplicate username fails on the unique column.
    pub async fn create_user(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> Result<UserModel, UsersServiceError> {
        let user = UserActiveModel {
            id: Set(UserId::new()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
        };

        let user = User::insert(user).exec_with_returning(&self.db).await?;
        info!(username = %user.username, "created user");
        Ok(user)
    }

    pub async fn by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserModel>, UsersServiceError> {
        let user = User::find()
            .filter(UserColumn::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    pub async fn by_id(&self, id: UserId) -> Result<Option<UserModel>, UsersServiceError> {
        let user = User::find_by_id(id).one(&self.db).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils;

    #[tokio::test]
    async fn creates_and_finds_user() {
        let db = test_utils::setup_test_db().await;
        let users = UsersService::new(db);

        let created = users
            .create_user(
                "auth".to_string(),
                "auth@example.com".to_string(),
                "!hash".to_string(),
            )
            .await
            .unwrap();

        let found = users.by_username("auth").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "auth@example.com");

        let missing = users.by_username("nobody").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn rejects_duplicate_username() {
        let db = test_utils::setup_test_db().await;
        let users = UsersService::new(db);

        users
            .create_user(
                "taken".to_string(),
                "first@example.com".to_string(),
                "!hash".to_string(),
            )
            .await
            .unwrap();

        let result = users
            .create_user(
                "taken".to_string(),
                "second@example.com".to_string(),
                "!hash".to_string(),
            )
            .await;

        assert!(matches!(result, Err(UsersServiceError::DbError(_))));
    }
}
