use chrono::Utc;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::entity::prelude::*;
use crate::ids::{CommentId, GroupId, PostId, UserId};
use crate::migration::Migrator;

/// Create a fresh in-memory SQLite database with all migrations applied.
/// Each call returns an isolated database instance.
///
/// # Example
/// ```
/// use quill_core::test_utils;
///
/// #[tokio::test]
/// async fn my_test() {
///     let db = test_utils::setup_test_db().await;
///     // Database is ready to use!
/// }
/// ```
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Insert a user row directly. The email and password hash are filler; the
/// auth collaborator owns real credentials.
pub async fn create_user(db: &DatabaseConnection, username: &str) -> UserModel {
    let user = UserActiveModel {
        id: Set(UserId::new()),
        username: Set(username.to_owned()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set("!test-hash".to_owned()),
    };

    User::insert(user)
        .exec_with_returning(db)
        .await
        .expect("Failed to insert user")
}

pub async fn create_group(db: &DatabaseConnection, title: &str, slug: &str) -> GroupModel {
    let group = GroupActiveModel {
        id: Set(GroupId::new()),
        title: Set(title.to_owned()),
        slug: Set(slug.to_owned()),
        description: Set(format!("{title} description")),
    };

    Group::insert(group)
        .exec_with_returning(db)
        .await
        .expect("Failed to insert group")
}

pub async fn create_post(
    db: &DatabaseConnection,
    author: &UserModel,
    text: &str,
    group: Option<&GroupModel>,
) -> PostModel {
    let post = PostActiveModel {
        id: Set(PostId::new()),
        author_id: Set(author.id),
        group_id: Set(group.map(|g| g.id)),
        text: Set(text.to_owned()),
        pub_date: Set(Utc::now()),
        image: Set(None),
    };

    Post::insert(post)
        .exec_with_returning(db)
        .await
        .expect("Failed to insert post")
}

pub async fn create_comment(
    db: &DatabaseConnection,
    post: &PostModel,
    author: &UserModel,
    text: &str,
) -> CommentModel {
    let comment = CommentActiveModel {
        id: Set(CommentId::new()),
        post_id: Set(post.id),
        author_id: Set(author.id),
        text: Set(text.to_owned()),
        created: Set(Utc::now()),
    };

    Comment::insert(comment)
        .exec_with_returning(db)
        .await
        .expect("Failed to insert comment")
}
