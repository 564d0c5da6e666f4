//! Per-route view functions.
//!
//! Routing, sessions, templates and the front-page fragment cache are
//! external collaborators: a router resolves a path to one of these
//! handlers, hands it an explicit [`RequestContext`], and turns the result
//! into an HTTP response (`Render` → template, `Redirect` → 302,
//! `HandlerError::NotFound` → 404, `HandlerError::Db` → 500).

use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;

use crate::entity::prelude::UserModel;
use crate::ids::PostId;
use crate::service::comments::{CommentsService, CommentsServiceError};
use crate::service::follows::{FollowsService, FollowsServiceError};
use crate::service::groups::{GroupsService, GroupsServiceError};
use crate::service::posts::{PostsService, PostsServiceError};
use crate::service::users::{UsersService, UsersServiceError};

pub mod about;
pub mod comments;
pub mod follows;
pub mod listings;
pub mod posts;

/// Everything a handler knows about the incoming request: who is signed in
/// (resolved by the session collaborator) and the requested path, used to
/// build the login return parameter.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user: Option<UserModel>,
    pub path: String,
}

impl RequestContext {
    pub fn anonymous(path: impl Into<String>) -> Self {
        Self {
            user: None,
            path: path.into(),
        }
    }

    pub fn signed_in(user: UserModel, path: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            path: path.into(),
        }
    }

    /// Location of the login flow carrying the originally requested path.
    pub fn login_redirect(&self) -> String {
        format!("/auth/login/?next={}", self.path)
    }
}

/// Handler outcome for a route whose success page renders `P`.
#[derive(Debug, Clone)]
pub enum View<P> {
    Render(P),
    Redirect(String),
}

impl<P> View<P> {
    pub fn redirects_to(&self, location: &str) -> bool {
        matches!(self, View::Redirect(l) if l == location)
    }
}

#[derive(Debug, Error)]
pub enum HandlerError {
    /// Missing parent entity (group slug, username, post id) → HTTP 404.
    #[error("not found")]
    NotFound,
    #[error("fatal database error")]
    Db(#[from] DbErr),
}

impl From<PostsServiceError> for HandlerError {
    fn from(error: PostsServiceError) -> Self {
        match error {
            PostsServiceError::PostNotFound => HandlerError::NotFound,
            PostsServiceError::DbError(e) => HandlerError::Db(e),
        }
    }
}

impl From<UsersServiceError> for HandlerError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::DbError(e) => HandlerError::Db(e),
        }
    }
}

impl From<GroupsServiceError> for HandlerError {
    fn from(error: GroupsServiceError) -> Self {
        match error {
            GroupsServiceError::DbError(e) => HandlerError::Db(e),
        }
    }
}

impl From<CommentsServiceError> for HandlerError {
    fn from(error: CommentsServiceError) -> Self {
        match error {
            CommentsServiceError::DbError(e) => HandlerError::Db(e),
        }
    }
}

impl From<FollowsServiceError> for HandlerError {
    fn from(error: FollowsServiceError) -> Self {
        match error {
            FollowsServiceError::DbError(e) => HandlerError::Db(e),
        }
    }
}

pub fn profile_path(username: &str) -> String {
    format!("/profile/{username}/")
}

pub fn post_detail_path(post_id: PostId) -> String {
    format!("/posts/{post_id}/")
}

/// One handler set over one database, sharing the global page size.
#[derive(Clone)]
pub struct Handlers {
    pub(crate) db: DatabaseConnection,
    pub(crate) users: UsersService,
    pub(crate) groups: GroupsService,
    pub(crate) posts: PostsService,
    pub(crate) comments: CommentsService,
    pub(crate) follows: FollowsService,
    pub(crate) page_size: u64,
}

impl Handlers {
    pub fn new(db: DatabaseConnection, page_size: u64) -> Self {
        Self {
            users: UsersService::new(db.clone()),
            groups: GroupsService::new(db.clone()),
            posts: PostsService::new(db.clone()),
            comments: CommentsService::new(db.clone()),
            follows: FollowsService::new(db.clone()),
            db,
            page_size,
        }
    }
}
