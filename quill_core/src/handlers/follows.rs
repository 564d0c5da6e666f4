//! Follow and unfollow actions.

use super::{profile_path, HandlerError, Handlers, RequestContext, View};

impl Handlers {
    /// GET `/profile/<username>/follow/`. Idempotent; a self-follow is a
    /// no-op, not an error. Always redirects back to the profile.
    pub async fn profile_follow(
        &self,
        ctx: &RequestContext,
        username: &str,
    ) -> Result<View<()>, HandlerError> {
        let Some(user) = &ctx.user else {
            return Ok(View::Redirect(ctx.login_redirect()));
        };

        let author = self
            .users
            .by_username(username)
            .await?
            .ok_or(HandlerError::NotFound)?;

        self.follows.follow(user.id, author.id).await?;
        Ok(View::Redirect(profile_path(username)))
    }

    /// GET `/profile/<username>/unfollow/`. Idempotent.
    pub async fn profile_unfollow(
        &self,
        ctx: &RequestContext,
        username: &str,
    ) -> Result<View<()>, HandlerError> {
        let Some(user) = &ctx.user else {
            return Ok(View::Redirect(ctx.login_redirect()));
        };

        let author = self
            .users
            .by_username(username)
            .await?
            .ok_or(HandlerError::NotFound)?;

        self.follows.unfollow(user.id, author.id).await?;
        Ok(View::Redirect(profile_path(username)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::prelude::*;
    use crate::test_utils;

    #[tokio::test]
    async fn double_follow_yields_one_row_and_redirects_to_profile() {
        let db = test_utils::setup_test_db().await;
        let follower = test_utils::create_user(&db, "follower").await;
        test_utils::create_user(&db, "author").await;

        let handlers = Handlers::new(db.clone(), 10);
        let ctx = RequestContext::signed_in(follower, "/profile/author/follow/");

        let outcome = handlers.profile_follow(&ctx, "author").await.unwrap();
        assert!(outcome.redirects_to("/profile/author/"));
        handlers.profile_follow(&ctx, "author").await.unwrap();

        assert_eq!(Follow::find().all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn self_follow_is_a_no_op() {
        let db = test_utils::setup_test_db().await;
        let user = test_utils::create_user(&db, "narcissus").await;

        let handlers = Handlers::new(db.clone(), 10);
        let ctx = RequestContext::signed_in(user, "/profile/narcissus/follow/");

        let outcome = handlers.profile_follow(&ctx, "narcissus").await.unwrap();
        assert!(outcome.redirects_to("/profile/narcissus/"));

        assert!(Follow::find().one(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unfollow_removes_the_pair_and_tolerates_repeats() {
        let db = test_utils::setup_test_db().await;
        let follower = test_utils::create_user(&db, "follower").await;
        let author = test_utils::create_user(&db, "author").await;

        let handlers = Handlers::new(db.clone(), 10);
        handlers.follows.follow(follower.id, author.id).await.unwrap();

        let ctx = RequestContext::signed_in(follower, "/profile/author/unfollow/");
        let outcome = handlers.profile_unfollow(&ctx, "author").await.unwrap();
        assert!(outcome.redirects_to("/profile/author/"));
        assert!(Follow::find().one(&db).await.unwrap().is_none());

        // Unfollowing again is fine
        let outcome = handlers.profile_unfollow(&ctx, "author").await.unwrap();
        assert!(outcome.redirects_to("/profile/author/"));
    }

    #[tokio::test]
    async fn unauthenticated_follow_redirects_to_login_and_stores_nothing() {
        let db = test_utils::setup_test_db().await;
        test_utils::create_user(&db, "author").await;

        let handlers = Handlers::new(db.clone(), 10);
        let ctx = RequestContext::anonymous("/profile/author/follow/");

        let outcome = handlers.profile_follow(&ctx, "author").await.unwrap();
        assert!(outcome.redirects_to("/auth/login/?next=/profile/author/follow/"));

        assert!(Follow::find().one(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn follow_of_unknown_author_is_not_found() {
        let db = test_utils::setup_test_db().await;
        let user = test_utils::create_user(&db, "follower").await;

        let handlers = Handlers::new(db, 10);
        let ctx = RequestContext::signed_in(user, "/profile/ghost/follow/");
        let missing = handlers.profile_follow(&ctx, "ghost").await;
        assert!(matches!(missing, Err(HandlerError::NotFound)));
    }
}
