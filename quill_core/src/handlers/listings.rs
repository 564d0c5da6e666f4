//! Paginated post listings: front page, group page, profile page and the
//! personalized follow feed.

use super::{HandlerError, Handlers, RequestContext, View};
use crate::entity::prelude::*;
use crate::pagination::{paginate, Page};

/// Context for `/` and `/follow/`.
#[derive(Debug, Clone)]
pub struct PostListPage {
    pub page: Page<PostModel>,
}

/// Context for `/group/<slug>/`.
#[derive(Debug, Clone)]
pub struct GroupPage {
    pub group: GroupModel,
    pub page: Page<PostModel>,
}

/// Context for `/profile/<username>/`.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub user_obj: UserModel,
    pub page: Page<PostModel>,
    pub post_count: u64,
    /// Whether the signed-in viewer follows this profile; `None` for
    /// anonymous viewers.
    pub following: Option<bool>,
}

impl Handlers {
    /// GET `/` — every post, newest first. The rendered fragment is cached
    /// by the external cache layer on a fixed expiry.
    pub async fn index(&self, page: Option<u64>) -> Result<View<PostListPage>, HandlerError> {
        let page = paginate(self.posts.all(), &self.db, self.page_size, page).await?;
        Ok(View::Render(PostListPage { page }))
    }

    /// GET `/group/<slug>/` — 404 for an unknown slug, never a silently
    /// empty page.
    pub async fn group_posts(
        &self,
        slug: &str,
        page: Option<u64>,
    ) -> Result<View<GroupPage>, HandlerError> {
        let group = self
            .groups
            .by_slug(slug)
            .await?
            .ok_or(HandlerError::NotFound)?;

        let page = paginate(self.posts.by_group(group.id), &self.db, self.page_size, page).await?;
        Ok(View::Render(GroupPage { group, page }))
    }

    /// GET `/profile/<username>/`.
    pub async fn profile(
        &self,
        ctx: &RequestContext,
        username: &str,
        page: Option<u64>,
    ) -> Result<View<ProfilePage>, HandlerError> {
        let user_obj = self
            .users
            .by_username(username)
            .await?
            .ok_or(HandlerError::NotFound)?;

        let post_count = self.posts.count_by_author(user_obj.id).await?;
        let following = match &ctx.user {
            Some(viewer) => Some(self.follows.is_following(viewer.id, user_obj.id).await?),
            None => None,
        };

        let page = paginate(
            self.posts.by_author(user_obj.id),
            &self.db,
            self.page_size,
            page,
        )
        .await?;

        Ok(View::Render(ProfilePage {
            user_obj,
            page,
            post_count,
            following,
        }))
    }

    /// GET `/follow/` — posts from followed authors; signed-in users only.
    pub async fn follow_index(
        &self,
        ctx: &RequestContext,
        page: Option<u64>,
    ) -> Result<View<PostListPage>, HandlerError> {
        let Some(user) = &ctx.user else {
            return Ok(View::Redirect(ctx.login_redirect()));
        };

        let page = paginate(
            self.posts.feed_for(user.id),
            &self.db,
            self.page_size,
            page,
        )
        .await?;
        Ok(View::Render(PostListPage { page }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils;

    #[tokio::test]
    async fn index_lists_posts_newest_first() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "auth").await;
        for i in 0..13 {
            test_utils::create_post(&db, &author, &format!("post {i}"), None).await;
        }

        let handlers = Handlers::new(db, 10);
        let View::Render(rendered) = handlers.index(None).await.unwrap() else {
            panic!("expected render");
        };
        assert_eq!(rendered.page.items.len(), 10);
        assert_eq!(rendered.page.total_pages, 2);

        let View::Render(rendered) = handlers.index(Some(2)).await.unwrap() else {
            panic!("expected render");
        };
        assert_eq!(rendered.page.items.len(), 3);
    }

    #[tokio::test]
    async fn group_page_filters_by_slug_and_misses_with_404() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "auth").await;
        let group = test_utils::create_group(&db, "Test group", "test-slug").await;
        let post = test_utils::create_post(&db, &author, "in group", Some(&group)).await;
        test_utils::create_post(&db, &author, "outside", None).await;

        let handlers = Handlers::new(db, 10);
        let View::Render(rendered) = handlers.group_posts("test-slug", None).await.unwrap() else {
            panic!("expected render");
        };
        assert_eq!(rendered.group.id, group.id);
        assert_eq!(rendered.page.items.len(), 1);
        assert_eq!(rendered.page.items[0].id, post.id);

        let missing = handlers.group_posts("other-slug", None).await;
        assert!(matches!(missing, Err(HandlerError::NotFound)));
    }

    #[tokio::test]
    async fn post_in_group_x_never_shows_under_group_y() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "auth").await;
        let group_x = test_utils::create_group(&db, "X", "group-x").await;
        let group_y = test_utils::create_group(&db, "Y", "group-y").await;
        let post = test_utils::create_post(&db, &author, "only in x", Some(&group_x)).await;

        let handlers = Handlers::new(db, 10);
        let View::Render(page_y) = handlers.group_posts("group-y", None).await.unwrap() else {
            panic!("expected render");
        };
        assert!(page_y.page.items.iter().all(|p| p.id != post.id));
        let _ = group_y;
    }

    #[tokio::test]
    async fn profile_reports_count_and_following_flag() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "author").await;
        let viewer = test_utils::create_user(&db, "viewer").await;
        test_utils::create_post(&db, &author, "one", None).await;
        test_utils::create_post(&db, &author, "two", None).await;

        let handlers = Handlers::new(db, 10);
        handlers.follows.follow(viewer.id, author.id).await.unwrap();

        let ctx = RequestContext::signed_in(viewer, "/profile/author/");
        let View::Render(rendered) = handlers.profile(&ctx, "author", None).await.unwrap() else {
            panic!("expected render");
        };
        assert_eq!(rendered.post_count, 2);
        assert_eq!(rendered.following, Some(true));
        assert_eq!(rendered.user_obj.username, "author");

        let anon = RequestContext::anonymous("/profile/author/");
        let View::Render(rendered) = handlers.profile(&anon, "author", None).await.unwrap() else {
            panic!("expected render");
        };
        assert_eq!(rendered.following, None);

        let missing = handlers.profile(&anon, "nobody", None).await;
        assert!(matches!(missing, Err(HandlerError::NotFound)));
    }

    #[tokio::test]
    async fn follow_feed_requires_auth_and_filters_by_follows() {
        let db = test_utils::setup_test_db().await;
        let reader = test_utils::create_user(&db, "reader").await;
        let followed = test_utils::create_user(&db, "followed").await;
        let stranger = test_utils::create_user(&db, "stranger").await;
        test_utils::create_post(&db, &followed, "wanted", None).await;
        test_utils::create_post(&db, &stranger, "unwanted", None).await;

        let handlers = Handlers::new(db, 10);
        handlers.follows.follow(reader.id, followed.id).await.unwrap();

        let anon = RequestContext::anonymous("/follow/");
        let redirected = handlers.follow_index(&anon, None).await.unwrap();
        assert!(redirected.redirects_to("/auth/login/?next=/follow/"));

        let ctx = RequestContext::signed_in(reader, "/follow/");
        let View::Render(rendered) = handlers.follow_index(&ctx, None).await.unwrap() else {
            panic!("expected render");
        };
        assert_eq!(rendered.page.items.len(), 1);
        assert_eq!(rendered.page.items[0].text, "wanted");
    }
}
