//! Comment submission.

use super::posts::PostDetailPage;
use super::{post_detail_path, HandlerError, Handlers, RequestContext, View};
use crate::forms::CommentForm;
use crate::ids::PostId;

impl Handlers {
    /// POST `/posts/<id>/comment/`. A valid submission creates the comment
    /// and redirects back to the detail page. An invalid one re-renders the
    /// detail page with the field errors and the submitted text, instead of
    /// silently dropping them on the redirect.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        post_id: PostId,
        form: CommentForm,
    ) -> Result<View<PostDetailPage>, HandlerError> {
        let Some(user) = &ctx.user else {
            return Ok(View::Redirect(ctx.login_redirect()));
        };

        let post = self.posts.get(post_id).await?;

        match form.validate() {
            Ok(()) => {
                self.comments
                    .add_comment(post.id, user.id, form.text.trim().to_owned())
                    .await?;
                Ok(View::Redirect(post_detail_path(post.id)))
            }
            Err(errors) => {
                let comments = self.comments.for_post(post.id).await?;
                Ok(View::Render(PostDetailPage {
                    post,
                    comments,
                    form,
                    form_errors: errors,
                }))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::prelude::*;
    use crate::test_utils;

    #[tokio::test]
    async fn valid_comment_is_created_and_redirects_to_detail() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "auth").await;
        let commenter = test_utils::create_user(&db, "commenter").await;
        let post = test_utils::create_post(&db, &author, "a post", None).await;

        let handlers = Handlers::new(db.clone(), 10);
        let before = Comment::find().all(&db).await.unwrap().len();

        let ctx = RequestContext::signed_in(commenter.clone(), format!("/posts/{}/comment/", post.id));
        let outcome = handlers
            .add_comment(&ctx, post.id, CommentForm::new("well said"))
            .await
            .unwrap();
        assert!(outcome.redirects_to(&format!("/posts/{}/", post.id)));

        let comments = Comment::find().all(&db).await.unwrap();
        assert_eq!(comments.len(), before + 1);
        assert_eq!(comments[0].author_id, commenter.id);
        assert_eq!(comments[0].post_id, post.id);
    }

    #[tokio::test]
    async fn unauthenticated_comment_redirects_to_login_and_stores_nothing() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "auth").await;
        let post = test_utils::create_post(&db, &author, "a post", None).await;

        let handlers = Handlers::new(db.clone(), 10);
        let path = format!("/posts/{}/comment/", post.id);
        let ctx = RequestContext::anonymous(path.clone());

        let outcome = handlers
            .add_comment(&ctx, post.id, CommentForm::new("drive-by"))
            .await
            .unwrap();
        assert!(outcome.redirects_to(&format!("/auth/login/?next={path}")));

        assert!(Comment::find().one(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_comment_rerenders_detail_with_errors() {
        let db = test_utils::setup_test_db().await;
        let author = test_utils::create_user(&db, "auth").await;
        let post = test_utils::create_post(&db, &author, "a post", None).await;

        let handlers = Handlers::new(db.clone(), 10);
        let ctx = RequestContext::signed_in(author, format!("/posts/{}/comment/", post.id));

        let View::Render(rendered) = handlers
            .add_comment(&ctx, post.id, CommentForm::new("   "))
            .await
            .unwrap()
        else {
            panic!("expected render");
        };
        assert!(rendered.form_errors.for_field("text").next().is_some());
        assert_eq!(rendered.post.id, post.id);

        assert!(Comment::find().one(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_not_found() {
        let db = test_utils::setup_test_db().await;
        let user = test_utils::create_user(&db, "auth").await;
        let handlers = Handlers::new(db, 10);

        let ctx = RequestContext::signed_in(user, "/posts/gone/comment/");
        let missing = handlers
            .add_comment(&ctx, PostId::new(), CommentForm::new("into the void"))
            .await;
        assert!(matches!(missing, Err(HandlerError::NotFound)));
    }
}
