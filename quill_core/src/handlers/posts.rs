//! Post detail, create and edit flows.

use super::{post_detail_path, profile_path, HandlerError, Handlers, RequestContext, View};
use crate::entity::prelude::*;
use crate::forms::{CommentForm, FormErrors, PostForm};
use crate::ids::PostId;

/// Context for `/posts/<id>/`: the post, its comment thread and an empty
/// comment form (or the rejected submission when a comment failed
/// validation).
#[derive(Debug, Clone)]
pub struct PostDetailPage {
    pub post: PostModel,
    pub comments: Vec<CommentModel>,
    pub form: CommentForm,
    pub form_errors: FormErrors,
}

/// Context for the shared create/edit form template. `post` is set only in
/// the edit flow.
#[derive(Debug, Clone)]
pub struct PostFormPage {
    pub form: PostForm,
    pub errors: FormErrors,
    pub post: Option<PostModel>,
}

impl Handlers {
    /// GET `/posts/<id>/`. Read-only.
    pub async fn post_detail(&self, post_id: PostId) -> Result<View<PostDetailPage>, HandlerError> {
        let post = self.posts.get(post_id).await?;
        let comments = self.comments.for_post(post.id).await?;

        Ok(View::Render(PostDetailPage {
            post,
            comments,
            form: CommentForm::default(),
            form_errors: FormErrors::default(),
        }))
    }

    /// GET/POST `/create/`. `submission` is `None` on GET. A valid POST
    /// creates the post with the signed-in user as author and redirects to
    /// their profile; an invalid one re-renders with errors and the
    /// submitted values intact.
    pub async fn post_create(
        &self,
        ctx: &RequestContext,
        submission: Option<PostForm>,
    ) -> Result<View<PostFormPage>, HandlerError> {
        let Some(user) = &ctx.user else {
            return Ok(View::Redirect(ctx.login_redirect()));
        };

        let Some(form) = submission else {
            return Ok(View::Render(PostFormPage {
                form: PostForm::default(),
                errors: FormErrors::default(),
                post: None,
            }));
        };

        match self.validate_post_form(&form).await? {
            Ok(()) => {
                self.posts
                    .create_post(user.id, form.text.trim().to_owned(), form.group, form.image)
                    .await?;
                Ok(View::Redirect(profile_path(&user.username)))
            }
            Err(errors) => Ok(View::Render(PostFormPage {
                form,
                errors,
                post: None,
            })),
        }
    }

    /// GET/POST `/posts/<id>/edit/`. Only the author may edit; everyone
    /// else signed in is bounced to the detail page untouched.
    pub async fn post_edit(
        &self,
        ctx: &RequestContext,
        post_id: PostId,
        submission: Option<PostForm>,
    ) -> Result<View<PostFormPage>, HandlerError> {
        let Some(user) = &ctx.user else {
            return Ok(View::Redirect(ctx.login_redirect()));
        };

        let post = self.posts.get(post_id).await?;
        if post.author_id != user.id {
            return Ok(View::Redirect(post_detail_path(post.id)));
        }

        let Some(form) = submission else {
            return Ok(View::Render(PostFormPage {
                form: PostForm::from_post(&post),
                errors: FormErrors::default(),
                post: Some(post),
            }));
        };

        match self.validate_post_form(&form).await? {
            Ok(()) => {
                let updated = self
                    .posts
                    .update_post(post, form.text.trim().to_owned(), form.group, form.image)
                    .await?;
                Ok(View::Redirect(post_detail_path(updated.id)))
            }
            Err(errors) => Ok(View::Render(PostFormPage {
                form,
                errors,
                post: Some(post),
            })),
        }
    }

    /// Field validation plus resolution of the optional group reference
    /// against the store.
    async fn validate_post_form(&self, form: &PostForm) -> Result<Result<(), FormErrors>, HandlerError> {
        let mut errors = match form.validate() {
            Ok(()) => FormErrors::default(),
            Err(errors) => errors,
        };

        if let Some(group_id) = form.group {
            if self.groups.by_id(group_id).await?.is_none() {
                errors.add("group", "select a valid group");
            }
        }

        if errors.is_empty() {
            Ok(Ok(()))
        } else {
            Ok(Err(errors))
        }
    }
}
