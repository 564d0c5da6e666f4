use serde::{Deserialize, Serialize};

use crate::entity::prelude::PostModel;
use crate::ids::GroupId;

/// Field-level validation failures, keyed by the submitted field name.
/// Handlers hand these back to the template collaborator together with the
/// submitted values so the form re-renders filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormErrors {
    errors: Vec<(String, String)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.errors.push((field.to_owned(), message.to_owned()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }
}

/// Submission for the post create/edit flows. The group reference is only
/// syntactically validated here; the handler resolves it against the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    pub text: String,
    pub group: Option<GroupId>,
    pub image: Option<Vec<u8>>,
}

impl PostForm {
    /// Pre-filled form for the edit flow.
    pub fn from_post(post: &PostModel) -> Self {
        Self {
            text: post.text.clone(),
            group: post.group_id,
            image: post.image.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.text.trim().is_empty() {
            errors.add("text", "this field is required");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.text.trim().is_empty() {
            errors.add("text", "this field is required");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
