//! Post model

use serde::{Deserialize, Serialize};

/// Primary key of a post. Supplied by the remote source or the caller, never reassigned.
pub type PostId = i32;

/// A post mirrored from the remote collection
///
/// Zero-valued `user_id`/`id` are left out of serialized output, which is how a
/// redacted `user_id` disappears from JSON responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    /// Author of the post
    #[serde(skip_serializing_if = "is_zero")]
    pub user_id: i32,
    /// Unique identifier
    #[serde(skip_serializing_if = "is_zero")]
    pub id: PostId,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(
        user_id: i32,
        id: PostId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Copy of this post with `user_id` cleared.
    #[must_use]
    pub fn without_user_id(&self) -> Self {
        Self {
            user_id: 0,
            ..self.clone()
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde passes fields by reference
const fn is_zero(value: &i32) -> bool {
    *value == 0
}
