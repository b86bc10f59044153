//! Batch result pairing posts with the status of the operation that produced them

use serde::{Deserialize, Serialize};

use crate::models::Post;
use crate::status::Status;

/// Posts plus exactly one [`Status`] describing how they were obtained.
///
/// On failure `posts` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub posts: Vec<Post>,
    pub status: Status,
}

impl PostsResponse {
    pub const fn new(posts: Vec<Post>, status: Status) -> Self {
        Self { posts, status }
    }

    /// Successful result carrying `posts`.
    pub fn ok(posts: Vec<Post>) -> Self {
        Self::new(posts, Status::ok())
    }

    /// Failed result with no posts.
    pub const fn failed(status: Status) -> Self {
        Self::new(Vec::new(), status)
    }

    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
