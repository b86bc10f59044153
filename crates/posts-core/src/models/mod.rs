//! Data models for posts

mod post;
mod response;

pub use post::{Post, PostId};
pub use response::PostsResponse;
