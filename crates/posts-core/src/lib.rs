//! posts-core - Core library for the posts mirror
//!
//! This crate contains the post model, the local `SQLite` store, the remote
//! source client, and the synchronization and query logic used by the CLI.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod remote;
pub mod services;
pub mod status;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{Post, PostId, PostsResponse};
pub use query::TitleOrder;
pub use status::Status;
