//! Database layer for posts

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{PostRepository, SqlitePostRepository};
