//! Post repository implementation

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{Post, PostId, PostsResponse};
use crate::status::Status;

/// Trait for post storage operations
///
/// Every operation reports failure through the returned [`Status`]; callers
/// never need to handle an `Err`.
pub trait PostRepository {
    /// List all posts in storage order
    fn list_all(&self) -> PostsResponse;

    /// Insert a post, or replace every field of the post with the same id
    fn upsert(&self, post: &Post) -> Status;

    /// Overwrite `user_id`, `title` and `body` of the post with the same id.
    /// A missing id is not an error.
    fn update(&self, post: &Post) -> Status;

    /// Delete a post by id. A missing id is not an error.
    fn delete(&self, id: PostId) -> Status;
}

/// `SQLite` implementation of `PostRepository`
pub struct SqlitePostRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqlitePostRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a post from a database row
    fn parse_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
        Ok(Post {
            user_id: row.get(0)?,
            id: row.get(1)?,
            title: row.get(2)?,
            body: row.get(3)?,
        })
    }

    fn try_list_all(&self) -> Result<Vec<Post>> {
        let mut stmt = self
            .conn
            .prepare("SELECT userId, id, title, body FROM posts")?;

        let posts = stmt
            .query_map([], Self::parse_post)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(posts)
    }

    fn try_upsert(&self, post: &Post) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO posts (userId, id, title, body) VALUES (?, ?, ?, ?)",
            params![post.user_id, post.id, post.title, post.body],
        )?;
        Ok(())
    }

    fn try_update(&self, post: &Post) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE posts SET userId = ?, title = ?, body = ? WHERE id = ?",
            params![post.user_id, post.title, post.body, post.id],
        )?;
        Ok(rows)
    }

    fn try_delete(&self, id: PostId) -> Result<usize> {
        let rows = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?", params![id])?;
        Ok(rows)
    }
}

/// Fold a storage result into a [`Status`], logging failures.
fn to_status<T>(operation: &str, result: Result<T>) -> Status {
    match result {
        Ok(_) => Status::ok(),
        Err(error) => {
            tracing::warn!(operation, %error, "Post store operation failed");
            Status::from(&error)
        }
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn list_all(&self) -> PostsResponse {
        match self.try_list_all() {
            Ok(posts) => PostsResponse::ok(posts),
            Err(error) => {
                tracing::warn!(operation = "list_all", %error, "Post store operation failed");
                PostsResponse::failed(Status::from(&error))
            }
        }
    }

    fn upsert(&self, post: &Post) -> Status {
        to_status("upsert", self.try_upsert(post))
    }

    fn update(&self, post: &Post) -> Status {
        let result = self.try_update(post).inspect(|rows| {
            if *rows == 0 {
                tracing::debug!(id = post.id, "Update matched no existing post");
            }
        });
        to_status("update", result)
    }

    fn delete(&self, id: PostId) -> Status {
        let result = self.try_delete(id).inspect(|rows| {
            if *rows == 0 {
                tracing::debug!(id, "Delete matched no existing post");
            }
        });
        to_status("delete", result)
    }
}
