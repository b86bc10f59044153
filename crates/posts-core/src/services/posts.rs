//! Request surface over the local store and the remote source.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{Database, PostRepository, SqlitePostRepository};
use crate::models::{Post, PostId, PostsResponse};
use crate::query::{view, TitleOrder};
use crate::remote::PostSource;
use crate::status::Status;
use crate::sync::{apply_batch, SyncMode};
use crate::Result;

/// Thread-safe service for store, remote, and sync operations.
///
/// Every store access goes through one lock. A sync batch holds it for the
/// whole write loop, so readers never see a half-applied batch and two syncs
/// never interleave. The remote fetch happens before the lock is taken.
#[derive(Clone)]
pub struct PostService {
    db: Arc<Mutex<Database>>,
    source: Arc<dyn PostSource>,
}

impl PostService {
    pub fn new(db: Database, source: Arc<dyn PostSource>) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            source,
        }
    }

    /// Open (or create) the database at `db_path`.
    pub fn open_path(db_path: impl AsRef<Path>, source: Arc<dyn PostSource>) -> Result<Self> {
        Ok(Self::new(Database::open(db_path)?, source))
    }

    /// Open an in-memory database service (primarily for tests).
    pub fn open_in_memory(source: Arc<dyn PostSource>) -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?, source))
    }

    /// Fetch the remote collection without storing it.
    pub async fn fetch_remote(&self) -> PostsResponse {
        self.source.fetch_all().await
    }

    /// List stored posts, optionally sorted by title and with `user_id` redacted.
    pub async fn query_local(&self, order: TitleOrder, redact_user_id: bool) -> PostsResponse {
        let listed = {
            let db = self.db.lock().await;
            SqlitePostRepository::new(db.connection()).list_all()
        };
        PostsResponse::new(view(&listed.posts, order, redact_user_id), listed.status)
    }

    /// Insert or replace every remote post.
    pub async fn populate(&self) -> Status {
        self.sync(SyncMode::Populate).await
    }

    /// Update stored posts from the remote collection without adding new ones.
    pub async fn refresh(&self) -> Status {
        self.sync(SyncMode::Refresh).await
    }

    /// Fetch, then write the batch under the store lock.
    pub async fn sync(&self, mode: SyncMode) -> Status {
        let fetched = self.source.fetch_all().await;
        let db = self.db.lock().await;
        let repo = SqlitePostRepository::new(db.connection());
        apply_batch(fetched, mode, &repo)
    }

    pub async fn upsert_one(&self, post: &Post) -> Status {
        let db = self.db.lock().await;
        SqlitePostRepository::new(db.connection()).upsert(post)
    }

    pub async fn update_one(&self, post: &Post) -> Status {
        let db = self.db.lock().await;
        SqlitePostRepository::new(db.connection()).update(post)
    }

    pub async fn delete_one(&self, id: PostId) -> Status {
        let db = self.db.lock().await;
        SqlitePostRepository::new(db.connection()).delete(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Source that always answers with the same response.
    struct StaticSource {
        response: PostsResponse,
        fetches: AtomicUsize,
    }

    impl StaticSource {
        fn new(response: PostsResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                fetches: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PostSource for StaticSource {
        async fn fetch_all(&self) -> PostsResponse {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn remote_posts() -> Vec<Post> {
        vec![
            Post::new(1, 1, "title", "body"),
            Post::new(5, 9, "custom title", "custom body"),
            Post::new(100, 100, "ęśąćż", "ęśąćż"),
        ]
    }

    fn service_with(response: PostsResponse) -> PostService {
        PostService::open_in_memory(StaticSource::new(response)).unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetch_remote_passes_through() {
        let service = service_with(PostsResponse::ok(remote_posts()));
        assert_eq!(
            service.fetch_remote().await,
            PostsResponse::ok(remote_posts())
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn populate_mirrors_remote_posts() {
        let service = service_with(PostsResponse::ok(remote_posts()));

        assert_eq!(service.populate().await, Status::ok());

        let local = service.query_local(TitleOrder::Unsorted, false).await;
        assert_eq!(local, PostsResponse::ok(remote_posts()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn populate_replaces_local_edits() {
        let service = service_with(PostsResponse::ok(remote_posts()));
        service.upsert_one(&Post::new(7, 9, "local", "local")).await;

        service.populate().await;

        let local = service.query_local(TitleOrder::Unsorted, false).await.posts;
        assert!(local.contains(&Post::new(5, 9, "custom title", "custom body")));
        assert!(!local.iter().any(|post| post.title == "local"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_updates_existing_and_skips_new() {
        let service = service_with(PostsResponse::ok(remote_posts()));
        service.upsert_one(&Post::new(2, 9, "stale", "stale")).await;

        assert_eq!(service.refresh().await, Status::ok());

        let local = service.query_local(TitleOrder::Unsorted, false).await.posts;
        assert_eq!(local, vec![Post::new(5, 9, "custom title", "custom body")]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_fetch_leaves_store_untouched() {
        let fetch_status = Status::new(404, "404 Not Found: [[]]");
        let service = service_with(PostsResponse::failed(fetch_status.clone()));
        service.upsert_one(&Post::new(1, 1, "kept", "kept")).await;

        assert_eq!(service.populate().await, fetch_status);
        assert_eq!(service.refresh().await, fetch_status);

        let local = service.query_local(TitleOrder::Unsorted, false).await.posts;
        assert_eq!(local, vec![Post::new(1, 1, "kept", "kept")]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn query_local_sorts_and_redacts() {
        let service = service_with(PostsResponse::ok(Vec::new()));
        service
            .upsert_one(&Post::new(9999, 99, "newtitle", "newbody"))
            .await;
        service
            .upsert_one(&Post::new(5, 9, "testing test ! @", ")(*&^%$#@!"))
            .await;
        service.upsert_one(&Post::new(43, 12, "abcde", "abcde")).await;

        let ascending = service.query_local(TitleOrder::Ascending, true).await;
        assert!(ascending.is_success());
        assert_eq!(
            ascending.posts,
            vec![
                Post::new(0, 12, "abcde", "abcde"),
                Post::new(0, 99, "newtitle", "newbody"),
                Post::new(0, 9, "testing test ! @", ")(*&^%$#@!"),
            ]
        );

        let descending = service.query_local(TitleOrder::Descending, false).await;
        let ids: Vec<PostId> = descending.posts.iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![9, 99, 12]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_and_delete_one() {
        let service = service_with(PostsResponse::ok(Vec::new()));
        service.upsert_one(&Post::new(1, 10, "title", "body")).await;

        assert!(service
            .update_one(&Post::new(2, 10, "edited", "edited"))
            .await
            .is_success());
        assert!(service.delete_one(404).await.is_success());

        let local = service.query_local(TitleOrder::Unsorted, false).await.posts;
        assert_eq!(local, vec![Post::new(2, 10, "edited", "edited")]);

        assert!(service.delete_one(10).await.is_success());
        assert!(service
            .query_local(TitleOrder::Unsorted, false)
            .await
            .posts
            .is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_syncs_and_reads_see_whole_batches() {
        let source = StaticSource::new(PostsResponse::ok(remote_posts()));
        let service = PostService::open_in_memory(source.clone()).unwrap();

        let mut tasks = Vec::new();
        for _ in 0..4 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move { service.populate().await }));
        }
        for _ in 0..4 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move {
                let listed = service.query_local(TitleOrder::Unsorted, false).await;
                assert!(listed.posts.is_empty() || listed.posts.len() == 3);
                listed.status
            }));
        }
        for task in tasks {
            assert!(task.await.unwrap().is_success());
        }

        assert_eq!(source.fetches.load(Ordering::SeqCst), 4);
        let local = service.query_local(TitleOrder::Unsorted, false).await;
        assert_eq!(local.posts.len(), 3);
    }
}
