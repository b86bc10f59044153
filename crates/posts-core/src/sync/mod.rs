//! Bulk synchronization of remote posts into the local store
//!
//! Both modes walk the fetched posts once, in order, and keep going after a
//! failed write. The status returned is the status of the last write, not an
//! aggregate, so callers can't tell which post failed from the result alone.

mod scheduler;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::db::PostRepository;
use crate::error::Error;
use crate::models::PostsResponse;
use crate::status::Status;

pub use scheduler::{parse_first_run, SyncScheduler, FIRST_RUN_FORMAT};

/// How fetched posts are written to the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Insert new posts and replace existing ones
    #[default]
    Populate,
    /// Update existing posts only; new remote posts are skipped
    Refresh,
}

impl SyncMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Populate => "populate",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "populate" => Ok(Self::Populate),
            "refresh" => Ok(Self::Refresh),
            other => Err(Error::InvalidInput(format!(
                "unknown sync mode '{other}' (expected populate or refresh)"
            ))),
        }
    }
}

/// Write a fetched batch into `store`.
///
/// A failed fetch is returned as-is without touching the store. Otherwise
/// every post is written in fetch order and the last write's status wins.
/// An empty batch returns the fetch status.
pub fn apply_batch(fetched: PostsResponse, mode: SyncMode, store: &dyn PostRepository) -> Status {
    let PostsResponse { posts, mut status } = fetched;
    if !status.is_success() {
        tracing::info!(%mode, code = status.code, "Skipping sync, remote fetch failed");
        return status;
    }

    let mut failed = 0_usize;
    for post in &posts {
        status = match mode {
            SyncMode::Populate => store.upsert(post),
            SyncMode::Refresh => store.update(post),
        };
        if !status.is_success() {
            failed += 1;
            tracing::debug!(%mode, id = post.id, code = status.code, "Post write failed");
        }
    }

    tracing::info!(
        %mode,
        fetched = posts.len(),
        failed,
        code = status.code,
        "Sync batch applied"
    );
    status
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;

    use super::*;
    use crate::models::{Post, PostId};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Upsert(PostId),
        Update(PostId),
    }

    /// Store that records calls and fails writes for selected ids.
    #[derive(Default)]
    struct RecordingStore {
        calls: RefCell<Vec<Call>>,
        failing: HashSet<PostId>,
    }

    impl RecordingStore {
        fn failing_on(ids: &[PostId]) -> Self {
            Self {
                failing: ids.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn result_for(&self, id: PostId) -> Status {
            if self.failing.contains(&id) {
                Status::new(19, format!("constraint failed for {id}"))
            } else {
                Status::ok()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl PostRepository for RecordingStore {
        fn list_all(&self) -> PostsResponse {
            PostsResponse::ok(Vec::new())
        }

        fn upsert(&self, post: &Post) -> Status {
            self.calls.borrow_mut().push(Call::Upsert(post.id));
            self.result_for(post.id)
        }

        fn update(&self, post: &Post) -> Status {
            self.calls.borrow_mut().push(Call::Update(post.id));
            self.result_for(post.id)
        }

        fn delete(&self, _id: PostId) -> Status {
            Status::ok()
        }
    }

    fn batch() -> PostsResponse {
        PostsResponse::ok(vec![
            Post::new(1, 1, "title", "body"),
            Post::new(5, 9, "custom title", "custom body"),
            Post::new(100, 100, "ęśąćż", "ęśąćż"),
        ])
    }

    #[test]
    fn populate_upserts_each_post_in_fetch_order() {
        let store = RecordingStore::default();
        let status = apply_batch(batch(), SyncMode::Populate, &store);

        assert_eq!(status, Status::ok());
        assert_eq!(
            store.calls(),
            vec![Call::Upsert(1), Call::Upsert(9), Call::Upsert(100)]
        );
    }

    #[test]
    fn refresh_updates_each_post_in_fetch_order() {
        let store = RecordingStore::default();
        let status = apply_batch(batch(), SyncMode::Refresh, &store);

        assert_eq!(status, Status::ok());
        assert_eq!(
            store.calls(),
            vec![Call::Update(1), Call::Update(9), Call::Update(100)]
        );
    }

    #[test]
    fn refresh_middle_failure_is_masked_by_last_success() {
        let store = RecordingStore::failing_on(&[9]);
        let status = apply_batch(batch(), SyncMode::Refresh, &store);

        assert_eq!(status, Status::ok());
        assert_eq!(store.calls().len(), 3);
    }

    #[test]
    fn populate_last_failure_wins() {
        let store = RecordingStore::failing_on(&[100]);
        let status = apply_batch(batch(), SyncMode::Populate, &store);

        assert_eq!(status, Status::new(19, "constraint failed for 100"));
        assert_eq!(store.calls().len(), 3);
    }

    #[test]
    fn first_failure_does_not_halt_the_batch() {
        let store = RecordingStore::failing_on(&[1]);
        let status = apply_batch(batch(), SyncMode::Populate, &store);

        assert!(status.is_success());
        assert_eq!(
            store.calls(),
            vec![Call::Upsert(1), Call::Upsert(9), Call::Upsert(100)]
        );
    }

    #[test]
    fn failed_fetch_short_circuits() {
        let store = RecordingStore::default();
        let fetch_status = Status::new(404, "404 Not Found: [[]]");

        for mode in [SyncMode::Populate, SyncMode::Refresh] {
            let status = apply_batch(PostsResponse::failed(fetch_status.clone()), mode, &store);
            assert_eq!(status, fetch_status);
        }
        assert!(store.calls().is_empty());
    }

    #[test]
    fn empty_batch_returns_fetch_status() {
        let store = RecordingStore::failing_on(&[1]);
        let status = apply_batch(PostsResponse::ok(Vec::new()), SyncMode::Populate, &store);

        assert_eq!(status, Status::ok());
        assert!(store.calls().is_empty());
    }

    #[test]
    fn sync_mode_parses_case_insensitively() {
        assert_eq!("populate".parse::<SyncMode>().unwrap(), SyncMode::Populate);
        assert_eq!(" Refresh ".parse::<SyncMode>().unwrap(), SyncMode::Refresh);
        assert!("merge".parse::<SyncMode>().is_err());
    }
}
