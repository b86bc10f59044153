//! Remote post source
//!
//! Fetches the full remote collection in a single request. Transport failures
//! are folded into the returned [`Status`]; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::models::{Post, PostsResponse};
use crate::status::Status;
use crate::util::{compact_text, is_http_url, normalize_text_option};

/// Default remote collection.
pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Default connect timeout, also applied to each response read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Anything that can hand over the full remote collection.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch every post. On failure the posts are empty and the status carries the cause.
    async fn fetch_all(&self) -> PostsResponse;
}

/// HTTP client for the remote posts endpoint
#[derive(Debug, Clone)]
pub struct RemoteClient {
    endpoint: String,
    client: reqwest::Client,
}

impl RemoteClient {
    /// Build a client for `endpoint`.
    ///
    /// `timeout` bounds connecting and, separately, each read of the response.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn try_fetch_all(&self) -> Result<PostsResponse> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let failure = http_failure_status(status, &body);
            tracing::info!(endpoint = %self.endpoint, "Remote fetch failed: {}", failure.message);
            return Ok(PostsResponse::failed(failure));
        }

        let body = response.text().await?;
        let posts = decode_posts(&body)?;
        tracing::debug!(count = posts.len(), "Fetched remote posts");
        Ok(PostsResponse::ok(posts))
    }
}

#[async_trait]
impl PostSource for RemoteClient {
    async fn fetch_all(&self) -> PostsResponse {
        match self.try_fetch_all().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(endpoint = %self.endpoint, %error, "Remote fetch failed");
                PostsResponse::failed(Status::from(&error))
            }
        }
    }
}

/// Decode a response body into posts. An empty body is an empty collection.
pub fn decode_posts(body: &str) -> Result<Vec<Post>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(body)?)
}

/// Status for a non-2xx response, e.g. `404 Not Found: [[]]`.
fn http_failure_status(status: StatusCode, body: &str) -> Status {
    let code = status.as_u16();
    Status::new(
        i32::from(code),
        format!(
            "{code} {}: [{}]",
            status.canonical_reason().unwrap_or("Unknown Status"),
            compact_text(body)
        ),
    )
}

fn normalize_endpoint(raw: String) -> Result<String> {
    let endpoint = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::Config("source endpoint must not be empty".to_string()))?;
    if is_http_url(&endpoint) {
        Ok(endpoint)
    } else {
        Err(Error::Config(
            "source endpoint must include http:// or https://".to_string(),
        ))
    }
}
