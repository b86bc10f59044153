use posts_core::services::PostService;
use posts_core::Post;

use crate::commands::common::report_status;
use crate::error::CliError;

/// Updating an id that isn't stored changes nothing and still succeeds.
pub async fn run_update(service: &PostService, post: &Post) -> Result<(), CliError> {
    report_status(service.update_one(post).await)
}
