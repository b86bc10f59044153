use posts_core::services::PostService;
use posts_core::Post;

use crate::commands::common::report_status;
use crate::error::CliError;

pub async fn run_upsert(service: &PostService, post: &Post) -> Result<(), CliError> {
    report_status(service.upsert_one(post).await)
}
