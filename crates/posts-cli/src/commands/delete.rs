use posts_core::services::PostService;
use posts_core::PostId;

use crate::commands::common::report_status;
use crate::error::CliError;

pub async fn run_delete(service: &PostService, id: PostId) -> Result<(), CliError> {
    report_status(service.delete_one(id).await)
}
