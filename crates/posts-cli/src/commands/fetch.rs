use posts_core::services::PostService;

use crate::commands::common::{ensure_success, to_pretty_json};
use crate::error::CliError;

pub async fn run_fetch(service: &PostService) -> Result<(), CliError> {
    let response = service.fetch_remote().await;
    println!("{}", to_pretty_json(&response)?);
    ensure_success(response.status)
}
