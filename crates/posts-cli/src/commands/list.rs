use posts_core::services::PostService;
use posts_core::TitleOrder;

use crate::commands::common::{ensure_success, to_pretty_json};
use crate::error::CliError;

pub async fn run_list(
    service: &PostService,
    order: TitleOrder,
    skip_user_id: bool,
) -> Result<(), CliError> {
    let response = service.query_local(order, skip_user_id).await;
    println!("{}", to_pretty_json(&response)?);
    ensure_success(response.status)
}
