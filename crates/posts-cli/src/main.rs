//! posts CLI - mirror a remote collection of posts into a local store
//!
//! Every command prints JSON: a `{posts, status}` object for reads and a
//! `{code, message}` status for writes. A failed status exits with code 1.

mod cli;
mod commands;
mod error;

use clap::Parser;
use posts_core::config::AppConfig;
use posts_core::sync::SyncMode;

use crate::cli::{Cli, Commands};
use crate::commands::common::{open_service, resolve_db_path};
use crate::commands::delete::run_delete;
use crate::commands::fetch::run_fetch;
use crate::commands::list::run_list;
use crate::commands::schedule::run_schedule;
use crate::commands::sync::run_sync;
use crate::commands::update::run_update;
use crate::commands::upsert::run_upsert;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "posts=info"
                    .parse()
                    .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?,
            ),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let db_path = resolve_db_path(cli.db_path, config.db_path.clone());
    let service = open_service(&config, &db_path)?;

    match cli.command {
        Commands::Fetch => run_fetch(&service).await,
        Commands::List { sort, skip_user_id } => {
            run_list(&service, sort.map(Into::into).unwrap_or_default(), skip_user_id).await
        }
        Commands::Populate => run_sync(&service, SyncMode::Populate).await,
        Commands::Refresh => run_sync(&service, SyncMode::Refresh).await,
        Commands::Upsert(post) => run_upsert(&service, &post.into()).await,
        Commands::Update(post) => run_update(&service, &post.into()).await,
        Commands::Delete { id } => run_delete(&service, id).await,
        Commands::Schedule { mode } => {
            let mode = mode.map_or(config.sync_mode, Into::into);
            run_schedule(service, &config, mode).await
        }
    }
}
