use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use posts_core::sync::SyncMode;
use posts_core::{Post, TitleOrder};

#[derive(Parser)]
#[command(name = "posts")]
#[command(about = "Mirror remote posts into a local database and query them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch posts from the remote source without storing them
    Fetch,
    /// List posts stored in the local database
    List {
        /// Sort by title
        #[arg(long, value_enum)]
        sort: Option<SortOrder>,
        /// Leave userId out of the output
        #[arg(long)]
        skip_user_id: bool,
    },
    /// Insert or replace every remote post in the local database
    Populate,
    /// Update local posts from the remote source without adding new ones
    Refresh,
    /// Insert a post, replacing any post with the same id
    Upsert(PostArgs),
    /// Update the post with the given id
    Update(PostArgs),
    /// Delete the post with the given id
    Delete {
        /// Post id
        id: i32,
    },
    /// Run the recurring sync until interrupted
    Schedule {
        /// Sync mode (defaults to POSTS_SYNC_MODE)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PostArgs {
    /// Post id
    #[arg(long)]
    pub id: i32,
    /// Author id
    #[arg(long, default_value_t = 0)]
    pub user_id: i32,
    /// Post title
    #[arg(long, default_value = "")]
    pub title: String,
    /// Post body
    #[arg(long, default_value = "")]
    pub body: String,
}

impl From<PostArgs> for Post {
    fn from(args: PostArgs) -> Self {
        Self::new(args.user_id, args.id, args.title, args.body)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl From<SortOrder> for TitleOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => Self::Ascending,
            SortOrder::Descending => Self::Descending,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    Populate,
    Refresh,
}

impl From<ModeArg> for SyncMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Populate => Self::Populate,
            ModeArg::Refresh => Self::Refresh,
        }
    }
}
