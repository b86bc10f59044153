//! Service layer shared by the CLI and the scheduler

mod posts;

pub use posts::PostService;
