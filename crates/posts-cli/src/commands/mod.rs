pub mod common;
pub mod delete;
pub mod fetch;
pub mod list;
pub mod schedule;
pub mod sync;
pub mod update;
pub mod upsert;
