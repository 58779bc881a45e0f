// src/types/mod.rs
pub mod job;
pub mod query;

pub use job::{Job, JobPostingRow, SearchResponse};
pub use query::JobFilter;
