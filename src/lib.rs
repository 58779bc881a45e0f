//! Terminal client for a job-posting funnel service: search the extracted
//! postings, browse them interactively, highlight the query in raw text.

pub mod browse;
pub mod cli;
pub mod client;
pub mod config;
pub mod highlight;
pub mod render;
pub mod types;

pub use client::SearchClient;
pub use config::ApiConfig;
pub use highlight::{highlight, Segment};
pub use types::job::{Job, JobPostingRow, SearchResponse};
pub use types::query::JobFilter;
