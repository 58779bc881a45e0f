// src/types/job.rs
//! Wire models returned by the job-search service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One job posting as returned by `/jobs/search`. Everything except the
/// identity, company and lifecycle status is optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub company_name: String,
    pub title: Option<String>,
    pub location_raw: Option<String>,
    pub location_city: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub seniority: Option<String>,
    pub role_function: Option<String>,
    pub skills: Option<Vec<String>>,
    pub summary: Option<String>,
    pub canonical_url: Option<String>,
    pub status: String,
    pub description_text: Option<String>,
}

impl Job {
    /// Title for display; postings without one get a literal placeholder.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }

    /// Location for the meta line: the raw label first, the extracted city
    /// as fallback.
    pub fn location_label(&self) -> Option<&str> {
        self.location_raw.as_deref().or(self.location_city.as_deref())
    }

    /// Skills as a slice, absent and empty treated alike.
    pub fn skill_list(&self) -> &[String] {
        self.skills.as_deref().unwrap_or(&[])
    }
}

/// Envelope around one search round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total rows matching server side, which can exceed `items.len()`.
    pub count: u64,
    pub items: Vec<Job>,
}

/// One row from the `/job_postings` listing of recently discovered
/// postings. Carries pipeline timestamps instead of extracted fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPostingRow {
    pub id: String,
    pub source: String,
    pub external_id: Option<String>,
    pub canonical_url: Option<String>,
    pub company_name: String,
    pub title: Option<String>,
    pub location_raw: Option<String>,
    pub status: String,
    pub discovered_at: DateTime<Utc>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub extracted_at: Option<DateTime<Utc>>,
}
