// src/types/query.rs
//! The filter set sent to `/jobs/search`.

use serde::{Deserialize, Serialize};

/// Fixed result page: the newest rows, one page only.
pub const PAGE_LIMIT: u32 = 50;
pub const PAGE_OFFSET: u32 = 0;

/// Search filters. All narrowing fields are optional; `limit` and `offset`
/// are always sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFilter {
    /// Title substring; doubles as the highlight term in the views.
    pub q: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub role_function: Option<String>,
    pub seniority: Option<String>,
    pub skill: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            q: None,
            company: None,
            city: None,
            min_salary: None,
            max_salary: None,
            role_function: None,
            seniority: None,
            skill: None,
            limit: PAGE_LIMIT,
            offset: PAGE_OFFSET,
        }
    }
}

impl JobFilter {
    /// Query-string pairs for the search request. Absent and empty-string
    /// fields are omitted; numeric zero is a real value and stays; the page
    /// bounds are always present.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "q", &self.q);
        push_text(&mut pairs, "company", &self.company);
        push_text(&mut pairs, "city", &self.city);
        push_number(&mut pairs, "min_salary", self.min_salary);
        push_number(&mut pairs, "max_salary", self.max_salary);
        push_text(&mut pairs, "seniority", &self.seniority);
        push_text(&mut pairs, "role_function", &self.role_function);
        push_text(&mut pairs, "skill", &self.skill);
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        if !v.is_empty() {
            pairs.push((key, v.clone()));
        }
    }
}

fn push_number(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<i64>) {
    if let Some(v) = value {
        pairs.push((key, v.to_string()));
    }
}
