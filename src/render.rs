// src/render.rs
//! Plain-text rendering of result cards, posting rows and highlight spans.

use std::io::IsTerminal;

use crate::highlight::{highlight, Segment};
use crate::types::job::{Job, JobPostingRow};

/// Display cap for the skills line.
const SKILLS_SHOWN: usize = 10;

/// Placeholder for values the posting does not carry.
const MISSING: &str = "—";

const INDENT: &str = "    ";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const ANSI_MARK: &str = "\x1b[1;33m";
const ANSI_ERROR: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

/// How matched spans are emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// ANSI color, for terminal output.
    Ansi,
    /// `[..]` markers, for piped output.
    Plain,
}

impl Emphasis {
    /// Color only when stdout is a terminal.
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() {
            Emphasis::Ansi
        } else {
            Emphasis::Plain
        }
    }
}

/// Flatten highlight segments back into one string with the matched runs
/// emphasized.
pub fn emphasize(segments: &[Segment], style: Emphasis) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_match {
            match style {
                Emphasis::Ansi => {
                    out.push_str(ANSI_MARK);
                    out.push_str(&segment.text);
                    out.push_str(ANSI_RESET);
                }
                Emphasis::Plain => {
                    out.push('[');
                    out.push_str(&segment.text);
                    out.push(']');
                }
            }
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}

/// Header above the result list. Shows the fetched size, plus the server
/// total when more rows matched than the page holds.
pub fn results_header(fetched: usize, server_count: u64) -> String {
    if server_count > fetched as u64 {
        format!("Results ({} of {})", fetched, server_count)
    } else {
        format!("Results ({})", fetched)
    }
}

/// One result card: company, title with link, meta line, salary and skills,
/// then the one-line summary when the posting has one.
pub fn job_card(index: usize, job: &Job) -> String {
    let mut out = String::new();

    out.push_str(&format!("[{}] {}\n", index, job.company_name));

    match job.canonical_url.as_deref() {
        Some(url) => out.push_str(&format!("{}{} <{}>\n", INDENT, job.display_title(), url)),
        None => out.push_str(&format!("{}{}\n", INDENT, job.display_title())),
    }

    out.push_str(&format!(
        "{}{} · {} · {} · {}\n",
        INDENT,
        job.location_label().unwrap_or(MISSING),
        job.seniority.as_deref().unwrap_or(MISSING),
        job.role_function.as_deref().unwrap_or(MISSING),
        job.status,
    ));

    out.push_str(&format!(
        "{}salary: {} – {}\n",
        INDENT,
        salary_label(job.salary_min),
        salary_label(job.salary_max),
    ));

    let skills: Vec<&str> = job
        .skill_list()
        .iter()
        .take(SKILLS_SHOWN)
        .map(|s| s.as_str())
        .collect();
    out.push_str(&format!("{}skills: {}\n", INDENT, skills.join(", ")));

    if let Some(summary) = job.summary.as_deref() {
        out.push_str(&format!("{}{}\n", INDENT, summary));
    }

    out
}

/// The raw posting text with the query highlighted, when the posting
/// carries any. Recomputed on every call so the current query applies.
pub fn description_block(job: &Job, query: &str, style: Emphasis) -> Option<String> {
    let text = job.description_text.as_deref()?;
    let segments = highlight(text, query);
    Some(emphasize(&segments, style))
}

/// One row of the recent-postings listing, with pipeline timestamps.
pub fn posting_row(index: usize, row: &JobPostingRow) -> String {
    let title = row.title.as_deref().unwrap_or("(untitled)");
    let mut out = String::new();

    out.push_str(&format!(
        "[{}] {} - {} [{}]\n",
        index, row.company_name, title, row.status
    ));

    let mut pipeline = format!(
        "{}via {} · discovered {}",
        INDENT,
        row.source,
        row.discovered_at.format(TIME_FORMAT)
    );
    if let Some(ts) = row.fetched_at {
        pipeline.push_str(&format!(" · fetched {}", ts.format(TIME_FORMAT)));
    }
    if let Some(ts) = row.extracted_at {
        pipeline.push_str(&format!(" · extracted {}", ts.format(TIME_FORMAT)));
    }
    out.push_str(&pipeline);
    out.push('\n');

    if let Some(url) = row.canonical_url.as_deref() {
        out.push_str(&format!("{}<{}>\n", INDENT, url));
    }

    out
}

/// One error line for a failed search.
pub fn error_line(message: &str, style: Emphasis) -> String {
    match style {
        Emphasis::Ansi => format!("{}error: {}{}", ANSI_ERROR, message, ANSI_RESET),
        Emphasis::Plain => format!("error: {}", message),
    }
}

/// Salaries come over the wire as floats but are whole numbers in practice.
fn salary_label(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
        None => MISSING.to_string(),
    }
}
