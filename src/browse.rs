// src/browse.rs
//! Interactive search session: edit filters, fire searches, read the cards.
//!
//! Searches run on spawned tasks and report back over a channel. Each search
//! carries a generation number; completions from superseded generations are
//! dropped, so the view always reflects the newest request regardless of
//! arrival order.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use crate::client::SearchClient;
use crate::render::{self, Emphasis};
use crate::types::job::{Job, SearchResponse};
use crate::types::query::JobFilter;

/// Raw text for each filter field, as typed. Coerced into a `JobFilter`
/// when a search fires.
#[derive(Debug, Clone, Default)]
pub struct FilterInputs {
    pub q: String,
    pub company: String,
    pub city: String,
    pub min_salary: String,
    pub max_salary: String,
    pub role_function: String,
    pub seniority: String,
    pub skill: String,
}

impl FilterInputs {
    /// Coerce the raw inputs: empty text becomes an absent field, salary
    /// text becomes a number. Unparseable salary text is dropped with a
    /// warning instead of blocking the search.
    pub fn to_filter(&self) -> JobFilter {
        JobFilter {
            q: text_field(&self.q),
            company: text_field(&self.company),
            city: text_field(&self.city),
            min_salary: salary_field("min_salary", &self.min_salary),
            max_salary: salary_field("max_salary", &self.max_salary),
            role_function: text_field(&self.role_function),
            seniority: text_field(&self.seniority),
            skill: text_field(&self.skill),
            ..JobFilter::default()
        }
    }
}

fn text_field(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn salary_field(name: &str, raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {} value that is not a number: {:?}", name, raw);
            None
        }
    }
}

/// One finished search, tagged with the generation that issued it.
#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub outcome: Result<SearchResponse>,
}

/// What folding a completion into the view did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Updated,
    Failed,
    Stale,
}

/// View state for the session.
#[derive(Debug, Default)]
pub struct BrowseState {
    pub inputs: FilterInputs,
    pub items: Vec<Job>,
    pub count: u64,
    pub error: Option<String>,
    /// Generation of the most recently issued search.
    generation: u64,
    /// Searches issued but not yet completed.
    in_flight: usize,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next generation and snapshot the current inputs for it.
    pub fn begin_search(&mut self) -> (u64, JobFilter) {
        self.generation += 1;
        self.in_flight += 1;
        (self.generation, self.inputs.to_filter())
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Fold one finished search into the view. Only the newest generation
    /// counts; a failure keeps the previous items on screen.
    pub fn apply(&mut self, completion: Completion) -> ApplyOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        if completion.generation < self.generation {
            return ApplyOutcome::Stale;
        }

        match completion.outcome {
            Ok(response) => {
                self.items = response.items;
                self.count = response.count;
                self.error = None;
                ApplyOutcome::Updated
            }
            Err(e) => {
                self.error = Some(format!("{:#}", e));
                ApplyOutcome::Failed
            }
        }
    }
}

/// Run the session until EOF or `quit`. One search fires immediately on
/// entry, before any input is read.
pub async fn run(client: SearchClient, style: Emphasis) -> Result<()> {
    let client = Arc::new(client);
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut state = BrowseState::new();

    println!("Interactive job search. Type 'help' for commands, 'quit' to leave.");
    spawn_search(&client, &tx, &mut state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;
        tokio::select! {
            completion = rx.recv() => {
                // The sender lives in this scope, so the channel stays open.
                if let Some(completion) = completion {
                    handle_completion(&mut state, completion, style);
                }
            }
            line = lines.next_line() => {
                match line.context("Failed to read input")? {
                    Some(line) => {
                        if !handle_line(&client, &tx, &mut state, line.trim(), style) {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

fn spawn_search(
    client: &Arc<SearchClient>,
    tx: &mpsc::UnboundedSender<Completion>,
    state: &mut BrowseState,
) {
    let (generation, filter) = state.begin_search();
    let client = Arc::clone(client);
    let tx = tx.clone();

    println!("searching...");
    tokio::spawn(async move {
        let outcome = client.search(&filter).await;
        let _ = tx.send(Completion {
            generation,
            outcome,
        });
    });
}

fn handle_completion(state: &mut BrowseState, completion: Completion, style: Emphasis) {
    match state.apply(completion) {
        ApplyOutcome::Updated => {
            println!();
            print_results(state);
        }
        ApplyOutcome::Failed => {
            println!();
            if let Some(message) = state.error.as_deref() {
                println!("{}", render::error_line(message, style));
            }
        }
        ApplyOutcome::Stale => {}
    }
}

/// Dispatch one input line. Returns false when the session should end.
fn handle_line(
    client: &Arc<SearchClient>,
    tx: &mpsc::UnboundedSender<Completion>,
    state: &mut BrowseState,
    line: &str,
    style: Emphasis,
) -> bool {
    let (command, rest) = split_command(line);
    match command {
        "" => {}
        "help" | "?" => print_help(),
        "quit" | "exit" => return false,
        "search" | "s" => spawn_search(client, tx, state),
        "filters" | "f" => print_filters(&state.inputs),
        "results" | "r" => print_results(state),
        "open" | "o" => open_posting(state, rest, style),
        "clear" => clear_field(&mut state.inputs, rest),
        name => {
            if !set_field(&mut state.inputs, name, rest) {
                println!("unknown command: {} (try 'help')", name);
            }
        }
    }
    true
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (line, ""),
    }
}

/// Store `value` under a filter field name. Returns false when the name is
/// not a known field.
fn set_field(inputs: &mut FilterInputs, name: &str, value: &str) -> bool {
    let slot = match name {
        "q" | "query" | "title" => &mut inputs.q,
        "company" => &mut inputs.company,
        "city" => &mut inputs.city,
        "min" | "min_salary" => &mut inputs.min_salary,
        "max" | "max_salary" => &mut inputs.max_salary,
        "role" | "role_function" => &mut inputs.role_function,
        "seniority" => &mut inputs.seniority,
        "skill" => &mut inputs.skill,
        _ => return false,
    };
    *slot = value.to_string();
    true
}

fn clear_field(inputs: &mut FilterInputs, name: &str) {
    if name.is_empty() {
        *inputs = FilterInputs::default();
        println!("all filters cleared");
    } else if set_field(inputs, name, "") {
        println!("{} cleared", name);
    } else {
        println!("unknown filter: {}", name);
    }
}

fn open_posting(state: &BrowseState, rest: &str, style: Emphasis) {
    let Ok(index) = rest.parse::<usize>() else {
        println!("usage: open <result number>");
        return;
    };
    let Some(job) = index.checked_sub(1).and_then(|i| state.items.get(i)) else {
        println!("no result number {}", index);
        return;
    };
    match render::description_block(job, &state.inputs.q, style) {
        Some(block) => {
            println!();
            println!("{}", block);
        }
        None => println!("result {} has no raw posting text", index),
    }
}

fn print_results(state: &BrowseState) {
    println!("{}", render::results_header(state.items.len(), state.count));
    for (i, job) in state.items.iter().enumerate() {
        println!("{}", render::job_card(i + 1, job));
    }

    let openable: Vec<String> = state
        .items
        .iter()
        .enumerate()
        .filter(|(_, job)| job.description_text.is_some())
        .map(|(i, _)| (i + 1).to_string())
        .collect();
    if !openable.is_empty() {
        println!("raw text available for: {} (use 'open <n>')", openable.join(", "));
    }
}

fn print_filters(inputs: &FilterInputs) {
    let rows = [
        ("q", inputs.q.as_str()),
        ("company", inputs.company.as_str()),
        ("city", inputs.city.as_str()),
        ("min_salary", inputs.min_salary.as_str()),
        ("max_salary", inputs.max_salary.as_str()),
        ("role_function", inputs.role_function.as_str()),
        ("seniority", inputs.seniority.as_str()),
        ("skill", inputs.skill.as_str()),
    ];
    for (name, value) in rows {
        if value.is_empty() {
            println!("  {:<13} (unset)", name);
        } else {
            println!("  {:<13} {}", name, value);
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  q <text>             title query, also the highlight term");
    println!("  company <text>       company name filter");
    println!("  city <text>          extracted city filter");
    println!("  min <number>         minimum salary");
    println!("  max <number>         maximum salary");
    println!("  role <text>          role function, e.g. backend");
    println!("  seniority <text>     seniority level, e.g. senior");
    println!("  skill <text>         skill substring");
    println!("  clear [field]        clear one filter, or every filter");
    println!("  filters              show the current filter values");
    println!("  search               run a search with the current filters");
    println!("  results              reprint the latest result cards");
    println!("  open <n>             raw text of result n, query highlighted");
    println!("  help                 this list");
    println!("  quit                 leave");
    println!();
    println!("A field name with no value clears that field.");
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}
