// src/cli.rs
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::browse;
use crate::client::SearchClient;
use crate::config::ApiConfig;
use crate::render::{self, Emphasis};
use crate::types::query::JobFilter;

#[derive(Parser)]
#[command(name = "jobfunnel")]
#[command(about = "Search and browse job postings from a funnel service")]
pub struct Cli {
    /// Without a subcommand the interactive session starts.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Service address; overrides JOBFUNNEL_API_BASE / API_BASE
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one search and print the result cards
    Search(SearchArgs),
    /// Interactive session: edit filters, search, open postings
    Browse,
    /// List recently discovered postings with pipeline timestamps
    Recent {
        /// Narrow to one lifecycle status, e.g. discovered or extracted
        #[arg(long)]
        status: Option<String>,
        /// Rows to request (the server caps this at 200)
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Check that the service is up
    Ping,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Title query; also the highlight term for --full
    #[arg(short, long)]
    pub query: Option<String>,
    /// Company name filter
    #[arg(long)]
    pub company: Option<String>,
    /// Extracted city filter
    #[arg(long)]
    pub city: Option<String>,
    /// Minimum salary
    #[arg(long)]
    pub min_salary: Option<i64>,
    /// Maximum salary
    #[arg(long)]
    pub max_salary: Option<i64>,
    /// Role function, e.g. backend
    #[arg(long)]
    pub role_function: Option<String>,
    /// Seniority level, e.g. senior
    #[arg(long)]
    pub seniority: Option<String>,
    /// Skill substring
    #[arg(long)]
    pub skill: Option<String>,
    /// Also print each posting's raw text with the query highlighted
    #[arg(long)]
    pub full: bool,
}

impl SearchArgs {
    fn to_filter(&self) -> JobFilter {
        JobFilter {
            q: self.query.clone(),
            company: self.company.clone(),
            city: self.city.clone(),
            min_salary: self.min_salary,
            max_salary: self.max_salary,
            role_function: self.role_function.clone(),
            seniority: self.seniority.clone(),
            skill: self.skill.clone(),
            ..JobFilter::default()
        }
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = match &cli.api_base {
        Some(base) => ApiConfig::new(base.clone()),
        None => ApiConfig::from_env(),
    }
    .with_timeout(Duration::from_secs(cli.timeout));

    info!("Using search service at {}", config.base_url);

    let client = SearchClient::new(&config)?;
    let style = Emphasis::detect();

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => browse::run(client, style).await,
        Command::Search(args) => run_search(&client, &args, style).await,
        Command::Recent { status, limit } => run_recent(&client, status.as_deref(), limit).await,
        Command::Ping => run_ping(&client, &config).await,
    }
}

async fn run_search(client: &SearchClient, args: &SearchArgs, style: Emphasis) -> Result<()> {
    let response = client.search(&args.to_filter()).await?;

    println!(
        "{}",
        render::results_header(response.items.len(), response.count)
    );
    for (i, job) in response.items.iter().enumerate() {
        println!("{}", render::job_card(i + 1, job));
        if args.full {
            let query = args.query.as_deref().unwrap_or("");
            if let Some(block) = render::description_block(job, query, style) {
                println!("{}", block);
                println!();
            }
        }
    }

    Ok(())
}

async fn run_recent(client: &SearchClient, status: Option<&str>, limit: u32) -> Result<()> {
    let rows = client.recent(status, limit).await?;

    if rows.is_empty() {
        println!("no postings");
        return Ok(());
    }

    println!("Recent postings ({})", rows.len());
    for (i, row) in rows.iter().enumerate() {
        println!("{}", render::posting_row(i + 1, row));
    }

    Ok(())
}

async fn run_ping(client: &SearchClient, config: &ApiConfig) -> Result<()> {
    if client.healthz().await? {
        println!("{} is up", config.base_url);
        Ok(())
    } else {
        anyhow::bail!("{} responded but did not report ok", config.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_browse() {
        let cli = Cli::try_parse_from(["jobfunnel"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.timeout, 30);
        assert!(cli.api_base.is_none());
    }

    #[test]
    fn test_parse_search_flags() {
        let cli = Cli::try_parse_from([
            "jobfunnel",
            "search",
            "-q",
            "rust",
            "--min-salary",
            "90000",
            "--skill",
            "tokio",
            "--full",
        ])
        .unwrap();

        let Some(Command::Search(args)) = cli.command else {
            panic!("expected the search subcommand");
        };
        assert_eq!(args.query.as_deref(), Some("rust"));
        assert_eq!(args.min_salary, Some(90000));
        assert_eq!(args.skill.as_deref(), Some("tokio"));
        assert!(args.full);
    }

    #[test]
    fn test_search_args_map_onto_filter() {
        let args = SearchArgs {
            query: Some("rust".to_string()),
            company: None,
            city: Some("berlin".to_string()),
            min_salary: Some(0),
            max_salary: None,
            role_function: None,
            seniority: None,
            skill: None,
            full: false,
        };
        let filter = args.to_filter();
        assert_eq!(filter.q.as_deref(), Some("rust"));
        assert_eq!(filter.city.as_deref(), Some("berlin"));
        assert_eq!(filter.min_salary, Some(0));
        assert_eq!(filter.limit, 50);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn test_api_base_is_global() {
        let cli = Cli::try_parse_from(["jobfunnel", "ping", "--api-base", "http://funnel:9000"])
            .unwrap();
        assert_eq!(cli.api_base.as_deref(), Some("http://funnel:9000"));
        assert!(matches!(cli.command, Some(Command::Ping)));
    }

    #[test]
    fn test_recent_defaults() {
        let cli = Cli::try_parse_from(["jobfunnel", "recent"]).unwrap();
        let Some(Command::Recent { status, limit }) = cli.command else {
            panic!("expected the recent subcommand");
        };
        assert!(status.is_none());
        assert_eq!(limit, 50);
    }
}
