//! Governance ledger view CLI.
//!
//! Resolves raw vote-request records and backfilled governance events
//! from JSON files into normalized view models, exercising the same
//! resolution pipeline a dashboard backend would.

use std::path::{Path, PathBuf};
use std::process;

use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use govlens_resolve::{fetch_history, fetch_proposals, page_events, HistoryView, ProposalSet};
use govlens_source::{HistoryQuery, HistorySource, ProposalSource, RawHistoryPage, SourceError};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Governance ledger view toolchain.
#[derive(Parser)]
#[command(name = "govlens", version, about = "Governance ledger view toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve governance proposals from raw vote-request records
    Proposals {
        /// Path to the JSON array of raw vote-request records
        records: PathBuf,
        /// Path to the DSO rules JSON record
        #[arg(long)]
        dso_rules: Option<PathBuf>,
        /// Path to live-fallback proposal records, used when the local
        /// records are empty
        #[arg(long)]
        live: Option<PathBuf>,
        /// Classification time, RFC 3339 (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
    },

    /// Resolve a page of governance history from backfilled events
    History {
        /// Path to the JSON array of backfilled governance events
        events: PathBuf,
        /// Page size
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Page offset
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if let Err(msg) = run(cli).await {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}

fn init_tracing(quiet: bool) {
    if quiet {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Proposals {
            records,
            dso_rules,
            live,
            now,
        } => {
            let source = FileSource {
                local: read_record_array(&records)?,
                live: live.as_deref().map(read_record_array).transpose()?,
                rules: dso_rules.as_deref().map(read_json).transpose()?,
            };
            let now = parse_now(now.as_deref())?;
            let set = fetch_proposals(&source, now).await.map_err(|e| e.to_string())?;
            print_proposals(&set, cli.output, cli.quiet)
        }
        Commands::History { events, limit, offset } => {
            let source = FileHistory {
                events: read_record_array(&events)?,
            };
            let view = fetch_history(&source, &HistoryQuery { limit, offset })
                .await
                .map_err(|e| e.to_string())?;
            print_history(&view, cli.output)
        }
    }
}

// ── File-backed sources ─────────────────────────────────────────────

/// Proposal source over pre-exported JSON files. The local/live precedence
/// is still decided by the merge policy, not here.
struct FileSource {
    local: Vec<Value>,
    live: Option<Vec<Value>>,
    rules: Option<Value>,
}

#[async_trait]
impl ProposalSource for FileSource {
    async fn local_vote_requests(&self) -> Result<Vec<Value>, SourceError> {
        Ok(self.local.clone())
    }

    async fn live_proposals(&self) -> Result<Vec<Value>, SourceError> {
        Ok(self.live.clone().unwrap_or_default())
    }

    async fn dso_rules(&self) -> Result<Option<Value>, SourceError> {
        Ok(self.rules.clone())
    }
}

/// History source over one pre-exported event file, paged in memory the
/// way a server-side backfill query would page in the database.
struct FileHistory {
    events: Vec<Value>,
}

#[async_trait]
impl HistorySource for FileHistory {
    async fn backfill_page(&self, query: &HistoryQuery) -> Result<RawHistoryPage, SourceError> {
        Ok(page_events(&self.events, query))
    }
}

fn read_json(path: &Path) -> Result<Value, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))
}

fn read_record_array(path: &Path) -> Result<Vec<Value>, String> {
    match read_json(path)? {
        Value::Array(records) => Ok(records),
        _ => Err(format!("{}: expected a JSON array of records", path.display())),
    }
}

fn parse_now(now: Option<&str>) -> Result<OffsetDateTime, String> {
    match now {
        Some(s) => OffsetDateTime::parse(s, &Rfc3339)
            .map_err(|e| format!("invalid --now timestamp '{}': {}", s, e)),
        None => Ok(OffsetDateTime::now_utc()),
    }
}

// ── Output ──────────────────────────────────────────────────────────

fn print_proposals(set: &ProposalSet, output: OutputFormat, quiet: bool) -> Result<(), String> {
    if set.using_live_fallback && !quiet {
        eprintln!("warning: local store empty or unavailable, serving proposals from live fallback");
    }

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(set).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if set.proposals.is_empty() {
                println!("no governance proposals found");
                return Ok(());
            }
            println!(
                "{:<10} {:>4} {:>8}  {:<36} {}",
                "STATUS", "FOR", "AGAINST", "TITLE", "REQUESTER"
            );
            for p in &set.proposals {
                println!(
                    "{:<10} {:>4} {:>8}  {:<36} {}",
                    p.status.to_string(),
                    p.votes_for,
                    p.votes_against,
                    p.title,
                    p.requester
                );
            }
        }
    }
    Ok(())
}

fn print_history(view: &HistoryView, output: OutputFormat) -> Result<(), String> {
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(view).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let s = &view.summary;
            println!(
                "summary: total={} in_progress={} executed={} rejected={} expired={}",
                s.total_requests, s.in_progress, s.executed, s.rejected, s.expired
            );
            if view.actions.is_empty() {
                // Zero results is not an error: point at the likely cause.
                println!(
                    "no historical actions on this page; if this is unexpected, \
                     check that the backfill pipeline is configured and has ingested events"
                );
                return Ok(());
            }
            for a in &view.actions {
                println!(
                    "[{:<11}] {:<36} {:<12} {}",
                    a.status.to_string(),
                    a.title,
                    a.requester,
                    a.id
                );
            }
            if view.has_more {
                println!("(more pages available; increase --offset)");
            }
        }
    }
    Ok(())
}
