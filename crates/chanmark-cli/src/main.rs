//! chanmark: command-line tool for channel bookmark records.
//!
//! Reads bookmarks, joined storage rows or channel lists as JSON files and
//! prints JSON results on stdout. Logs go to stderr so the output can be
//! piped.
//!
//! Environment:
//!   LOG_FORMAT  - "json" or "text" (default: "text")
//!   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
//!   RUST_LOG    - standard env filter (default: "chanmark=info,chanmark_core=info")
//!   CHANMARK_MAX_BOOKMARKS_PER_CHANNEL, CHANMARK_ENFORCE_CHANNEL_LIMIT
//!               - per-channel ceiling applied by `validate`

use anyhow::{bail, Context, Result};
use chanmark_core::logging::{
    BOOKMARK_ID, CHANNEL_ID, CODE, ERROR_MSG, FIELD, RECORD_COUNT, SUCCESS,
};
use chanmark_core::{
    is_valid_id, Auditable, Bookmark, BookmarkAndFileRow, BookmarkPolicy, BookmarkWithFile,
    ChannelList, ChannelListWithTeamData,
};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chanmark")]
#[command(author, version, about = "Channel bookmark record tool")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize and validate a JSON array of bookmarks
    Validate {
        /// Input file holding a JSON array of bookmarks
        #[arg(short, long)]
        input: PathBuf,

        /// Treat records as updates (pre_update) instead of inserts (pre_save)
        #[arg(long)]
        update: bool,

        /// Include the redacted audit snapshot of each accepted record
        #[arg(long)]
        audit: bool,
    },

    /// Fork a bookmark for a new owner
    Fork {
        /// Input file holding one bookmark
        #[arg(short, long)]
        input: PathBuf,

        /// Owner id of the fork
        #[arg(short, long)]
        owner: String,
    },

    /// Turn joined bookmark/file storage rows into response records
    Compose {
        /// Input file holding a JSON array of joined rows
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Compute the etag of a channel list
    Etag {
        /// Input file holding a JSON array of channels
        #[arg(short, long)]
        input: PathBuf,

        /// Channels carry team data (team_update_at participates)
        #[arg(long)]
        team: bool,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        // some records were rejected; the report says which
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!(subsystem = "cli", error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chanmark=info,chanmark_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        if let Some(ansi) = log_ansi {
            layer = layer.with_ansi(ansi);
        }
        registry.with(layer).init();
    }
}

fn run(cli: Cli) -> Result<bool> {
    let started = Instant::now();

    let (command, output, success) = match cli.command {
        Commands::Validate {
            input,
            update,
            audit,
        } => {
            let records: Vec<Bookmark> = read_json(&input)?;
            let policy = BookmarkPolicy::from_env()?;
            let report = validate_records(records, update, audit, &policy);
            let success = report[SUCCESS].as_bool().unwrap_or(false);
            ("validate", report, success)
        }
        Commands::Fork { input, owner } => {
            let source: Bookmark = read_json(&input)?;
            let fork = fork_bookmark(&source, &owner)?;
            ("fork", serde_json::to_value(fork)?, true)
        }
        Commands::Compose { input } => {
            let rows: Vec<BookmarkAndFileRow> = read_json(&input)?;
            ("compose", serde_json::to_value(compose_rows(&rows))?, true)
        }
        Commands::Etag { input, team } => ("etag", channel_etag(&input, team)?, true),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    info!(
        subsystem = "cli",
        op = command,
        success,
        duration_ms = started.elapsed().as_millis() as u64,
        "Command finished"
    );

    Ok(success)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Normalize and validate each record, then apply the per-channel ceiling
/// to the live records that passed.
///
/// Returns a report with one entry per input record, in input order.
fn validate_records(
    records: Vec<Bookmark>,
    update: bool,
    audit: bool,
    policy: &BookmarkPolicy,
) -> Value {
    let mut live_per_channel: HashMap<String, usize> = HashMap::new();
    let mut results = Vec::with_capacity(records.len());
    let mut accepted = 0usize;

    for mut record in records {
        if update {
            record.pre_update();
        } else {
            record.pre_save();
        }

        let mut entry = Map::new();
        entry.insert(BOOKMARK_ID.to_string(), json!(record.id));
        entry.insert(CHANNEL_ID.to_string(), json!(record.channel_id));

        let outcome = record.is_valid().map_err(|e| {
            entry.insert(FIELD.to_string(), json!(e.field.as_str()));
            entry.insert(CODE.to_string(), json!(e.code()));
            e.to_string()
        });
        let outcome = outcome.and_then(|()| {
            if record.is_deleted() {
                return Ok(());
            }
            let live = live_per_channel.entry(record.channel_id.clone()).or_default();
            policy.check_channel_capacity(*live).map_err(|e| e.to_string())?;
            *live += 1;
            Ok(())
        });

        match outcome {
            Ok(()) => {
                accepted += 1;
                entry.insert(SUCCESS.to_string(), json!(true));
                entry.insert("record".to_string(), json!(record));
                if audit {
                    entry.insert("audit".to_string(), Value::Object(record.auditable()));
                }
            }
            Err(msg) => {
                debug!(
                    subsystem = "cli",
                    op = "validate",
                    bookmark_id = %record.id,
                    error = %msg,
                    "Record rejected"
                );
                entry.insert(SUCCESS.to_string(), json!(false));
                entry.insert(ERROR_MSG.to_string(), json!(msg));
            }
        }

        results.push(Value::Object(entry));
    }

    let total = results.len();
    info!(
        subsystem = "cli",
        op = "validate",
        record_count = total,
        accepted,
        "Validation complete"
    );

    let mut report = Map::new();
    report.insert(RECORD_COUNT.to_string(), json!(total));
    report.insert("accepted".to_string(), json!(accepted));
    report.insert(SUCCESS.to_string(), json!(accepted == total));
    report.insert("results".to_string(), Value::Array(results));
    Value::Object(report)
}

/// Fork `source` for `owner` and prepare the copy for insert.
fn fork_bookmark(source: &Bookmark, owner: &str) -> Result<Bookmark> {
    if !is_valid_id(owner) {
        bail!("invalid owner id {:?}", owner);
    }
    if !is_valid_id(&source.id) {
        bail!("source bookmark has no valid id");
    }

    let mut fork = source.set_original(owner);
    fork.pre_save();
    fork.is_valid()
        .with_context(|| format!("fork of {} is invalid", source.id))?;

    info!(
        subsystem = "cli",
        op = "fork",
        original_id = %source.id,
        bookmark_id = %fork.id,
        "Bookmark forked"
    );
    Ok(fork)
}

fn compose_rows(rows: &[BookmarkAndFileRow]) -> Vec<BookmarkWithFile> {
    rows.iter().map(BookmarkAndFileRow::to_bookmark_with_file).collect()
}

fn channel_etag(path: &Path, team: bool) -> Result<Value> {
    let (etag, count) = if team {
        let list: ChannelListWithTeamData = read_json(path)?;
        (list.etag(), list.0.len())
    } else {
        let list: ChannelList = read_json(path)?;
        (list.etag(), list.0.len())
    };

    let mut out = Map::new();
    out.insert("etag".to_string(), json!(etag));
    out.insert(RECORD_COUNT.to_string(), json!(count));
    Ok(Value::Object(out))
}
