//! `meeting-resolver` CLI: resolve meeting slots and merge busy timelines from
//! the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Resolve a request (stdin → stdout)
//! cat request.json | meeting-resolver resolve --now 2026-03-17T00:00:00Z
//!
//! # Resolve from file to file, compact JSON
//! meeting-resolver resolve -i request.json -o result.json --compact
//!
//! # Print the merged busy timeline for a participant → intervals map
//! meeting-resolver merge -i busy.json
//!
//! # Show what each pipeline stage is doing
//! RUST_LOG=meeting_resolver=debug meeting-resolver resolve -i request.json
//! ```
//!
//! A request looks like:
//!
//! ```json
//! {
//!   "participants": ["alice@example.com", {"email": "bob@example.com"}],
//!   "busy": {
//!     "alice@example.com": [{"start": "2026-03-17T14:00:00Z", "end": "2026-03-17T15:00:00Z"}]
//!   },
//!   "preferences": {
//!     "duration_minutes": 30,
//!     "working_hours": {"start_hour": 9, "end_hour": 17},
//!     "buffer_minutes": 15,
//!     "window_start": "2026-03-17T08:00:00Z",
//!     "window_end": "2026-03-17T18:00:00Z",
//!     "timezone": "UTC"
//!   },
//!   "config": {"max_alternatives": 3}
//! }
//! ```

use std::collections::HashMap;
use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use meeting_resolver::{
    merge_busy_map, normalize_all, resolve_with_config, BusyMap, Participant, ParticipantInput,
    ResolverConfig, SchedulingPreferences, StaticBusySource, TimeInterval,
};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "meeting-resolver",
    version,
    about = "Resolve a preferred meeting slot from participants' busy time"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a scheduling request to a chosen slot and alternatives
    Resolve {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Reference instant as RFC 3339 (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
        /// Emit single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Merge a participant → busy intervals map into one busy timeline
    Merge {
        /// Busy map JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// A scheduling request as read from JSON.
#[derive(Deserialize)]
struct ResolveRequest {
    participants: Vec<ParticipantInput>,
    #[serde(default)]
    busy: HashMap<String, Vec<TimeInterval>>,
    preferences: SchedulingPreferences,
    #[serde(default)]
    config: ResolverConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            input,
            output,
            now,
            compact,
        } => {
            let raw = read_input(input.as_deref())?;
            let request: ResolveRequest =
                serde_json::from_str(&raw).context("Failed to parse scheduling request")?;
            let now = parse_now(now.as_deref())?;

            let participants =
                normalize_all(&request.participants).context("Invalid participant list")?;
            let source = StaticBusySource::from(to_busy_map(request.busy)?);
            debug!(participants = participants.len(), %now, "resolving request");

            let result = resolve_with_config(
                &source,
                &participants,
                &request.preferences,
                now,
                &request.config,
            )
            .await
            .context("Failed to resolve a meeting slot")?;

            let json = if compact {
                serde_json::to_string(&result)?
            } else {
                serde_json::to_string_pretty(&result)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Merge { input, output } => {
            let raw = read_input(input.as_deref())?;
            let busy: HashMap<String, Vec<TimeInterval>> =
                serde_json::from_str(&raw).context("Failed to parse busy map")?;
            let busy = to_busy_map(busy)?;
            let merged = merge_busy_map(&busy);
            let json = serde_json::to_string_pretty(&merged)?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

/// Normalize busy-map keys and check every interval.
fn to_busy_map(raw: HashMap<String, Vec<TimeInterval>>) -> Result<BusyMap> {
    let mut busy = BusyMap::with_capacity(raw.len());
    for (id, intervals) in raw {
        let participant = Participant::new(&id)
            .with_context(|| format!("Invalid participant key in busy map: '{}'", id))?;
        for interval in &intervals {
            interval
                .validate()
                .with_context(|| format!("Invalid busy interval for {}", participant))?;
        }
        busy.entry(participant).or_default().extend(intervals);
    }
    Ok(busy)
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now value: '{}'", raw)),
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
