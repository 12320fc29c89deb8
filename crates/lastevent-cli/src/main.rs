use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use lastevent_core::domain::{EventStatus, GroupId, GroupedEventRecord};
use lastevent_core::impls::InMemoryEventRepository;
use lastevent_core::ports::{Clock, FixedClock, SystemClock};
use lastevent_core::CheckLastEventStatus;

/// Check the status of a group's most recent event.
#[derive(Debug, Parser)]
#[command(name = "lastevent", version)]
struct Args {
    /// Group to check
    group: String,

    /// JSON file with an array of {groupId, endDate, reviewDurationInHours}
    #[arg(long, env = "LASTEVENT_EVENTS")]
    events: PathBuf,

    /// Evaluate at this instant (RFC 3339) instead of the system time
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    /// Print a JSON object instead of the bare status
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    group_id: &'a GroupId,
    status: EventStatus,
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

/// RUST_LOG があればそれを優先、なければ -v の回数で決める
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

fn load_events(path: &Path) -> Result<Vec<GroupedEventRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events file {}", path.display()))?;
    let records: Vec<GroupedEventRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse events file {}", path.display()))?;
    debug!(count = records.len(), path = %path.display(), "loaded events");
    Ok(records)
}

async fn check<C: Clock>(
    repository: InMemoryEventRepository,
    clock: C,
    group_id: &GroupId,
) -> Result<EventStatus> {
    let use_case = CheckLastEventStatus::with_clock(repository, clock);
    let status = use_case.perform(group_id).await?;
    Ok(status)
}

fn render(group_id: &GroupId, status: EventStatus, json: bool) -> Result<String> {
    if json {
        let report = Report { group_id, status };
        Ok(serde_json::to_string(&report)?)
    } else {
        Ok(status.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let repository = InMemoryEventRepository::from_records(load_events(&args.events)?);
    info!(groups = repository.group_count().await, "repository ready");

    let group_id = GroupId::new(args.group);
    let status = match args.now {
        Some(at) => check(repository, FixedClock::new(at), &group_id).await?,
        None => check(repository, SystemClock, &group_id).await?,
    };

    println!("{}", render(&group_id, status, args.json)?);
    Ok(())
}
