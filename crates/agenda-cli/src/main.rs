//! `agenda` CLI -- register opening and busy events from JSON and query the
//! resulting availabilities from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Availabilities between two instants (events read from stdin)
//! cat events.json | agenda availability --from 2022-07-04T11:00:00Z --to 2022-07-06T15:00:00Z
//!
//! # Read events from a file and write the result to another
//! agenda availability -i events.json -o slots.json --from 2022-07-04T00:00:00 --to 2022-07-11T00:00:00
//!
//! # Inspect the weekly occurrences of recurring events in a range
//! agenda occurrences -i events.json --from 2022-07-04T00:00:00Z --to 2022-07-18T00:00:00Z
//!
//! # Debug logging on stderr
//! RUST_LOG=agenda_engine=debug agenda availability -i events.json --from ... --to ...
//! ```
//!
//! Events are a JSON array of
//! `{"opening": bool, "recurring": bool, "start": datetime, "end": datetime}`.

use std::io::{self, Read};

use agenda_engine::availability::to_availabilities;
use agenda_engine::{expand_weekly, Agenda, Interval};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agenda",
    version,
    about = "Compute open slots from opening, busy and weekly-recurring events"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "agenda_engine=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the available slots within a range
    Availability {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// List the occurrences of recurring events within a range
    Occurrences {
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Input JSON file with event declarations (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Range start (RFC 3339, or YYYY-MM-DDTHH:MM:SS as UTC)
    #[arg(long, value_parser = parse_datetime)]
    from: DateTime<Utc>,
    /// Range end (RFC 3339, or YYYY-MM-DDTHH:MM:SS as UTC)
    #[arg(long, value_parser = parse_datetime)]
    to: DateTime<Utc>,
}

/// One event declaration as it appears in the input file.
#[derive(Deserialize)]
struct EventInput {
    opening: bool,
    recurring: bool,
    start: String,
    end: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OccurrenceOutput {
    opening: bool,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Availability { query } => {
            let agenda = load_agenda(query.input.as_deref())?;
            let slots = agenda
                .get_availabilities(query.from, query.to)
                .context("Failed to compute availabilities")?;
            info!(slots = slots.len(), "computed availabilities");

            let json = serde_json::to_string_pretty(&slots)?;
            write_output(query.output.as_deref(), &json)?;
        }
        Commands::Occurrences { query } => {
            let agenda = load_agenda(query.input.as_deref())?;
            let occurrences = recurring_occurrences(&agenda, query.from, query.to)?;
            info!(occurrences = occurrences.len(), "expanded recurring events");

            let json = serde_json::to_string_pretty(&occurrences)?;
            write_output(query.output.as_deref(), &json)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber; `RUST_LOG` wins over `--log-level`.
fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("Invalid log filter: {}", default_filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("Failed to initialize logging")
}

/// Read event declarations and register each of them.
///
/// Registration stops at the first invalid declaration, naming its index.
fn load_agenda(path: Option<&str>) -> Result<Agenda> {
    let json = read_input(path)?;
    let inputs: Vec<EventInput> =
        serde_json::from_str(&json).context("Failed to parse event declarations")?;

    let mut agenda = Agenda::new();
    for (index, input) in inputs.iter().enumerate() {
        let start = parse_datetime(&input.start)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid start of event #{}", index))?;
        let end = parse_datetime(&input.end)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid end of event #{}", index))?;

        agenda
            .add_event(input.opening, input.recurring, start, end)
            .with_context(|| format!("Failed to register event #{}", index))?;
    }

    info!(events = agenda.len(), "loaded event declarations");
    Ok(agenda)
}

/// Clipped occurrences of every recurring event, sorted by start.
fn recurring_occurrences(
    agenda: &Agenda,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<OccurrenceOutput>> {
    let range = Interval::query(from, to).context("Invalid range")?;

    let mut occurrences: Vec<OccurrenceOutput> = agenda
        .events()
        .iter()
        .filter(|event| event.is_recurring())
        .flat_map(|event| {
            let expanded = expand_weekly(&[event.interval()], range);
            to_availabilities(&expanded, from)
                .into_iter()
                .map(move |slot| OccurrenceOutput {
                    opening: event.is_opening(),
                    start_date: slot.start_date,
                    end_date: slot.end_date,
                })
        })
        .collect();

    occurrences.sort_by_key(|o| o.start_date);
    Ok(occurrences)
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with an offset, e.g. "2022-07-04T11:00:00+02:00") and
/// naive local time (e.g. "2022-07-04T11:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("invalid datetime '{}': {}", s, e))
}

/// Event declarations from `path`, or from stdin when no file is given.
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

/// Write the JSON result to `path`, or print it when no file is given.
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
