//! slot: dry-run meeting slot discovery against a calendar file.
//!
//! Nothing is booked; the tool prints what the scheduler would pick.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Duration, SecondsFormat};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::temporal::{format_in_zone, parse_rfc3339, parse_timezone};
use slot_engine::{
    find_candidates, score_candidates, select_best, BusyMap, CalendarEvent, MeetingRequest,
    SlotPolicy, TimeSlot, Timestamp,
};

/// Meeting slot finder
#[derive(Debug, Parser)]
#[command(name = "slot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the best common slot (or every candidate) for a set of participants
    Find(FindArgs),
}

#[derive(Debug, clap::Args)]
struct FindArgs {
    /// JSON file holding an array of calendar events
    #[arg(short, long)]
    calendar: Option<PathBuf>,

    /// Comma-separated participant ids
    #[arg(short, long, value_delimiter = ',', required = true)]
    participants: Vec<String>,

    /// Window start (RFC 3339)
    #[arg(long)]
    start: String,

    /// Window end (RFC 3339)
    #[arg(long)]
    end: String,

    /// Meeting length in minutes
    #[arg(short, long)]
    duration: i64,

    /// Grid step in minutes
    #[arg(long, default_value_t = 15)]
    step: i64,

    /// Render times in this IANA timezone instead of the input offset
    #[arg(long)]
    timezone: Option<String>,

    /// Print every feasible candidate instead of the best one
    #[arg(long, conflicts_with = "explain")]
    all: bool,

    /// Print every feasible candidate with its score
    #[arg(long)]
    explain: bool,
}

#[derive(Debug, Serialize)]
struct SlotOutput {
    start: String,
    end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u32>,
}

const EXIT_NO_SLOT: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Find(args) => run_find(args),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_find(args: FindArgs) -> Result<ExitCode> {
    let events = match &args.calendar {
        Some(path) => load_calendar(path)?,
        None => Vec::new(),
    };
    let policy = SlotPolicy {
        step_minutes: args.step,
        ..SlotPolicy::default()
    };
    let duration = Duration::try_minutes(args.duration)
        .with_context(|| format!("duration {} is out of range", args.duration))?;
    let window = TimeSlot::new(parse_rfc3339(&args.start)?, parse_rfc3339(&args.end)?);

    let request = MeetingRequest::new(args.participants, duration, window);
    request.validate()?;
    let participants = request.distinct_participants();

    let mut busy = BusyMap::new();
    for event in &events {
        if participants.contains(&event.participant_id) {
            busy.entry(event.participant_id.clone())
                .or_default()
                .push(event.interval());
        }
    }

    let candidates = find_candidates(&participants, &busy, &window, duration, &policy)?;
    if candidates.is_empty() {
        eprintln!("No available time slot found for all participants.");
        return Ok(ExitCode::from(EXIT_NO_SLOT));
    }

    let render = renderer(args.timezone.as_deref())?;
    let output = if args.explain {
        let scored = score_candidates(&candidates, &participants, &busy, &policy.weights);
        let rows: Vec<_> = scored
            .iter()
            .map(|s| SlotOutput {
                start: render(&s.slot.start),
                end: render(&s.slot.end),
                score: Some(s.score),
            })
            .collect();
        serde_json::to_string_pretty(&rows)?
    } else if args.all {
        let rows: Vec<_> = candidates
            .iter()
            .map(|s| SlotOutput {
                start: render(&s.start),
                end: render(&s.end),
                score: None,
            })
            .collect();
        serde_json::to_string_pretty(&rows)?
    } else {
        let best = select_best(&candidates, &participants, &busy, &policy.weights)?;
        let score = slot_engine::score_slot(&best, &participants, &busy, &policy.weights);
        serde_json::to_string_pretty(&SlotOutput {
            start: render(&best.start),
            end: render(&best.end),
            score: Some(score),
        })?
    };

    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

fn load_calendar(path: &Path) -> Result<Vec<CalendarEvent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading calendar {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing calendar {}", path.display()))
}

fn renderer(timezone: Option<&str>) -> Result<Box<dyn Fn(&Timestamp) -> String>> {
    Ok(match timezone {
        Some(name) => {
            let tz = parse_timezone(name)?;
            Box::new(move |dt: &Timestamp| format_in_zone(dt, &tz))
        }
        None => Box::new(|dt: &Timestamp| dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
    })
}
