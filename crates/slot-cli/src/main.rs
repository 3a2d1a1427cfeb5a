//! `slots` CLI: find bookable time slots from busy-time calendar files.
//!
//! ## Usage
//!
//! ```sh
//! # All free hour-long slots for the next week
//! slots find -c calendars.json --identity alice
//!
//! # Slots free for both an agent and a client, 30 minutes on the half hour
//! slots find -c calendars.json --identity agent --identity client \
//!     --start 2025-03-27 --end 2025-04-03 --duration 30 --increment 30
//!
//! # Days ranked by free time, plus the single best day
//! slots suggest -c calendars.json --identity alice -o suggestions.json
//!
//! # Is a specific meeting time free?
//! slots check -c calendars.json --identity alice \
//!     --start 2025-03-28T10:00 --end 2025-03-28T11:00
//! ```

mod config;
mod store;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use slot_engine::request::parse_instant;
use slot_engine::{
    best_day, check_availability, compute_available_slots, rank_days, BestDaySummary,
    DayAvailability, SearchConfig, SearchRequest,
};
use tracing_subscriber::EnvFilter;

use crate::store::JsonCalendarStore;

#[derive(Parser)]
#[command(name = "slots", version, about = "Find bookable calendar slots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file of engine defaults (timezone, work hours, duration, ...)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every free slot as JSON
    Find(SearchArgs),
    /// Rank days by free time and pick the best day
    Suggest(SearchArgs),
    /// Report whether a proposed meeting time is free for every identity
    Check {
        #[command(flatten)]
        calendar: CalendarArgs,
        /// Meeting start (date-time)
        #[arg(long)]
        start: String,
        /// Meeting end (date-time)
        #[arg(long)]
        end: String,
        /// IANA timezone for local date-times
        #[arg(long)]
        timezone: Option<String>,
    },
}

#[derive(Args)]
struct CalendarArgs {
    /// JSON file mapping identities to busy intervals
    #[arg(short, long)]
    calendar: PathBuf,
    /// Calendar identity; repeat to union several calendars' busy time
    #[arg(short = 'n', long = "identity")]
    identities: Vec<String>,
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    calendar: CalendarArgs,
    /// Search start: date or date-time (default: now)
    #[arg(long)]
    start: Option<String>,
    /// Search end: date or date-time (default: start of search + horizon)
    #[arg(long)]
    end: Option<String>,
    /// Slot length in minutes
    #[arg(long)]
    duration: Option<String>,
    /// Slot start alignment in minutes
    #[arg(long)]
    increment: Option<String>,
    /// Working days, e.g. "mon,tue,wed" or "1,2,3"
    #[arg(long)]
    days: Option<String>,
    /// Work hours, e.g. "08:00-18:00"
    #[arg(long)]
    hours: Option<String>,
    /// IANA timezone used for day boundaries
    #[arg(long)]
    timezone: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

impl SearchArgs {
    fn request(&self) -> SearchRequest {
        SearchRequest {
            start: self.start.clone(),
            end: self.end.clone(),
            duration: self.duration.clone(),
            increment: self.increment.clone(),
            identities: self.calendar.identities.clone(),
            working_days: self.days.clone(),
            work_hours: self.hours.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

#[derive(Serialize)]
struct Suggestions {
    days: Vec<DayAvailability>,
    best_day: Option<BestDaySummary>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let defaults = config::load(cli.config.as_deref())?;
    tracing::debug!(?defaults, "loaded engine defaults");

    match cli.command {
        Commands::Find(args) => {
            let (config, store) = resolve(&args, &defaults)?;
            let slots = compute_available_slots(&config, &store)
                .context("Failed to compute available slots")?;
            tracing::info!(count = slots.len(), "found slots");
            write_output(args.output.as_deref(), &serde_json::to_string_pretty(&slots)?)?;
        }
        Commands::Suggest(args) => {
            let (config, store) = resolve(&args, &defaults)?;
            let slots = compute_available_slots(&config, &store)
                .context("Failed to compute available slots")?;
            let days = rank_days(&slots);
            let best_day = best_day(&days);
            let suggestions = Suggestions { days, best_day };
            write_output(
                args.output.as_deref(),
                &serde_json::to_string_pretty(&suggestions)?,
            )?;
        }
        Commands::Check {
            calendar,
            start,
            end,
            timezone,
        } => {
            let request = SearchRequest {
                timezone,
                ..SearchRequest::for_identities(calendar.identities)
            };
            let config = request
                .resolve(chrono::Utc::now(), &defaults)
                .context("Invalid availability request")?;
            let tz = config.timezone;
            let start = parse_instant(&start, tz, config.work_hours.start_minute)
                .map_err(anyhow::Error::msg)
                .context("Invalid --start")?;
            let end = parse_instant(&end, tz, config.work_hours.end_minute)
                .map_err(anyhow::Error::msg)
                .context("Invalid --end")?;

            let store = JsonCalendarStore::new(calendar.calendar);
            let free = check_availability(&config, &store, start, end)
                .context("Failed to check availability")?;
            println!("{}", if free { "available" } else { "busy" });
        }
    }

    Ok(())
}

fn resolve(
    args: &SearchArgs,
    defaults: &slot_engine::EngineDefaults,
) -> Result<(SearchConfig, JsonCalendarStore)> {
    let config = args
        .request()
        .resolve(chrono::Utc::now(), defaults)
        .context("Invalid availability request")?;
    tracing::debug!(
        start = %config.search_start,
        end = %config.search_end,
        duration = config.duration_minutes,
        increment = config.increment_minutes,
        "resolved search"
    );
    Ok((config, JsonCalendarStore::new(&args.calendar.calendar)))
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
