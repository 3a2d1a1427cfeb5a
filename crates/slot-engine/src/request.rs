//! Best-effort normalization of raw caller input into a [`SearchConfig`].
//!
//! Optional fields that fail to parse fall back to their defaults and are
//! logged at `warn`; they never fail the request. Only the fatal conditions in
//! [`EngineError`](crate::error::EngineError) stop resolution.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::{
    EngineDefaults, SearchConfig, WorkHours, DEFAULT_DURATION_MINUTES, DEFAULT_HORIZON_DAYS,
    DEFAULT_INCREMENT_MINUTES, DEFAULT_TIMEZONE, DEFAULT_WORKING_DAYS, MINUTES_PER_DAY,
};
use crate::dst::{local_instant, resolve_local};
use crate::error::{EngineError, Result};

/// Raw availability request as a front end receives it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub increment: Option<String>,
    pub identities: Vec<String>,
    pub working_days: Option<String>,
    pub work_hours: Option<String>,
    pub timezone: Option<String>,
}

impl SearchRequest {
    pub fn for_identities<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identities: identities.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Resolve into a concrete configuration.
    ///
    /// # Errors
    /// `MissingIdentity` when no non-blank identity was supplied, and the
    /// window errors from [`SearchConfig::validate`] when the defaults
    /// themselves are unusable (e.g. a zero increment).
    pub fn resolve(&self, now: DateTime<Utc>, defaults: &EngineDefaults) -> Result<SearchConfig> {
        let identities: Vec<String> = self
            .identities
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        if identities.is_empty() {
            return Err(EngineError::MissingIdentity);
        }

        let default_tz = parse_or_default(
            "default timezone",
            Some(defaults.timezone.as_str()),
            DEFAULT_TIMEZONE,
            parse_timezone,
        );
        let timezone = parse_or_default(
            "timezone",
            self.timezone.as_deref(),
            default_tz,
            parse_timezone,
        );

        let default_hours = parse_or_default(
            "default work hours",
            Some(defaults.work_hours.as_str()),
            WorkHours::default(),
            parse_work_hours,
        );
        let work_hours = parse_or_default(
            "work hours",
            self.work_hours.as_deref(),
            default_hours,
            parse_work_hours,
        );

        let default_days = parse_or_default(
            "default working days",
            Some(defaults.working_days.as_str()),
            DEFAULT_WORKING_DAYS.to_vec(),
            parse_weekdays,
        );
        let working_days = parse_or_default(
            "working days",
            self.working_days.as_deref(),
            default_days,
            parse_weekdays,
        );

        let duration_minutes = parse_or_default(
            "duration",
            self.duration.as_deref(),
            positive_or(defaults.duration_minutes, DEFAULT_DURATION_MINUTES),
            parse_positive_minutes,
        );
        let increment_minutes = parse_or_default(
            "increment",
            self.increment.as_deref(),
            positive_or(defaults.increment_minutes, DEFAULT_INCREMENT_MINUTES),
            parse_positive_minutes,
        );

        let now_local = now.with_timezone(&timezone);
        let horizon_end = horizon_end(now_local, defaults.horizon_days);
        let search_start = parse_or_default("start", self.start.as_deref(), now_local, |s| {
            parse_instant(s, timezone, work_hours.start_minute)
        });
        let search_end = parse_or_default("end", self.end.as_deref(), horizon_end, |s| {
            parse_instant(s, timezone, work_hours.end_minute)
        });

        let config = SearchConfig {
            search_start,
            search_end,
            duration_minutes,
            increment_minutes,
            identities,
            working_days,
            work_hours,
            timezone,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parse `input` with `parse`, substituting `default` when the input is
/// absent, blank, or rejected by the parser.
///
/// Rejections are logged with the field name and never propagated.
pub fn parse_or_default<T, E, F>(field: &str, input: Option<&str>, default: T, parse: F) -> T
where
    E: Display,
    F: FnOnce(&str) -> std::result::Result<T, E>,
{
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };
    match parse(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(field, input = raw, error = %err, "invalid input, using default");
            default
        }
    }
}

fn positive_or(value: i64, fallback: i64) -> i64 {
    if value > 0 {
        value
    } else {
        tracing::warn!(value, fallback, "non-positive configured default, using built-in");
        fallback
    }
}

/// `start` plus the configured horizon, falling back to the built-in horizon
/// when the configured one is non-positive or overflows the date range.
fn horizon_end(start: DateTime<Tz>, horizon_days: i64) -> DateTime<Tz> {
    let days = positive_or(horizon_days, DEFAULT_HORIZON_DAYS);
    if let Some(end) = Duration::try_days(days).and_then(|h| start.checked_add_signed(h)) {
        return end;
    }
    tracing::warn!(days, "configured horizon out of range, using built-in");
    start
        .checked_add_signed(Duration::days(DEFAULT_HORIZON_DAYS))
        .unwrap_or(start)
}

/// A strictly positive whole number of minutes.
pub fn parse_positive_minutes(input: &str) -> std::result::Result<i64, String> {
    let minutes = i64::from_str(input).map_err(|e| format!("not a number: {e}"))?;
    if minutes <= 0 {
        return Err(format!("must be positive, got {minutes}"));
    }
    Ok(minutes)
}

pub fn parse_timezone(input: &str) -> std::result::Result<Tz, String> {
    Tz::from_str(input).map_err(|e| e.to_string())
}

/// Parse a date or date-time in the canonical timezone.
///
/// A bare `YYYY-MM-DD` resolves to `bare_date_minute` minutes after that
/// day's midnight. Local date-times are read in `tz`; RFC 3339 input keeps its
/// own offset and is converted.
pub fn parse_instant(
    input: &str,
    tz: Tz,
    bare_date_minute: u32,
) -> std::result::Result<DateTime<Tz>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&tz));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return resolve_local(tz, naive).ok_or_else(|| out_of_range(input));
        }
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("unrecognized date or date-time '{input}'"))?;
    local_instant(tz, date, bare_date_minute).ok_or_else(|| out_of_range(input))
}

fn out_of_range(input: &str) -> String {
    format!("'{input}' is outside the supported date range")
}

const MONDAY_FIRST: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Parse a comma-separated weekday list.
///
/// Accepts numbers (`0` or `7` = Sunday, `1` = Monday) and English names or
/// their three-letter abbreviations. Duplicates are collapsed.
pub fn parse_weekdays(input: &str) -> std::result::Result<Vec<Weekday>, String> {
    let mut days = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day = match part.parse::<u32>() {
            Ok(0 | 7) => Weekday::Sun,
            Ok(n @ 1..=6) => MONDAY_FIRST[(n - 1) as usize],
            Ok(n) => return Err(format!("weekday number out of range: {n}")),
            Err(_) => part
                .parse::<Weekday>()
                .map_err(|_| format!("unknown weekday '{part}'"))?,
        };
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        return Err("no weekdays given".to_string());
    }
    Ok(days)
}

/// Parse `HH:MM-HH:MM`. `24:00` is accepted as the end of the day.
pub fn parse_work_hours(input: &str) -> std::result::Result<WorkHours, String> {
    let (start, end) = input
        .split_once('-')
        .ok_or_else(|| format!("expected HH:MM-HH:MM, got '{input}'"))?;
    WorkHours::new(parse_clock(start.trim())?, parse_clock(end.trim())?).map_err(|e| e.to_string())
}

fn parse_clock(input: &str) -> std::result::Result<u32, String> {
    let (h, m) = input
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got '{input}'"))?;
    let hours: u32 = h.parse().map_err(|_| format!("bad hour in '{input}'"))?;
    let minutes: u32 = m.parse().map_err(|_| format!("bad minute in '{input}'"))?;
    if minutes >= 60 || hours > 24 || hours * 60 + minutes > MINUTES_PER_DAY {
        return Err(format!("clock time out of range: '{input}'"));
    }
    Ok(hours * 60 + minutes)
}
