//! Day-by-day slot enumeration.
//!
//! For each working day in the search range the engine builds the local work
//! window, clips it to the search boundaries, and walks an increment-aligned
//! cursor through it, emitting every `duration`-long slot that does not
//! overlap merged busy time.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::SearchConfig;
use crate::dst::local_instant;
use crate::error::Result;
use crate::interval::{self, Interval};
use crate::source::{collect_busy, BusySource};

/// A bookable slot of exactly the requested duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// Human-readable start, e.g. "Thursday, March 27 at 9:00 AM".
    pub label: String,
}

impl AvailableSlot {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        let label = start.format("%A, %B %-d at %-I:%M %p").to_string();
        Self { start, end, label }
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Fetch busy time for every configured identity and enumerate free slots.
///
/// # Errors
/// `MissingIdentity`, the window errors from [`SearchConfig::validate`], or
/// the first error reported by `source`.
pub fn compute_available_slots<S>(config: &SearchConfig, source: &S) -> Result<Vec<AvailableSlot>>
where
    S: BusySource + ?Sized,
{
    config.validate()?;
    let busy = collect_busy(source, &config.identities)?;
    find_slots(config, &busy)
}

/// Enumerate free slots given already-fetched busy intervals.
///
/// `busy` may overlap and be unsorted; it is merged first. Identities in
/// `config` are not consulted.
///
/// # Errors
/// A non-positive increment or duration, or an invalid work-hour window.
pub fn find_slots(config: &SearchConfig, busy: &[Interval]) -> Result<Vec<AvailableSlot>> {
    config.validate_window()?;

    let tz = config.timezone;
    let merged = interval::merge(busy);
    tracing::debug!(raw = busy.len(), merged = merged.len(), "merged busy intervals");

    let search_start = config.search_start.with_timezone(&tz);
    let search_end = config.search_end.with_timezone(&tz);
    let first_date = search_start.date_naive();
    let last_date = search_end.date_naive();

    let mut slots = Vec::new();
    for date in first_date.iter_days().take_while(|d| *d <= last_date) {
        if !config.working_days.contains(&date.weekday()) {
            tracing::trace!(%date, "skipping non-working day");
            continue;
        }

        let (Some(mut day_start), Some(mut day_end)) = (
            local_instant(tz, date, config.work_hours.start_minute),
            local_instant(tz, date, config.work_hours.end_minute),
        ) else {
            tracing::debug!(%date, "work window outside representable range, skipping");
            continue;
        };

        let clipped_start = date == first_date && search_start > day_start;
        if clipped_start {
            day_start = search_start;
        }
        let clipped_end = date == last_date && search_end < day_end;
        if clipped_end {
            day_end = search_end;
        }
        if (clipped_start && day_start.date_naive() != date)
            || (clipped_end && day_end.date_naive() != date)
        {
            tracing::debug!(%date, "clipped window left the day, skipping");
            continue;
        }

        let before = slots.len();
        slots_for_day(config, &merged, day_start, day_end, &mut slots);
        tracing::debug!(%date, found = slots.len() - before, "enumerated day");
    }

    Ok(slots)
}

fn slots_for_day(
    config: &SearchConfig,
    merged: &[Interval],
    day_start: DateTime<Tz>,
    day_end: DateTime<Tz>,
    out: &mut Vec<AvailableSlot>,
) {
    let (window_start, window_end) = (day_start.with_timezone(&Utc), day_end.with_timezone(&Utc));
    let day_busy: Vec<&Interval> = merged
        .iter()
        .filter(|b| b.overlaps(window_start, window_end))
        .collect();

    // A duration too large for `TimeDelta` cannot fit inside one day's window.
    let Some(duration) = Duration::try_minutes(config.duration_minutes) else {
        return;
    };
    let increment = Duration::try_minutes(config.increment_minutes);

    let mut cursor = round_up_to_increment(day_start, config.increment_minutes);
    while let Some(current) = cursor {
        let Some(slot_end) = current.checked_add_signed(duration).filter(|end| *end <= day_end)
        else {
            break;
        };
        let (start_utc, end_utc) = (current.with_timezone(&Utc), slot_end.with_timezone(&Utc));

        if day_busy.iter().any(|b| b.overlaps(start_utc, end_utc)) {
            cursor = increment.and_then(|step| current.checked_add_signed(step));
        } else {
            out.push(AvailableSlot::new(current, slot_end));
            cursor = round_up_to_increment(slot_end, config.increment_minutes);
        }
    }
}

/// Round `t` up so its local minute-of-day is a multiple of `increment`.
///
/// Instants with a seconds component are first ceiled to the next whole
/// minute. Already-aligned instants are returned unchanged. `increment` must
/// be positive. Returns `None` when the rounded instant is not representable.
pub fn round_up_to_increment(t: DateTime<Tz>, increment: i64) -> Option<DateTime<Tz>> {
    let mut t = t;
    if t.second() != 0 || t.nanosecond() != 0 {
        let into_minute = Duration::seconds(i64::from(t.second()))
            + Duration::nanoseconds(i64::from(t.nanosecond()));
        t = t
            .checked_sub_signed(into_minute)?
            .checked_add_signed(Duration::minutes(1))?;
    }

    let minute_of_day = i64::from(t.hour() * 60 + t.minute());
    let remainder = minute_of_day % increment;
    if remainder == 0 {
        Some(t)
    } else {
        t.checked_add_signed(Duration::try_minutes(increment - remainder)?)
    }
}

/// Whether `[start, end)` is clear of busy time for every configured identity.
///
/// # Errors
/// `MissingIdentity` or the first error reported by `source`.
pub fn check_availability<S>(
    config: &SearchConfig,
    source: &S,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
) -> Result<bool>
where
    S: BusySource + ?Sized,
{
    let busy = collect_busy(source, &config.identities)?;
    Ok(interval::is_available(
        &busy,
        start.with_timezone(&Utc),
        end.with_timezone(&Utc),
    ))
}
