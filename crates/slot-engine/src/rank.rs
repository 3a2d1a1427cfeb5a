//! Day-level suggestions over enumerated slots.
//!
//! [`rank_days`] groups slots by local calendar date and orders days by total
//! free minutes. [`best_day`] applies a separate weighted score that favours
//! many bookable options over a few long ones.

use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::AvailableSlot;

/// Weight of one slot in the best-day score (`10 * 0.8`).
pub const SLOT_COUNT_WEIGHT: f64 = 8.0;
/// Weight of one free minute in the best-day score.
pub const FREE_MINUTE_WEIGHT: f64 = 0.2;

/// All slots found on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<AvailableSlot>,
    pub slot_count: usize,
    pub total_free_minutes: i64,
}

impl DayAvailability {
    fn from_slots(date: NaiveDate, slots: Vec<AvailableSlot>) -> Self {
        let total_free_minutes = slots.iter().map(AvailableSlot::duration_minutes).sum();
        Self {
            date,
            slot_count: slots.len(),
            slots,
            total_free_minutes,
        }
    }

    /// `slot_count * 10 * 0.8 + total_free_minutes * 0.2`.
    pub fn score(&self) -> f64 {
        self.slot_count as f64 * SLOT_COUNT_WEIGHT
            + self.total_free_minutes as f64 * FREE_MINUTE_WEIGHT
    }

    /// The score scaled by 5 so it stays an exact integer for comparisons.
    fn score_key(&self) -> i64 {
        self.slot_count as i64 * 40 + self.total_free_minutes
    }
}

/// Summary of the single best day to book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestDaySummary {
    pub date: NaiveDate,
    pub day_name: String,
    pub slot_count: usize,
    /// Total free time in hours, rounded to one decimal place.
    pub total_hours: f64,
}

/// Group slots by date and sort days by total free minutes, most first.
///
/// Days with equal totals keep chronological order.
pub fn rank_days(slots: &[AvailableSlot]) -> Vec<DayAvailability> {
    let mut ordered = slots.to_vec();
    ordered.sort_by_key(|s| s.start);

    let mut days: Vec<DayAvailability> = ordered
        .chunk_by(|a, b| a.date() == b.date())
        .map(|group| DayAvailability::from_slots(group[0].date(), group.to_vec()))
        .collect();

    // Stable: ties stay earliest-date first.
    days.sort_by(|a, b| b.total_free_minutes.cmp(&a.total_free_minutes));
    days
}

/// Pick the day with the highest best-day score.
///
/// Equal scores resolve to the earliest date. Returns `None` when no day has
/// any slots.
pub fn best_day(days: &[DayAvailability]) -> Option<BestDaySummary> {
    let best = days
        .iter()
        .filter(|d| d.slot_count > 0)
        .max_by(|a, b| {
            a.score_key()
                .cmp(&b.score_key())
                .then_with(|| b.date.cmp(&a.date))
        })?;

    Some(BestDaySummary {
        date: best.date,
        day_name: best.date.format("%A").to_string(),
        slot_count: best.slot_count,
        total_hours: (best.total_free_minutes as f64 / 60.0 * 10.0).round() / 10.0,
    })
}
