//! The calendar-store seam.
//!
//! The engine never reads calendars itself. A [`BusySource`] resolves one
//! identity to its busy intervals; [`collect_busy`] unions several identities
//! (concatenation, not intersection) ahead of merging.

use std::collections::HashMap;

use crate::error::{EngineError, Result};
use crate::interval::Interval;

/// Something that can report busy time for a calendar identity.
///
/// Implementations own their retry policy; the engine performs none and
/// propagates the first failure without partial results.
pub trait BusySource: Send + Sync {
    fn busy_intervals(&self, identity: &str) -> Result<Vec<Interval>>;
}

impl<T: BusySource + ?Sized> BusySource for &T {
    fn busy_intervals(&self, identity: &str) -> Result<Vec<Interval>> {
        (**self).busy_intervals(identity)
    }
}

/// Fixed in-memory calendars keyed by identity.
///
/// Unknown identities are reported as an unavailable store, matching a
/// missing calendar file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBusySource {
    calendars: HashMap<String, Vec<Interval>>,
}

impl InMemoryBusySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(mut self, identity: impl Into<String>, busy: Vec<Interval>) -> Self {
        self.insert(identity, busy);
        self
    }

    pub fn insert(&mut self, identity: impl Into<String>, busy: Vec<Interval>) {
        self.calendars.insert(identity.into(), busy);
    }
}

impl BusySource for InMemoryBusySource {
    fn busy_intervals(&self, identity: &str) -> Result<Vec<Interval>> {
        self.calendars
            .get(identity)
            .cloned()
            .ok_or_else(|| EngineError::CalendarStoreUnavailable {
                identity: identity.to_string(),
                reason: "no calendar for identity".to_string(),
            })
    }
}

/// Concatenate busy time for every identity.
///
/// Intervals with `end <= start` are dropped with a warning.
///
/// # Errors
/// `MissingIdentity` for an empty identity list, or the first store error.
pub fn collect_busy<S>(source: &S, identities: &[String]) -> Result<Vec<Interval>>
where
    S: BusySource + ?Sized,
{
    if identities.is_empty() {
        return Err(EngineError::MissingIdentity);
    }

    let mut busy = Vec::new();
    for identity in identities {
        let intervals = source.busy_intervals(identity)?;
        let fetched = intervals.len();
        busy.extend(intervals.into_iter().filter(|iv| {
            let valid = iv.start < iv.end;
            if !valid {
                tracing::warn!(
                    identity,
                    start = %iv.start,
                    end = %iv.end,
                    "dropping empty busy interval"
                );
            }
            valid
        }));
        tracing::debug!(identity, fetched, "fetched busy intervals");
    }

    Ok(busy)
}
