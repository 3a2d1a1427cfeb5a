//! Search configuration: the fully-resolved input to the availability engine,
//! plus the tunable defaults a front end resolves raw requests against.

use chrono::{DateTime, Duration, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const DEFAULT_DURATION_MINUTES: i64 = 60;
pub const DEFAULT_INCREMENT_MINUTES: i64 = 15;
pub const DEFAULT_HORIZON_DAYS: i64 = 7;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;
pub const DEFAULT_WORKING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Daily working window, in minutes after local midnight.
///
/// `end_minute` may be 1440 to mean "until midnight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl WorkHours {
    pub fn new(start_minute: u32, end_minute: u32) -> Result<Self> {
        let hours = Self {
            start_minute,
            end_minute,
        };
        hours.validate()?;
        Ok(hours)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_minute >= self.end_minute || self.end_minute > MINUTES_PER_DAY {
            return Err(EngineError::InvalidWorkHours {
                start: self.start_minute,
                end: self.end_minute,
            });
        }
        Ok(())
    }

    pub fn length_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}

impl Default for WorkHours {
    /// 08:00 to 18:00.
    fn default() -> Self {
        Self {
            start_minute: 8 * 60,
            end_minute: 18 * 60,
        }
    }
}

/// Fully-resolved availability search.
///
/// Every field is concrete; see [`crate::request::SearchRequest`] for the
/// best-effort path from raw caller input to this type.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub search_start: DateTime<Tz>,
    pub search_end: DateTime<Tz>,
    pub duration_minutes: i64,
    pub increment_minutes: i64,
    pub identities: Vec<String>,
    pub working_days: Vec<Weekday>,
    pub work_hours: WorkHours,
    /// Canonical timezone for all day boundaries and minute-of-day arithmetic.
    pub timezone: Tz,
}

impl SearchConfig {
    /// A search over `[now, now + 7 days]` with every default applied.
    ///
    /// The window collapses to `[now, now]` when `now` is within a week of the
    /// last representable instant.
    pub fn new(identities: Vec<String>, now: DateTime<Utc>, timezone: Tz) -> Self {
        let start = now.with_timezone(&timezone);
        Self {
            search_start: start,
            search_end: start
                .checked_add_signed(Duration::days(DEFAULT_HORIZON_DAYS))
                .unwrap_or(start),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            increment_minutes: DEFAULT_INCREMENT_MINUTES,
            identities,
            working_days: DEFAULT_WORKING_DAYS.to_vec(),
            work_hours: WorkHours::default(),
            timezone,
        }
    }

    /// Check the numeric settings the slot loop depends on.
    ///
    /// A non-positive increment would never advance the cursor, so it is
    /// rejected here rather than inside the loop.
    pub fn validate_window(&self) -> Result<()> {
        if self.increment_minutes <= 0 {
            return Err(EngineError::InvalidIncrement(self.increment_minutes));
        }
        if self.duration_minutes <= 0 {
            return Err(EngineError::InvalidDuration(self.duration_minutes));
        }
        self.work_hours.validate()
    }

    /// Full validation, including the identity requirement.
    pub fn validate(&self) -> Result<()> {
        if self.identities.is_empty() {
            return Err(EngineError::MissingIdentity);
        }
        self.validate_window()
    }
}

/// Deployment-level defaults a front end resolves raw requests against.
///
/// Fields are kept in their textual form so the same best-effort parsing
/// applies whether they come from a file, the environment, or code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineDefaults {
    pub timezone: String,
    pub duration_minutes: i64,
    pub increment_minutes: i64,
    pub working_days: String,
    pub work_hours: String,
    pub horizon_days: i64,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.name().to_string(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            increment_minutes: DEFAULT_INCREMENT_MINUTES,
            working_days: "mon,tue,wed,thu,fri".to_string(),
            work_hours: "08:00-18:00".to_string(),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_work_hours_are_eight_to_six() {
        let hours = WorkHours::default();
        assert_eq!(hours.start_minute, 480);
        assert_eq!(hours.end_minute, 1080);
        assert_eq!(hours.length_minutes(), 600);
    }

    #[test]
    fn work_hours_reject_empty_or_overlong_windows() {
        assert!(WorkHours::new(600, 600).is_err());
        assert!(WorkHours::new(700, 600).is_err());
        assert!(WorkHours::new(0, 1441).is_err());
        assert!(WorkHours::new(0, 1440).is_ok());
    }

    #[test]
    fn zero_increment_is_fatal() {
        let now = Utc.with_ymd_and_hms(2025, 3, 27, 16, 0, 0).unwrap();
        let mut config = SearchConfig::new(vec!["alice".into()], now, DEFAULT_TIMEZONE);
        config.increment_minutes = 0;
        assert_eq!(config.validate(), Err(EngineError::InvalidIncrement(0)));
    }

    #[test]
    fn missing_identity_is_fatal() {
        let now = Utc.with_ymd_and_hms(2025, 3, 27, 16, 0, 0).unwrap();
        let config = SearchConfig::new(vec![], now, DEFAULT_TIMEZONE);
        assert_eq!(config.validate(), Err(EngineError::MissingIdentity));
        assert!(config.validate_window().is_ok());
    }
}
