//! Wall-clock to instant resolution across DST transitions.

use chrono::{Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Resolve a local wall-clock time in `tz` to a concrete instant.
///
/// Ambiguous times (fall back) take the earlier mapping. Nonexistent times
/// (spring forward) are shifted forward by the length of the gap, so 02:30 on
/// a US spring-forward day becomes 03:30.
///
/// Returns `None` when the result falls outside chrono's representable range.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<chrono::DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            // Read the wall clock with the offset in force just before the gap.
            let earlier = naive.checked_sub_signed(Duration::hours(6))?;
            let before = tz.offset_from_utc_datetime(&earlier).fix().local_minus_utc();
            let utc = naive.checked_sub_signed(Duration::seconds(i64::from(before)))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

/// The instant `minute_of_day` minutes after local midnight on `date`.
///
/// `minute_of_day == 1440` yields the following midnight. `None` at the edge
/// of the representable date range.
pub fn local_instant(
    tz: Tz,
    date: NaiveDate,
    minute_of_day: u32,
) -> Option<chrono::DateTime<Tz>> {
    let naive = date
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::minutes(i64::from(minute_of_day)))?;
    resolve_local(tz, naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::Los_Angeles;

    #[test]
    fn spring_forward_gap_shifts_forward() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let dt = local_instant(Los_Angeles, date, 2 * 60 + 30).unwrap();
        assert_eq!((dt.hour(), dt.minute()), (3, 30));
    }

    #[test]
    fn fall_back_takes_earliest() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        let dt = local_instant(Los_Angeles, date, 60 + 30).unwrap();
        // 01:30 PDT is 08:30 UTC; 01:30 PST would be 09:30 UTC.
        assert_eq!(dt.naive_utc().hour(), 8);
    }

    #[test]
    fn end_of_day_rolls_to_next_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 27).unwrap();
        let dt = local_instant(Los_Angeles, date, 24 * 60).unwrap();
        assert_eq!(dt.date_naive(), date.succ_opt().unwrap());
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn end_of_last_representable_day_is_none() {
        assert!(local_instant(chrono_tz::UTC, NaiveDate::MAX, 24 * 60).is_none());
        assert!(local_instant(chrono_tz::UTC, NaiveDate::MAX, 9 * 60).is_some());
    }
}
