//! Tests for the interval merger and point availability checks.

use chrono::{TimeZone, Utc};
use slot_engine::interval::{is_available, merge, Interval};

/// Helper to create an Interval from hour/minute ranges on 2026-03-16 (UTC).
fn iv(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(
        Utc.with_ymd_and_hms(2026, 3, 16, start_hour, start_min, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 16, end_hour, end_min, 0).unwrap(),
    )
    .unwrap()
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(merge(&[]).is_empty());
}

#[test]
fn disjoint_intervals_are_kept_and_sorted() {
    let merged = merge(&[iv(14, 0, 15, 0), iv(9, 0, 10, 0)]);
    assert_eq!(merged, vec![iv(9, 0, 10, 0), iv(14, 0, 15, 0)]);
}

#[test]
fn overlapping_intervals_collapse() {
    // 10:00-12:00 and 11:00-13:00 → 10:00-13:00
    let merged = merge(&[iv(10, 0, 12, 0), iv(11, 0, 13, 0)]);
    assert_eq!(merged, vec![iv(10, 0, 13, 0)]);
}

#[test]
fn touching_intervals_merge() {
    let merged = merge(&[iv(9, 0, 10, 0), iv(10, 0, 11, 0)]);
    assert_eq!(merged, vec![iv(9, 0, 11, 0)]);
}

#[test]
fn contained_interval_is_absorbed() {
    let merged = merge(&[iv(9, 0, 17, 0), iv(12, 0, 13, 0), iv(16, 30, 17, 0)]);
    assert_eq!(merged, vec![iv(9, 0, 17, 0)]);
}

#[test]
fn cascading_overlaps_chain_into_one_block() {
    let merged = merge(&[iv(11, 0, 12, 0), iv(9, 0, 10, 30), iv(10, 0, 11, 30)]);
    assert_eq!(merged, vec![iv(9, 0, 12, 0)]);
}

#[test]
fn degenerate_intervals_cannot_be_constructed() {
    let t = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
    assert!(Interval::new(t, t).is_none());
    assert!(Interval::new(t, t - chrono::Duration::minutes(1)).is_none());
}

#[test]
fn inverted_and_empty_literals_are_dropped() {
    let at = |h| Utc.with_ymd_and_hms(2026, 3, 16, h, 0, 0).unwrap();
    let inverted = Interval { start: at(12), end: at(11) };
    let empty = Interval { start: at(15), end: at(15) };

    let merged = merge(&[iv(9, 0, 10, 0), inverted, empty]);
    assert_eq!(merged, vec![iv(9, 0, 10, 0)]);
}

#[test]
fn adjacent_query_is_available() {
    let busy = vec![iv(10, 0, 11, 0)];
    let at = |h, m| Utc.with_ymd_and_hms(2026, 3, 16, h, m, 0).unwrap();

    assert!(is_available(&busy, at(11, 0), at(12, 0)));
    assert!(is_available(&busy, at(9, 0), at(10, 0)));
    assert!(!is_available(&busy, at(10, 30), at(11, 30)));
    assert!(!is_available(&busy, at(9, 0), at(12, 0)));
    // Empty query ranges are never bookable.
    assert!(!is_available(&[], at(9, 0), at(9, 0)));
}
