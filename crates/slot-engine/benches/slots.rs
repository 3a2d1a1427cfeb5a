//! Benchmarks for slot enumeration over a month of dense calendars.

use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::America::Los_Angeles;
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{find_slots, merge, rank_days, Interval, SearchConfig};

/// Two meetings per weekday plus a scattering of overlapping ones.
fn month_of_meetings() -> Vec<Interval> {
    let base = Utc.with_ymd_and_hms(2025, 3, 3, 16, 0, 0).unwrap();
    (0..31)
        .flat_map(|day| {
            let morning = base + Duration::days(day);
            [
                (morning, 60),
                (morning + Duration::minutes(30), 45),
                (morning + Duration::hours(5), 90),
            ]
        })
        .filter_map(|(start, len)| Interval::new(start, start + Duration::minutes(len)))
        .collect()
}

fn month_config(increment: i64) -> SearchConfig {
    let start = Los_Angeles.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap();
    let mut config =
        SearchConfig::new(vec!["bench".into()], start.with_timezone(&Utc), Los_Angeles);
    config.search_start = start;
    config.search_end = start + Duration::days(31);
    config.duration_minutes = 30;
    config.increment_minutes = increment;
    config
}

fn bench_slots(c: &mut Criterion) {
    let busy = month_of_meetings();

    c.bench_function("merge_month", |b| b.iter(|| merge(black_box(&busy))));

    for increment in [5, 15] {
        let config = month_config(increment);
        c.bench_function(&format!("find_slots_month_inc{increment}"), |b| {
            b.iter(|| find_slots(black_box(&config), black_box(&busy)))
        });
    }

    let slots = find_slots(&month_config(15), &busy).unwrap_or_default();
    c.bench_function("rank_days_month", |b| b.iter(|| rank_days(black_box(&slots))));
}

criterion_group!(benches, bench_slots);
criterion_main!(benches);
