//! Benchmarks for the earliest-date walk and lead-time counting.
//!
//! The worst realistic case is a long lead time behind a dense block of day-offs
//! with most of the week excluded.

use chrono::{Duration, NaiveDate, Weekday};
use criterion::{criterion_group, criterion_main, Criterion};
use delivery_engine::availability::{count_available_days_between, earliest_available_date};
use delivery_engine::{validate_delivery_date, DeliveryRuleSet, WeekdaySet};
use std::hint::black_box;

fn dense_rules(today: NaiveDate) -> DeliveryRuleSet {
    let weekdays = WeekdaySet::weekend()
        .with(Weekday::Mon)
        .with(Weekday::Wed)
        .with(Weekday::Fri);
    DeliveryRuleSet::new(30)
        .with_excluded_weekdays(weekdays)
        .with_excluded_dates((1..=365).step_by(3).map(|d| today + Duration::days(d)))
}

fn bench_forward_walk(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let rules = dense_rules(today);
    let far = today + Duration::days(365);

    c.bench_function("earliest_available_date/dense", |b| {
        b.iter(|| earliest_available_date(black_box(today), black_box(&rules)))
    });

    c.bench_function("count_available_days_between/one_year", |b| {
        b.iter(|| count_available_days_between(black_box(today), black_box(far), black_box(&rules)))
    });

    c.bench_function("validate_delivery_date/one_year", |b| {
        b.iter(|| validate_delivery_date(black_box("2025-06-03"), black_box(today), &rules))
    });
}

criterion_group!(benches, bench_forward_walk);
criterion_main!(benches);
