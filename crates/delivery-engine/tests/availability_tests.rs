//! Tests for the availability engine: exclusion checks, lead-time counting and
//! the earliest-date walk.

use chrono::{NaiveDate, Weekday};
use delivery_engine::availability::{
    count_available_days_between, count_available_days_capped, earliest_available_date,
    is_date_available, is_deliverable,
};
use delivery_engine::weekday::SUNDAY_FIRST;
use delivery_engine::{DeliveryRuleSet, WeekdaySet};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sundays_off(lead: u32) -> DeliveryRuleSet {
    DeliveryRuleSet::new(lead).with_excluded_weekdays(WeekdaySet::empty().with(Weekday::Sun))
}

// ── earliest_available_date ─────────────────────────────────────────────────

#[test]
fn earliest_with_no_exclusions_is_lead_days_out() {
    // Monday + 2 available days → Wednesday
    let rules = DeliveryRuleSet::new(2);
    let earliest = earliest_available_date(date(2024, 6, 3), &rules);
    assert_eq!(earliest, Some(date(2024, 6, 5)));
}

#[test]
fn earliest_skips_excluded_sunday_when_counting() {
    // Friday: Sat (1), Sun (excluded), Mon (2) → Monday
    let earliest = earliest_available_date(date(2024, 6, 7), &sundays_off(2));
    assert_eq!(earliest, Some(date(2024, 6, 10)));
}

#[test]
fn earliest_never_lands_on_an_excluded_day() {
    // Monday, lead 2, Wednesday blocked: Tue (1), Wed (blocked), Thu (2)
    let rules = DeliveryRuleSet::new(2).with_excluded_dates([date(2024, 6, 5)]);
    let earliest = earliest_available_date(date(2024, 6, 3), &rules);
    assert_eq!(earliest, Some(date(2024, 6, 6)));
}

#[test]
fn zero_lead_time_means_first_available_day_after_today() {
    let rules = DeliveryRuleSet::new(0);
    assert_eq!(
        earliest_available_date(date(2024, 6, 3), &rules),
        Some(date(2024, 6, 4))
    );

    // Saturday with the weekend off → Monday, never today.
    let weekend_off = DeliveryRuleSet::new(0).with_excluded_weekdays(WeekdaySet::weekend());
    assert_eq!(
        earliest_available_date(date(2024, 6, 8), &weekend_off),
        Some(date(2024, 6, 10))
    );
}

#[test]
fn earliest_is_none_when_every_weekday_is_excluded() {
    let all: WeekdaySet = SUNDAY_FIRST.into_iter().collect();
    let rules = DeliveryRuleSet::new(1).with_excluded_weekdays(all);
    assert_eq!(earliest_available_date(date(2024, 6, 3), &rules), None);
}

#[test]
fn earliest_skips_a_run_of_day_offs() {
    // Christmas week closure, lead 1, today Sunday 2024-12-22 with Sundays off.
    let closure = (23..=27).map(|d| date(2024, 12, d));
    let rules = sundays_off(1).with_excluded_dates(closure);
    // 23-27 blocked, Sat 28 is the first available day.
    assert_eq!(
        earliest_available_date(date(2024, 12, 22), &rules),
        Some(date(2024, 12, 28))
    );
}

#[test]
fn earliest_is_always_deliverable() {
    let today = date(2024, 6, 7);
    let rules = sundays_off(3).with_excluded_dates([date(2024, 6, 11)]);
    let earliest = earliest_available_date(today, &rules).unwrap();
    assert!(is_date_available(earliest, today, &rules));
    assert!(count_available_days_between(today, earliest, &rules) >= 3);
    assert!(is_deliverable(earliest, today, &rules));
}

// ── count_available_days_between ────────────────────────────────────────────

#[test]
fn count_excludes_weekend_days() {
    // Mon 3 → Mon 10 with the weekend off: Tue..Fri (4) + Mon (1)
    let rules = DeliveryRuleSet::new(0).with_excluded_weekdays(WeekdaySet::weekend());
    assert_eq!(
        count_available_days_between(date(2024, 6, 3), date(2024, 6, 10), &rules),
        5
    );
}

#[test]
fn count_includes_candidate_but_not_today() {
    let rules = DeliveryRuleSet::new(0);
    assert_eq!(
        count_available_days_between(date(2024, 6, 3), date(2024, 6, 4), &rules),
        1
    );
}

#[test]
fn count_is_zero_for_today_or_past() {
    let rules = DeliveryRuleSet::new(0);
    let today = date(2024, 6, 3);
    assert_eq!(count_available_days_between(today, today, &rules), 0);
    assert_eq!(
        count_available_days_between(today, date(2024, 5, 1), &rules),
        0
    );
}

#[test]
fn date_excluded_twice_is_counted_once() {
    // Sunday 9 is both an excluded weekday and a day-off: still just excluded.
    let rules = sundays_off(0).with_excluded_dates([date(2024, 6, 9)]);
    let plain = sundays_off(0);
    let today = date(2024, 6, 3);
    let end = date(2024, 6, 12);
    assert_eq!(
        count_available_days_between(today, end, &rules),
        count_available_days_between(today, end, &plain)
    );
    assert!(!is_date_available(date(2024, 6, 9), today, &rules));
}

#[test]
fn count_spans_a_leap_day() {
    let rules = DeliveryRuleSet::new(0);
    assert_eq!(
        count_available_days_between(date(2024, 2, 27), date(2024, 3, 1), &rules),
        3
    );
}

#[test]
fn count_over_centuries_uses_whole_weeks() {
    // 1000 weeks from a Monday with the weekend off, minus one weekday day-off
    // and one Saturday day-off that was already excluded.
    let today = date(2024, 6, 3);
    let rules = DeliveryRuleSet::new(0)
        .with_excluded_weekdays(WeekdaySet::weekend())
        .with_excluded_dates([date(2030, 1, 2), date(2030, 1, 5)]);
    let candidate = today + chrono::Duration::weeks(1000);
    assert_eq!(count_available_days_between(today, candidate, &rules), 4999);
}

#[test]
fn capped_count_stops_at_the_cap() {
    let today = date(2024, 6, 3);
    let rules = sundays_off(0);
    assert_eq!(
        count_available_days_capped(today, date(200000, 1, 1), &rules, 3),
        3
    );
    // Mon 3 → Sun 9: Tue..Sat
    assert_eq!(
        count_available_days_capped(today, date(2024, 6, 9), &rules, 10),
        5
    );
}

// ── is_date_available ───────────────────────────────────────────────────────

#[test]
fn today_and_past_are_never_available() {
    let rules = DeliveryRuleSet::new(0);
    let today = date(2024, 6, 3);
    assert!(!is_date_available(today, today, &rules));
    assert!(!is_date_available(date(2024, 6, 2), today, &rules));
}

#[test]
fn excluded_weekday_and_day_off_are_unavailable() {
    let today = date(2024, 6, 3);
    let rules = sundays_off(0).with_excluded_dates([date(2024, 6, 12)]);
    assert!(!is_date_available(date(2024, 6, 9), today, &rules));
    assert!(!is_date_available(date(2024, 6, 12), today, &rules));
    assert!(is_date_available(date(2024, 6, 11), today, &rules));
}

#[test]
fn available_date_can_still_fail_lead_time() {
    let today = date(2024, 6, 3);
    let rules = DeliveryRuleSet::new(3);
    let tomorrow = date(2024, 6, 4);
    assert!(is_date_available(tomorrow, today, &rules));
    assert!(!is_deliverable(tomorrow, today, &rules));
}
