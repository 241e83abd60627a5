//! Property-based tests for the availability engine using proptest.
//!
//! These check invariants that must hold for *any* rule set and "today", not
//! just the scenarios in `availability_tests.rs`.

use chrono::{Duration, NaiveDate};
use delivery_engine::availability::{
    count_available_days_between, count_available_days_capped, earliest_available_date,
    is_date_available, is_deliverable,
};
use delivery_engine::weekday::SUNDAY_FIRST;
use delivery_engine::{
    validate_delivery_date, DayOff, DeliveryRuleSet, DeliverySettings, WeekdaySet,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A "today" in the 2024-2026 range. Day is capped at 28 to avoid invalid
/// month/day combos.
fn arb_today() -> impl Strategy<Value = NaiveDate> {
    (2024i32..=2026, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Any subset of weekdays except the full week.
fn arb_weekdays() -> impl Strategy<Value = WeekdaySet> {
    (0u8..127).prop_map(|mask| {
        SUNDAY_FIRST
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, day)| day)
            .collect()
    })
}

/// Rule set whose day-offs fall within 60 days of `today`.
fn arb_rules_and_today() -> impl Strategy<Value = (DeliveryRuleSet, NaiveDate)> {
    (
        arb_today(),
        0u32..=10,
        arb_weekdays(),
        prop::collection::vec(1i64..=60, 0..12),
    )
        .prop_map(|(today, lead, weekdays, offsets)| {
            let rules = DeliveryRuleSet::new(lead)
                .with_excluded_weekdays(weekdays)
                .with_excluded_dates(offsets.into_iter().map(|o| today + Duration::days(o)));
            (rules, today)
        })
}

fn arb_settings() -> impl Strategy<Value = DeliverySettings> {
    (
        0u32..=10,
        prop::array::uniform7(any::<bool>()),
        any::<bool>(),
        prop::collection::vec(arb_today(), 0..6),
    )
        .prop_map(|(minimum_days, flags, auto_weekend, dates)| {
            let mut settings = DeliverySettings {
                minimum_days,
                auto_weekend_disable: auto_weekend,
                custom_dayoffs: dates.into_iter().map(|d| DayOff::new(d, None)).collect(),
                ..DeliverySettings::default()
            };
            for (day, flag) in SUNDAY_FIRST.into_iter().zip(flags) {
                settings.set_weekday_flag(day, flag);
            }
            settings
        })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: the earliest date is itself deliverable
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn earliest_date_is_deliverable((rules, today) in arb_rules_and_today()) {
        let earliest = earliest_available_date(today, &rules);
        prop_assert!(earliest.is_some(), "a partial week always yields a date");
        let earliest = earliest.unwrap();

        prop_assert!(is_date_available(earliest, today, &rules));
        prop_assert!(count_available_days_between(today, earliest, &rules) >= rules.minimum_lead_days);
        prop_assert_eq!(validate_delivery_date(&earliest.to_string(), today, &rules), Ok(earliest));
    }
}

// ---------------------------------------------------------------------------
// Property 2: nothing before the earliest date is deliverable
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn earliest_date_is_minimal((rules, today) in arb_rules_and_today()) {
        let earliest = earliest_available_date(today, &rules).unwrap();
        for day in today.iter_days().skip(1).take_while(|d| *d < earliest) {
            prop_assert!(!is_deliverable(day, today, &rules), "{} accepted before {}", day, earliest);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: the decision list agrees with the availability predicates
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn validation_agrees_with_is_deliverable(
        (rules, today) in arb_rules_and_today(),
        offset in -5i64..=90,
    ) {
        let candidate = today + Duration::days(offset);
        let verdict = validate_delivery_date(&candidate.format("%Y-%m-%d").to_string(), today, &rules);
        prop_assert_eq!(verdict.is_ok(), is_deliverable(candidate, today, &rules));
    }
}

// ---------------------------------------------------------------------------
// Property 4: resolution is idempotent and the weekend shortcut overrides flags
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn resolution_is_idempotent(settings in arb_settings()) {
        prop_assert_eq!(DeliveryRuleSet::resolve(&settings), DeliveryRuleSet::resolve(&settings));
    }

    #[test]
    fn weekend_shortcut_ignores_flags(mut settings in arb_settings()) {
        settings.auto_weekend_disable = true;
        prop_assert_eq!(DeliveryRuleSet::resolve(&settings).excluded_weekdays, WeekdaySet::weekend());
    }
}

// ---------------------------------------------------------------------------
// Property 5: counting is monotonic in the candidate date
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn count_never_decreases((rules, today) in arb_rules_and_today(), span in 1i64..=60) {
        let mut previous = 0;
        for offset in 0..=span {
            let count = count_available_days_between(today, today + Duration::days(offset), &rules);
            prop_assert!(count >= previous);
            prop_assert!(count - previous <= 1);
            previous = count;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: week arithmetic matches a day-by-day walk, and the capped walk
// stops at the cap
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn count_matches_day_walk(
        (rules, today) in arb_rules_and_today(),
        offset in -3i64..=400,
        cap in 0u32..=20,
    ) {
        let candidate = today + Duration::days(offset);
        let walked = today
            .iter_days()
            .skip(1)
            .take_while(|d| *d <= candidate)
            .filter(|d| !rules.excludes(*d))
            .count() as u32;

        prop_assert_eq!(count_available_days_between(today, candidate, &rules), walked);
        prop_assert_eq!(
            count_available_days_capped(today, candidate, &rules, cap),
            walked.min(cap)
        );
    }
}
