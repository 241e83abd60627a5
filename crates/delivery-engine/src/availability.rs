//! Availability engine -- which dates can be delivered, counted from "today".
//!
//! A day is *available* when it passes the exclusion test of
//! [`DeliveryRuleSet::excludes`]. Lead time is measured in available days
//! strictly after today, so the walk always starts the day after `today`.

use std::ops::Bound::{Excluded, Included};

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::rules::DeliveryRuleSet;

/// Whether `date` could be delivered at all, ignoring lead time.
///
/// False when the date is today or earlier, when its weekday is excluded, or
/// when it is an explicit day-off. A date passing this check may still be
/// refused by the lead-time rule; see [`count_available_days_between`].
pub fn is_date_available(date: NaiveDate, today: NaiveDate, rules: &DeliveryRuleSet) -> bool {
    date > today && !rules.excludes(date)
}

/// Count available days in `(today, candidate]`.
///
/// Counts from the day after `today` up to and including `candidate`; returns
/// 0 when `candidate` is not after `today`. Whole weeks are counted
/// arithmetically, so the cost depends on the number of day-offs, not on how
/// far away `candidate` is.
pub fn count_available_days_between(
    today: NaiveDate,
    candidate: NaiveDate,
    rules: &DeliveryRuleSet,
) -> u32 {
    if candidate <= today {
        return 0;
    }

    let span = (candidate - today).num_days();
    let open_weekdays = 7 - rules.excluded_weekdays.len() as i64;

    // Every run of 7 consecutive days holds each weekday once; the remainder
    // is the last `span % 7` days ending at `candidate`.
    let trailing = (0..span % 7)
        .filter_map(|back| candidate.checked_sub_signed(Duration::days(back)))
        .filter(|day| !rules.excluded_weekdays.contains_date(*day))
        .count() as i64;

    // Day-offs on open weekdays were counted above; take them back out.
    let blocked = rules
        .excluded_dates
        .range((Excluded(today), Included(candidate)))
        .filter(|date| !rules.excluded_weekdays.contains_date(**date))
        .count() as i64;

    let count = span / 7 * open_weekdays + trailing - blocked;
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Count available days in `(today, candidate]`, stopping once `cap` are found.
///
/// The walk ends after at most `cap` available days, which is at most
/// `7 * (cap + day-offs + 1)` calendar days when some weekday is open.
pub fn count_available_days_capped(
    today: NaiveDate,
    candidate: NaiveDate,
    rules: &DeliveryRuleSet,
    cap: u32,
) -> u32 {
    if rules.excluded_weekdays.is_full() {
        return 0;
    }
    let found = today
        .iter_days()
        .skip(1)
        .take_while(|day| *day <= candidate)
        .filter(|day| !rules.excludes(*day))
        .take(cap as usize)
        .count();
    u32::try_from(found).unwrap_or(u32::MAX)
}

/// Whether `candidate` has at least `minimum_lead_days` available days before it
/// (counting `candidate` itself).
pub fn meets_lead_time(today: NaiveDate, candidate: NaiveDate, rules: &DeliveryRuleSet) -> bool {
    let lead = rules.minimum_lead_days;
    count_available_days_capped(today, candidate, rules, lead) >= lead
}

/// Whether a shopper may pick `candidate`: individually available and far
/// enough out to satisfy the lead time.
pub fn is_deliverable(candidate: NaiveDate, today: NaiveDate, rules: &DeliveryRuleSet) -> bool {
    is_date_available(candidate, today, rules) && meets_lead_time(today, candidate, rules)
}

/// The earliest date a shopper may pick.
///
/// Advances from `today`, counting only available days, and returns the first
/// available day on which the count reaches `minimum_lead_days`. The returned
/// date therefore always passes [`is_deliverable`]. With a lead time of zero
/// this is the first available day after today.
///
/// Returns `None` when no date can ever qualify (every weekday excluded) or
/// the calendar runs out before the lead time is reached.
pub fn earliest_available_date(today: NaiveDate, rules: &DeliveryRuleSet) -> Option<NaiveDate> {
    if rules.excluded_weekdays.is_full() {
        debug!(%today, "every weekday excluded, no deliverable date");
        return None;
    }

    let mut accumulated: u32 = 0;
    for day in today.iter_days().skip(1).take(walk_limit(rules)) {
        if rules.excludes(day) {
            continue;
        }
        accumulated += 1;
        if accumulated >= rules.minimum_lead_days {
            debug!(%today, earliest = %day, lead_days = rules.minimum_lead_days, "earliest delivery date");
            return Some(day);
        }
    }

    None
}

/// Upper bound on the days the earliest-date walk can need.
///
/// With at least one open weekday, every 7 days hold an open weekday, and each
/// day-off can cost at most one of them.
fn walk_limit(rules: &DeliveryRuleSet) -> usize {
    let needed = rules.minimum_lead_days as usize + rules.excluded_dates.len() + 1;
    needed.saturating_mul(7)
}
