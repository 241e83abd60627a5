//! The checkout decision list.
//!
//! A submitted date is checked against five rules in a fixed order, stopping at
//! the first failure:
//!
//! 1. it parses as a calendar date ([`DateRejection::InvalidDate`])
//! 2. it is strictly after today ([`DateRejection::PastOrTodayDate`])
//! 3. enough available days lie between today and the date
//!    ([`DateRejection::InsufficientLeadTime`])
//! 4. its weekday is not excluded ([`DateRejection::WeekdayExcluded`])
//! 5. it is not an explicit day-off ([`DateRejection::DateExcluded`])
//!
//! Both the browser and the server run exactly this code.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use thiserror::Error;
use tracing::debug;

use crate::availability::count_available_days_capped;
use crate::rules::DeliveryRuleSet;
use crate::weekday::weekday_name;

/// Why a candidate delivery date was refused.
///
/// Each variant carries exactly one shopper-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRejection {
    #[error("Please enter a valid delivery date.")]
    InvalidDate,

    #[error("Delivery date cannot be today or in the past.")]
    PastOrTodayDate,

    #[error(
        "Delivery date must have at least {} available {} for processing (excluding disabled days).",
        .required,
        day_noun(.required)
    )]
    InsufficientLeadTime { required: u32, available: u32 },

    #[error("{} delivery is not available. Please select another date.", weekday_name(.weekday))]
    WeekdayExcluded { weekday: Weekday },

    #[error("Delivery is not available on this date. Please select another date.")]
    DateExcluded { date: NaiveDate },
}

impl DateRejection {
    /// Stable machine-readable code, used across the WASM boundary.
    pub fn code(&self) -> &'static str {
        match self {
            DateRejection::InvalidDate => "InvalidDate",
            DateRejection::PastOrTodayDate => "PastOrTodayDate",
            DateRejection::InsufficientLeadTime { .. } => "InsufficientLeadTime",
            DateRejection::WeekdayExcluded { .. } => "WeekdayExcluded",
            DateRejection::DateExcluded { .. } => "DateExcluded",
        }
    }
}

/// "day" or "days" for a count.
pub fn day_noun(count: &u32) -> &'static str {
    if *count == 1 {
        "day"
    } else {
        "days"
    }
}

/// Parse a submitted delivery date.
///
/// Accepts `YYYY-MM-DD`, or a naive `YYYY-MM-DDTHH:MM:SS` whose time of day is
/// dropped. Surrounding whitespace is ignored.
pub fn parse_delivery_date(input: &str) -> Result<NaiveDate, DateRejection> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|_| DateRejection::InvalidDate)
}

/// Run rules 2-5 of the decision list on an already parsed date.
pub fn check_date(
    date: NaiveDate,
    today: NaiveDate,
    rules: &DeliveryRuleSet,
) -> Result<NaiveDate, DateRejection> {
    if date <= today {
        return Err(DateRejection::PastOrTodayDate);
    }

    let available = count_available_days_capped(today, date, rules, rules.minimum_lead_days);
    if available < rules.minimum_lead_days {
        return Err(DateRejection::InsufficientLeadTime {
            required: rules.minimum_lead_days,
            available,
        });
    }

    if rules.excluded_weekdays.contains_date(date) {
        return Err(DateRejection::WeekdayExcluded {
            weekday: date.weekday(),
        });
    }

    if rules.excluded_dates.contains(&date) {
        return Err(DateRejection::DateExcluded { date });
    }

    Ok(date)
}

/// Run the full decision list on a submitted date string.
pub fn validate_delivery_date(
    input: &str,
    today: NaiveDate,
    rules: &DeliveryRuleSet,
) -> Result<NaiveDate, DateRejection> {
    let verdict = parse_delivery_date(input).and_then(|date| check_date(date, today, rules));
    match &verdict {
        Ok(date) => debug!(%date, %today, "delivery date accepted"),
        Err(rejection) => debug!(input, %today, code = rejection.code(), "delivery date rejected"),
    }
    verdict
}
