//! RuleSet resolver -- turns stored settings into evaluation-ready rules.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::settings::DeliverySettings;
use crate::weekday::WeekdaySet;

/// Longest lead time the engine accepts, in available days. Larger values
/// from settings or the wire are clamped to this.
pub const MAX_LEAD_DAYS: u32 = 365;

/// The resolved rules every availability check runs against.
///
/// Built fresh from settings for each evaluation; a date is excluded when its
/// weekday is in `excluded_weekdays` OR it appears in `excluded_dates`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryRuleSet {
    /// Minimum number of available days strictly after today, at most
    /// [`MAX_LEAD_DAYS`].
    #[serde(deserialize_with = "clamped_lead_days")]
    pub minimum_lead_days: u32,
    pub excluded_weekdays: WeekdaySet,
    pub excluded_dates: BTreeSet<NaiveDate>,
}

impl DeliveryRuleSet {
    pub fn new(minimum_lead_days: u32) -> Self {
        Self {
            minimum_lead_days: minimum_lead_days.min(MAX_LEAD_DAYS),
            ..Self::default()
        }
    }

    pub fn with_excluded_weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.excluded_weekdays = weekdays;
        self
    }

    pub fn with_excluded_dates<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.excluded_dates.extend(dates);
        self
    }

    /// Resolve stored settings into a rule set.
    ///
    /// When `auto_weekend_disable` is on, the excluded weekdays are exactly
    /// Saturday and Sunday and the seven individual flags are not consulted.
    pub fn resolve(settings: &DeliverySettings) -> Self {
        let excluded_weekdays = if settings.auto_weekend_disable {
            WeekdaySet::weekend()
        } else {
            settings.flagged_weekdays()
        };

        Self {
            minimum_lead_days: settings.minimum_days.min(MAX_LEAD_DAYS),
            excluded_weekdays,
            excluded_dates: settings.custom_dayoffs.iter().map(|d| d.date).collect(),
        }
    }

    /// The exclusion test: weekday excluded or date explicitly blocked.
    ///
    /// Does not look at "today" or lead time.
    pub fn excludes(&self, date: NaiveDate) -> bool {
        self.excluded_weekdays.contains_date(date) || self.excluded_dates.contains(&date)
    }
}

impl From<&DeliverySettings> for DeliveryRuleSet {
    fn from(settings: &DeliverySettings) -> Self {
        Self::resolve(settings)
    }
}

fn clamped_lead_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = u64::deserialize(deserializer)?;
    Ok(raw.min(u64::from(MAX_LEAD_DAYS)) as u32)
}
