//! Stored delivery configuration, as an admin edits it.
//!
//! `DeliverySettings` is the raw, persisted shape. It is never evaluated
//! directly: [`DeliveryRuleSet::resolve`](crate::rules::DeliveryRuleSet::resolve)
//! turns it into the primitives the availability engine works with.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::rules::MAX_LEAD_DAYS;
use crate::weekday::WeekdaySet;

/// A single explicitly blocked calendar date (a "day-off").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOff {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DayOff {
    /// Build a day-off, treating a blank reason as no reason.
    pub fn new(date: NaiveDate, reason: Option<&str>) -> Self {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        Self { date, reason }
    }
}

/// Raw delivery configuration.
///
/// Missing keys take their defaults when deserialized, and `minimum_days` is
/// clamped to `0..=MAX_LEAD_DAYS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverySettings {
    /// Lead time, in available days.
    #[serde(deserialize_with = "non_negative_days")]
    pub minimum_days: u32,
    pub disable_sunday: bool,
    pub disable_monday: bool,
    pub disable_tuesday: bool,
    pub disable_wednesday: bool,
    pub disable_thursday: bool,
    pub disable_friday: bool,
    pub disable_saturday: bool,
    /// Shortcut that excludes exactly Saturday and Sunday, overriding the
    /// individual weekday flags.
    pub auto_weekend_disable: bool,
    pub custom_dayoffs: Vec<DayOff>,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            minimum_days: 2,
            disable_sunday: true,
            disable_monday: false,
            disable_tuesday: false,
            disable_wednesday: false,
            disable_thursday: false,
            disable_friday: false,
            disable_saturday: false,
            auto_weekend_disable: false,
            custom_dayoffs: Vec::new(),
        }
    }
}

impl DeliverySettings {
    pub fn weekday_flag(&self, day: Weekday) -> bool {
        match day {
            Weekday::Sun => self.disable_sunday,
            Weekday::Mon => self.disable_monday,
            Weekday::Tue => self.disable_tuesday,
            Weekday::Wed => self.disable_wednesday,
            Weekday::Thu => self.disable_thursday,
            Weekday::Fri => self.disable_friday,
            Weekday::Sat => self.disable_saturday,
        }
    }

    pub fn set_weekday_flag(&mut self, day: Weekday, disabled: bool) {
        let flag = match day {
            Weekday::Sun => &mut self.disable_sunday,
            Weekday::Mon => &mut self.disable_monday,
            Weekday::Tue => &mut self.disable_tuesday,
            Weekday::Wed => &mut self.disable_wednesday,
            Weekday::Thu => &mut self.disable_thursday,
            Weekday::Fri => &mut self.disable_friday,
            Weekday::Sat => &mut self.disable_saturday,
        };
        *flag = disabled;
    }

    /// Weekdays whose individual flag is set, ignoring the weekend shortcut.
    pub fn flagged_weekdays(&self) -> WeekdaySet {
        crate::weekday::SUNDAY_FIRST
            .into_iter()
            .filter(|day| self.weekday_flag(*day))
            .collect()
    }

    pub fn has_day_off(&self, date: NaiveDate) -> bool {
        self.custom_dayoffs.iter().any(|d| d.date == date)
    }

    /// Apply a submitted settings form.
    ///
    /// Lead time, weekday flags and the weekend shortcut are replaced; day-offs
    /// are kept. With the weekend shortcut on, the stored Saturday and Sunday
    /// flags are forced on as well.
    pub fn apply_form(&mut self, form: &SettingsForm) {
        self.minimum_days = form.minimum_days.min(MAX_LEAD_DAYS);
        for day in crate::weekday::SUNDAY_FIRST {
            self.set_weekday_flag(day, form.disabled_weekdays.contains(day));
        }
        self.auto_weekend_disable = form.auto_weekend_disable;
        if form.auto_weekend_disable {
            self.disable_saturday = true;
            self.disable_sunday = true;
        }
    }
}

/// The admin settings form: everything except the day-off list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub minimum_days: u32,
    pub disabled_weekdays: WeekdaySet,
    #[serde(default)]
    pub auto_weekend_disable: bool,
}

fn non_negative_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, i64::from(MAX_LEAD_DAYS)) as u32)
}
