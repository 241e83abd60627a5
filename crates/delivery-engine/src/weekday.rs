//! A compact set of days of the week.
//!
//! Days are identified by their index counted from Sunday (0 = Sunday,
//! 6 = Saturday), which is also how they cross the JSON boundary.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;

/// Days of the week in index order, Sunday first.
pub const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const ALL_DAYS: u8 = 0b111_1111;

/// Set of weekdays, stored as a 7-bit mask (bit 0 = Sunday).
///
/// Serializes as a sorted array of weekday indices, e.g. `[0, 6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Saturday and Sunday.
    pub const fn weekend() -> Self {
        Self(0b100_0001)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    /// Whether the weekday of `date` is in the set.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when every day of the week is in the set.
    pub fn is_full(&self) -> bool {
        self.0 & ALL_DAYS == ALL_DAYS
    }

    /// Members in index order, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        SUNDAY_FIRST.into_iter().filter(|day| self.contains(*day))
    }

    /// Members as Sunday-based indices, ascending.
    pub fn indices(&self) -> Vec<u8> {
        self.iter()
            .map(|day| day.num_days_from_sunday() as u8)
            .collect()
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = DeliveryError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        indices
            .into_iter()
            .map(weekday_from_index)
            .collect::<Result<WeekdaySet, _>>()
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.indices()
    }
}

/// Convert a Sunday-based index (0-6) into a [`Weekday`].
pub fn weekday_from_index(index: u8) -> Result<Weekday, DeliveryError> {
    SUNDAY_FIRST
        .get(index as usize)
        .copied()
        .ok_or(DeliveryError::InvalidWeekday(index))
}

/// Full English day name ("Monday"), as shown to shoppers and admins.
pub fn weekday_name(day: &Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
