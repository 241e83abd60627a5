//! Administrative operations: the day-off registry and settings updates.
//!
//! Every mutation checks the caller's [`Role`] first and persists through the
//! injected [`SettingsStore`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{DeliveryError, Result};
use crate::provider::SettingsStore;
use crate::settings::{DayOff, DeliverySettings, SettingsForm};
use crate::validation::parse_delivery_date;
use crate::weekday::weekday_name;

/// Who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    ShopManager,
    Customer,
    Guest,
}

impl Role {
    /// Whether this role may change delivery settings and day-offs.
    pub fn can_manage_delivery(self) -> bool {
        matches!(self, Role::Administrator | Role::ShopManager)
    }
}

/// Confirmation returned after a day-off is registered, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOffAdded {
    pub date: NaiveDate,
    /// e.g. "June 10, 2024"
    pub formatted_date: String,
    /// e.g. "Monday"
    pub day_name: String,
    pub reason: Option<String>,
}

impl From<&DayOff> for DayOffAdded {
    fn from(day_off: &DayOff) -> Self {
        Self {
            date: day_off.date,
            formatted_date: day_off.date.format("%B %-d, %Y").to_string(),
            day_name: weekday_name(&day_off.date.weekday()).to_string(),
            reason: day_off.reason.clone(),
        }
    }
}

pub struct AdminService<S> {
    store: S,
}

impl<S: SettingsStore> AdminService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn settings(&self) -> Result<DeliverySettings> {
        self.store.configuration()
    }

    /// Save the settings form, keeping the registered day-offs.
    pub fn update_settings(&self, role: Role, form: &SettingsForm) -> Result<DeliverySettings> {
        authorize(role, "update settings")?;

        let mut settings = self.store.configuration()?;
        settings.apply_form(form);
        self.store.store(&settings)?;

        info!(
            minimum_days = settings.minimum_days,
            auto_weekend = settings.auto_weekend_disable,
            "delivery settings updated"
        );
        Ok(settings)
    }

    /// Register a day-off.
    ///
    /// # Errors
    /// - `Unauthorized` when `role` cannot manage delivery settings
    /// - `MissingDate` when `date` is blank
    /// - `Rejected(InvalidDate)` when `date` does not parse
    /// - `AlreadyExists` when the date is already registered
    pub fn add_exclusion(
        &self,
        role: Role,
        date: &str,
        reason: Option<&str>,
    ) -> Result<DayOffAdded> {
        authorize(role, "add day-off")?;

        if date.trim().is_empty() {
            return Err(DeliveryError::MissingDate);
        }
        let date = parse_delivery_date(date)?;

        let mut settings = self.store.configuration()?;
        if settings.has_day_off(date) {
            return Err(DeliveryError::AlreadyExists(date));
        }

        let day_off = DayOff::new(date, reason);
        let added = DayOffAdded::from(&day_off);
        settings.custom_dayoffs.push(day_off);
        self.store.store(&settings)?;

        info!(%date, reason = ?added.reason, "day-off added");
        Ok(added)
    }

    /// Remove a day-off. Removing a date that is not registered is a no-op.
    pub fn remove_exclusion(&self, role: Role, date: &str) -> Result<()> {
        authorize(role, "remove day-off")?;

        let Ok(date) = parse_delivery_date(date) else {
            warn!(input = date, "unparseable day-off date, nothing removed");
            return Ok(());
        };

        let mut settings = self.store.configuration()?;
        let before = settings.custom_dayoffs.len();
        settings.custom_dayoffs.retain(|d| d.date != date);
        if settings.custom_dayoffs.len() == before {
            return Ok(());
        }
        self.store.store(&settings)?;

        info!(%date, "day-off removed");
        Ok(())
    }

    /// Registered day-offs, earliest first.
    pub fn list_exclusions(&self) -> Result<Vec<DayOff>> {
        let mut day_offs = self.store.configuration()?.custom_dayoffs;
        day_offs.sort_by_key(|d| d.date);
        Ok(day_offs)
    }
}

fn authorize(role: Role, action: &str) -> Result<()> {
    if role.can_manage_delivery() {
        Ok(())
    } else {
        warn!(?role, action, "unauthorized delivery settings mutation");
        Err(DeliveryError::Unauthorized)
    }
}
