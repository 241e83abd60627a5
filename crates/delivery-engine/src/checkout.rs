//! The authoritative checkout path.
//!
//! [`CheckoutService`] is the sole gate for order acceptance: whatever the
//! browser decided, the submitted date is re-checked here against settings read
//! fresh from the provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::availability::earliest_available_date;
use crate::error::Result;
use crate::order::{stamp_delivery_date, OrderAttributeSink};
use crate::provider::ConfigurationProvider;
use crate::rules::DeliveryRuleSet;
use crate::validation::{day_noun, validate_delivery_date};
use crate::weekday::WeekdaySet;

/// What the checkout page needs to configure its date picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutHints {
    /// Earliest selectable date; `None` if no date can ever be delivered.
    pub min_date: Option<NaiveDate>,
    pub minimum_days: u32,
    pub disabled_days: WeekdaySet,
    pub disabled_dates: Vec<NaiveDate>,
    pub placeholder: String,
}

impl CheckoutHints {
    pub fn from_rules(today: NaiveDate, rules: &DeliveryRuleSet) -> Self {
        let days = rules.minimum_lead_days;
        Self {
            min_date: earliest_available_date(today, rules),
            minimum_days: days,
            disabled_days: rules.excluded_weekdays,
            disabled_dates: rules.excluded_dates.iter().copied().collect(),
            placeholder: format!(
                "Select delivery date (min. {} {} processing)",
                days,
                day_noun(&days)
            ),
        }
    }
}

pub struct CheckoutService<P> {
    provider: P,
}

impl<P: ConfigurationProvider> CheckoutService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Rules resolved from the provider's current settings.
    pub fn rules(&self) -> Result<DeliveryRuleSet> {
        let settings = self.provider.configuration()?;
        Ok(DeliveryRuleSet::resolve(&settings))
    }

    pub fn hints(&self, today: NaiveDate) -> Result<CheckoutHints> {
        Ok(CheckoutHints::from_rules(today, &self.rules()?))
    }

    /// Run the decision list on a submitted date.
    pub fn validate(&self, submitted: &str, today: NaiveDate) -> Result<NaiveDate> {
        let rules = self.rules()?;
        Ok(validate_delivery_date(submitted, today, &rules)?)
    }

    /// Validate a submission and stamp the accepted date onto the order.
    ///
    /// The delivery date field is optional: an absent or blank submission is
    /// not validated, nothing is stamped, and `Ok(None)` is returned.
    pub fn place_order<S: OrderAttributeSink + ?Sized>(
        &self,
        submitted: Option<&str>,
        today: NaiveDate,
        sink: &mut S,
    ) -> Result<Option<NaiveDate>> {
        let Some(submitted) = submitted.filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        let date = self.validate(submitted, today)?;
        stamp_delivery_date(sink, date)?;

        info!(%date, "delivery date stamped on order");
        Ok(Some(date))
    }
}
