//! Stamping accepted delivery dates onto orders, and displaying them again.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::error::Result;
use crate::validation::parse_delivery_date;

/// Order attribute holding the accepted delivery date (ISO 8601).
pub const DELIVERY_DATE_KEY: &str = "_delivery_date";

/// Legacy attribute name for the same value, kept for existing order views.
pub const BILLING_DATE_KEY: &str = "_billing_date";

/// Somewhere order attributes can be written. The engine never reads orders.
pub trait OrderAttributeSink {
    fn set_attribute(&mut self, key: &str, value: &str) -> Result<()>;
}

impl OrderAttributeSink for BTreeMap<String, String> {
    fn set_attribute(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl OrderAttributeSink for HashMap<String, String> {
    fn set_attribute(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Write `date` to the order under both delivery-date attribute names.
pub fn stamp_delivery_date<S: OrderAttributeSink + ?Sized>(
    sink: &mut S,
    date: NaiveDate,
) -> Result<()> {
    let value = date.format("%Y-%m-%d").to_string();
    sink.set_attribute(BILLING_DATE_KEY, &value)?;
    sink.set_attribute(DELIVERY_DATE_KEY, &value)
}

/// Where a delivery-date notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSurface {
    AdminOrder,
    EmailHtml,
    EmailPlain,
    ThankYou,
}

/// A stored delivery date, ready to be shown to a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryDateNotice {
    pub date: NaiveDate,
}

impl DeliveryDateNotice {
    /// Build from a stored attribute value. Unparseable values yield `None`,
    /// and nothing is displayed.
    pub fn from_attribute(value: &str) -> Option<Self> {
        parse_delivery_date(value).ok().map(|date| Self { date })
    }

    /// e.g. "Monday, June 10, 2024"
    pub fn formatted(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }

    pub fn render(&self, surface: NoticeSurface) -> String {
        let formatted = self.formatted();
        match surface {
            NoticeSurface::AdminOrder | NoticeSurface::EmailHtml => {
                format!("<p><strong>Delivery Date:</strong> {}</p>", formatted)
            }
            NoticeSurface::EmailPlain => format!("\nDelivery Date: {}\n", formatted),
            NoticeSurface::ThankYou => {
                format!(
                    "<p><strong>Your selected delivery date:</strong> {}</p>",
                    formatted
                )
            }
        }
    }
}
