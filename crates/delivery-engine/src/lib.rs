//! # delivery-engine
//!
//! Delivery-date availability rules for a shop checkout.
//!
//! Given the shop's configured rules and a reference "today", the engine decides
//! whether a shopper may pick a date for delivery, and which date is the earliest
//! one on offer. Lead time is counted in *available* days (days that are neither an
//! excluded weekday nor an explicit day-off), never in calendar days.
//!
//! The same crate backs both call sites: the browser checkout (via
//! `delivery-engine-wasm`) and the server that accepts orders. Both reach the same
//! verdict because they run the same code.
//!
//! The engine never reads the system clock and never performs I/O on its own:
//! "today" is always a parameter, and settings/order storage are injected through
//! the traits in [`provider`] and [`order`].
//!
//! ## Modules
//!
//! - [`settings`] — Raw stored configuration and the admin settings form
//! - [`weekday`] — `WeekdaySet`, a compact set of excluded days of week
//! - [`rules`] — RuleSet resolver: settings → `DeliveryRuleSet`
//! - [`availability`] — Availability checks, lead-time counting, earliest date
//! - [`validation`] — The ordered decision list used to accept or reject a date
//! - [`provider`] — Settings storage capability (`ConfigurationProvider`, `SettingsStore`)
//! - [`admin`] — Day-off registry and settings updates for privileged callers
//! - [`checkout`] — Authoritative checkout validation, hints and order stamping
//! - [`order`] — Order attribute sink and delivery-date notices
//! - [`error`] — Error types

pub mod admin;
pub mod availability;
pub mod checkout;
pub mod error;
pub mod order;
pub mod provider;
pub mod rules;
pub mod settings;
pub mod validation;
pub mod weekday;

pub use admin::{AdminService, DayOffAdded, Role};
pub use availability::{
    count_available_days_between, earliest_available_date, is_date_available,
};
pub use checkout::{CheckoutHints, CheckoutService};
pub use error::{DeliveryError, Result};
pub use order::{DeliveryDateNotice, NoticeSurface, OrderAttributeSink};
pub use provider::{ConfigurationProvider, InMemorySettings, SettingsStore};
pub use rules::DeliveryRuleSet;
pub use settings::{DayOff, DeliverySettings, SettingsForm};
pub use validation::{parse_delivery_date, validate_delivery_date, DateRejection};
pub use weekday::WeekdaySet;
