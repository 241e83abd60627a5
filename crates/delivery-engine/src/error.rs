//! Error types for delivery-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::DateRejection;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// A candidate date failed the checkout decision list.
    #[error(transparent)]
    Rejected(#[from] DateRejection),

    #[error("This date is already added: {0}")]
    AlreadyExists(NaiveDate),

    #[error("Date is required")]
    MissingDate,

    /// An administrative mutation was attempted by a caller without the
    /// shop-management capability.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid weekday index: {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekday(u8),

    #[error("Settings storage error: {0}")]
    Storage(String),

    #[error("Order attribute error: {0}")]
    OrderAttribute(String),
}

pub type Result<T> = std::result::Result<T, DeliveryError>;
