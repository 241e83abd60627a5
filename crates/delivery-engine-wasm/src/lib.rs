//! WASM bindings for delivery-engine.
//!
//! The checkout page runs these to configure its date picker and to warn the
//! shopper before submitting. The server re-checks every submission with the same
//! engine, so a verdict given here always matches the one given at order time.
//! Complex types cross the boundary as JSON strings; dates are `YYYY-MM-DD`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p delivery-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir assets/delivery-engine/ \
//!   target/wasm32-unknown-unknown/release/delivery_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use delivery_engine::{
    availability, checkout::CheckoutHints, DeliveryRuleSet, DeliverySettings,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Outcome of the checkout decision list.
#[derive(Serialize, Debug, PartialEq)]
struct VerdictDto {
    accepted: bool,
    /// Accepted date, normalized to `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    /// Rejection code, e.g. `"WeekdayExcluded"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    /// Shopper-facing rejection message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers: parse inputs, serialize outputs
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    delivery_engine::parse_delivery_date(s).map_err(|_| format!("Invalid date '{}'", s))
}

fn parse_rules_json(json: &str) -> Result<DeliveryRuleSet, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid rules JSON: {}", e))
}

fn parse_settings_json(json: &str) -> Result<DeliverySettings, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid settings JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn resolve_rule_set_json(settings_json: &str) -> Result<String, String> {
    let settings = parse_settings_json(settings_json)?;
    to_json(&DeliveryRuleSet::resolve(&settings))
}

fn is_date_available_json(date: &str, today: &str, rules_json: &str) -> Result<bool, String> {
    let rules = parse_rules_json(rules_json)?;
    Ok(availability::is_date_available(
        parse_date(date)?,
        parse_date(today)?,
        &rules,
    ))
}

fn count_available_days_json(today: &str, candidate: &str, rules_json: &str) -> Result<u32, String> {
    let rules = parse_rules_json(rules_json)?;
    Ok(availability::count_available_days_between(
        parse_date(today)?,
        parse_date(candidate)?,
        &rules,
    ))
}

fn earliest_available_json(today: &str, rules_json: &str) -> Result<Option<String>, String> {
    let rules = parse_rules_json(rules_json)?;
    Ok(availability::earliest_available_date(parse_date(today)?, &rules).map(|d| d.to_string()))
}

fn validate_json(date: &str, today: &str, rules_json: &str) -> Result<String, String> {
    let rules = parse_rules_json(rules_json)?;
    let verdict = match delivery_engine::validate_delivery_date(date, parse_date(today)?, &rules) {
        Ok(accepted) => VerdictDto {
            accepted: true,
            date: Some(accepted.to_string()),
            code: None,
            message: None,
        },
        Err(rejection) => VerdictDto {
            accepted: false,
            date: None,
            code: Some(rejection.code()),
            message: Some(rejection.to_string()),
        },
    };
    to_json(&verdict)
}

fn checkout_hints_json(settings_json: &str, today: &str) -> Result<String, String> {
    let rules = DeliveryRuleSet::resolve(&parse_settings_json(settings_json)?);
    to_json(&CheckoutHints::from_rules(parse_date(today)?, &rules))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Resolve stored settings JSON into a rule set.
///
/// Returns a JSON string `{minimum_lead_days, excluded_weekdays, excluded_dates}`
/// with weekdays as 0-6 (0 = Sunday).
#[wasm_bindgen(js_name = "resolveRuleSet")]
pub fn resolve_rule_set(settings_json: &str) -> Result<String, JsValue> {
    resolve_rule_set_json(settings_json).map_err(|e| JsValue::from_str(&e))
}

/// Whether `date` is after `today` and not excluded (lead time not checked).
#[wasm_bindgen(js_name = "isDateAvailable")]
pub fn is_date_available(date: &str, today: &str, rules_json: &str) -> Result<bool, JsValue> {
    is_date_available_json(date, today, rules_json).map_err(|e| JsValue::from_str(&e))
}

/// Number of available days after `today` up to and including `candidate`.
#[wasm_bindgen(js_name = "countAvailableDaysBetween")]
pub fn count_available_days_between(
    today: &str,
    candidate: &str,
    rules_json: &str,
) -> Result<u32, JsValue> {
    count_available_days_json(today, candidate, rules_json).map_err(|e| JsValue::from_str(&e))
}

/// Earliest selectable date as `YYYY-MM-DD`, or `undefined` if none exists.
#[wasm_bindgen(js_name = "earliestAvailableDate")]
pub fn earliest_available_date(today: &str, rules_json: &str) -> Result<Option<String>, JsValue> {
    earliest_available_json(today, rules_json).map_err(|e| JsValue::from_str(&e))
}

/// Run the checkout decision list on a date typed or picked by the shopper.
///
/// Returns a JSON string: `{"accepted": true, "date": "..."}` or
/// `{"accepted": false, "code": "...", "message": "..."}`. An unparseable
/// `date` is a rejection (`InvalidDate`), not a thrown error.
#[wasm_bindgen(js_name = "validateDeliveryDate")]
pub fn validate_delivery_date(date: &str, today: &str, rules_json: &str) -> Result<String, JsValue> {
    validate_json(date, today, rules_json).map_err(|e| JsValue::from_str(&e))
}

/// Everything the date picker needs: min date, disabled days and dates,
/// placeholder text.
#[wasm_bindgen(js_name = "checkoutHints")]
pub fn checkout_hints(settings_json: &str, today: &str) -> Result<String, JsValue> {
    checkout_hints_json(settings_json, today).map_err(|e| JsValue::from_str(&e))
}
