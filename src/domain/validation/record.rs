//! Field rules for a single uploaded item.

use crate::domain::model::{round_amount, NewMenuItem, DEFAULT_CATEGORY};
use crate::domain::upload::RawRecord;
use serde_json::Value as JsonValue;

pub const NAME_REQUIRED: &str = "Item name is required";
pub const PRICE_REQUIRED: &str = "Valid price is required";
pub const COST_INVALID: &str = "Cost must be a valid positive number";
pub const SALES_COUNT_INVALID: &str = "Sales count must be a non-negative whole number";
pub const AVAILABILITY_INVALID: &str = "Availability must be true or false";

/// How a field showed up in the raw record.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field<T> {
    Absent,
    Invalid,
    Present(T),
}

/// Validates one raw record and normalizes it into an item.
///
/// Every rule is evaluated; on failure all messages are returned in rule order.
pub fn validate(record: &RawRecord) -> Result<NewMenuItem, Vec<String>> {
    let mut errors = Vec::new();

    let name = match record.get("name") {
        Some(JsonValue::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    };
    if name.is_none() {
        errors.push(NAME_REQUIRED.to_string());
    }

    // Amounts are kept in whole cents; a price that rounds to zero is no price.
    let price = match number_field(record, "price").map(round_amount) {
        Field::Present(p) if p > 0.0 => Some(p),
        _ => None,
    };
    if price.is_none() {
        errors.push(PRICE_REQUIRED.to_string());
    }

    let cost = match number_field(record, "cost") {
        Field::Absent => Some(0.0),
        Field::Present(c) if c >= 0.0 => Some(round_amount(c)),
        _ => None,
    };
    if cost.is_none() {
        errors.push(COST_INVALID.to_string());
    }

    let sales_count = match count_field(record, "sales_count") {
        Field::Absent => Some(0),
        Field::Present(n) => Some(n),
        Field::Invalid => None,
    };
    if sales_count.is_none() {
        errors.push(SALES_COUNT_INVALID.to_string());
    }

    let is_available = match bool_field(record, "is_available") {
        Field::Absent => Some(true),
        Field::Present(b) => Some(b),
        Field::Invalid => None,
    };
    if is_available.is_none() {
        errors.push(AVAILABILITY_INVALID.to_string());
    }

    match (name, price, cost, sales_count, is_available) {
        (Some(name), Some(price), Some(cost), Some(sales_count), Some(is_available)) => {
            Ok(NewMenuItem {
                name,
                description: text_field(record, "description"),
                price,
                cost,
                category: text_field(record, "category")
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                tags: tags_field(record, "tags"),
                sales_count,
                is_available,
            })
        }
        _ => Err(errors),
    }
}

/// Looks up `key`, treating `null` and blank strings as missing.
fn present<'a>(record: &'a RawRecord, key: &str) -> Option<&'a JsonValue> {
    match record.get(key) {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

impl<T> Field<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Invalid => Field::Invalid,
            Field::Present(v) => Field::Present(f(v)),
        }
    }
}

fn number_field(record: &RawRecord, key: &str) -> Field<f64> {
    let Some(value) = present(record, key) else {
        return Field::Absent;
    };
    let parsed = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Field::Present(n),
        _ => Field::Invalid,
    }
}

fn count_field(record: &RawRecord, key: &str) -> Field<i32> {
    match number_field(record, key) {
        Field::Absent => Field::Absent,
        Field::Present(n) if n >= 0.0 && n.fract() == 0.0 && n <= i32::MAX as f64 => {
            Field::Present(n as i32)
        }
        _ => Field::Invalid,
    }
}

fn bool_field(record: &RawRecord, key: &str) -> Field<bool> {
    let Some(value) = present(record, key) else {
        return Field::Absent;
    };
    match value {
        JsonValue::Bool(b) => Field::Present(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(1) => Field::Present(true),
            Some(0) => Field::Present(false),
            _ => Field::Invalid,
        },
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Field::Present(true),
            "false" | "no" | "0" => Field::Present(false),
            _ => Field::Invalid,
        },
        _ => Field::Invalid,
    }
}

fn text_field(record: &RawRecord, key: &str) -> Option<String> {
    match present(record, key)? {
        JsonValue::String(s) => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Splits a comma-delimited string (or takes a JSON array) into trimmed, non-empty tags.
fn tags_field(record: &RawRecord, key: &str) -> Vec<String> {
    let pieces: Vec<String> = match present(record, key) {
        Some(JsonValue::String(s)) => s.split(',').map(str::to_string).collect(),
        Some(JsonValue::Array(values)) => values
            .iter()
            .filter_map(|v| match v {
                JsonValue::String(s) => Some(s.clone()),
                JsonValue::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    pieces
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
