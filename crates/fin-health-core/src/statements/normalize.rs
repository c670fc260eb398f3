//! Permissive coercion of raw statement records.
//!
//! Raw records arrive as JSON objects whose values may be numbers, numeric
//! strings, `null`, or garbage. Every conversion here degrades to `None`
//! instead of failing.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::types::FiscalYear;

/// One raw statement record: field name -> scalar value.
pub type RawRecord = Map<String, Value>;

/// Convert a JSON scalar into a decimal, or `None` when it is not numeric.
pub fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                parse_decimal(&n.to_string())
            }
        }
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

/// Read a declared numeric field.
pub fn numeric_field(raw: &RawRecord, key: &str) -> Option<Decimal> {
    raw.get(key).and_then(coerce_decimal)
}

/// Read the fiscal year from `fiscal_year`, falling back to `year`.
///
/// Only integral values that fit an `i32` are accepted.
pub fn fiscal_year_field(raw: &RawRecord) -> Option<FiscalYear> {
    ["fiscal_year", "year"]
        .iter()
        .filter_map(|key| raw.get(*key))
        .find_map(|v| {
            let d = coerce_decimal(v)?;
            if d.fract().is_zero() {
                d.to_i32()
            } else {
                None
            }
        })
}

/// Read the currency code as a trimmed upper-case string.
pub fn currency_field(raw: &RawRecord) -> Option<String> {
    match raw.get("currency") {
        Some(Value::String(s)) => {
            let code = s.trim();
            if code.is_empty() {
                None
            } else {
                Some(code.to_uppercase())
            }
        }
        _ => None,
    }
}

/// Count keys that are neither identity keys nor in the declared field set.
pub(crate) fn log_unknown_keys(raw: &RawRecord, known: &[&str], kind: &str) {
    let dropped = raw
        .keys()
        .filter(|k| !is_identity_key(k) && !known.contains(&k.as_str()))
        .count();
    if dropped > 0 {
        tracing::debug!(kind, dropped, "ignoring unsupported statement fields");
    }
}

fn is_identity_key(key: &str) -> bool {
    matches!(key, "fiscal_year" | "year" | "currency")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_coerce_numbers_and_strings() {
        assert_eq!(coerce_decimal(&json!(42)), Some(dec!(42)));
        assert_eq!(coerce_decimal(&json!(-7)), Some(dec!(-7)));
        assert_eq!(coerce_decimal(&json!(12.5)), Some(dec!(12.5)));
        assert_eq!(coerce_decimal(&json!(" 1500.25 ")), Some(dec!(1500.25)));
        assert_eq!(coerce_decimal(&json!("2.5e3")), Some(dec!(2500)));
    }

    #[test]
    fn test_coerce_rejects_non_numeric() {
        assert_eq!(coerce_decimal(&json!(null)), None);
        assert_eq!(coerce_decimal(&json!("")), None);
        assert_eq!(coerce_decimal(&json!("n/a")), None);
        assert_eq!(coerce_decimal(&json!(true)), None);
        assert_eq!(coerce_decimal(&json!([1, 2])), None);
        assert_eq!(coerce_decimal(&json!({"v": 1})), None);
    }

    #[test]
    fn test_fiscal_year_sources() {
        assert_eq!(fiscal_year_field(&record(json!({"fiscal_year": 2022}))), Some(2022));
        assert_eq!(fiscal_year_field(&record(json!({"year": "2021"}))), Some(2021));
        // fiscal_year takes priority over year
        assert_eq!(
            fiscal_year_field(&record(json!({"fiscal_year": 2020, "year": 2019}))),
            Some(2020)
        );
        // unusable fiscal_year falls back to year
        assert_eq!(
            fiscal_year_field(&record(json!({"fiscal_year": "soon", "year": 2019}))),
            Some(2019)
        );
        assert_eq!(fiscal_year_field(&record(json!({"year": 2021.5}))), None);
        assert_eq!(fiscal_year_field(&record(json!({}))), None);
    }

    #[test]
    fn test_currency_normalized() {
        assert_eq!(
            currency_field(&record(json!({"currency": " eur "}))),
            Some("EUR".to_string())
        );
        assert_eq!(currency_field(&record(json!({"currency": "  "}))), None);
        assert_eq!(currency_field(&record(json!({"currency": 978}))), None);
    }
}
