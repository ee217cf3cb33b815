//! Lenient Deserializers
//!
//! The API is loosely typed: numbers arrive as strings, relations arrive as
//! an object, a one-element array, or `null`. These helpers normalize all of
//! that once, at the boundary, so nothing downstream needs to guard.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn number_from(value: Option<Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Number, numeric string, or null (as 0.0)
pub fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(number_from(Option::<Value>::deserialize(d)?).unwrap_or(0.0))
}

/// Integer, numeric string, or null (as 0)
pub fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(number_from(Option::<Value>::deserialize(d)?)
        .map(|n| n.round() as i64)
        .unwrap_or(0))
}

/// Optional id: a number, a numeric string, or absent
pub fn optional_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(number_from(Option::<Value>::deserialize(d)?).map(|n| n as i64))
}

/// `null` becomes `T::default()`
pub fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Blank strings collapse to `None`
pub fn non_blank<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Joined relation: object, first element of an array, or nothing.
/// A malformed relation is treated as missing rather than failing the row.
pub fn relation<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(d)?;
    let object = match value {
        Some(obj @ Value::Object(_)) => Some(obj),
        Some(Value::Array(mut items)) if !items.is_empty() => Some(items.swap_remove(0)),
        _ => None,
    };
    Ok(object.and_then(|v| serde_json::from_value(v).ok()))
}

/// Calendar date from `YYYY-MM-DD` or any timestamp starting with it
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "optional_id")]
        customer_id: Option<i64>,
        #[serde(default, deserialize_with = "relation")]
        users: Option<Named>,
        #[serde(default, deserialize_with = "non_blank")]
        phone: Option<String>,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).expect("row parses")
    }

    #[test]
    fn test_numbers_from_strings_and_nulls() {
        assert_eq!(row(r#"{"amount": "12.5"}"#).amount, 12.5);
        assert_eq!(row(r#"{"amount": null}"#).amount, 0.0);
        assert_eq!(row(r#"{"amount": "n/a"}"#).amount, 0.0);
        assert_eq!(row(r#"{}"#).amount, 0.0);
        assert_eq!(row(r#"{"customer_id": "7"}"#).customer_id, Some(7));
        assert_eq!(row(r#"{"customer_id": null}"#).customer_id, None);
    }

    #[test]
    fn test_relation_shapes() {
        let obj = row(r#"{"users": {"name": "Asha"}}"#);
        assert_eq!(obj.users.unwrap().name.as_deref(), Some("Asha"));

        let arr = row(r#"{"users": [{"name": "Ravi"}]}"#);
        assert_eq!(arr.users.unwrap().name.as_deref(), Some("Ravi"));

        assert!(row(r#"{"users": []}"#).users.is_none());
        assert!(row(r#"{"users": null}"#).users.is_none());
        assert!(row(r#"{"users": "broken"}"#).users.is_none());
    }

    #[test]
    fn test_blank_strings_are_none() {
        assert!(row(r#"{"phone": "  "}"#).phone.is_none());
        assert_eq!(row(r#"{"phone": 98765}"#).phone.as_deref(), Some("98765"));
    }

    #[test]
    fn test_parse_date_accepts_timestamps() {
        let d = parse_date("2024-06-01T10:22:00+05:30").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 6, 1));
        assert!(parse_date("2024-6-1").is_none());
        assert!(parse_date("").is_none());
    }
}
