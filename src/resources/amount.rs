//! Lenient decoding of monetary amounts.
//!
//! The backend serializes decimals as strings (`"185000.00"`) and computed
//! prices as numbers. Both are accepted; text that is not a plain number
//! decodes to `None` instead of failing the whole record.

use serde::{Deserialize, Deserializer};

/// Parses a decimal amount from text, tolerating surrounding whitespace.
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Deserializes an optional amount given as a number, a numeric string or null.
///
/// # Errors
///
/// Only fails when the JSON value is neither a number, a string nor null.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawAmount::Number(value)) => Some(value),
        Some(RawAmount::Text(text)) => parse_amount(&text),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(default, deserialize_with = "lenient")]
        price: Option<f64>,
    }

    fn decode(json: &str) -> Option<f64> {
        serde_json::from_str::<Priced>(json).unwrap().price
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        assert_eq!(decode(r#"{"price": 1000}"#), Some(1000.0));
        assert_eq!(decode(r#"{"price": "185000.00"}"#), Some(185_000.0));
        assert_eq!(decode(r#"{"price": " 800 "}"#), Some(800.0));
    }

    #[test]
    fn test_missing_null_and_garbage_become_none() {
        assert_eq!(decode("{}"), None);
        assert_eq!(decode(r#"{"price": null}"#), None);
        assert_eq!(decode(r#"{"price": "185 000 FCFA"}"#), None);
    }
}
