use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Result of the lenient leading-integer parse applied to form input.
///
/// Anything without leading digits becomes [`ParsedInt::NotANumber`], which
/// is still forwarded to Stripe (as `NaN`) so that the provider decides
/// whether to reject it. Digit runs too long for an `i64` are kept verbatim
/// as [`ParsedInt::Large`] rather than collapsing to `NaN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedInt {
    Number(i64),
    Large(String),
    NotANumber,
}

impl ParsedInt {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::NotANumber;
        };

        let trimmed = raw.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(idx, _)| &rest[..idx])
            .unwrap_or(rest);

        if digits.is_empty() {
            return Self::NotANumber;
        }

        match digits.parse::<i64>() {
            Ok(value) if negative => Self::Number(-value),
            Ok(value) => Self::Number(value),
            // only overflow is left once the run is all ASCII digits
            Err(_) => {
                let digits = digits.trim_start_matches('0');
                Self::Large(format!("{}{}", if negative { "-" } else { "" }, digits))
            }
        }
    }
}

impl Serialize for ParsedInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(value) => serializer.serialize_i64(*value),
            Self::Large(digits) => serializer.serialize_str(digits),
            Self::NotANumber => serializer.serialize_str("NaN"),
        }
    }
}

pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Treats empty strings the same as missing values.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Reads any JSON scalar as its textual form; `null` and structured values
/// are treated as absent.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    })
}

/// Flattens a JSON value into Stripe's bracketed form encoding
/// (`individual[dob][day]=12`, `line_items[0][quantity]=1`). Nulls are skipped.
pub fn to_form_pairs(value: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    if let Value::Object(map) = value {
        for (key, value) in map {
            flatten_into(key.clone(), value, &mut pairs);
        }
    }

    pairs
}

fn flatten_into(prefix: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => (),
        Value::Bool(value) => pairs.push((prefix, value.to_string())),
        Value::Number(value) => pairs.push((prefix, value.to_string())),
        Value::String(value) => pairs.push((prefix, value.clone())),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                flatten_into(format!("{}[{}]", prefix, idx), item, pairs);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten_into(format!("{}[{}]", prefix, key), item, pairs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_leading_integer_like_a_form_field() {
        assert_eq!(ParsedInt::parse(Some("12")), ParsedInt::Number(12));
        assert_eq!(ParsedInt::parse(Some("  07")), ParsedInt::Number(7));
        assert_eq!(ParsedInt::parse(Some("1990abc")), ParsedInt::Number(1990));
        assert_eq!(ParsedInt::parse(Some("-3")), ParsedInt::Number(-3));
        assert_eq!(ParsedInt::parse(Some("abc")), ParsedInt::NotANumber);
        assert_eq!(ParsedInt::parse(Some("")), ParsedInt::NotANumber);
        assert_eq!(ParsedInt::parse(None), ParsedInt::NotANumber);
    }

    #[test]
    fn keeps_digit_runs_beyond_i64() {
        assert_eq!(
            ParsedInt::parse(Some("00099999999999999999999x")),
            ParsedInt::Large(String::from("99999999999999999999"))
        );
        assert_eq!(
            ParsedInt::parse(Some("-12345678901234567890")),
            ParsedInt::Large(String::from("-12345678901234567890"))
        );

        let pairs = to_form_pairs(&json!({
            "year": ParsedInt::parse(Some("12345678901234567890"))
        }));
        assert_eq!(
            pairs,
            vec![("year".to_string(), "12345678901234567890".to_string())]
        );
    }

    #[test]
    fn not_a_number_serializes_as_nan_literal() {
        let value = serde_json::to_value(ParsedInt::NotANumber).unwrap();
        assert_eq!(value, json!("NaN"));
    }

    #[test]
    fn strips_every_kind_of_whitespace() {
        assert_eq!(
            strip_whitespace("FR76 3000\t1000 \n0123"),
            "FR76300010000123"
        );
    }

    #[test]
    fn flattens_nested_objects_and_arrays() {
        let pairs = to_form_pairs(&json!({
            "type": "custom",
            "individual": { "dob": { "day": 12 }, "phone": null },
            "line_items": [{ "quantity": 1 }],
            "capabilities": { "transfers": { "requested": true } },
        }));

        assert!(pairs.contains(&("type".into(), "custom".into())));
        assert!(pairs.contains(&("individual[dob][day]".into(), "12".into())));
        assert!(pairs.contains(&("line_items[0][quantity]".into(), "1".into())));
        assert!(pairs.contains(&(
            "capabilities[transfers][requested]".into(),
            "true".into()
        )));
        assert!(!pairs.iter().any(|(key, _)| key == "individual[phone]"));
    }
}
