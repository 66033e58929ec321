//! Lenient coercion of raw JSON scalars

use serde_json::{Map, Value};

/// Best-effort numeric conversion for fee amounts
///
/// Numbers convert directly and numeric strings are parsed; anything else
/// (absent, null, bool, array, object, non-numeric or non-finite text)
/// becomes `0.0`.
pub fn parse_number(raw: Option<&Value>) -> f64 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Text value of `key`: trimmed strings (blank → `None`) and rendered numbers
pub fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Short code of a record for log messages
pub fn display_code(record: &Map<String, Value>) -> String {
    text_field(record, "siglas").unwrap_or_else(|| "<none>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_number_accepts_numbers_and_numeric_text() {
        assert_eq!(parse_number(Some(&json!(18.46))), 18.46);
        assert_eq!(parse_number(Some(&json!(12))), 12.0);
        assert_eq!(parse_number(Some(&json!("37.5"))), 37.5);
        assert_eq!(parse_number(Some(&json!("  80 "))), 80.0);
        assert_eq!(parse_number(Some(&json!("-3"))), -3.0);
    }

    #[test]
    fn test_parse_number_falls_back_to_zero() {
        assert_eq!(parse_number(None), 0.0);
        assert_eq!(parse_number(Some(&Value::Null)), 0.0);
        assert_eq!(parse_number(Some(&json!(""))), 0.0);
        assert_eq!(parse_number(Some(&json!("n/d"))), 0.0);
        assert_eq!(parse_number(Some(&json!("12,5"))), 0.0);
        assert_eq!(parse_number(Some(&json!("NaN"))), 0.0);
        assert_eq!(parse_number(Some(&json!("inf"))), 0.0);
        assert_eq!(parse_number(Some(&json!(true))), 0.0);
        assert_eq!(parse_number(Some(&json!([1, 2]))), 0.0);
        assert_eq!(parse_number(Some(&json!({"value": 1}))), 0.0);
    }

    #[test]
    fn test_text_field() {
        let record = json!({
            "nombre": "  Universidad de Sevilla ",
            "centro": "",
            "campus": null,
            "codigo": 41,
            "lista": ["a"]
        });
        let record = record.as_object().unwrap();

        assert_eq!(text_field(record, "nombre").as_deref(), Some("Universidad de Sevilla"));
        assert_eq!(text_field(record, "centro"), None);
        assert_eq!(text_field(record, "campus"), None);
        assert_eq!(text_field(record, "codigo").as_deref(), Some("41"));
        assert_eq!(text_field(record, "lista"), None);
        assert_eq!(text_field(record, "missing"), None);
        assert_eq!(display_code(record), "<none>");
    }
}
