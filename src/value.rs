//! Decoding of command-line literals into tree values.

use serde_json::{Map, Number, Value};

/// Decode a literal argument into a structured value.
///
/// Candidates are tried in a fixed priority order, first success wins:
/// JSON object, base-10 integer, float, `true`/`false`, and finally the
/// literal string itself.
///
/// The order makes the decoding deliberately lossy: a literal `101`
/// always becomes the integer and can never be written as the string
/// `"101"`. That ambiguity is long-standing shell behavior and is kept
/// for compatibility.
pub fn decode(literal: &str) -> Value {
    if let Ok(object) = serde_json::from_str::<Map<String, Value>>(literal) {
        return Value::Object(object);
    }

    if let Ok(i) = literal.parse::<i64>() {
        return Value::from(i);
    }

    if let Ok(f) = literal.parse::<f64>() {
        // NaN and the infinities have no JSON representation; let them
        // fall through to the string case.
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }

    match literal {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(literal.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_integers() {
        assert_eq!(decode("101"), json!(101));
        assert_eq!(decode("-7"), json!(-7));
        assert_eq!(decode("00"), json!(0));
    }

    #[test]
    fn test_decodes_floats() {
        assert_eq!(decode("102.12"), json!(102.12));
        assert_eq!(decode("1e3"), json!(1000.0));
    }

    #[test]
    fn test_decodes_booleans() {
        assert_eq!(decode("true"), json!(true));
        assert_eq!(decode("false"), json!(false));
        // Only the exact lowercase literals count.
        assert_eq!(decode("True"), json!("True"));
    }

    #[test]
    fn test_decodes_json_objects() {
        assert_eq!(decode(r#"{"key": "value"}"#), json!({"key": "value"}));
        assert_eq!(decode(r#"{"n": 1, "nested": {"x": true}}"#), json!({"n": 1, "nested": {"x": true}}));
    }

    #[test]
    fn test_everything_else_is_a_string() {
        assert_eq!(decode("hello"), json!("hello"));
        assert_eq!(decode("[1, 2]"), json!("[1, 2]"));
        assert_eq!(decode("{not json}"), json!("{not json}"));
        assert_eq!(decode("NaN"), json!("NaN"));
    }

    #[test]
    fn test_integer_wins_over_float() {
        assert_eq!(decode("5"), json!(5));
        assert!(decode("5").is_i64());
    }
}
