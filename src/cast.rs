//! Lenient coercions used by model `set_value` implementations.
//!
//! Submitted form values arrive as strings more often than not, so the
//! write side of a model accepts anything that reads cleanly as the
//! target type and rejects the rest. A rejected value leaves the field
//! untouched.

use serde_json::Value;

/// Coerces a value to an integer. Accepts numbers and numeric strings.
///
/// # Examples
///
/// ```
/// use formbind::cast::cast_i64;
/// use serde_json::json;
///
/// assert_eq!(cast_i64(&json!(2)), Some(2));
/// assert_eq!(cast_i64(&json!("2")), Some(2));
/// assert_eq!(cast_i64(&json!("x")), None);
/// assert_eq!(cast_i64(&json!(null)), None);
/// ```
pub fn cast_i64(value: &Value) -> Option<i64> {
	match value {
		Value::Number(number) => number.as_i64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

/// Coerces a value to a float. Accepts numbers and numeric strings.
pub fn cast_f64(value: &Value) -> Option<f64> {
	match value {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

/// Coerces a value to a boolean.
///
/// Strings `"1"` and `"true"` read as `true`; `""`, `"0"` and `"false"`
/// read as `false`. Numbers read by zero-ness.
pub fn cast_bool(value: &Value) -> Option<bool> {
	match value {
		Value::Bool(flag) => Some(*flag),
		Value::String(text) => match text.as_str() {
			"1" | "true" => Some(true),
			"" | "0" | "false" => Some(false),
			_ => None,
		},
		Value::Number(number) => Some(number.as_f64().is_some_and(|n| n != 0.0)),
		_ => None,
	}
}

/// Coerces a value to a string. Numbers and booleans render to their
/// canonical text form.
pub fn cast_string(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}

/// Coerces a value for an array-typed property.
///
/// Arrays and maps pass through unchanged. Anything else, including
/// `null`, coerces to an empty array.
pub fn cast_array(value: &Value) -> Value {
	match value {
		Value::Array(_) | Value::Object(_) => value.clone(),
		_ => Value::Array(Vec::new()),
	}
}
