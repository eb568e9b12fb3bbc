// ABOUTME: Conversions between row values and raw form input strings
// ABOUTME: Numbers and checkboxes are submitted typed; other kinds are submitted as strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::datatable::format::display_value;
use admin_panel_core::schema::FieldKind;
use serde_json::{Number, Value};

/// Whether a raw checkbox value means checked
#[must_use]
pub fn is_checked(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

/// Raw input string used to prefill a field from a row value
#[must_use]
pub fn to_input(value: &Value) -> String {
    display_value(value)
}

/// Payload value for a raw input string
#[must_use]
pub fn from_input(kind: &FieldKind, raw: &str) -> Value {
    match kind {
        FieldKind::Number { .. } => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Value::Null;
            }
            if let Ok(integer) = trimmed.parse::<i64>() {
                return Value::Number(integer.into());
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map_or_else(|| Value::String(raw.to_owned()), Value::Number)
        }
        FieldKind::Checkbox => Value::Bool(is_checked(raw)),
        _ => Value::String(raw.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_payload_values() {
        let number = FieldKind::Number { min: None, max: None };
        assert_eq!(from_input(&number, "42"), json!(42));
        assert_eq!(from_input(&number, " 4.5 "), json!(4.5));
        assert_eq!(from_input(&number, ""), Value::Null);
        assert_eq!(from_input(&FieldKind::Checkbox, "on"), json!(true));
        assert_eq!(from_input(&FieldKind::Checkbox, ""), json!(false));
        assert_eq!(from_input(&FieldKind::Text, " Ada "), json!(" Ada "));
    }

    #[test]
    fn test_prefill_strings() {
        assert_eq!(to_input(&json!("Ada")), "Ada");
        assert_eq!(to_input(&json!(12)), "12");
        assert_eq!(to_input(&json!(true)), "true");
        assert_eq!(to_input(&Value::Null), "");
    }
}
