//! Raw cell values and the total coercion functions applied to them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tokens accepted as `true` when coercing a leap flag.
pub const TRUE_TOKENS: &[&str] = &["true", "1", "yes"];

/// A single cell of a raw, caller-supplied table.
///
/// Deserializes untagged from JSON: `null`, booleans, numbers and strings.
/// Whole numbers that fit an `i64` stay exact as [`Value::Integer`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Missing,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Value {
    /// Build a text cell, mapping NA-like tokens to [`Value::Missing`].
    pub fn from_cell(raw: &str) -> Self {
        if is_null_token(raw) {
            Value::Missing
        } else {
            Value::Text(raw.to_string())
        }
    }

    /// Whether this cell holds no value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Render the cell as text, or `None` when missing.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Number(n) => Some(format_number(*n)),
            Value::Text(s) => Some(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(s) => f.write_str(&s),
            None => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}

/// Check if a raw string represents a missing/null value.
pub fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// Coerce a cell to a year.
///
/// Integers and integral text parse exactly; finite fractional values are
/// truncated toward zero. Booleans, NA tokens, garbage, NaN and infinities
/// become `None`.
pub fn coerce_year(value: &Value) -> Option<i64> {
    match value {
        Value::Missing | Value::Bool(_) => None,
        Value::Integer(n) => Some(*n),
        Value::Number(n) => truncate_to_year(*n),
        Value::Text(s) => {
            let trimmed = s.trim();
            if is_null_token(trimmed) {
                return None;
            }
            match trimmed.parse::<i64>() {
                Ok(year) => Some(year),
                Err(_) => trimmed.parse::<f64>().ok().and_then(truncate_to_year),
            }
        }
    }
}

fn truncate_to_year(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !n.is_finite() {
        return None;
    }
    let truncated = n.trunc();
    if truncated >= -LIMIT && truncated < LIMIT {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Coerce a cell to a leap flag.
///
/// Booleans pass through. Everything else is rendered, trimmed, lowercased
/// and matched against [`TRUE_TOKENS`]; no match (or a missing cell) is
/// `false`.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Missing => false,
        Value::Integer(n) => *n == 1,
        Value::Number(n) => is_true_token(&format_number(*n)),
        Value::Text(s) => is_true_token(s),
    }
}

fn is_true_token(token: &str) -> bool {
    let normalized = token.trim().to_lowercase();
    TRUE_TOKENS.contains(&normalized.as_str())
}

/// Format a number without a trailing `.0` when it is integral.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null_token() {
        assert!(is_null_token(""));
        assert!(is_null_token("  "));
        assert!(is_null_token("NA"));
        assert!(is_null_token("n/a"));
        assert!(is_null_token("NaN"));
        assert!(is_null_token("null"));
        assert!(is_null_token("."));
        assert!(!is_null_token("0"));
        assert!(!is_null_token("2024"));
    }

    #[test]
    fn test_coerce_year_text() {
        assert_eq!(coerce_year(&Value::from("2024")), Some(2024));
        assert_eq!(coerce_year(&Value::from(" 1900 ")), Some(1900));
        assert_eq!(coerce_year(&Value::from("2024.0")), Some(2024));
        assert_eq!(coerce_year(&Value::from("1999.9")), Some(1999));
        assert_eq!(coerce_year(&Value::from("-44")), Some(-44));
        assert_eq!(coerce_year(&Value::from("twenty")), None);
        assert_eq!(coerce_year(&Value::from("NA")), None);
        assert_eq!(coerce_year(&Value::from("inf")), None);
    }

    #[test]
    fn test_coerce_year_other_variants() {
        assert_eq!(coerce_year(&Value::Number(2000.0)), Some(2000));
        assert_eq!(coerce_year(&Value::Integer(2000)), Some(2000));
        assert_eq!(coerce_year(&Value::Number(f64::NAN)), None);
        assert_eq!(coerce_year(&Value::Number(1e300)), None);
        assert_eq!(coerce_year(&Value::Missing), None);
        assert_eq!(coerce_year(&Value::Bool(true)), None);
    }

    #[test]
    fn test_coerce_flag_tokens() {
        for token in ["True", "true", "TRUE", "1", "yes", "YES", "  Yes  "] {
            assert!(coerce_flag(&Value::from(token)), "{token:?} should be true");
        }
        for token in ["False", "0", "no", "", "garbage", "y", "t"] {
            assert!(!coerce_flag(&Value::from(token)), "{token:?} should be false");
        }
    }

    #[test]
    fn test_coerce_flag_non_text() {
        assert!(coerce_flag(&Value::Bool(true)));
        assert!(!coerce_flag(&Value::Bool(false)));
        assert!(coerce_flag(&Value::Number(1.0)));
        assert!(!coerce_flag(&Value::Number(0.0)));
        assert!(!coerce_flag(&Value::Number(2.0)));
        assert!(coerce_flag(&Value::Integer(1)));
        assert!(!coerce_flag(&Value::Integer(11)));
        assert!(!coerce_flag(&Value::Missing));
    }

    #[test]
    fn test_value_from_json() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[null, true, 2000, 1.5, "2024"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Missing,
                Value::Bool(true),
                Value::Integer(2000),
                Value::Number(1.5),
                Value::Text("2024".to_string()),
            ]
        );
    }

    #[test]
    fn test_render() {
        assert_eq!(Value::Number(2000.0).render().as_deref(), Some("2000"));
        assert_eq!(Value::Number(0.25).render().as_deref(), Some("0.25"));
        assert_eq!(Value::Bool(false).render().as_deref(), Some("false"));
        assert_eq!(Value::Missing.render(), None);
        assert_eq!(Value::from_cell(" n/a "), Value::Missing);
    }

    #[test]
    fn test_large_years_stay_exact() {
        let year = 9_007_199_254_740_993_i64;
        assert_eq!(coerce_year(&Value::from(year)), Some(year));
        assert_eq!(Value::from(year).render().as_deref(), Some("9007199254740993"));

        let parsed: Value = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(parsed, Value::Integer(year));
    }
}
