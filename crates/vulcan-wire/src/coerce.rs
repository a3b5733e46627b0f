//! # Tolerant Coercion Helpers
//!
//! Every wire field access goes through these helpers — never ad hoc
//! parsing at call sites. The persisted schema is string-typed for monetary
//! values, but real upstream records mix strings, numbers, nulls and
//! partially-numeric strings; all of that must stay loadable for editing.

use serde_json::Value;

// =============================================================================
// Reading
// =============================================================================

/// Coerces a wire value to a finite number, with a field-specific fallback.
///
/// Accepts JSON numbers and strings. String parsing matches the lenient
/// behavior legacy records were written against: leading whitespace is
/// skipped and the longest numeric prefix wins, so `"12.5 kg"` reads as
/// `12.5`. Anything else (null, objects, empty strings, non-numeric text)
/// yields the fallback.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use vulcan_wire::coerce::to_number;
///
/// assert_eq!(to_number(&json!("120"), 0.0), 120.0);
/// assert_eq!(to_number(&json!(120.5), 0.0), 120.5);
/// assert_eq!(to_number(&json!("12.5 kg"), 0.0), 12.5);
/// assert_eq!(to_number(&json!(""), 1.0), 1.0);
/// assert_eq!(to_number(&json!(null), 1.0), 1.0);
/// ```
pub fn to_number(value: &Value, fallback: f64) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_lenient(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(fallback)
}

/// Longest-numeric-prefix parse of a trimmed string.
fn parse_float_lenient(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Fast path: the whole string is a number.
    if let Ok(n) = trimmed.parse::<f64>() {
        return Some(n);
    }
    // Slow path: longest prefix that parses. Wire strings are short, so a
    // backwards scan is plenty.
    for end in (1..trimmed.len()).rev() {
        if !trimmed.is_char_boundary(end) {
            continue;
        }
        if let Ok(n) = trimmed[..end].parse::<f64>() {
            return Some(n);
        }
    }
    None
}

/// Coerces a wire value to a trimmed string.
///
/// Numbers render with their natural display form; null and structured
/// values collapse to the empty string.
pub fn to_trimmed_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Renders a monetary amount as the persisted 2-decimal string.
pub fn fmt_amount(amount: f64) -> String {
    format!("{:.2}", vulcan_core::pricing::round2(amount))
}

/// Renders a non-monetary number (quantity, percent, rate) as persisted:
/// integral values carry no decimal point.
pub fn fmt_number(n: f64) -> String {
    format!("{}", n)
}

/// Geometry snapshot fields fall back to `"0"` when the snapshot is
/// missing or blank, rather than aborting the save.
pub fn geometry_or_zero(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Names
// =============================================================================

/// Splits a persisted full name at the first whitespace.
///
/// Everything after the first gap becomes the last name; a name with no
/// gap is all first name.
///
/// ## Example
/// ```rust
/// use vulcan_wire::coerce::split_full_name;
///
/// assert_eq!(split_full_name("Rayal Nuts"), ("Rayal".into(), "Nuts".into()));
/// assert_eq!(split_full_name("Rayal"), ("Rayal".into(), "".into()));
/// ```
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
