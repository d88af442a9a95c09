// Field-level validation rules

use serde_json::Value;

/// Validate that a string is not empty (whitespace counts as content)
pub fn validate_required(value: &str) -> Result<(), String> {
    if value.is_empty() {
        Err("is required".to_string())
    } else {
        Ok(())
    }
}

/// Length as a browser form counts it, in UTF-16 code units
pub fn form_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Validate a minimum length, counted in form characters
pub fn validate_min_chars(value: &str, min: usize) -> Result<(), String> {
    if form_length(value) < min {
        Err(format!("must be at least {} characters", min))
    } else {
        Ok(())
    }
}

/// Validate a maximum length, counted in form characters
pub fn validate_max_chars(value: &str, max: usize) -> Result<(), String> {
    if form_length(value) > max {
        Err(format!("must be at most {} characters", max))
    } else {
        Ok(())
    }
}

/// Validate a character count within `min..=max`
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), String> {
    validate_min_chars(value, min)?;
    validate_max_chars(value, max)
}

/// Validate email address shape (local@domain.tld, no whitespace)
pub fn validate_email(value: &str) -> Result<(), String> {
    let invalid = || Err(format!("Invalid email address: '{}'", value));
    if value.chars().any(char::is_whitespace) {
        return invalid();
    }
    let Some((local, domain)) = value.split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') {
        return invalid();
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return invalid();
    }
    let tld = labels[labels.len() - 1];
    if tld.chars().count() < 2 || !tld.chars().all(char::is_alphabetic) {
        return invalid();
    }
    Ok(())
}

/// Coerce a form value to a number the way a number input does
///
/// Numbers pass through, numeric strings are parsed, empty strings and null
/// are treated as 0. Anything else is not a number.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Validate a number strictly greater than zero
pub fn validate_positive(value: &Value) -> Result<f64, String> {
    match coerce_number(value) {
        Some(n) if n > 0.0 => Ok(n),
        Some(_) => Err("must be greater than 0".to_string()),
        None => Err(format!("Invalid number: {}", value)),
    }
}

/// Validate a number within `min..=max`
pub fn validate_range(value: &Value, min: f64, max: f64) -> Result<f64, String> {
    match coerce_number(value) {
        Some(n) if n < min => Err(format!("must be at least {}", min)),
        Some(n) if n > max => Err(format!("must be at most {}", max)),
        Some(n) => Ok(n),
        None => Err(format!("Invalid number: {}", value)),
    }
}
