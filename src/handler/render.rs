//! Text rendering of the pricing response
//!
//! `option_price` is treated as opaque: it is never coerced to a number,
//! only stringified the way a browser interpolates a value into a template
//! string (`${value}`).

use serde_json::{Number, Value};

pub const RESULT_PREFIX: &str = "Option Price: ";

/// Message written into the result element for a parsed response.
pub fn render_result(response: &Value) -> String {
    format!("{}{}", RESULT_PREFIX, interpolate(response.get("option_price")))
}

/// Default template-string interpolation. `None` is an absent property.
pub fn interpolate(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => format_number(n),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => interpolate(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Largest integer a double holds exactly (2^53).
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_992;

fn format_number(n: &Number) -> String {
    // Beyond 2^53 the browser only ever sees the nearest double
    if let Some(i) = n.as_i64() {
        if i.unsigned_abs() <= MAX_SAFE_INTEGER {
            return i.to_string();
        }
    }
    if let Some(u) = n.as_u64() {
        if u <= MAX_SAFE_INTEGER {
            return u.to_string();
        }
    }
    n.as_f64().map(format_f64).unwrap_or_else(|| n.to_string())
}

/// Shortest round-trip form; exponent notation outside `[1e-6, 1e21)`.
fn format_f64(v: f64) -> String {
    if v == 0.0 {
        // -0 prints as 0
        return "0".to_string();
    }
    let magnitude = v.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", v);
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        }
    } else {
        format!("{}", v)
    }
}
